use crate::dataloader::databatch::MiniBatch;

/// Source of flat training batches for the layer stack
pub trait DataLoader {
    fn next_batch(&mut self) -> MiniBatch;

    fn batch_size(&self) -> usize;

    fn reset(&mut self) {}
    fn len(&self) -> Option<usize> {
        None
    }
    fn pos(&self) -> Option<usize> {
        None
    }
}
