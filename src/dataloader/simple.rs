use crate::dataloader::{DataLoader, LabeledEntry, MiniBatch};

/// In-memory entries served in order, wrapping around at the end
pub struct SimpleDataLoader {
    pub id: usize,
    pub batch_size: usize,
    pub data: Vec<LabeledEntry>,
}

impl DataLoader for SimpleDataLoader {
    fn next_batch(&mut self) -> MiniBatch {
        let mut mb = Vec::with_capacity(self.batch_size);

        if self.data.is_empty() {
            return MiniBatch::new(mb);
        }

        for _i in 0..self.batch_size {
            if self.id >= self.data.len() {
                self.id = 0;
            }

            mb.push(&self.data[self.id]);
            self.id += 1;
        }

        MiniBatch::new(mb)
    }

    fn batch_size(&self) -> usize {
        self.batch_size
    }

    fn reset(&mut self) {
        self.id = 0;
    }

    fn len(&self) -> Option<usize> {
        Some(self.data.len())
    }

    fn pos(&self) -> Option<usize> {
        Some(self.id)
    }
}

impl SimpleDataLoader {
    pub fn new(data: Vec<LabeledEntry>, batch_size: usize) -> Self {
        Self {
            id: 0,
            batch_size,
            data,
        }
    }

    pub fn empty() -> Self {
        Self {
            id: 0,
            batch_size: 1,
            data: vec![],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wraps_around() {
        let data = (0..3)
            .map(|i| LabeledEntry::new(vec![i as f32], vec![1.0]))
            .collect();
        let mut dl = SimpleDataLoader::new(data, 2);

        let b = dl.next_batch();
        assert_eq!(b.input.column(0).to_vec(), vec![0.0, 1.0]);

        let b = dl.next_batch();
        assert_eq!(b.input.column(0).to_vec(), vec![2.0, 0.0]);
        assert_eq!(dl.pos(), Some(1));

        dl.reset();
        assert_eq!(dl.pos(), Some(0));
    }

    #[test]
    fn empty_gives_empty_batch() {
        let mut dl = SimpleDataLoader::empty();
        assert!(dl.next_batch().is_empty());
    }
}
