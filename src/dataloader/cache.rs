use crate::dataloader::item_loader::LoadedItem;

/// Loaded items keyed by dataset index.
/// One slot per dataset entry, nothing is ever evicted
#[derive(Clone, Debug, Default)]
pub struct ItemCache {
    slots: Vec<Option<LoadedItem>>,
    filled: usize,
}

impl ItemCache {
    pub fn with_capacity(len: usize) -> Self {
        Self {
            slots: vec![None; len],
            filled: 0,
        }
    }

    pub fn get(&self, index: usize) -> Option<&LoadedItem> {
        self.slots.get(index).and_then(|s| s.as_ref())
    }

    /// Returns the cached item, loading it with `f` on the first access
    pub fn get_or_insert_with<F>(&mut self, index: usize, f: F) -> &LoadedItem
    where
        F: FnOnce() -> LoadedItem,
    {
        if index >= self.slots.len() {
            self.slots.resize(index + 1, None);
        }

        let slot = &mut self.slots[index];
        if slot.is_none() {
            self.filled += 1;
        }

        slot.get_or_insert_with(f)
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn len(&self) -> usize {
        self.filled
    }

    pub fn is_empty(&self) -> bool {
        self.filled == 0
    }
}
