use std::error::Error;

use ndarray::Axis;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use log::{debug, info, warn};

use crate::config::{GeneratorConfig, ImageShape};
use crate::dataloader::*;
use crate::display::{BatchDisplay, MAX_SHOWN};
use crate::err::CustomError;

/// Construction parameters of ImageGenerator
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SamplingParams {
    pub batch_size: usize,
    pub image_size: ImageShape,
    pub rotation: bool,
    pub mirroring: bool,
    pub shuffle: bool,
    /// None seeds from OS entropy
    pub seed: Option<u64>,
}

impl SamplingParams {
    pub fn new(batch_size: usize, image_size: ImageShape) -> Self {
        Self {
            batch_size,
            image_size,
            rotation: false,
            mirroring: false,
            shuffle: false,
            seed: None,
        }
    }

    pub fn rotation(mut self, state: bool) -> Self {
        self.rotation = state;
        self
    }

    pub fn mirroring(mut self, state: bool) -> Self {
        self.mirroring = state;
        self
    }

    pub fn shuffle(mut self, state: bool) -> Self {
        self.shuffle = state;
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    fn validate(&self) -> Result<(), CustomError> {
        if self.batch_size == 0 {
            return Err(CustomError::Config("batch_size must be > 0".to_owned()));
        }

        self.image_size.validate()?;

        if self.rotation && self.image_size.height != self.image_size.width {
            return Err(CustomError::Config(format!(
                "rotation needs a square image size, got {}x{}",
                self.image_size.height, self.image_size.width
            )));
        }

        Ok(())
    }
}

impl From<&GeneratorConfig> for SamplingParams {
    fn from(cfg: &GeneratorConfig) -> Self {
        Self {
            batch_size: cfg.batch_size,
            image_size: cfg.image_size,
            rotation: cfg.rotation,
            mirroring: cfg.mirroring,
            shuffle: cfg.shuffle,
            seed: cfg.seed,
        }
    }
}

/// Batched sampler over a fixed list of dataset identifiers.
///
/// Each `next()` call takes `batch_size` entries from the current permutation.
/// When the epoch runs out, the tail of the old permutation is followed by the
/// head of the new one (reshuffled when `shuffle` is set).
pub struct ImageGenerator {
    dataset: Vec<String>,
    is_placeholder: bool,
    labels: LabelMap,
    loader: Box<dyn ItemLoader>,
    cache: ItemCache,
    augmenter: Augmenter,
    batch_size: usize,
    image_size: ImageShape,
    shuffle: bool,
    permutation: Vec<usize>,
    cursor: usize,
    epoch: usize,
    rng: StdRng,
}

impl ImageGenerator {
    pub fn new(
        dataset: Vec<String>,
        labels: LabelMap,
        params: SamplingParams,
        loader: Box<dyn ItemLoader>,
    ) -> Result<Self, CustomError> {
        params.validate()?;

        if loader.shape() != params.image_size {
            return Err(CustomError::Config(format!(
                "item loader shape {:?} differs from image size {:?}",
                loader.shape(),
                params.image_size
            )));
        }

        let (dataset, is_placeholder) = if dataset.is_empty() {
            warn!("No files found. Creating {} placeholder items", PLACEHOLDER_LEN);
            (placeholder_dataset(), true)
        } else {
            (dataset, false)
        };

        if !is_placeholder && params.batch_size > dataset.len() {
            return Err(CustomError::Config(format!(
                "batch_size {} > dataset length {}",
                params.batch_size,
                dataset.len()
            )));
        }

        let mut rng = match params.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let mut permutation: Vec<usize> = (0..dataset.len()).collect();
        if params.shuffle {
            permutation.shuffle(&mut rng);
        }

        Ok(Self {
            cache: ItemCache::with_capacity(dataset.len()),
            dataset,
            is_placeholder,
            labels,
            loader,
            augmenter: Augmenter::new(params.rotation, params.mirroring),
            batch_size: params.batch_size,
            image_size: params.image_size,
            shuffle: params.shuffle,
            permutation,
            cursor: 0,
            epoch: 0,
            rng,
        })
    }

    /// Generator with synthetic items only
    pub fn with_synthetic(dataset: Vec<String>, params: SamplingParams) -> Result<Self, CustomError> {
        let loader = Box::new(SyntheticItemLoader::new(params.image_size));
        Self::new(dataset, LabelMap::empty(), params, loader)
    }

    /// Lists `file_path`, reads `label_path`, both may be absent
    pub fn from_config(cfg: &GeneratorConfig) -> Result<Self, CustomError> {
        let dataset = list_dataset_dir_or_empty(&cfg.file_path);
        let labels = LabelMap::from_file_or_empty(&cfg.label_path);
        let loader = Box::new(FileItemLoader::new(&cfg.file_path, cfg.image_size));

        let gen = Self::new(dataset, labels, SamplingParams::from(cfg), loader)?;

        info!(
            "ImageGenerator ready : {} items, batch size {}",
            gen.len(),
            gen.batch_size
        );

        Ok(gen)
    }

    /// Next batch of dataset indices, advances cursor and epoch
    fn select_indices(&mut self) -> Vec<usize> {
        let n = self.permutation.len();
        let mut selected = Vec::with_capacity(self.batch_size);

        loop {
            let want = self.batch_size - selected.len();
            let remaining = n - self.cursor;

            if remaining >= want {
                selected.extend_from_slice(&self.permutation[self.cursor..self.cursor + want]);
                self.cursor += want;
                break;
            }

            // epoch tail, then continue from the start of a new epoch
            selected.extend_from_slice(&self.permutation[self.cursor..]);
            self.epoch += 1;
            self.cursor = 0;

            if self.shuffle {
                self.permutation.shuffle(&mut self.rng);
            }

            debug!("ImageGenerator epoch {} started", self.epoch);
        }

        selected
    }

    pub fn next(&mut self) -> ImageBatch {
        let indices = self.select_indices();
        let shape = self.image_size;

        let mut batch = ImageBatch::zeros(self.batch_size, shape);

        let loader = &self.loader;
        let dataset = &self.dataset;
        let labels = &self.labels;

        for (slot, idx) in indices.iter().enumerate() {
            let idx = *idx;

            let item = self.cache.get_or_insert_with(idx, || {
                let item = loader.load(idx, &dataset[idx], labels);

                if item.image.dim() != shape.dim() {
                    warn!(
                        "Item {} has shape {:?}, expected {:?}. Using synthetic item",
                        dataset[idx],
                        item.image.dim(),
                        shape.dim()
                    );
                    return synthetic_item(idx, shape);
                }

                item
            });

            let img = self.augmenter.augment(&item.image, &mut self.rng);

            batch.images.index_axis_mut(Axis(0), slot).assign(&img);
            batch.labels[slot] = item.label;
        }

        batch.indices = indices;

        debug!(
            "[ok] ImageGenerator next() : epoch {}, cursor {}",
            self.epoch, self.cursor
        );

        batch
    }

    /// Completed wraparounds
    pub fn current_epoch(&self) -> usize {
        self.epoch
    }

    pub fn class_name(&self, id: i32) -> String {
        class_name(id)
    }

    /// Draws the next batch and passes up to 10 images to `display`
    pub fn show(&mut self, display: &mut dyn BatchDisplay) -> Result<(), Box<dyn Error>> {
        let batch = self.next();

        let titles: Vec<String> = batch
            .labels
            .iter()
            .take(MAX_SHOWN)
            .map(|lbl| class_name(*lbl))
            .collect();

        display.show(&batch, &titles)
    }

    pub fn len(&self) -> usize {
        self.dataset.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dataset.is_empty()
    }

    pub fn is_placeholder(&self) -> bool {
        self.is_placeholder
    }

    pub fn identifiers(&self) -> &[String] {
        &self.dataset
    }

    pub fn image_size(&self) -> ImageShape {
        self.image_size
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn cached_items(&self) -> usize {
        self.cache.len()
    }
}

impl DataLoader for ImageGenerator {
    fn next_batch(&mut self) -> MiniBatch {
        self.next().to_mini_batch(NUM_CLASSES)
    }

    fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// Rewinds to the first epoch, a shuffled generator draws a new permutation
    fn reset(&mut self) {
        self.cursor = 0;
        self.epoch = 0;

        if self.shuffle {
            self.permutation.shuffle(&mut self.rng);
        }
    }

    fn len(&self) -> Option<usize> {
        Some(self.dataset.len())
    }

    fn pos(&self) -> Option<usize> {
        Some(self.cursor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn names(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("{}.npy", i)).collect()
    }

    fn params(batch_size: usize) -> SamplingParams {
        SamplingParams::new(batch_size, ImageShape::new(4, 4, 3)).seed(42)
    }

    #[test]
    fn wraparound_scenario() {
        let mut gen = ImageGenerator::with_synthetic(names(7), params(3)).unwrap();

        assert_eq!(gen.next().indices, vec![0, 1, 2]);
        assert_eq!(gen.current_epoch(), 0);
        assert_eq!(gen.next().indices, vec![3, 4, 5]);
        assert_eq!(gen.current_epoch(), 0);
        assert_eq!(gen.next().indices, vec![6, 0, 1]);
        assert_eq!(gen.current_epoch(), 1);
        assert_eq!(gen.next().indices, vec![2, 3, 4]);
        assert_eq!(gen.cursor(), 5);
    }

    #[test]
    fn exact_fit_wraps_lazily() {
        let mut gen = ImageGenerator::with_synthetic(names(6), params(3)).unwrap();

        gen.next();
        gen.next();
        assert_eq!(gen.current_epoch(), 0);

        assert_eq!(gen.next().indices, vec![0, 1, 2]);
        assert_eq!(gen.current_epoch(), 1);
    }

    #[test]
    fn shuffled_epochs_cover_everything() {
        let n = 10;
        let mut gen =
            ImageGenerator::with_synthetic(names(n), params(5).shuffle(true)).unwrap();

        for epoch in 0..4 {
            let mut seen: Vec<usize> = gen.next().indices;
            seen.extend(gen.next().indices);
            seen.sort();

            assert_eq!(seen, (0..n).collect::<Vec<_>>(), "epoch {}", epoch);
        }
    }

    #[test]
    fn shuffled_partial_batches_cover_each_epoch() {
        let n = 7;
        let mut gen =
            ImageGenerator::with_synthetic(names(n), params(3).shuffle(true)).unwrap();

        // 7 batches of 3 span exactly 3 epochs, batches straddle the boundaries
        let stream: Vec<usize> = (0..7).flat_map(|_| gen.next().indices).collect();
        assert_eq!(stream.len(), 21);

        for (epoch, chunk) in stream.chunks(n).enumerate() {
            let mut seen = chunk.to_vec();
            seen.sort();

            assert_eq!(seen, (0..n).collect::<Vec<_>>(), "epoch {}", epoch);
        }
    }

    #[test]
    fn shape_and_labels() {
        let mut gen = ImageGenerator::with_synthetic(names(12), params(4)).unwrap();

        let b = gen.next();
        assert_eq!(b.images.dim(), (4, 4, 4, 3));
        assert_eq!(b.labels.to_vec(), vec![0, 1, 2, 3]);
        assert!(b.images.iter().all(|v| (0.0..=1.0).contains(v)));
    }

    #[test]
    fn deterministic_without_randomness() {
        let p = SamplingParams::new(3, ImageShape::new(4, 4, 1));
        let mut a = ImageGenerator::with_synthetic(names(5), p).unwrap();
        let mut b = ImageGenerator::with_synthetic(names(5), p).unwrap();

        for _ in 0..4 {
            let (ba, bb) = (a.next(), b.next());
            assert_eq!(ba.images, bb.images);
            assert_eq!(ba.labels, bb.labels);
        }
    }

    #[test]
    fn augmentation_leaves_cache_untouched() {
        let mut gen = ImageGenerator::with_synthetic(
            names(2),
            params(2).rotation(true).mirroring(true),
        )
        .unwrap();

        for _ in 0..5 {
            gen.next();
        }

        assert_eq!(gen.cached_items(), 2);
        let cached = gen.cache.get(0).unwrap();
        assert_eq!(*cached, synthetic_item(0, ImageShape::new(4, 4, 3)));
    }

    #[test]
    fn empty_dataset_uses_placeholder() {
        let mut gen = ImageGenerator::with_synthetic(vec![], params(8)).unwrap();

        assert!(gen.is_placeholder());
        assert_eq!(gen.len(), 100);
        assert_eq!(gen.next().images.dim(), (8, 4, 4, 3));
    }

    #[test]
    fn placeholder_allows_large_batches() {
        let mut gen = ImageGenerator::with_synthetic(vec![], params(250)).unwrap();

        let b = gen.next();
        assert_eq!(b.len(), 250);
        assert_eq!(b.indices[100], 0);
        assert_eq!(b.indices[249], 49);
        assert_eq!(gen.current_epoch(), 2);
    }

    #[test]
    fn config_errors() {
        assert!(matches!(
            ImageGenerator::with_synthetic(names(3), params(4)),
            Err(CustomError::Config(_))
        ));
        assert!(ImageGenerator::with_synthetic(names(3), params(0)).is_err());

        let non_square = SamplingParams::new(1, ImageShape::new(4, 6, 3)).rotation(true);
        assert!(ImageGenerator::with_synthetic(names(3), non_square).is_err());

        let loader = Box::new(SyntheticItemLoader::new(ImageShape::new(2, 2, 3)));
        assert!(ImageGenerator::new(names(3), LabelMap::empty(), params(1), loader).is_err());
    }

    #[test]
    fn wrong_item_shape_is_replaced() {
        struct TinyLoader;

        impl ItemLoader for TinyLoader {
            fn load(&self, _index: usize, _identifier: &str, _labels: &LabelMap) -> LoadedItem {
                LoadedItem {
                    image: crate::util::Image::zeros((1, 1, 3)),
                    label: 5,
                }
            }

            fn shape(&self) -> ImageShape {
                ImageShape::new(4, 4, 3)
            }
        }

        let mut gen =
            ImageGenerator::new(names(2), LabelMap::empty(), params(2), Box::new(TinyLoader))
                .unwrap();

        let b = gen.next();
        assert_eq!(b.labels.to_vec(), vec![0, 1]);
        assert_eq!(b.images.dim(), (2, 4, 4, 3));
    }

    #[test]
    fn labels_are_looked_up() {
        struct LabelOnly;

        impl ItemLoader for LabelOnly {
            fn load(&self, index: usize, identifier: &str, labels: &LabelMap) -> LoadedItem {
                let mut item = synthetic_item(index, self.shape());
                item.label = labels.get(identifier);
                item
            }

            fn shape(&self) -> ImageShape {
                ImageShape::new(4, 4, 3)
            }
        }

        let mut m = HashMap::new();
        m.insert("1".to_owned(), 5);
        let mut gen =
            ImageGenerator::new(names(2), LabelMap::new(m), params(2), Box::new(LabelOnly))
                .unwrap();

        let b = gen.next();
        assert_eq!(b.labels.to_vec(), vec![0, 5]);
        assert_eq!(gen.class_name(b.labels[1]), "dog");
    }

    #[test]
    fn reset_rewinds() {
        let mut gen = ImageGenerator::with_synthetic(names(4), params(3)).unwrap();
        gen.next();
        gen.next();
        assert_eq!(gen.current_epoch(), 1);

        gen.reset();
        assert_eq!(gen.current_epoch(), 0);
        assert_eq!(gen.next().indices, vec![0, 1, 2]);
    }

    #[test]
    fn mini_batch_is_one_hot() {
        let mut gen = ImageGenerator::with_synthetic(names(3), params(3)).unwrap();

        let mb = gen.next_batch();
        assert_eq!(mb.input.dim(), (3, 48));
        assert_eq!(mb.output.dim(), (3, NUM_CLASSES));
        assert_eq!(mb.output[[2, 2]], 1.0);
        assert_eq!(mb.output.sum(), 3.0);
    }
}
