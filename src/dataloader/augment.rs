use ndarray::Axis;

use rand::Rng;

use crate::util::Image;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mirror {
    Horizontal,
    Vertical,
    Both,
}

impl Mirror {
    pub const ALL: [Mirror; 3] = [Mirror::Horizontal, Mirror::Vertical, Mirror::Both];
}

/// Label-preserving flips and rotations
#[derive(Clone, Copy, Debug, Default)]
pub struct Augmenter {
    pub rotation: bool,
    pub mirroring: bool,
}

impl Augmenter {
    pub fn new(rotation: bool, mirroring: bool) -> Self {
        Self {
            rotation,
            mirroring,
        }
    }

    pub fn is_identity(&self) -> bool {
        !self.rotation && !self.mirroring
    }

    /// Returns an augmented copy, `img` itself is never touched
    pub fn augment<R: Rng>(&self, img: &Image, rng: &mut R) -> Image {
        let (flip, k) = loop {
            let flip = if self.mirroring {
                Some(Mirror::ALL[rng.gen_range(0..Mirror::ALL.len())])
            } else {
                None
            };
            let k = if self.rotation { rng.gen_range(1..4) } else { 0 };

            // a flip of both axes followed by a half turn is the identity
            if !(flip == Some(Mirror::Both) && k == 2) {
                break (flip, k);
            }
        };

        let out = match flip {
            Some(m) => mirror(img, m),
            None => img.clone(),
        };

        if k > 0 {
            rot90(&out, k)
        } else {
            out
        }
    }
}

pub fn mirror(img: &Image, m: Mirror) -> Image {
    let mut v = img.view();

    match m {
        Mirror::Horizontal => v.invert_axis(Axis(1)),
        Mirror::Vertical => v.invert_axis(Axis(0)),
        Mirror::Both => {
            v.invert_axis(Axis(0));
            v.invert_axis(Axis(1));
        }
    }

    v.as_standard_layout().into_owned()
}

/// Rotates counter-clockwise by `k` quarter turns
pub fn rot90(img: &Image, k: usize) -> Image {
    let mut v = img.view();

    match k % 4 {
        1 => {
            v.invert_axis(Axis(1));
            v.swap_axes(0, 1);
        }
        2 => {
            v.invert_axis(Axis(0));
            v.invert_axis(Axis(1));
        }
        3 => {
            v.swap_axes(0, 1);
            v.invert_axis(Axis(1));
        }
        _ => {}
    }

    v.as_standard_layout().into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    // 2x2 single channel :
    // 1 2
    // 3 4
    fn square() -> Image {
        Image::from_shape_vec((2, 2, 1), vec![1.0, 2.0, 3.0, 4.0]).unwrap()
    }

    fn flat(img: &Image) -> Vec<f32> {
        img.iter().cloned().collect()
    }

    #[test]
    fn mirrors() {
        let img = square();
        assert_eq!(flat(&mirror(&img, Mirror::Horizontal)), vec![2.0, 1.0, 4.0, 3.0]);
        assert_eq!(flat(&mirror(&img, Mirror::Vertical)), vec![3.0, 4.0, 1.0, 2.0]);
        assert_eq!(flat(&mirror(&img, Mirror::Both)), vec![4.0, 3.0, 2.0, 1.0]);
    }

    #[test]
    fn rotations_counter_clockwise() {
        let img = square();
        assert_eq!(flat(&rot90(&img, 1)), vec![2.0, 4.0, 1.0, 3.0]);
        assert_eq!(flat(&rot90(&img, 2)), vec![4.0, 3.0, 2.0, 1.0]);
        assert_eq!(flat(&rot90(&img, 3)), vec![3.0, 1.0, 4.0, 2.0]);
        assert_eq!(rot90(&img, 4), img);
    }

    #[test]
    fn rotation_keeps_channels_together() {
        let img = Image::from_shape_fn((2, 2, 3), |(r, c, ch)| (r * 100 + c * 10 + ch) as f32);
        let out = rot90(&img, 1);

        // top-left of the result comes from the top-right of the source
        assert_eq!(out[[0, 0, 0]], 10.0);
        assert_eq!(out[[0, 0, 2]], 12.0);
    }

    #[test]
    fn disabled_is_exact_copy() {
        let aug = Augmenter::new(false, false);
        let mut rng = StdRng::seed_from_u64(1);
        let img = square();

        assert!(aug.is_identity());
        assert_eq!(aug.augment(&img, &mut rng), img);
    }

    #[test]
    fn enabled_never_identity() {
        let img = square();
        let mut rng = StdRng::seed_from_u64(3);

        for aug in [
            Augmenter::new(true, false),
            Augmenter::new(false, true),
            Augmenter::new(true, true),
        ] {
            for _ in 0..300 {
                let out = aug.augment(&img, &mut rng);
                assert_ne!(out, img);
            }
        }

        // source stays untouched
        assert_eq!(img, square());
    }

    #[test]
    fn all_variants_show_up() {
        let img = square();
        let aug = Augmenter::new(true, false);
        let mut rng = StdRng::seed_from_u64(11);

        let mut seen = std::collections::HashSet::new();
        for _ in 0..200 {
            let out = aug.augment(&img, &mut rng);
            seen.insert(flat(&out).iter().map(|v| *v as i32).collect::<Vec<_>>());
        }

        assert_eq!(seen.len(), 3);
    }

    #[test]
    fn combined_flags_never_cancel() {
        let img = square();
        let aug = Augmenter::new(true, true);
        let mut rng = StdRng::seed_from_u64(0);

        let mut seen = std::collections::HashSet::new();
        for _ in 0..900 {
            let out = aug.augment(&img, &mut rng);
            seen.insert(flat(&out).iter().map(|v| *v as i32).collect::<Vec<_>>());
        }

        // four reflections and both quarter turns, never the source
        assert_eq!(seen.len(), 6);
        assert!(!seen.contains(&vec![1, 2, 3, 4]));
    }
}
