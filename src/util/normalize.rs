use ndarray::{Array, Dimension};

/// With minmax normalising values will be between 0..1
pub fn minmax_normalize_val(val: f32, min: f32, max: f32) -> f32 {
    (val - min) / (max - min)
}

/// 8-bit pixels into 0..1
pub fn byte_intensity<D: Dimension>(data: &Array<u8, D>) -> Array<f32, D> {
    data.mapv(|v| minmax_normalize_val(v as f32, 0.0, 255.0))
}

/// Float pixels are taken as 0..1 already, out of range values are clamped
pub fn clamp_intensity<D: Dimension>(data: &mut Array<f32, D>) {
    data.mapv_inplace(|v| v.clamp(0.0, 1.0));
}
