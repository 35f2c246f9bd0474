pub fn relu(val: f32) -> f32 {
    if val > 0.0 {
        val
    } else {
        0.0
    }
}

/// Derivative by the layer input value
pub fn relu_deriv(val: f32) -> f32 {
    if val > 0.0 {
        1.0
    } else {
        0.0
    }
}
