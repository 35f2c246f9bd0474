use ndarray::{Array, Array2, Axis};

pub fn max<D>(arr: &Array<f32, D>) -> f32
where
    D: ndarray::Dimension,
{
    let mut out = f32::MIN;

    for i in arr.iter() {
        if *i > out {
            out = *i;
        }
    }

    out
}

/// Appends a column filled with `val` to the right side
pub fn with_const_column(arr: &Array2<f32>, val: f32) -> Array2<f32> {
    let mut out = Array2::from_elem((arr.nrows(), arr.ncols() + 1), val);
    out.slice_mut(ndarray::s![.., ..arr.ncols()]).assign(arr);
    out
}

/// Sums each row, keeping a (rows, 1) shape for broadcasting
pub fn row_sums(arr: &Array2<f32>) -> Array2<f32> {
    arr.sum_axis(Axis(1)).insert_axis(Axis(1))
}
