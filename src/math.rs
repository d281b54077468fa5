//! Assorted mathematical helper functions.

/// L2 norm of a vector, accumulated in `f64` so that large `f32` values
/// cannot overflow the sum of squares.
pub fn l2_norm(xs: &[f32]) -> f64 {
    xs.iter()
        .fold(0f64, |acc, &x| acc + (x as f64) * (x as f64))
        .sqrt()
}

/// Rounds a non-negative value to the nearest integer, saturating at the
/// bounds of `u32`.
pub(crate) fn round_to_u32(x: f32) -> u32 {
    // `as` saturates for out of range floats and maps NaN to 0
    x.round() as u32
}
