/// Horizontally mirror a single-channel plane in place.
pub fn flip_horizontal(plane: &mut [u8], width: usize, height: usize) {
    for y in 0..height {
        let row = &mut plane[y * width..(y + 1) * width];
        row.reverse();
    }
}

/// Normalized cross-correlation of two equally sized planes.
///
/// Equivalent to template matching where the template covers the whole
/// search window, so the result is a single similarity score in [0, 1]
/// for non-negative pixel data. Returns 0 for degenerate (all-zero) inputs.
pub fn normalized_cross_correlation(a: &[u8], b: &[u8]) -> f64 {
    debug_assert_eq!(a.len(), b.len());
    let mut dot = 0f64;
    let mut norm_a = 0f64;
    let mut norm_b = 0f64;
    for (&x, &y) in a.iter().zip(b.iter()) {
        let (x, y) = (x as f64, y as f64);
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a.sqrt() * norm_b.sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_flip_reverses_rows() {
        let mut plane = vec![1, 2, 3, 4, 5, 6];
        flip_horizontal(&mut plane, 3, 2);
        assert_eq!(plane, vec![3, 2, 1, 6, 5, 4]);
    }

    #[test]
    fn test_identical_planes_correlate_fully() {
        let a = vec![10, 50, 90, 200];
        assert_abs_diff_eq!(normalized_cross_correlation(&a, &a), 1.0, epsilon = 1e-9);
    }

    #[test]
    fn test_disjoint_planes_correlate_zero() {
        let a = vec![255, 0, 255, 0];
        let b = vec![0, 255, 0, 255];
        assert_abs_diff_eq!(normalized_cross_correlation(&a, &b), 0.0, epsilon = 1e-9);
    }

    #[test]
    fn test_zero_plane_is_degenerate() {
        let a = vec![0, 0, 0];
        let b = vec![1, 2, 3];
        assert_eq!(normalized_cross_correlation(&a, &b), 0.0);
    }

    #[test]
    fn test_scaled_plane_still_fully_correlated() {
        let a = vec![10, 20, 30];
        let b = vec![20, 40, 60];
        assert_abs_diff_eq!(normalized_cross_correlation(&a, &b), 1.0, epsilon = 1e-9);
    }
}
