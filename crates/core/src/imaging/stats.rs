/// Per-channel mean and standard deviation over pixels selected by `mask`
/// (nonzero byte = selected). Returns `None` when the mask selects nothing.
pub fn masked_mean_stddev(
    data: &[u8],
    channels: usize,
    mask: &[u8],
) -> Option<(Vec<f64>, Vec<f64>)> {
    debug_assert_eq!(data.len(), mask.len() * channels);
    let mut sums = vec![0f64; channels];
    let mut count = 0usize;
    for (pixel, &m) in data.chunks_exact(channels).zip(mask.iter()) {
        if m == 0 {
            continue;
        }
        count += 1;
        for (c, &v) in pixel.iter().enumerate() {
            sums[c] += v as f64;
        }
    }
    if count == 0 {
        return None;
    }
    let means: Vec<f64> = sums.iter().map(|s| s / count as f64).collect();

    let mut var_sums = vec![0f64; channels];
    for (pixel, &m) in data.chunks_exact(channels).zip(mask.iter()) {
        if m == 0 {
            continue;
        }
        for (c, &v) in pixel.iter().enumerate() {
            let d = v as f64 - means[c];
            var_sums[c] += d * d;
        }
    }
    let stddevs = var_sums.iter().map(|s| (s / count as f64).sqrt()).collect();
    Some((means, stddevs))
}

/// Mean and population standard deviation of a single-channel plane.
pub fn mean_stddev(plane: &[u8]) -> (f64, f64) {
    if plane.is_empty() {
        return (0.0, 0.0);
    }
    let mean = plane.iter().map(|&v| v as f64).sum::<f64>() / plane.len() as f64;
    let var = plane
        .iter()
        .map(|&v| {
            let d = v as f64 - mean;
            d * d
        })
        .sum::<f64>()
        / plane.len() as f64;
    (mean, var.sqrt())
}

/// Plain mean of a plane.
pub fn mean(plane: &[u8]) -> f64 {
    if plane.is_empty() {
        return 0.0;
    }
    plane.iter().map(|&v| v as f64).sum::<f64>() / plane.len() as f64
}
