/// Separable box blur (mean filter) with edge clamping.
///
/// `kernel` is the window side length; even sizes behave like the next odd
/// size down in each direction, which is close enough for smoothing masks
/// and pre-filtering before edge detection.
pub fn box_blur(data: &mut [u8], width: usize, height: usize, channels: usize, kernel: usize) {
    if kernel <= 1 || width == 0 || height == 0 {
        return;
    }
    let half = (kernel / 2) as isize;
    let mut temp = vec![0f32; data.len()];

    // Horizontal pass: data -> temp
    for y in 0..height {
        for x in 0..width {
            for c in 0..channels {
                let mut sum = 0f32;
                let mut count = 0f32;
                for k in -half..=half {
                    let sx = (x as isize + k).clamp(0, (width - 1) as isize) as usize;
                    sum += data[(y * width + sx) * channels + c] as f32;
                    count += 1.0;
                }
                temp[(y * width + x) * channels + c] = sum / count;
            }
        }
    }

    // Vertical pass: temp -> data
    for y in 0..height {
        for x in 0..width {
            for c in 0..channels {
                let mut sum = 0f32;
                let mut count = 0f32;
                for k in -half..=half {
                    let sy = (y as isize + k).clamp(0, (height - 1) as isize) as usize;
                    sum += temp[(sy * width + x) * channels + c];
                    count += 1.0;
                }
                data[(y * width + x) * channels + c] = (sum / count).round().clamp(0.0, 255.0) as u8;
            }
        }
    }
}

/// Median filter with an odd square window, per channel.
///
/// Uses a sliding 256-bin histogram per row (Huang's algorithm) so large
/// kernels (21, 51) stay affordable on final-resolution images.
pub fn median_blur(data: &mut [u8], width: usize, height: usize, channels: usize, kernel: usize) {
    debug_assert!(kernel % 2 == 1, "median kernel must be odd");
    if kernel <= 1 || width == 0 || height == 0 {
        return;
    }
    let half = (kernel / 2) as isize;
    let out_len = data.len();
    let mut out = vec![0u8; out_len];
    let clamp_x = |x: isize| x.clamp(0, (width - 1) as isize) as usize;
    let clamp_y = |y: isize| y.clamp(0, (height - 1) as isize) as usize;
    let window_total = (kernel * kernel) as u32;
    let median_rank = window_total / 2;

    for c in 0..channels {
        for y in 0..height {
            let mut hist = [0u32; 256];
            // Seed the histogram for x = 0
            for ky in -half..=half {
                let sy = clamp_y(y as isize + ky);
                for kx in -half..=half {
                    let sx = clamp_x(kx);
                    hist[data[(sy * width + sx) * channels + c] as usize] += 1;
                }
            }
            out[(y * width) * channels + c] = histogram_median(&hist, median_rank);

            for x in 1..width {
                // Slide: remove the left column, add the right column
                for ky in -half..=half {
                    let sy = clamp_y(y as isize + ky);
                    let removed = clamp_x(x as isize - 1 - half);
                    let added = clamp_x(x as isize + half);
                    hist[data[(sy * width + removed) * channels + c] as usize] -= 1;
                    hist[data[(sy * width + added) * channels + c] as usize] += 1;
                }
                out[(y * width + x) * channels + c] = histogram_median(&hist, median_rank);
            }
        }
    }
    data.copy_from_slice(&out);
}

fn histogram_median(hist: &[u32; 256], rank: u32) -> u8 {
    let mut cumulative = 0u32;
    for (value, &count) in hist.iter().enumerate() {
        cumulative += count;
        if cumulative > rank {
            return value as u8;
        }
    }
    255
}
