/// Canny-style edge detection on a grayscale plane.
///
/// Sobel gradients, L1 magnitude, 4-direction non-maximum suppression and
/// two-threshold hysteresis. Returns a binary plane (255 = edge pixel).
/// The caller is expected to pre-blur the input.
pub fn canny(gray: &[u8], width: usize, height: usize, low: f64, high: f64) -> Vec<u8> {
    if width < 3 || height < 3 {
        return vec![0; width * height];
    }

    let mut gx = vec![0f64; width * height];
    let mut gy = vec![0f64; width * height];
    for y in 1..height - 1 {
        for x in 1..width - 1 {
            let p = |dx: isize, dy: isize| {
                gray[((y as isize + dy) as usize) * width + (x as isize + dx) as usize] as f64
            };
            gx[y * width + x] = (p(1, -1) + 2.0 * p(1, 0) + p(1, 1))
                - (p(-1, -1) + 2.0 * p(-1, 0) + p(-1, 1));
            gy[y * width + x] = (p(-1, 1) + 2.0 * p(0, 1) + p(1, 1))
                - (p(-1, -1) + 2.0 * p(0, -1) + p(1, -1));
        }
    }

    let magnitude: Vec<f64> = gx
        .iter()
        .zip(gy.iter())
        .map(|(a, b)| a.abs() + b.abs())
        .collect();

    // Non-maximum suppression along the quantized gradient direction
    let mut thin = vec![0f64; width * height];
    for y in 1..height - 1 {
        for x in 1..width - 1 {
            let i = y * width + x;
            let mag = magnitude[i];
            if mag == 0.0 {
                continue;
            }
            let angle = gy[i].atan2(gx[i]).to_degrees();
            let angle = if angle < 0.0 { angle + 180.0 } else { angle };
            let (n1, n2) = if !(22.5..157.5).contains(&angle) {
                (magnitude[i - 1], magnitude[i + 1])
            } else if angle < 67.5 {
                (magnitude[i - width - 1], magnitude[i + width + 1])
            } else if angle < 112.5 {
                (magnitude[i - width], magnitude[i + width])
            } else {
                (magnitude[i - width + 1], magnitude[i + width - 1])
            };
            if mag >= n1 && mag >= n2 {
                thin[i] = mag;
            }
        }
    }

    // Hysteresis: strong pixels seed, weak pixels join when connected
    let mut edges = vec![0u8; width * height];
    let mut stack = Vec::new();
    for i in 0..thin.len() {
        if thin[i] >= high && edges[i] == 0 {
            edges[i] = 255;
            stack.push(i);
            while let Some(j) = stack.pop() {
                let (jx, jy) = (j % width, j / width);
                for dy in -1isize..=1 {
                    for dx in -1isize..=1 {
                        let nx = jx as isize + dx;
                        let ny = jy as isize + dy;
                        if nx < 0 || ny < 0 || nx >= width as isize || ny >= height as isize {
                            continue;
                        }
                        let n = ny as usize * width + nx as usize;
                        if edges[n] == 0 && thin[n] >= low {
                            edges[n] = 255;
                            stack.push(n);
                        }
                    }
                }
            }
        }
    }
    edges
}

/// Count of edge pixels in a binary edge plane.
pub fn count_edge_pixels(edges: &[u8]) -> usize {
    edges.iter().filter(|&&v| v != 0).count()
}
