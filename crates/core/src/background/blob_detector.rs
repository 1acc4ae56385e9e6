use crate::imaging::color::rgb_to_hsv_full;
use crate::imaging::morph::dilate3x3;
use crate::imaging::resize::downsample_by_two;
use crate::shared::frame::Frame;

/// Half-width of the sample window around the seed pixel.
const SAMPLE_RADIUS: u32 = 4;
/// HSV tolerance around the sampled color, full-range 0-255 channels.
const HUE_RADIUS: i32 = 25;
const SAT_RADIUS: i32 = 50;
const VAL_RADIUS: i32 = 50;
/// Components smaller than this fraction of the largest one are noise.
const MIN_COMPONENT_FRACTION: f64 = 0.1;
/// The frame is downsampled by two, twice, before mask extraction.
const DOWNSAMPLE_SCALE: f64 = 4.0;

/// Grows color blobs from a seed pixel and reports their geometry.
///
/// Areas and perimeters are expressed in full-resolution pixels even
/// though detection runs on a quarter-scale mask.
#[derive(Default)]
pub struct ColorBlobDetector {
    total_area: f64,
    max_area: f64,
    max_perimeter: f64,
    seed_color: [u8; 3],
}

impl ColorBlobDetector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sampled mean color of the seed window, RGB.
    pub fn seed_color(&self) -> [u8; 3] {
        self.seed_color
    }

    /// Summed area of all retained blobs, in source pixels.
    pub fn total_area(&self) -> f64 {
        self.total_area
    }

    /// Area of the largest blob, in source pixels.
    pub fn max_area(&self) -> f64 {
        self.max_area
    }

    /// Boundary length of the largest blob, in source pixels.
    pub fn max_perimeter(&self) -> f64 {
        self.max_perimeter
    }

    /// Detect all blobs whose color lies within the tolerance band around
    /// the seed pixel's neighborhood mean.
    pub fn process(&mut self, frame: &Frame, seed: (u32, u32)) {
        self.total_area = 0.0;
        self.max_area = 0.0;
        self.max_perimeter = 0.0;

        let (mean_rgb, mean_hsv) = sample_window(frame, seed);
        self.seed_color = mean_rgb;
        let lower = [
            (mean_hsv[0] as i32 - HUE_RADIUS).max(0) as u8,
            (mean_hsv[1] as i32 - SAT_RADIUS).max(0) as u8,
            (mean_hsv[2] as i32 - VAL_RADIUS).max(0) as u8,
        ];
        let upper = [
            (mean_hsv[0] as i32 + HUE_RADIUS).min(255) as u8,
            (mean_hsv[1] as i32 + SAT_RADIUS).min(255) as u8,
            (mean_hsv[2] as i32 + VAL_RADIUS).min(255) as u8,
        ];

        let small = downsample_by_two(&downsample_by_two(frame));
        let (w, h) = (small.width() as usize, small.height() as usize);
        if w == 0 || h == 0 {
            return;
        }
        let mut mask = vec![0u8; w * h];
        for y in 0..h {
            for x in 0..w {
                let hsv = rgb_to_hsv_full(small.pixel(x as u32, y as u32));
                if in_range(hsv, lower, upper) {
                    mask[y * w + x] = 255;
                }
            }
        }
        let mask = dilate3x3(&mask, w, h);

        let components = connected_components(&mask, w, h);
        let largest = components.iter().map(|c| c.area).max().unwrap_or(0);
        if largest == 0 {
            return;
        }
        let cutoff = MIN_COMPONENT_FRACTION * largest as f64;
        let area_scale = DOWNSAMPLE_SCALE * DOWNSAMPLE_SCALE;
        for component in &components {
            if component.area as f64 > cutoff {
                self.total_area += component.area as f64 * area_scale;
            }
            if component.area == largest {
                self.max_area = component.area as f64 * area_scale;
                self.max_perimeter = component.perimeter as f64 * DOWNSAMPLE_SCALE;
            }
        }
    }
}

fn sample_window(frame: &Frame, seed: (u32, u32)) -> ([u8; 3], [u8; 3]) {
    let x0 = seed.0.saturating_sub(SAMPLE_RADIUS);
    let y0 = seed.1.saturating_sub(SAMPLE_RADIUS);
    let x1 = (seed.0 + SAMPLE_RADIUS).min(frame.width() - 1);
    let y1 = (seed.1 + SAMPLE_RADIUS).min(frame.height() - 1);
    let mut rgb_sum = [0u64; 3];
    let mut hsv_sum = [0u64; 3];
    let mut count = 0u64;
    for y in y0..=y1 {
        for x in x0..=x1 {
            let [r, g, b] = frame.pixel(x, y);
            let hsv = rgb_to_hsv_full([r, g, b]);
            rgb_sum[0] += r as u64;
            rgb_sum[1] += g as u64;
            rgb_sum[2] += b as u64;
            for c in 0..3 {
                hsv_sum[c] += hsv[c] as u64;
            }
            count += 1;
        }
    }
    let avg = |sum: [u64; 3]| [(sum[0] / count) as u8, (sum[1] / count) as u8, (sum[2] / count) as u8];
    (avg(rgb_sum), avg(hsv_sum))
}

fn in_range(hsv: [u8; 3], lower: [u8; 3], upper: [u8; 3]) -> bool {
    (0..3).all(|c| hsv[c] >= lower[c] && hsv[c] <= upper[c])
}

struct Component {
    area: u64,
    perimeter: u64,
}

/// Eight-connected component labeling over a binary mask.
fn connected_components(mask: &[u8], w: usize, h: usize) -> Vec<Component> {
    let mut labels = vec![0u32; w * h];
    let mut components = Vec::new();
    let mut next_label = 1u32;
    let mut queue = Vec::new();
    for start in 0..w * h {
        if mask[start] == 0 || labels[start] != 0 {
            continue;
        }
        let label = next_label;
        next_label += 1;
        labels[start] = label;
        queue.clear();
        queue.push(start);
        let mut area = 0u64;
        let mut perimeter = 0u64;
        while let Some(idx) = queue.pop() {
            area += 1;
            let (x, y) = (idx % w, idx / w);
            let mut boundary = x == 0 || y == 0 || x == w - 1 || y == h - 1;
            for dy in -1i32..=1 {
                for dx in -1i32..=1 {
                    if dx == 0 && dy == 0 {
                        continue;
                    }
                    let nx = x as i32 + dx;
                    let ny = y as i32 + dy;
                    if nx < 0 || ny < 0 || nx >= w as i32 || ny >= h as i32 {
                        continue;
                    }
                    let nidx = ny as usize * w + nx as usize;
                    if mask[nidx] == 0 {
                        if dx == 0 || dy == 0 {
                            boundary = true;
                        }
                    } else if labels[nidx] == 0 {
                        labels[nidx] = label;
                        queue.push(nidx);
                    }
                }
            }
            if boundary {
                perimeter += 1;
            }
        }
        components.push(Component { area, perimeter });
    }
    components
}
