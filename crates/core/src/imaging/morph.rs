/// Binary dilation with a 3x3 structuring element.
///
/// Input and output are binary planes where any nonzero byte counts as set.
pub fn dilate3x3(mask: &[u8], width: usize, height: usize) -> Vec<u8> {
    let mut out = vec![0u8; width * height];
    for y in 0..height {
        for x in 0..width {
            let mut set = false;
            'probe: for dy in -1isize..=1 {
                for dx in -1isize..=1 {
                    let nx = x as isize + dx;
                    let ny = y as isize + dy;
                    if nx < 0 || ny < 0 || nx >= width as isize || ny >= height as isize {
                        continue;
                    }
                    if mask[ny as usize * width + nx as usize] != 0 {
                        set = true;
                        break 'probe;
                    }
                }
            }
            if set {
                out[y * width + x] = 255;
            }
        }
    }
    out
}

/// Binary threshold: values strictly above `threshold` become 255, else 0.
pub fn threshold_binary(plane: &[u8], threshold: u8) -> Vec<u8> {
    plane
        .iter()
        .map(|&v| if v > threshold { 255 } else { 0 })
        .collect()
}
