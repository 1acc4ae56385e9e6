use crate::shared::frame::Frame;

/// Pad a frame to a `size` x `size` square by replicating edge rows/columns.
///
/// Horizontal and vertical padding are split evenly, with the extra pixel
/// (odd remainder) on the bottom/right.
pub fn pad_to_square_replicate(frame: &Frame, size: u32) -> Frame {
    pad_to_square(frame, size, None)
}

/// Pad a frame to a square with constant black borders.
pub fn pad_to_square_black(frame: &Frame, size: u32) -> Frame {
    pad_to_square(frame, size, Some([0, 0, 0]))
}

fn pad_to_square(frame: &Frame, size: u32, fill: Option<[u8; 3]>) -> Frame {
    debug_assert!(frame.width() <= size && frame.height() <= size);
    let ch = frame.channels() as usize;
    let s = size as usize;
    let (w, h) = (frame.width() as usize, frame.height() as usize);
    let top = (s - h) / 2;
    let left = (s - w) / 2;
    let data = frame.data();

    let mut out = Vec::with_capacity(s * s * ch);
    for y in 0..s {
        for x in 0..s {
            match fill {
                Some(color) if y < top || y >= top + h || x < left || x >= left + w => {
                    out.extend_from_slice(&color[..ch.min(3)]);
                }
                Some(_) => {
                    let i = ((y - top) * w + (x - left)) * ch;
                    out.extend_from_slice(&data[i..i + ch]);
                }
                // Replicate: clamp to the nearest source pixel
                None => {
                    let sy = (y as isize - top as isize).clamp(0, h as isize - 1) as usize;
                    let sx = (x as isize - left as isize).clamp(0, w as isize - 1) as usize;
                    let i = (sy * w + sx) * ch;
                    out.extend_from_slice(&data[i..i + ch]);
                }
            }
        }
    }
    Frame::new(out, size, size, frame.channels())
}

/// Undo square padding: cut a horizontally centered strip of `width` columns.
pub fn unpad_from_square(frame: &Frame, width: u32) -> Frame {
    debug_assert!(width <= frame.width());
    let ch = frame.channels() as usize;
    let left = ((frame.width() - width) / 2) as usize;
    let w = width as usize;
    let fw = frame.width() as usize;
    let data = frame.data();

    let mut out = Vec::with_capacity(w * frame.height() as usize * ch);
    for y in 0..frame.height() as usize {
        let start = (y * fw + left) * ch;
        out.extend_from_slice(&data[start..start + w * ch]);
    }
    Frame::new(out, width, frame.height(), frame.channels())
}

/// Centered strip cut for a raw single-channel plane, mirroring
/// [`unpad_from_square`] for masks.
pub fn unpad_plane(plane: &[f32], src_w: u32, src_h: u32, width: u32) -> Vec<f32> {
    let left = ((src_w - width) / 2) as usize;
    let (sw, w) = (src_w as usize, width as usize);
    let mut out = Vec::with_capacity(w * src_h as usize);
    for y in 0..src_h as usize {
        out.extend_from_slice(&plane[y * sw + left..y * sw + left + w]);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pad_replicate_extends_edges() {
        let frame = Frame::filled(2, 4, [50, 60, 70]);
        let padded = pad_to_square_replicate(&frame, 4);
        assert_eq!(padded.width(), 4);
        assert_eq!(padded.height(), 4);
        // Left border replicates the leftmost column
        assert_eq!(padded.pixel(0, 0), [50, 60, 70]);
    }

    #[test]
    fn test_pad_black_fills_borders() {
        let frame = Frame::filled(2, 4, [200, 200, 200]);
        let padded = pad_to_square_black(&frame, 4);
        assert_eq!(padded.pixel(0, 0), [0, 0, 0]);
        assert_eq!(padded.pixel(1, 0), [200, 200, 200]);
        assert_eq!(padded.pixel(3, 3), [0, 0, 0]);
    }

    #[test]
    fn test_unpad_reverses_pad() {
        let frame = Frame::filled(2, 4, [9, 8, 7]);
        let padded = pad_to_square_replicate(&frame, 4);
        let unpadded = unpad_from_square(&padded, 2);
        assert_eq!(unpadded.width(), 2);
        assert_eq!(unpadded.height(), 4);
        assert_eq!(unpadded.data(), frame.data());
    }

    #[test]
    fn test_unpad_plane_centered() {
        let plane = vec![
            0.0, 1.0, 2.0, 3.0, //
            4.0, 5.0, 6.0, 7.0,
        ];
        let out = unpad_plane(&plane, 4, 2, 2);
        assert_eq!(out, vec![1.0, 2.0, 5.0, 6.0]);
    }
}
