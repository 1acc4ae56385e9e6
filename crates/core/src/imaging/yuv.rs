use crate::shared::frame::Frame;

/// Convert an NV21 (interleaved luma + VU chroma) preview buffer to RGB.
///
/// The buffer layout is the camera-standard one: a full-resolution Y plane
/// followed by a half-resolution interleaved V/U plane, `width * height * 3/2`
/// bytes in total. Returns `None` when the buffer length does not match.
pub fn nv21_to_rgb(data: &[u8], width: u32, height: u32) -> Option<Frame> {
    let w = width as usize;
    let h = height as usize;
    if data.len() != w * h * 3 / 2 {
        return None;
    }

    let y_plane = &data[..w * h];
    let vu_plane = &data[w * h..];

    let mut rgb = Vec::with_capacity(w * h * 3);
    for row in 0..h {
        for col in 0..w {
            let y = y_plane[row * w + col] as f64;
            let vu_index = (row / 2) * w + (col / 2) * 2;
            let v = vu_plane[vu_index] as f64 - 128.0;
            let u = vu_plane[vu_index + 1] as f64 - 128.0;

            let r = y + 1.402 * v;
            let g = y - 0.344 * u - 0.714 * v;
            let b = y + 1.772 * u;

            rgb.push(r.round().clamp(0.0, 255.0) as u8);
            rgb.push(g.round().clamp(0.0, 255.0) as u8);
            rgb.push(b.round().clamp(0.0, 255.0) as u8);
        }
    }
    Some(Frame::new(rgb, width, height, 3))
}
