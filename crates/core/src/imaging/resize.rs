use crate::shared::constants::H_TO_W_RATIO;
use crate::shared::frame::Frame;

/// Bilinear resize to an exact target size.
///
/// The caller is responsible for aspect ratios; a mismatched ratio squeezes
/// the image, which is logged because it usually indicates a bad crop.
pub fn resize(frame: &Frame, width: u32, height: u32) -> Frame {
    let src_ratio = frame.height() as f64 / frame.width() as f64;
    let dst_ratio = height as f64 / width as f64;
    if (src_ratio - dst_ratio).abs() > 0.01 {
        log::warn!(
            "resize from {}x{} to {}x{} changes aspect ratio; image will be squeezed",
            frame.width(),
            frame.height(),
            width,
            height
        );
    }
    resize_raw(
        frame.data(),
        frame.width(),
        frame.height(),
        frame.channels(),
        width,
        height,
    )
}

/// Resize to a target width at the fixed 35:45 passport ratio.
pub fn resize_to_width(frame: &Frame, width: u32) -> Frame {
    let height = (width as f64 * H_TO_W_RATIO) as u32;
    resize(frame, width, height)
}

fn resize_raw(
    data: &[u8],
    src_w: u32,
    src_h: u32,
    channels: u8,
    dst_w: u32,
    dst_h: u32,
) -> Frame {
    let ch = channels as usize;
    let (sw, sh) = (src_w as usize, src_h as usize);
    let mut out = Vec::with_capacity(dst_w as usize * dst_h as usize * ch);

    let x_scale = sw as f64 / dst_w as f64;
    let y_scale = sh as f64 / dst_h as f64;

    for dy in 0..dst_h as usize {
        let sy = ((dy as f64 + 0.5) * y_scale - 0.5).max(0.0);
        let y0 = (sy as usize).min(sh - 1);
        let y1 = (y0 + 1).min(sh - 1);
        let fy = sy - y0 as f64;

        for dx in 0..dst_w as usize {
            let sx = ((dx as f64 + 0.5) * x_scale - 0.5).max(0.0);
            let x0 = (sx as usize).min(sw - 1);
            let x1 = (x0 + 1).min(sw - 1);
            let fx = sx - x0 as f64;

            for c in 0..ch {
                let p00 = data[(y0 * sw + x0) * ch + c] as f64;
                let p01 = data[(y0 * sw + x1) * ch + c] as f64;
                let p10 = data[(y1 * sw + x0) * ch + c] as f64;
                let p11 = data[(y1 * sw + x1) * ch + c] as f64;

                let top = p00 + (p01 - p00) * fx;
                let bottom = p10 + (p11 - p10) * fx;
                let value = top + (bottom - top) * fy;
                out.push(value.round().clamp(0.0, 255.0) as u8);
            }
        }
    }

    Frame::new(out, dst_w, dst_h, channels)
}

/// Resize a single-channel plane (masks, grayscale) with bilinear sampling.
pub fn resize_plane(plane: &[f32], src_w: u32, src_h: u32, dst_w: u32, dst_h: u32) -> Vec<f32> {
    let (sw, sh) = (src_w as usize, src_h as usize);
    let mut out = Vec::with_capacity(dst_w as usize * dst_h as usize);

    let x_scale = sw as f64 / dst_w as f64;
    let y_scale = sh as f64 / dst_h as f64;

    for dy in 0..dst_h as usize {
        let sy = ((dy as f64 + 0.5) * y_scale - 0.5).max(0.0);
        let y0 = (sy as usize).min(sh - 1);
        let y1 = (y0 + 1).min(sh - 1);
        let fy = (sy - y0 as f64) as f32;

        for dx in 0..dst_w as usize {
            let sx = ((dx as f64 + 0.5) * x_scale - 0.5).max(0.0);
            let x0 = (sx as usize).min(sw - 1);
            let x1 = (x0 + 1).min(sw - 1);
            let fx = (sx - x0 as f64) as f32;

            let p00 = plane[y0 * sw + x0];
            let p01 = plane[y0 * sw + x1];
            let p10 = plane[y1 * sw + x0];
            let p11 = plane[y1 * sw + x1];

            let top = p00 + (p01 - p00) * fx;
            let bottom = p10 + (p11 - p10) * fx;
            out.push(top + (bottom - top) * fy);
        }
    }
    out
}

/// Halve both dimensions by 2x2 averaging. Used by the blob detector to
/// keep region growth cheap on preview-sized images.
pub fn downsample_by_two(frame: &Frame) -> Frame {
    let ch = frame.channels() as usize;
    let sw = frame.width() as usize;
    let dw = (frame.width() / 2).max(1);
    let dh = (frame.height() / 2).max(1);
    let data = frame.data();

    let mut out = Vec::with_capacity(dw as usize * dh as usize * ch);
    for dy in 0..dh as usize {
        for dx in 0..dw as usize {
            for c in 0..ch {
                let y0 = (dy * 2).min(frame.height() as usize - 1);
                let y1 = (dy * 2 + 1).min(frame.height() as usize - 1);
                let x0 = (dx * 2).min(sw - 1);
                let x1 = (dx * 2 + 1).min(sw - 1);
                let sum = data[(y0 * sw + x0) * ch + c] as u32
                    + data[(y0 * sw + x1) * ch + c] as u32
                    + data[(y1 * sw + x0) * ch + c] as u32
                    + data[(y1 * sw + x1) * ch + c] as u32;
                out.push((sum / 4) as u8);
            }
        }
    }
    Frame::new(out, dw, dh, frame.channels())
}
