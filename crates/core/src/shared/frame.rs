use ndarray::{ArrayView3, ArrayViewMut3};

use crate::shared::rect::Rect;

/// A single image frame: contiguous RGB bytes in row-major order.
///
/// Format conversion happens at I/O boundaries only; the analysis layer
/// treats pixel data as opaque RGB.
#[derive(Clone, Debug)]
pub struct Frame {
    data: Vec<u8>,
    width: u32,
    height: u32,
    channels: u8,
}

impl Frame {
    pub fn new(data: Vec<u8>, width: u32, height: u32, channels: u8) -> Self {
        debug_assert_eq!(
            data.len(),
            (width as usize) * (height as usize) * (channels as usize),
            "data length must equal width * height * channels"
        );
        Self {
            data,
            width,
            height,
            channels,
        }
    }

    /// A frame filled with a single RGB color.
    pub fn filled(width: u32, height: u32, rgb: [u8; 3]) -> Self {
        let mut data = Vec::with_capacity((width * height * 3) as usize);
        for _ in 0..(width * height) {
            data.extend_from_slice(&rgb);
        }
        Self::new(data, width, height, 3)
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn channels(&self) -> u8 {
        self.channels
    }

    pub fn as_ndarray(&self) -> ArrayView3<'_, u8> {
        ArrayView3::from_shape(self.shape(), &self.data)
            .expect("Frame data length must match dimensions")
    }

    pub fn as_ndarray_mut(&mut self) -> ArrayViewMut3<'_, u8> {
        ArrayViewMut3::from_shape(self.shape(), &mut self.data)
            .expect("Frame data length must match dimensions")
    }

    /// RGB pixel at (x, y). Panics when out of bounds, like slice indexing.
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 3] {
        let i = ((y * self.width + x) * self.channels as u32) as usize;
        [self.data[i], self.data[i + 1], self.data[i + 2]]
    }

    /// Copy of the sub-image under `rect`.
    ///
    /// Returns `None` when the rectangle does not lie fully within the frame;
    /// callers treat that as "skip", never as an error.
    pub fn crop(&self, rect: Rect) -> Option<Frame> {
        if !rect.contained_in(self.width, self.height) {
            return None;
        }
        let ch = self.channels as usize;
        let (w, h) = (rect.width() as usize, rect.height() as usize);
        let mut data = Vec::with_capacity(w * h * ch);
        for row in 0..h {
            let y = rect.top as usize + row;
            let start = (y * self.width as usize + rect.left as usize) * ch;
            data.extend_from_slice(&self.data[start..start + w * ch]);
        }
        Some(Frame::new(data, w as u32, h as u32, self.channels))
    }

    fn shape(&self) -> (usize, usize, usize) {
        (
            self.height as usize,
            self.width as usize,
            self.channels as usize,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_construction_and_accessors() {
        let data = vec![0u8; 12]; // 2x2x3
        let frame = Frame::new(data.clone(), 2, 2, 3);
        assert_eq!(frame.width(), 2);
        assert_eq!(frame.height(), 2);
        assert_eq!(frame.channels(), 3);
        assert_eq!(frame.data(), &data[..]);
    }

    #[test]
    #[should_panic(expected = "data length must equal width * height * channels")]
    fn test_mismatched_data_length_panics_in_debug() {
        let data = vec![0u8; 10]; // wrong size for 2x2x3
        Frame::new(data, 2, 2, 3);
    }

    #[test]
    fn test_as_ndarray_shape() {
        let data = vec![0u8; 24]; // 2x4x3
        let frame = Frame::new(data, 4, 2, 3);
        let arr = frame.as_ndarray();
        assert_eq!(arr.shape(), &[2, 4, 3]); // (height, width, channels)
    }

    #[test]
    fn test_pixel_access() {
        let mut data = vec![0u8; 12];
        data[6] = 255; // row=1, col=0, R
        let frame = Frame::new(data, 2, 2, 3);
        assert_eq!(frame.pixel(0, 1), [255, 0, 0]);
    }

    #[test]
    fn test_filled_is_constant_color() {
        let frame = Frame::filled(3, 2, [10, 20, 30]);
        for y in 0..2 {
            for x in 0..3 {
                assert_eq!(frame.pixel(x, y), [10, 20, 30]);
            }
        }
    }

    #[test]
    fn test_crop_extracts_sub_image() {
        // 4x4 frame, red square in the top-left 2x2
        let mut frame = Frame::filled(4, 4, [0, 0, 0]);
        for y in 0..2 {
            for x in 0..2 {
                let i = ((y * 4 + x) * 3) as usize;
                frame.data_mut()[i] = 200;
            }
        }
        let cropped = frame.crop(Rect::new(0, 0, 2, 2)).unwrap();
        assert_eq!(cropped.width(), 2);
        assert_eq!(cropped.height(), 2);
        assert_eq!(cropped.pixel(1, 1), [200, 0, 0]);
    }

    #[test]
    fn test_crop_out_of_bounds_returns_none() {
        let frame = Frame::filled(4, 4, [0, 0, 0]);
        assert!(frame.crop(Rect::new(2, 2, 5, 5)).is_none());
        assert!(frame.crop(Rect::new(-1, 0, 2, 2)).is_none());
    }
}
