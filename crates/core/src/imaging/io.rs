use std::path::Path;

use crate::shared::frame::Frame;

/// Load an image file into an RGB [`Frame`] using the `image` crate.
pub fn load_frame(path: &Path) -> Result<Frame, Box<dyn std::error::Error>> {
    let img = image::open(path)?.to_rgb8();
    let (width, height) = img.dimensions();
    Ok(Frame::new(img.into_raw(), width, height, 3))
}

/// Write a frame to an image file, creating parent directories as needed.
pub fn save_frame(path: &Path, frame: &Frame) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let img = image::RgbImage::from_raw(frame.width(), frame.height(), frame.data().to_vec())
        .ok_or("Failed to create image from frame data")?;
    img.save(path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_through_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("frame.png");

        let frame = Frame::filled(8, 6, [12, 200, 34]);
        save_frame(&path, &frame).unwrap();
        let loaded = load_frame(&path).unwrap();

        assert_eq!(loaded.width(), 8);
        assert_eq!(loaded.height(), 6);
        assert_eq!(loaded.data(), frame.data());
    }

    #[test]
    fn test_save_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("out.png");
        let frame = Frame::filled(2, 2, [0, 0, 0]);
        save_frame(&path, &frame).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_load_missing_file_errors() {
        assert!(load_frame(Path::new("/nonexistent/frame.png")).is_err());
    }
}
