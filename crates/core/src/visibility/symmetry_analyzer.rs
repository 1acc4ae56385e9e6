use crate::imaging::color::to_gray;
use crate::imaging::template::{flip_horizontal, normalized_cross_correlation};
use crate::shared::config::AnalyzerConfig;
use crate::shared::defect::Defect;
use crate::shared::frame::Frame;
use crate::shared::rect::Rect;

/// Detects masks, hands and other cover over the face.
///
/// A frontal face is close to mirror symmetric; most things people hold
/// in front of it are not. The lower three quarters of the face crop
/// (eyes to chin, ears trimmed) is split vertically and the right half is
/// mirrored onto the left. Correlation below the similarity threshold
/// reports FACE_HIDDEN.
pub struct SymmetryAnalyzer {
    config: AnalyzerConfig,
}

impl SymmetryAnalyzer {
    pub fn new(config: AnalyzerConfig) -> Self {
        Self { config }
    }

    pub fn analyze(&self, face: &Frame) -> Vec<Defect> {
        let Some(score) = self.mirror_similarity(face) else {
            return Vec::new();
        };
        log::debug!("face mirror similarity {score:.4}");
        if score < self.config.visibility_similarity_threshold {
            vec![Defect::FaceHidden]
        } else {
            Vec::new()
        }
    }

    /// Mirror correlation of the region below the eye line, or `None` for
    /// crops too small to split.
    fn mirror_similarity(&self, face: &Frame) -> Option<f64> {
        let (w, h) = (face.width() as i32, face.height() as i32);
        let region = Rect {
            left: w / 8,
            top: h * 3 / 8,
            right: w * 7 / 8,
            bottom: h,
        };
        let crop = face.crop(region)?;
        let cw = crop.width() as usize;
        let half = cw / 2;
        if half == 0 {
            return None;
        }

        let gray = to_gray(&crop);
        let ch = crop.height() as usize;
        let mut left = Vec::with_capacity(half * ch);
        let mut right = Vec::with_capacity(half * ch);
        for y in 0..ch {
            left.extend_from_slice(&gray[y * cw..y * cw + half]);
            right.extend_from_slice(&gray[y * cw + (cw - half)..(y + 1) * cw]);
        }
        flip_horizontal(&mut right, half, ch);
        Some(normalized_cross_correlation(&left, &right))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn analyzer() -> SymmetryAnalyzer {
        SymmetryAnalyzer::new(AnalyzerConfig::default())
    }

    #[test]
    fn test_uniform_face_passes() {
        let face = Frame::filled(64, 64, [170, 150, 140]);
        assert!(analyzer().analyze(&face).is_empty());
    }

    #[test]
    fn test_mirrored_pattern_passes() {
        // Vertical gradient, identical in both halves
        let mut face = Frame::filled(64, 64, [0, 0, 0]);
        for y in 0..64u32 {
            let v = (60 + y * 3) as u8;
            for x in 0..64u32 {
                let i = ((y * 64 + x) * 3) as usize;
                face.data_mut()[i..i + 3].copy_from_slice(&[v, v, v]);
            }
        }
        assert!(analyzer().analyze(&face).is_empty());
    }

    #[test]
    fn test_asymmetric_cover_is_hidden() {
        // Striped left half against a flat right half
        let mut face = Frame::filled(64, 64, [128, 128, 128]);
        for y in 0..64u32 {
            for x in 0..32u32 {
                let v = if y % 2 == 0 { 255 } else { 0 };
                let i = ((y * 64 + x) * 3) as usize;
                face.data_mut()[i..i + 3].copy_from_slice(&[v, v, v]);
            }
        }
        assert_eq!(analyzer().analyze(&face), vec![Defect::FaceHidden]);
    }

    #[test]
    fn test_tiny_crop_abstains() {
        let face = Frame::filled(2, 2, [170, 150, 140]);
        assert!(analyzer().analyze(&face).is_empty());
    }
}
