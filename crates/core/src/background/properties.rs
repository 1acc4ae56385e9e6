/// How much edge activity the background carries after discounting the
/// person silhouette.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EdgeTier {
    None,
    Low,
    Medium,
    High,
}

impl EdgeTier {
    /// Contribution of this tier to the uniformity score.
    pub fn points(self) -> u8 {
        match self {
            EdgeTier::None | EdgeTier::Low => 0,
            EdgeTier::Medium => 1,
            EdgeTier::High => 2,
        }
    }

    /// Classify a residual edge-pixel count against the frame area.
    /// `base` is the per-frame tolerance; up to half of it is considered
    /// sensor noise.
    pub fn from_edge_count(residual: f64, base: f64) -> EdgeTier {
        if residual <= base / 2.0 {
            EdgeTier::None
        } else if residual <= base {
            EdgeTier::Low
        } else if residual <= base * 3.0 {
            EdgeTier::Medium
        } else {
            EdgeTier::High
        }
    }
}

/// Measurements of one analyzed background, captured once per frame.
///
/// Each field is `None` when its probe could not run on this frame, in
/// which case it contributes nothing to the score rather than counting
/// as a failure.
#[derive(Clone, Copy, Debug, Default)]
pub struct BackgroundProperties {
    /// Seed-grown color blobs cover the background on both sides.
    pub blob_coverage_ok: Option<bool>,
    /// Residual edge activity after removing the person outline.
    pub edge_tier: Option<EdgeTier>,
    /// Hue and value spread stay within the plain-background band.
    pub color_plain: Option<bool>,
    /// Mean background brightness, normalized to 0..1.
    pub brightness: Option<f64>,
}

/// Point at which accumulated evidence means the background is not uniform.
pub const NOT_UNIFORM_SCORE: u8 = 3;

impl BackgroundProperties {
    /// Accumulated non-uniformity evidence, 0 (clean) to 3 (failed).
    ///
    /// Blob coverage failure and colorfulness each add one point, edge
    /// activity adds up to two. Any single probe can therefore not fail
    /// the frame on its own.
    pub fn uniformity_score(&self) -> u8 {
        let mut score = 0u8;
        if self.blob_coverage_ok == Some(false) {
            score += 1;
        }
        if self.color_plain == Some(false) {
            score += 1;
        }
        if let Some(tier) = self.edge_tier {
            score += tier.points();
        }
        score.min(NOT_UNIFORM_SCORE)
    }

    pub fn is_uniform(&self) -> bool {
        self.uniformity_score() < NOT_UNIFORM_SCORE
    }

    /// Whether the background is bright enough for a passport photo.
    /// An unmeasured brightness passes, the defect needs positive evidence.
    pub fn is_bright(&self, cutoff: f64) -> bool {
        match self.brightness {
            Some(b) => b >= cutoff,
            None => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_background_scores_zero() {
        let props = BackgroundProperties {
            blob_coverage_ok: Some(true),
            edge_tier: Some(EdgeTier::None),
            color_plain: Some(true),
            brightness: Some(0.8),
        };
        assert_eq!(props.uniformity_score(), 0);
        assert!(props.is_uniform());
    }

    #[test]
    fn test_single_failure_is_not_enough() {
        let props = BackgroundProperties {
            blob_coverage_ok: Some(false),
            edge_tier: Some(EdgeTier::Low),
            color_plain: Some(true),
            brightness: None,
        };
        assert_eq!(props.uniformity_score(), 1);
        assert!(props.is_uniform());
    }

    #[test]
    fn test_high_edges_plus_blob_failure_fails() {
        let props = BackgroundProperties {
            blob_coverage_ok: Some(false),
            edge_tier: Some(EdgeTier::High),
            color_plain: Some(true),
            brightness: None,
        };
        assert_eq!(props.uniformity_score(), 3);
        assert!(!props.is_uniform());
    }

    #[test]
    fn test_all_probes_failing_clamps_to_three() {
        let props = BackgroundProperties {
            blob_coverage_ok: Some(false),
            edge_tier: Some(EdgeTier::High),
            color_plain: Some(false),
            brightness: None,
        };
        assert_eq!(props.uniformity_score(), NOT_UNIFORM_SCORE);
    }

    #[test]
    fn test_missing_probes_abstain() {
        let props = BackgroundProperties::default();
        assert_eq!(props.uniformity_score(), 0);
        assert!(props.is_uniform());
        assert!(props.is_bright(0.5));
    }

    #[test]
    fn test_brightness_cutoff() {
        let mut props = BackgroundProperties::default();
        props.brightness = Some(0.3);
        assert!(!props.is_bright(0.5));
        props.brightness = Some(0.6);
        assert!(props.is_bright(0.5));
    }

    #[test]
    fn test_edge_tier_thresholds() {
        let base = 100.0;
        assert_eq!(EdgeTier::from_edge_count(40.0, base), EdgeTier::None);
        assert_eq!(EdgeTier::from_edge_count(80.0, base), EdgeTier::Low);
        assert_eq!(EdgeTier::from_edge_count(250.0, base), EdgeTier::Medium);
        assert_eq!(EdgeTier::from_edge_count(400.0, base), EdgeTier::High);
    }
}
