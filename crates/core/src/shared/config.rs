/// Per-session immutable analysis thresholds.
///
/// Built once at startup and passed by reference; analyzers never mutate
/// shared configuration. Every value here is a named, tunable policy knob —
/// the defaults reproduce the behavior documented per analyzer.
#[derive(Clone, Copy, Debug)]
pub struct AnalyzerConfig {
    /// Horizontal expansion applied to the detected face box before cropping.
    pub crop_expansion_factor: f64,
    /// Fraction of the crop height placed above the face center,
    /// to leave more room for forehead/hair than for the chin.
    pub crop_upper_fraction: f64,

    /// Head-pose limits in degrees.
    pub yaw_threshold_deg: f64,
    pub pitch_threshold_deg: f64,
    pub roll_threshold_deg: f64,

    /// Eye-open probability below this reports a closed eye.
    pub eyes_open_threshold: f64,
    /// Smiling probability above this reports a non-neutral expression.
    pub neutral_face_threshold: f64,

    /// Background darker than this normalized luma is TOO_DARK.
    /// A stricter policy would use 0.8; see `DEFAULT_BRIGHTNESS_CUTOFF`.
    pub brightness_cutoff: f64,
    /// Blob-uniformity slack: unexplained area above `image_area / divisor`
    /// on both sampled sides marks the background non-uniform.
    pub uniformity_epsilon_divisor: u32,
    /// Edge-density base threshold: `image_area / divisor` edge pixels.
    pub edge_epsilon_divisor: u32,
    /// Background HSV standard-deviation limits (0-255 scale).
    pub hue_stddev_threshold: f64,
    pub value_stddev_threshold: f64,

    /// Left/right mean-luma difference (0-255) that marks a side shadow.
    pub luma_symmetry_threshold: f64,
    /// Classifier scores within +/- margin of zero are treated as NOT_SURE.
    pub shadow_classifier_margin: f64,

    /// Mirror-correlation below this marks the face as hidden.
    pub visibility_similarity_threshold: f64,
}

/// Default cutoff between "bright enough" and TOO_DARK. The stricter 0.8
/// policy from later revisions is available by overriding
/// [`AnalyzerConfig::brightness_cutoff`].
pub const DEFAULT_BRIGHTNESS_CUTOFF: f64 = 0.5;

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            crop_expansion_factor: 1.2,
            crop_upper_fraction: 9.0 / 16.0,
            yaw_threshold_deg: 8.0,
            pitch_threshold_deg: 8.0,
            roll_threshold_deg: 4.0,
            eyes_open_threshold: 0.7,
            neutral_face_threshold: 0.5,
            brightness_cutoff: DEFAULT_BRIGHTNESS_CUTOFF,
            uniformity_epsilon_divisor: 10,
            edge_epsilon_divisor: 150,
            hue_stddev_threshold: 25.0,
            value_stddev_threshold: 50.0,
            luma_symmetry_threshold: 25.0,
            shadow_classifier_margin: 0.5,
            visibility_similarity_threshold: 0.95,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_sane() {
        let config = AnalyzerConfig::default();
        assert!(config.crop_expansion_factor > 1.0);
        assert!(config.crop_upper_fraction > 0.5 && config.crop_upper_fraction < 1.0);
        assert_eq!(config.brightness_cutoff, 0.5);
        assert!(config.visibility_similarity_threshold < 1.0);
    }
}
