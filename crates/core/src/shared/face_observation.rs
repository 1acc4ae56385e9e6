use crate::shared::rect::Rect;

/// Immutable per-frame snapshot from the external face detector.
///
/// The detector itself is an external collaborator; this type is the full
/// run-time contract with it: one bounding box in frame coordinates, three
/// head-pose angles in degrees, and three [0,1] probabilities.
#[derive(Clone, Copy, Debug)]
pub struct FaceObservation {
    /// Face bounding box in source frame coordinates.
    pub bounding_box: Rect,
    /// Left/right head turn in degrees. Positive = turned to the subject's left.
    pub yaw: f64,
    /// Up/down head tilt in degrees. Positive = tilted down.
    pub pitch: f64,
    /// In-plane rotation in degrees.
    pub roll: f64,
    pub left_eye_open_probability: f64,
    pub right_eye_open_probability: f64,
    pub smiling_probability: f64,
}

impl FaceObservation {
    /// An observation with a neutral, frontal pose — useful as a test
    /// baseline and as a default for the CLI where only the box is known.
    pub fn frontal(bounding_box: Rect) -> Self {
        Self {
            bounding_box,
            yaw: 0.0,
            pitch: 0.0,
            roll: 0.0,
            left_eye_open_probability: 1.0,
            right_eye_open_probability: 1.0,
            smiling_probability: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frontal_is_neutral() {
        let obs = FaceObservation::frontal(Rect::new(10, 10, 50, 50));
        assert_eq!(obs.yaw, 0.0);
        assert_eq!(obs.pitch, 0.0);
        assert_eq!(obs.roll, 0.0);
        assert_eq!(obs.left_eye_open_probability, 1.0);
        assert_eq!(obs.smiling_probability, 0.0);
    }
}
