use crate::shared::config::AnalyzerConfig;
use crate::shared::defect::Defect;
use crate::shared::face_observation::FaceObservation;

/// Face-count and head-pose validation.
///
/// Zero faces yields `NoFace`, more than one yields `TooManyFaces`; in both
/// cases every other check is skipped for the frame. For a single face, each
/// exceeded pose threshold produces exactly one directional corrective tag,
/// plus the eye-open and neutral-expression checks.
pub fn validate_faces(faces: &[FaceObservation], config: &AnalyzerConfig) -> Vec<Defect> {
    match faces {
        [] => vec![Defect::NoFace],
        [face] => validate_pose(face, config),
        _ => vec![Defect::TooManyFaces],
    }
}

fn validate_pose(face: &FaceObservation, config: &AnalyzerConfig) -> Vec<Defect> {
    let mut defects = Vec::new();

    if face.yaw < -config.yaw_threshold_deg {
        defects.push(Defect::RotateLeft);
    } else if face.yaw > config.yaw_threshold_deg {
        defects.push(Defect::RotateRight);
    }

    if face.pitch < -config.pitch_threshold_deg {
        defects.push(Defect::FaceUp);
    } else if face.pitch > config.pitch_threshold_deg {
        defects.push(Defect::FaceDown);
    }

    if face.roll < -config.roll_threshold_deg {
        defects.push(Defect::StraightenFromLeft);
    } else if face.roll > config.roll_threshold_deg {
        defects.push(Defect::StraightenFromRight);
    }

    if face.left_eye_open_probability < config.eyes_open_threshold {
        defects.push(Defect::LeftEyeClosed);
    }
    if face.right_eye_open_probability < config.eyes_open_threshold {
        defects.push(Defect::RightEyeClosed);
    }
    if face.smiling_probability > config.neutral_face_threshold {
        defects.push(Defect::NotNeutral);
    }

    defects
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::rect::Rect;
    use rstest::rstest;

    fn frontal() -> FaceObservation {
        FaceObservation::frontal(Rect::new(100, 100, 300, 300))
    }

    #[test]
    fn test_no_faces_reports_no_face() {
        let defects = validate_faces(&[], &AnalyzerConfig::default());
        assert_eq!(defects, vec![Defect::NoFace]);
    }

    #[test]
    fn test_two_faces_reports_too_many_and_nothing_else() {
        let mut crooked = frontal();
        crooked.yaw = 45.0;
        let defects = validate_faces(&[frontal(), crooked], &AnalyzerConfig::default());
        assert_eq!(defects, vec![Defect::TooManyFaces]);
    }

    #[test]
    fn test_neutral_frontal_face_is_clean() {
        let defects = validate_faces(&[frontal()], &AnalyzerConfig::default());
        assert!(defects.is_empty());
    }

    // Each exceeded axis yields exactly one directional tag.
    #[rstest]
    #[case::yaw_right(10.0, 0.0, 0.0, Defect::RotateRight)]
    #[case::yaw_left(-10.0, 0.0, 0.0, Defect::RotateLeft)]
    #[case::pitch_up(0.0, -9.0, 0.0, Defect::FaceUp)]
    #[case::pitch_down(0.0, 9.0, 0.0, Defect::FaceDown)]
    #[case::roll_right(0.0, 0.0, 5.0, Defect::StraightenFromRight)]
    #[case::roll_left(0.0, 0.0, -5.0, Defect::StraightenFromLeft)]
    fn test_pose_directions(
        #[case] yaw: f64,
        #[case] pitch: f64,
        #[case] roll: f64,
        #[case] expected: Defect,
    ) {
        let mut face = frontal();
        face.yaw = yaw;
        face.pitch = pitch;
        face.roll = roll;
        let defects = validate_faces(&[face], &AnalyzerConfig::default());
        assert_eq!(defects, vec![expected]);
    }

    #[test]
    fn test_closed_eyes_and_smile() {
        let mut face = frontal();
        face.left_eye_open_probability = 0.2;
        face.right_eye_open_probability = 0.9;
        face.smiling_probability = 0.8;
        let defects = validate_faces(&[face], &AnalyzerConfig::default());
        assert_eq!(defects, vec![Defect::LeftEyeClosed, Defect::NotNeutral]);
    }

    #[test]
    fn test_pose_exactly_at_threshold_passes() {
        let mut face = frontal();
        face.yaw = 8.0;
        face.roll = -4.0;
        let defects = validate_faces(&[face], &AnalyzerConfig::default());
        assert!(defects.is_empty());
    }
}
