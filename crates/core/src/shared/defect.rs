/// How strongly a defect disqualifies the frame.
///
/// Ordered so that the most severe tag can be selected with `max`;
/// a frame's overall validity is never averaged.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Valid,
    Warning,
    Invalid,
}

/// A single conformance defect or corrective action for the current frame.
///
/// Directional pose tags name the correction the subject should make,
/// the remaining tags name the detected problem.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Defect {
    NoFace,
    TooManyFaces,
    RotateLeft,
    RotateRight,
    FaceUp,
    FaceDown,
    StraightenFromLeft,
    StraightenFromRight,
    LeftEyeClosed,
    RightEyeClosed,
    NotNeutral,
    NotUniform,
    TooDark,
    ShadowPresent,
    FaceHidden,
}

impl Defect {
    pub fn severity(&self) -> Severity {
        match self {
            Defect::NoFace | Defect::TooManyFaces => Severity::Invalid,
            Defect::NotUniform | Defect::TooDark | Defect::ShadowPresent | Defect::FaceHidden => {
                Severity::Invalid
            }
            Defect::RotateLeft
            | Defect::RotateRight
            | Defect::FaceUp
            | Defect::FaceDown
            | Defect::StraightenFromLeft
            | Defect::StraightenFromRight
            | Defect::LeftEyeClosed
            | Defect::RightEyeClosed
            | Defect::NotNeutral => Severity::Warning,
        }
    }
}

/// Aggregated result of one verification cycle.
#[derive(Clone, Debug, Default)]
pub struct FrameVerdict {
    defects: Vec<Defect>,
}

impl FrameVerdict {
    pub fn new(defects: Vec<Defect>) -> Self {
        Self { defects }
    }

    pub fn defects(&self) -> &[Defect] {
        &self.defects
    }

    /// Most severe tag present; `Valid` when no defect was reported.
    pub fn severity(&self) -> Severity {
        self.defects
            .iter()
            .map(Defect::severity)
            .max()
            .unwrap_or(Severity::Valid)
    }

    pub fn is_valid(&self) -> bool {
        self.severity() == Severity::Valid
    }

    pub fn contains(&self, defect: Defect) -> bool {
        self.defects.contains(&defect)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_ordering() {
        assert!(Severity::Invalid > Severity::Warning);
        assert!(Severity::Warning > Severity::Valid);
    }

    #[test]
    fn test_empty_verdict_is_valid() {
        let verdict = FrameVerdict::default();
        assert!(verdict.is_valid());
        assert_eq!(verdict.severity(), Severity::Valid);
    }

    #[test]
    fn test_most_severe_tag_wins() {
        let verdict = FrameVerdict::new(vec![Defect::RotateLeft, Defect::NotUniform]);
        assert_eq!(verdict.severity(), Severity::Invalid);
        assert!(!verdict.is_valid());
    }

    #[test]
    fn test_warning_only_verdict() {
        let verdict = FrameVerdict::new(vec![Defect::FaceUp]);
        assert_eq!(verdict.severity(), Severity::Warning);
    }

    #[test]
    fn test_contains() {
        let verdict = FrameVerdict::new(vec![Defect::TooDark]);
        assert!(verdict.contains(Defect::TooDark));
        assert!(!verdict.contains(Defect::NotUniform));
    }
}
