use crate::pipeline::verify_frame_use_case::VerifyFrameUseCase;
use crate::shared::defect::FrameVerdict;
use crate::shared::face_observation::FaceObservation;
use crate::shared::frame::Frame;

/// Runs frame verification on a dedicated thread, keeping at most one
/// frame in flight.
///
/// Live preview produces frames faster than the analyzers consume them;
/// verdicts about stale frames are worthless, so a submission that meets
/// a busy worker is dropped instead of queued. Verdicts come back on a
/// channel the caller polls from its UI loop.
pub struct LatestFrameWorker {
    task_tx: Option<crossbeam_channel::Sender<VerifyTask>>,
    verdict_rx: crossbeam_channel::Receiver<FrameVerdict>,
    handle: Option<std::thread::JoinHandle<()>>,
}

struct VerifyTask {
    frame: Frame,
    faces: Vec<FaceObservation>,
}

impl LatestFrameWorker {
    pub fn spawn(mut use_case: VerifyFrameUseCase) -> Self {
        let (task_tx, task_rx) = crossbeam_channel::bounded::<VerifyTask>(1);
        let (verdict_tx, verdict_rx) = crossbeam_channel::unbounded::<FrameVerdict>();

        let handle = std::thread::spawn(move || {
            for task in task_rx {
                match use_case.verify(&task.frame, &task.faces) {
                    Ok(verdict) => {
                        if verdict_tx.send(verdict).is_err() {
                            break;
                        }
                    }
                    Err(err) => log::error!("frame verification failed: {err}"),
                }
            }
            use_case.close();
        });

        Self {
            task_tx: Some(task_tx),
            verdict_rx,
            handle: Some(handle),
        }
    }

    /// Hand a frame to the worker. Returns `false` when the frame was
    /// dropped because the worker is still busy or already shut down.
    pub fn submit(&self, frame: Frame, faces: Vec<FaceObservation>) -> bool {
        let Some(tx) = self.task_tx.as_ref() else {
            return false;
        };
        match tx.try_send(VerifyTask { frame, faces }) {
            Ok(()) => true,
            Err(crossbeam_channel::TrySendError::Full(_)) => {
                log::debug!("worker busy, dropping stale frame");
                false
            }
            Err(crossbeam_channel::TrySendError::Disconnected(_)) => {
                log::warn!("verification worker is gone, dropping frame");
                false
            }
        }
    }

    /// Channel of finished verdicts, oldest first.
    pub fn verdicts(&self) -> &crossbeam_channel::Receiver<FrameVerdict> {
        &self.verdict_rx
    }

    /// Stop accepting frames and wait for the in-flight one to finish.
    pub fn close(&mut self) {
        self.task_tx = None;
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                log::error!("verification worker panicked");
            }
        }
    }
}

impl Drop for LatestFrameWorker {
    fn drop(&mut self) {
        self.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::pose_validator::validate_faces;
    use crate::lighting::shadow_analyzer::ShadowAnalyzer;
    use crate::shared::config::AnalyzerConfig;
    use crate::shared::defect::Defect;
    use crate::visibility::symmetry_analyzer::SymmetryAnalyzer;
    use std::time::Duration;

    fn worker() -> LatestFrameWorker {
        let config = AnalyzerConfig::default();
        LatestFrameWorker::spawn(VerifyFrameUseCase::new(
            config,
            None,
            ShadowAnalyzer::new(None, config),
            SymmetryAnalyzer::new(config),
        ))
    }

    #[test]
    fn test_verdict_arrives_for_submitted_frame() {
        let worker = worker();
        let frame = Frame::filled(320, 240, [200, 200, 200]);
        assert!(worker.submit(frame, Vec::new()));
        let verdict = worker
            .verdicts()
            .recv_timeout(Duration::from_secs(5))
            .unwrap();
        assert!(verdict.contains(Defect::NoFace));
    }

    #[test]
    fn test_submit_after_close_is_dropped() {
        let mut worker = worker();
        worker.close();
        let frame = Frame::filled(320, 240, [200, 200, 200]);
        assert!(!worker.submit(frame, Vec::new()));
    }

    #[test]
    fn test_flooding_drops_rather_than_queues() {
        let worker = worker();
        // Far more submissions than one worker can hold; the bounded slot
        // forces drops and every accepted frame still yields a verdict.
        let mut accepted = 0;
        for _ in 0..50 {
            let frame = Frame::filled(320, 240, [200, 200, 200]);
            if worker.submit(frame, Vec::new()) {
                accepted += 1;
            }
        }
        assert!(accepted >= 1);
        for _ in 0..accepted {
            assert!(worker
                .verdicts()
                .recv_timeout(Duration::from_secs(5))
                .is_ok());
        }
    }

    #[test]
    fn test_validate_faces_matches_worker_result() {
        // The worker reports exactly what the synchronous path reports.
        let config = AnalyzerConfig::default();
        let direct = validate_faces(&[], &config);
        let worker = worker();
        worker.submit(Frame::filled(64, 64, [10, 10, 10]), Vec::new());
        let verdict = worker
            .verdicts()
            .recv_timeout(Duration::from_secs(5))
            .unwrap();
        assert_eq!(verdict.defects(), direct.as_slice());
    }
}
