//! Upload progress accounting.
//!
//! Progress is presentation state: it is reported to a [`ProgressSink`] after
//! every successful upload and never influences control flow.

/// Which batch of uploads a progress value belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProgressStage {
    /// Thumbnail plus gallery images.
    Images,
    /// Attached project files.
    Files,
    /// Member profile picture.
    Profile,
}

/// Receives progress percentages (0..=100) as uploads complete.
pub trait ProgressSink: Send + Sync {
    fn report(&self, stage: ProgressStage, percent: u8);
}

/// Sink that drops every report.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn report(&self, _stage: ProgressStage, _percent: u8) {}
}

/// Counts successful uploads out of a fixed total.
#[derive(Debug, Clone, Copy)]
pub struct UploadProgress {
    stage: ProgressStage,
    total: usize,
    done: usize,
}

impl UploadProgress {
    pub fn new(stage: ProgressStage, total: usize) -> Self {
        Self {
            stage,
            total,
            done: 0,
        }
    }

    /// Record one success and report the new percentage.
    ///
    /// With a zero total nothing is ever reported.
    pub fn record_success(&mut self, sink: &dyn ProgressSink) {
        if self.total == 0 {
            return;
        }
        self.done = (self.done + 1).min(self.total);
        sink.report(self.stage, self.percent());
    }

    /// `round(done / total * 100)`, or 0 when nothing is expected.
    pub fn percent(&self) -> u8 {
        if self.total == 0 {
            return 0;
        }
        (self.done as f64 / self.total as f64 * 100.0).round() as u8
    }

    pub fn done(&self) -> usize {
        self.done
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;

    #[derive(Default)]
    struct Recorder(Mutex<Vec<u8>>);

    impl ProgressSink for Recorder {
        fn report(&self, _stage: ProgressStage, percent: u8) {
            self.0.lock().unwrap().push(percent);
        }
    }

    #[test]
    fn three_uploads_round_each_step() {
        let sink = Recorder::default();
        let mut progress = UploadProgress::new(ProgressStage::Images, 3);
        for _ in 0..3 {
            progress.record_success(&sink);
        }
        assert_eq!(*sink.0.lock().unwrap(), vec![33, 67, 100]);
    }

    #[test]
    fn zero_total_never_reports() {
        let sink = Recorder::default();
        let mut progress = UploadProgress::new(ProgressStage::Files, 0);
        progress.record_success(&sink);
        assert!(sink.0.lock().unwrap().is_empty());
        assert_eq!(progress.percent(), 0);
    }

    #[test]
    fn extra_successes_saturate_at_full() {
        let sink = Recorder::default();
        let mut progress = UploadProgress::new(ProgressStage::Images, 1);
        progress.record_success(&sink);
        progress.record_success(&sink);
        assert_eq!(*sink.0.lock().unwrap(), vec![100, 100]);
    }
}
