use crate::Batch;

#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error("ready cue unavailable: {0}")]
    Unavailable(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// One-shot cue fired when a batch first becomes ready.
///
/// Failures are reported back but the controller never surfaces them.
pub trait ReadyNotifier {
    fn notify_ready(&mut self, batch: &Batch) -> Result<(), NotifyError>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SilentNotifier;

impl ReadyNotifier for SilentNotifier {
    fn notify_ready(&mut self, _batch: &Batch) -> Result<(), NotifyError> {
        Ok(())
    }
}
