//! Cooperative cancellation for long comparisons.
//!
//! The within-block re-alignment is quadratic in the worst case, so callers
//! (a UI event loop, a CLI with `--timeout-ms`) can hand the engine a
//! deadline and/or a shared flag. The engine checks it between opcode blocks.

use super::EngineError;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Deadline and abort flag checked at opcode-block granularity
#[derive(Debug, Clone, Default)]
pub struct Cancellation {
    deadline: Option<Instant>,
    flag: Option<Arc<AtomicBool>>,
}

impl Cancellation {
    /// Never cancels
    pub fn none() -> Self {
        Self::default()
    }

    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Deadline relative to now
    pub fn with_timeout(self, timeout: Duration) -> Self {
        self.with_deadline(Instant::now() + timeout)
    }

    /// Abort as soon as `flag` becomes true
    pub fn with_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.flag = Some(flag);
        self
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Return an error if the flag was raised or the deadline passed
    pub fn check(&self) -> Result<(), EngineError> {
        if let Some(flag) = &self.flag {
            if flag.load(Ordering::Relaxed) {
                return Err(EngineError::Cancelled);
            }
        }

        if let Some(deadline) = self.deadline {
            if Instant::now() >= deadline {
                return Err(EngineError::DeadlineExceeded);
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_none_never_cancels() {
        assert!(Cancellation::none().check().is_ok());
    }

    #[test]
    fn test_raised_flag_cancels() {
        let flag = Arc::new(AtomicBool::new(false));
        let cancel = Cancellation::none().with_flag(flag.clone());
        assert!(cancel.check().is_ok());

        flag.store(true, Ordering::Relaxed);
        assert!(matches!(cancel.check(), Err(EngineError::Cancelled)));
    }

    #[test]
    fn test_past_deadline_cancels() {
        let cancel = Cancellation::none().with_deadline(Instant::now());
        assert!(matches!(cancel.check(), Err(EngineError::DeadlineExceeded)));
    }
}
