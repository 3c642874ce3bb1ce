use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::io::error::{GenerationError, Result};

/// Shared flag that aborts a running attempt
///
/// Clones observe the same flag, so one handle can be given to whatever
/// raises the interrupt while the solve loop polls another.
#[derive(Clone, Debug, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    /// Create an untripped token
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation of every loop polling this token
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    /// Whether cancellation has been requested
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    /// Fail with [`GenerationError::Cancelled`] once tripped
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::Cancelled`] if cancellation was requested
    pub fn check(&self) -> Result<()> {
        if self.is_cancelled() {
            Err(GenerationError::Cancelled)
        } else {
            Ok(())
        }
    }
}
