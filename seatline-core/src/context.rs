use std::time::{Duration, Instant};

use crate::{CoreError, CoreResult};

/// Per-call context handed to engine operations by the transport.
///
/// Only carries a deadline; an elapsed deadline makes the engine abort
/// before touching state.
#[derive(Debug, Clone, Copy, Default)]
pub struct CallContext {
    deadline: Option<Instant>,
}

impl CallContext {
    /// No deadline.
    pub fn background() -> Self {
        Self::default()
    }

    pub fn with_deadline(deadline: Instant) -> Self {
        Self {
            deadline: Some(deadline),
        }
    }

    pub fn with_timeout(timeout: Duration) -> Self {
        Self::with_deadline(Instant::now() + timeout)
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn is_expired(&self) -> bool {
        self.deadline.is_some_and(|deadline| Instant::now() >= deadline)
    }

    pub fn check(&self) -> CoreResult<()> {
        if self.is_expired() {
            return Err(CoreError::DeadlineExceeded);
        }
        Ok(())
    }
}
