//! # Mock Drivers
//!
//! Test doubles for [`TransitionDriver`]. Shipped as a regular module rather
//! than behind `#[cfg(test)]` so integration tests can use them.
//!
//! - [`CountingDriver`] records every transition it performs, which is how
//!   tests prove that a tab never runs two transitions for one intent.
//! - [`FailingDriver`] fails every transition, exercising the stall path.

use crate::driver::{DriverError, TransitionDriver};
use crate::model::{TabId, TabStatus};
use async_trait::async_trait;
use std::sync::Mutex;
use std::time::Duration;

/// Driver that sleeps a fixed delay, succeeds, and remembers every call.
pub struct CountingDriver {
    delay: Duration,
    calls: Mutex<Vec<(TabId, TabStatus)>>,
}

impl CountingDriver {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Every `(id, target)` performed so far, in start order.
    pub fn calls(&self) -> Vec<(TabId, TabStatus)> {
        self.calls.lock().unwrap().clone()
    }

    /// Number of transitions performed for one tab.
    pub fn count_for(&self, id: TabId) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|(tab_id, _)| *tab_id == id)
            .count()
    }
}

#[async_trait]
impl TransitionDriver for CountingDriver {
    async fn perform(&self, id: TabId, target: TabStatus) -> Result<(), DriverError> {
        self.calls.lock().unwrap().push((id, target));
        tokio::time::sleep(self.delay).await;
        Ok(())
    }
}

/// Driver that fails every transition after a fixed delay.
pub struct FailingDriver {
    delay: Duration,
    attempts: Mutex<usize>,
}

impl FailingDriver {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            attempts: Mutex::new(0),
        }
    }

    pub fn attempts(&self) -> usize {
        *self.attempts.lock().unwrap()
    }
}

#[async_trait]
impl TransitionDriver for FailingDriver {
    async fn perform(&self, id: TabId, _target: TabStatus) -> Result<(), DriverError> {
        *self.attempts.lock().unwrap() += 1;
        tokio::time::sleep(self.delay).await;
        Err(DriverError(format!("injected failure for tab {id}")))
    }
}
