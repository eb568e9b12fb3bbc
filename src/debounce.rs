// ABOUTME: Single-slot debouncer that runs only the last task scheduled within a quiet period
// ABOUTME: A new schedule aborts the pending one, mirroring clear-and-reschedule timer semantics
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Admin Panel Contributors

use crate::errors::{AppError, AppResult};
use std::future::Future;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio::time::Instant;

/// Delays a task until `delay` has passed without another schedule
pub struct Debouncer {
    delay: Duration,
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl Debouncer {
    /// Create a debouncer with the given quiet period
    #[must_use]
    pub const fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: Mutex::new(None),
        }
    }

    /// Quiet period
    #[must_use]
    pub const fn delay(&self) -> Duration {
        self.delay
    }

    /// Run `task` once the quiet period has elapsed from this call, replacing
    /// any pending task
    ///
    /// # Errors
    ///
    /// Returns an error when called outside a Tokio runtime
    pub fn schedule<F>(&self, task: F) -> AppResult<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let runtime = Handle::try_current()
            .map_err(|e| AppError::internal(format!("Debounce requires a Tokio runtime: {e}")))?;
        let deadline = Instant::now() + self.delay;
        let handle = runtime.spawn(async move {
            tokio::time::sleep_until(deadline).await;
            task.await;
        });

        let previous = self
            .pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .replace(handle);
        if let Some(previous) = previous {
            previous.abort();
        }
        Ok(())
    }

    /// Drop the pending task, if any
    pub fn cancel(&self) {
        if let Some(pending) = self
            .pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
        {
            pending.abort();
        }
    }

    /// Whether a scheduled task has not finished yet
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}
