//! Application state shared across handlers.

use std::sync::Arc;
use std::time::Instant;

use tokio::sync::{OwnedSemaphorePermit, Semaphore};

use codecrew_core::{Llm, ReviewOptions};

use crate::error::{ApiError, Result};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Model client shared by every review.
    pub llm: Arc<Llm>,
    /// Crew options applied to every review.
    pub options: ReviewOptions,
    /// One permit: at most one review in flight.
    review_slot: Arc<Semaphore>,
    /// Server start time for uptime calculation.
    start_time: Instant,
}

impl AppState {
    /// Creates a new AppState.
    pub fn new(llm: Arc<Llm>, options: ReviewOptions) -> Self {
        Self {
            llm,
            options,
            review_slot: Arc::new(Semaphore::new(1)),
            start_time: Instant::now(),
        }
    }

    /// Claims the review slot, or fails if a review is already running.
    ///
    /// The slot is released when the returned permit is dropped.
    pub fn try_begin_review(&self) -> Result<OwnedSemaphorePermit> {
        self.review_slot
            .clone()
            .try_acquire_owned()
            .map_err(|_| ApiError::Conflict("a review is already running".to_string()))
    }

    /// Whether a review is currently running.
    pub fn is_busy(&self) -> bool {
        self.review_slot.available_permits() == 0
    }

    /// Returns the uptime in seconds.
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}
