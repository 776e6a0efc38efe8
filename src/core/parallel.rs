//! Parallel processing utilities

use rayon::prelude::*;
use std::sync::{Arc, Mutex};

/// Progress update information for parallel operations
#[derive(Debug, Clone)]
pub struct ProgressUpdate {
    pub current: usize,
    pub total: usize,
    pub message: String,
}

impl ProgressUpdate {
    /// Create a new progress update
    pub fn new(current: usize, total: usize, message: impl Into<String>) -> Self {
        Self {
            current,
            total,
            message: message.into(),
        }
    }

    /// Calculate progress percentage
    pub fn percentage(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            (self.current as f64 / self.total as f64) * 100.0
        }
    }
}

/// Execute a function in parallel on a collection of items.
///
/// Output order matches input order.
pub fn parallel_process<T, F, R>(items: Vec<T>, f: F) -> Vec<R>
where
    T: Send,
    R: Send,
    F: Fn(T) -> R + Send + Sync,
{
    items.into_par_iter().map(f).collect()
}

/// Execute a function in parallel with progress reporting.
///
/// The counter tracks completed items, so `current` values arrive in
/// completion order rather than input order.
pub fn parallel_process_with_progress<T, F, R, P>(
    items: Vec<T>,
    f: F,
    progress_callback: P,
) -> Vec<R>
where
    T: Send,
    R: Send,
    F: Fn(T) -> R + Send + Sync,
    P: Fn(ProgressUpdate) + Send + Sync,
{
    let total = items.len();
    let counter = Arc::new(Mutex::new(0));

    items
        .into_par_iter()
        .map(|item| {
            let result = f(item);

            let current = match counter.lock() {
                Ok(mut guard) => {
                    *guard += 1;
                    *guard
                }
                Err(_) => return result,
            };

            progress_callback(ProgressUpdate::new(
                current,
                total,
                format!("Parsed {}/{} modules", current, total),
            ));

            result
        })
        .collect()
}
