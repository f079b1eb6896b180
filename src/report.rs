//! # Reporting
//!
//! The fetch engine writes human-readable diagnostics to a [`Reporter`]
//! supplied at construction rather than to a global logger. Implementations
//! must return promptly and never fail.

use std::sync::Arc;

/// Sink for fetch diagnostics.
pub trait Reporter: Send + Sync {
    /// Record a successful outcome.
    fn info(&self, message: &str);

    /// Record a failed outcome.
    fn debug(&self, message: &str);
}

/// Default [`Reporter`] that forwards diagnostics to `tracing`.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingReporter;

impl Reporter for TracingReporter {
    fn info(&self, message: &str) {
        tracing::info!(target: "credibil_fetch", "{message}");
    }

    fn debug(&self, message: &str) {
        tracing::debug!(target: "credibil_fetch", "{message}");
    }
}

impl<R: Reporter + ?Sized> Reporter for Arc<R> {
    fn info(&self, message: &str) {
        (**self).info(message);
    }

    fn debug(&self, message: &str) {
        (**self).debug(message);
    }
}

impl<R: Reporter + ?Sized> Reporter for &R {
    fn info(&self, message: &str) {
        (**self).info(message);
    }

    fn debug(&self, message: &str) {
        (**self).debug(message);
    }
}
