use std::fmt;
use std::sync::Arc;

use crate::error::ReshapeError;

/// Severity classification used for observer callbacks and alerting thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum TransformSeverity {
    /// Informational event.
    Info,
    /// Warning-level event (non-fatal).
    Warning,
    /// Error-level event (operation failed).
    Error,
    /// Critical error (the caller's setup is broken, e.g. unreadable config).
    Critical,
}

impl TransformSeverity {
    /// Severity assigned to a failed operation.
    pub fn for_error(e: &ReshapeError) -> Self {
        match e {
            ReshapeError::MissingColumn { .. }
            | ReshapeError::MissingKey { .. }
            | ReshapeError::MissingCountry { .. }
            | ReshapeError::InvalidDate { .. } => Self::Error,
            ReshapeError::Config(_) => Self::Critical,
        }
    }
}

/// Which operation produced an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransformKind {
    Reshape,
    Merge,
    ListCountries,
    Mobility,
}

/// Context about a single operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformContext {
    pub operation: TransformKind,
    /// Country or column the call was about, if any.
    pub subject: Option<String>,
}

impl fmt::Display for TransformContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.subject {
            Some(s) => write!(f, "op={:?} subject={s}", self.operation),
            None => write!(f, "op={:?}", self.operation),
        }
    }
}

/// Output shape reported on success.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransformStats {
    pub rows: usize,
    pub columns: usize,
}

/// Observer interface for operation outcomes.
///
/// Implementors can record metrics, logs, or trigger alerts.
pub trait TransformObserver: Send + Sync {
    /// Called when an operation succeeds.
    fn on_success(&self, _ctx: &TransformContext, _stats: TransformStats) {}

    /// Called when an operation fails.
    fn on_failure(
        &self,
        _ctx: &TransformContext,
        _severity: TransformSeverity,
        _error: &ReshapeError,
    ) {
    }

    /// Called when a failure meets the alert threshold.
    ///
    /// Default behavior forwards to [`Self::on_failure`].
    fn on_alert(&self, ctx: &TransformContext, severity: TransformSeverity, error: &ReshapeError) {
        self.on_failure(ctx, severity, error)
    }
}

/// Forwards every event to each registered observer, in registration order.
#[derive(Default)]
pub struct CompositeObserver {
    observers: Vec<Arc<dyn TransformObserver>>,
}

impl CompositeObserver {
    pub fn new(observers: Vec<Arc<dyn TransformObserver>>) -> Self {
        Self { observers }
    }

    /// Builder-style registration.
    pub fn with(mut self, observer: Arc<dyn TransformObserver>) -> Self {
        self.observers.push(observer);
        self
    }

    pub fn len(&self) -> usize {
        self.observers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }
}

impl fmt::Debug for CompositeObserver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CompositeObserver({} observers)", self.observers.len())
    }
}

impl TransformObserver for CompositeObserver {
    fn on_success(&self, ctx: &TransformContext, stats: TransformStats) {
        self.observers.iter().for_each(|o| o.on_success(ctx, stats));
    }

    fn on_failure(
        &self,
        ctx: &TransformContext,
        severity: TransformSeverity,
        error: &ReshapeError,
    ) {
        self.observers
            .iter()
            .for_each(|o| o.on_failure(ctx, severity, error));
    }

    fn on_alert(&self, ctx: &TransformContext, severity: TransformSeverity, error: &ReshapeError) {
        self.observers
            .iter()
            .for_each(|o| o.on_alert(ctx, severity, error));
    }
}

/// Writes one line per event to stderr.
#[derive(Debug, Default)]
pub struct StdErrObserver;

impl TransformObserver for StdErrObserver {
    fn on_success(&self, ctx: &TransformContext, stats: TransformStats) {
        eprintln!("[reshape][ok] {ctx} rows={} columns={}", stats.rows, stats.columns);
    }

    fn on_failure(
        &self,
        ctx: &TransformContext,
        severity: TransformSeverity,
        error: &ReshapeError,
    ) {
        eprintln!("[reshape][{severity:?}] {ctx} err={error}");
    }

    fn on_alert(&self, ctx: &TransformContext, severity: TransformSeverity, error: &ReshapeError) {
        eprintln!("[ALERT][reshape][{severity:?}] {ctx} err={error}");
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::{
        CompositeObserver, StdErrObserver, TransformContext, TransformKind, TransformSeverity,
    };
    use crate::error::ReshapeError;

    #[test]
    fn precondition_failures_are_errors() {
        let e = ReshapeError::MissingKey {
            key: "deaths".to_string(),
        };
        assert_eq!(TransformSeverity::for_error(&e), TransformSeverity::Error);
    }

    #[test]
    fn config_failures_are_critical() {
        let e: ReshapeError = serde_json::from_str::<serde_json::Value>("[").unwrap_err().into();
        assert_eq!(TransformSeverity::for_error(&e), TransformSeverity::Critical);
        assert!(TransformSeverity::Critical > TransformSeverity::Error);
    }

    #[test]
    fn composite_debug_reports_observer_count() {
        let composite = CompositeObserver::default()
            .with(Arc::new(StdErrObserver))
            .with(Arc::new(StdErrObserver));
        assert_eq!(composite.len(), 2);
        assert_eq!(format!("{composite:?}"), "CompositeObserver(2 observers)");
        assert!(CompositeObserver::default().is_empty());
    }

    #[test]
    fn context_display_includes_subject() {
        let ctx = TransformContext {
            operation: TransformKind::Merge,
            subject: Some("Italy".to_string()),
        };
        assert_eq!(ctx.to_string(), "op=Merge subject=Italy");
    }
}
