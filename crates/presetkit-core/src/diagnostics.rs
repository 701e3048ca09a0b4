//! Per-call diagnostic log for apply operations
//!
//! Apply never stops on a single bad entry. Every condition worth reporting
//! is recorded as a [`Diagnostic`] in the [`ApplyReport`] returned to the
//! caller, and mirrored to the `log` facade at warn level.

use std::fmt;

/// Category of a non-fatal apply condition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticKind {
    /// Entry uses a type the core cannot round-trip
    SkippedUnsupported,
    /// No live target (parameter, input, choice option) for a stored entry
    ResolutionMiss,
    /// Live target exists but its kind cannot accept the payload
    KindMismatch,
    /// Value was written but truncated or clamped
    CoercionLoss,
    /// A weak object reference did not resolve; the slot was left empty
    BrokenReference,
}

impl DiagnosticKind {
    pub fn name(&self) -> &'static str {
        match self {
            DiagnosticKind::SkippedUnsupported => "skipped-unsupported",
            DiagnosticKind::ResolutionMiss => "resolution-miss",
            DiagnosticKind::KindMismatch => "kind-mismatch",
            DiagnosticKind::CoercionLoss => "coercion-loss",
            DiagnosticKind::BrokenReference => "broken-reference",
        }
    }

    /// Whether the entry was skipped entirely (as opposed to written with loss)
    pub fn is_skip(&self) -> bool {
        matches!(
            self,
            DiagnosticKind::SkippedUnsupported
                | DiagnosticKind::ResolutionMiss
                | DiagnosticKind::KindMismatch
        )
    }
}

/// One recorded condition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Parameter name or input binding the condition refers to
    pub parameter: String,
    pub kind: DiagnosticKind,
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.kind.name(), self.parameter, self.message)
    }
}

/// Outcome of applying a preset
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApplyReport {
    /// Entries written to the target (possibly with coercion loss)
    pub written: usize,
    /// Entries skipped
    pub skipped: usize,
    /// Whether the target was reverted to defaults first
    pub reverted: bool,
    pub diagnostics: Vec<Diagnostic>,
}

impl ApplyReport {
    /// Record a condition and mirror it to the log
    pub fn warn(&mut self, parameter: &str, kind: DiagnosticKind, message: impl Into<String>) {
        let diagnostic = Diagnostic {
            parameter: parameter.to_string(),
            kind,
            message: message.into(),
        };
        log::warn!("[PRESET_APPLY] {}", diagnostic);
        self.diagnostics.push(diagnostic);
    }

    /// Diagnostics of one kind
    pub fn of_kind(&self, kind: DiagnosticKind) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(move |d| d.kind == kind)
    }

    /// Diagnostics that mention the given parameter
    pub fn for_parameter<'a>(&'a self, parameter: &'a str) -> impl Iterator<Item = &'a Diagnostic> {
        self.diagnostics
            .iter()
            .filter(move |d| d.parameter == parameter)
    }

    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }
}
