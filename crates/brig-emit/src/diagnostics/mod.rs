//! Non-fatal conditions collected while emitting a unit.
//!
//! Internal-consistency faults are returned as [`crate::EmitError`] instead.
//! Everything here leaves the unit usable: unsupported input produces a
//! degraded record, policy advisories change nothing.

mod message;

#[cfg(test)]
mod tests;

pub use message::{DiagnosticKind, DiagnosticMessage, Severity};

#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    messages: Vec<DiagnosticMessage>,
}

#[must_use = "diagnostic not emitted, call .emit()"]
pub struct DiagnosticBuilder<'a> {
    diagnostics: &'a mut Diagnostics,
    message: DiagnosticMessage,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self {
            messages: Vec::new(),
        }
    }

    /// Create a diagnostic of the given kind.
    ///
    /// Uses the kind's default message. Call `.message()` on the builder to add detail.
    pub fn report(&mut self, kind: DiagnosticKind) -> DiagnosticBuilder<'_> {
        DiagnosticBuilder {
            diagnostics: self,
            message: DiagnosticMessage::with_default_message(kind),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &DiagnosticMessage> {
        self.messages.iter()
    }

    pub fn has_errors(&self) -> bool {
        self.messages.iter().any(|d| d.is_error())
    }

    pub fn has_warnings(&self) -> bool {
        self.messages.iter().any(|d| d.is_warning())
    }

    pub fn error_count(&self) -> usize {
        self.messages.iter().filter(|d| d.is_error()).count()
    }

    pub fn warning_count(&self) -> usize {
        self.messages.iter().filter(|d| d.is_warning()).count()
    }

    /// One line per diagnostic, in report order.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for message in &self.messages {
            out.push_str(&message.to_string());
            out.push('\n');
        }
        out
    }

    pub fn extend(&mut self, other: Diagnostics) {
        self.messages.extend(other.messages);
    }
}

impl<'a> DiagnosticBuilder<'a> {
    /// Provide custom detail for this diagnostic, rendered using the kind's template.
    pub fn message(mut self, detail: impl Into<String>) -> Self {
        let detail = detail.into();
        self.message.message = self.message.kind.message(Some(&detail));
        self
    }

    /// Attribute the diagnostic to a function.
    pub fn in_function(mut self, name: impl Into<String>) -> Self {
        self.message.function = Some(name.into());
        self
    }

    pub fn emit(self) {
        let message = &self.message;
        if message.is_warning() {
            tracing::warn!(kind = ?message.kind, function = message.function(), "{}", message.message);
        } else {
            tracing::debug!(kind = ?message.kind, function = message.function(), "{}", message.message);
        }
        self.diagnostics.messages.push(self.message);
    }
}
