/// Conditions the emitter reports without aborting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DiagnosticKind {
    // Unsupported input: the record is written degraded
    UnsupportedImmediate,

    // Linkage: a call names a function that was never emitted
    MissingFunctionOffset,

    // Policy advisories
    GlobalReferencedByName,
}

impl DiagnosticKind {
    pub fn default_severity(&self) -> Severity {
        match self {
            Self::GlobalReferencedByName => Severity::Warning,
            _ => Severity::Error,
        }
    }

    /// Base message for this kind, used when no detail is provided.
    pub fn fallback_message(&self) -> &'static str {
        match self {
            Self::UnsupportedImmediate => "immediate operand type is not implemented",
            Self::MissingFunctionOffset => "call target has no code offset",
            Self::GlobalReferencedByName => {
                "referring to global symbol by name from HSA code won't work"
            }
        }
    }

    /// Template for detailed messages; `{}` is replaced by the detail.
    pub fn custom_message(&self) -> String {
        match self {
            Self::UnsupportedImmediate => "immediate `{}` operands are not implemented".to_string(),
            Self::MissingFunctionOffset => {
                "call target `{}` was never emitted in this unit".to_string()
            }
            Self::GlobalReferencedByName => {
                "referring to global symbol `{}` by name from HSA code won't work".to_string()
            }
        }
    }

    /// Render the final message.
    ///
    /// - `None` → returns `fallback_message()`
    /// - `Some(detail)` → returns `custom_message()` with `{}` replaced by detail
    pub fn message(&self, detail: Option<&str>) -> String {
        match detail {
            None => self.fallback_message().to_string(),
            Some(detail) => self.custom_message().replace("{}", detail),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Severity {
    #[default]
    Error,
    Warning,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagnosticMessage {
    pub(crate) kind: DiagnosticKind,
    /// Function being emitted when the condition was hit, if any.
    pub(crate) function: Option<String>,
    pub(crate) message: String,
}

impl DiagnosticMessage {
    pub(crate) fn with_default_message(kind: DiagnosticKind) -> Self {
        Self {
            kind,
            function: None,
            message: kind.fallback_message().to_string(),
        }
    }

    pub fn kind(&self) -> DiagnosticKind {
        self.kind
    }

    pub fn function(&self) -> Option<&str> {
        self.function.as_deref()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn severity(&self) -> Severity {
        self.kind.default_severity()
    }

    pub fn is_error(&self) -> bool {
        self.severity() == Severity::Error
    }

    pub fn is_warning(&self) -> bool {
        self.severity() == Severity::Warning
    }
}

impl std::fmt::Display for DiagnosticMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.severity())?;
        if let Some(function) = &self.function {
            write!(f, " in `{function}`")?;
        }
        write!(f, ": {}", self.message)
    }
}
