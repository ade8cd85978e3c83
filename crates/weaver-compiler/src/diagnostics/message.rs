use crate::graph::Span;

/// Problems in the schema that still allow emission to continue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DiagnosticKind {
    // Types the backend cannot spell
    UnrecognizedScalar,
    UnrecognizedEncoding,

    // HTTP surface the backend does not support
    UnsupportedAuthentication,
    MultipleResponseShapes,
    UnknownOperation,
    UnboundParameter,

    // Valid but suspicious
    DuplicateRoute,
}

impl DiagnosticKind {
    /// Default severity for this kind.
    pub fn default_severity(&self) -> Severity {
        match self {
            Self::DuplicateRoute => Severity::Warning,
            _ => Severity::Error,
        }
    }

    /// Stable identifier, safe to match on in tooling.
    pub fn code(&self) -> &'static str {
        match self {
            Self::UnrecognizedScalar => "unrecognized-scalar",
            Self::UnrecognizedEncoding => "unrecognized-encoding",
            Self::UnsupportedAuthentication => "unsupported-authentication",
            Self::MultipleResponseShapes => "multiple-response-shapes",
            Self::UnknownOperation => "unknown-operation",
            Self::UnboundParameter => "unbound-parameter",
            Self::DuplicateRoute => "duplicate-route",
        }
    }

    /// Default hint for this kind, automatically included in diagnostics.
    pub fn default_hint(&self) -> Option<&'static str> {
        match self {
            Self::UnrecognizedScalar => {
                Some("extend a standard scalar, e.g. `scalar petId extends string`")
            }
            Self::MultipleResponseShapes => {
                Some("declare exactly one success body and at most one error body")
            }
            Self::DuplicateRoute => Some("the operation declared first wins"),
            Self::UnboundParameter => {
                Some("declare it as a path, query, header or body parameter of the endpoint")
            }
            _ => None,
        }
    }

    /// Base message for this diagnostic kind, used when no custom message is provided.
    pub fn fallback_message(&self) -> &'static str {
        match self {
            Self::UnrecognizedScalar => "unrecognized scalar type",
            Self::UnrecognizedEncoding => "unrecognized encoding",
            Self::UnsupportedAuthentication => "unsupported authentication scheme",
            Self::MultipleResponseShapes => "operation has more than one response shape",
            Self::UnknownOperation => "endpoint refers to an unknown operation",
            Self::UnboundParameter => "operation parameter is not bound to the request",
            Self::DuplicateRoute => "duplicate route",
        }
    }

    /// Template for custom messages. Contains `{}` placeholder for caller-provided detail.
    pub fn custom_message(&self) -> String {
        match self {
            Self::UnrecognizedScalar => "unrecognized scalar type `{}`".to_string(),
            Self::UnknownOperation => "endpoint refers to unknown operation `{}`".to_string(),
            Self::UnboundParameter => "parameter `{}` is not bound to the request".to_string(),
            Self::DuplicateRoute => "route `{}` is declared more than once".to_string(),
            _ => format!("{}: {{}}", self.fallback_message()),
        }
    }

    /// Render the final message.
    ///
    /// - `None` → returns `fallback_message()`
    /// - `Some(detail)` → returns `custom_message()` with `{}` replaced by detail
    pub fn message(&self, msg: Option<&str>) -> String {
        match msg {
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
    /// Location in the schema source, when the graph carries one.
    pub(crate) span: Option<Span>,
    pub(crate) message: String,
    pub(crate) hints: Vec<String>,
}

impl DiagnosticMessage {
    pub(crate) fn new(kind: DiagnosticKind, span: Option<Span>, message: impl Into<String>) -> Self {
        let hints = kind.default_hint().map(String::from).into_iter().collect();
        Self {
            kind,
            span,
            message: message.into(),
            hints,
        }
    }

    pub(crate) fn with_default_message(kind: DiagnosticKind, span: Option<Span>) -> Self {
        Self::new(kind, span, kind.fallback_message())
    }

    pub fn kind(&self) -> DiagnosticKind {
        self.kind
    }

    pub fn span(&self) -> Option<Span> {
        self.span
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn hints(&self) -> &[String] {
        &self.hints
    }

    pub fn severity(&self) -> Severity {
        self.kind.default_severity()
    }

    pub(crate) fn is_error(&self) -> bool {
        self.severity() == Severity::Error
    }

    pub(crate) fn is_warning(&self) -> bool {
        self.severity() == Severity::Warning
    }
}

impl std::fmt::Display for DiagnosticMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}[{}]", self.severity(), self.kind.code())?;
        if let Some(span) = self.span {
            write!(f, " at {}..{}", span.start, span.end)?;
        }
        write!(f, ": {}", self.message)?;
        for hint in &self.hints {
            write!(f, " (hint: {})", hint)?;
        }
        Ok(())
    }
}
