use serde::Serialize;

/// Byte range into the source buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end, "span start {start} past end {end}");
        Self { start, end }
    }

    /// Zero-width span, used for end-of-input positions.
    pub fn empty(at: usize) -> Self {
        Self { start: at, end: at }
    }


    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn range(&self) -> std::ops::Range<usize> {
        self.start..self.end
    }
}

impl From<std::ops::Range<usize>> for Span {
    fn from(range: std::ops::Range<usize>) -> Self {
        Self::new(range.start, range.end)
    }
}

/// Diagnostic kinds, lexical problems first, then structure shape, then warnings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum DiagnosticKind {
    // Token source could not classify the input
    UnterminatedLiteral,
    UnterminatedComment,
    InvalidCharacter,

    // Annotation present, declaration malformed
    DeclarationOnMarkerLine,
    ExpectedKeyword,
    ExpectedToken,
    ExpectedFieldName,
    ExpectedStructName,
    UnsupportedFieldType,
    UnexpectedEof,

    // Declaration valid, generated output questionable
    DuplicateStructure,
}

impl DiagnosticKind {
    pub fn default_severity(&self) -> Severity {
        match self {
            Self::DuplicateStructure => Severity::Warning,
            _ => Severity::Error,
        }
    }

    pub fn is_lexical(&self) -> bool {
        matches!(
            self,
            Self::UnterminatedLiteral | Self::UnterminatedComment | Self::InvalidCharacter
        )
    }

    pub fn default_hint(&self) -> Option<&'static str> {
        match self {
            Self::UnsupportedFieldType => {
                Some("supported types: int, short, long, float, double, char and pointers to them")
            }
            Self::ExpectedKeyword => Some("annotated declarations look like `typedef struct { ... } Name;`"),
            Self::DeclarationOnMarkerLine => {
                Some("the marker line is commented out; start the declaration on the next line")
            }
            Self::DuplicateStructure => Some("both generated functions will have the same name"),
            _ => None,
        }
    }

    pub fn fallback_message(&self) -> &'static str {
        match self {
            Self::UnterminatedLiteral => "unterminated literal",
            Self::UnterminatedComment => "unterminated block comment",
            Self::InvalidCharacter => "invalid character",
            Self::DeclarationOnMarkerLine => "`!debug` must be the last thing on its line",
            Self::ExpectedKeyword => "expected keyword",
            Self::ExpectedToken => "unexpected token",
            Self::ExpectedFieldName => "expected field name",
            Self::ExpectedStructName => "expected structure name after `}`",
            Self::UnsupportedFieldType => "unsupported field type",
            Self::UnexpectedEof => "unexpected end of input",
            Self::DuplicateStructure => "structure annotated more than once",
        }
    }

    /// Template with a `{}` placeholder for caller-provided detail.
    pub fn custom_message(&self) -> String {
        match self {
            Self::ExpectedKeyword => "expected `{}`".to_string(),
            Self::ExpectedToken => "expected `{}`".to_string(),
            Self::UnsupportedFieldType => "unsupported field type `{}`".to_string(),
            Self::DuplicateStructure => "`{}` is already annotated in this file".to_string(),
            _ => format!("{}: {{}}", self.fallback_message()),
        }
    }

    /// `None` renders the fallback, `Some(detail)` fills the custom template.
    pub fn message(&self, detail: Option<&str>) -> String {
        match detail {
            None => self.fallback_message().to_string(),
            Some(detail) => self.custom_message().replace("{}", detail),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
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

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RelatedInfo {
    pub(crate) span: Span,
    pub(crate) message: String,
}

impl RelatedInfo {
    pub fn new(span: Span, message: impl Into<String>) -> Self {
        Self {
            span,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub(crate) kind: DiagnosticKind,
    /// The range shown to the user (underlined in output).
    pub(crate) span: Span,
    pub(crate) message: String,
    pub(crate) related: Vec<RelatedInfo>,
    pub(crate) hints: Vec<String>,
}

impl Diagnostic {
    pub fn new(kind: DiagnosticKind, span: Span, message: impl Into<String>) -> Self {
        Self {
            kind,
            span,
            message: message.into(),
            related: Vec::new(),
            hints: kind.default_hint().map(String::from).into_iter().collect(),
        }
    }

    pub fn with_default_message(kind: DiagnosticKind, span: Span) -> Self {
        Self::new(kind, span, kind.fallback_message())
    }

    /// Build with the kind's custom template filled by `detail`.
    pub fn with_detail(kind: DiagnosticKind, span: Span, detail: &str) -> Self {
        Self::new(kind, span, kind.message(Some(detail)))
    }

    pub fn related_to(mut self, msg: impl Into<String>, span: Span) -> Self {
        self.related.push(RelatedInfo::new(span, msg));
        self
    }

    pub fn kind(&self) -> DiagnosticKind {
        self.kind
    }

    pub fn span(&self) -> Span {
        self.span
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn severity(&self) -> Severity {
        self.kind.default_severity()
    }

    pub fn is_warning(&self) -> bool {
        self.severity() == Severity::Warning
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} at {}..{}: {}",
            self.severity(),
            self.span.start,
            self.span.end,
            self.message
        )?;
        for related in &self.related {
            write!(
                f,
                " (related: {} at {}..{})",
                related.message, related.span.start, related.span.end
            )?;
        }
        for hint in &self.hints {
            write!(f, " (hint: {})", hint)?;
        }
        Ok(())
    }
}
