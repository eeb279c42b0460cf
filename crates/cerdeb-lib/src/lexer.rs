//! Token source for C translation units.
//!
//! Produces span-based tokens without storing text; text is sliced from the
//! source only when needed. Keywords are lexed as plain identifiers, the
//! parser compares their text.
//!
//! Comments, whitespace and line continuations are trivia: the lexer emits
//! them, [`TokenStream`] drops them. A commented-out annotation is therefore
//! invisible to the scanner.

use logos::{FilterResult, Logos};

use crate::diagnostics::{Diagnostic, DiagnosticKind, Span};

/// Raw lexer failure, mapped to a [`Diagnostic`] by [`TokenStream`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LexError {
    #[default]
    Invalid,
    UnterminatedComment,
}

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[logos(error = LexError)]
pub enum TokenKind {
    #[token("{")]
    BraceOpen,

    #[token("}")]
    BraceClose,

    #[token(";")]
    Semicolon,

    #[token("*")]
    Star,

    #[token("!")]
    Bang,

    /// Multi-character operators, kept whole so `!=` never reads as `!`.
    #[regex(r"->|\+\+|--|<<=|>>=|<<|>>|<=|>=|==|!=|&&|\|\||[-+*/%&^|]=|\.\.\.|##")]
    Operator,

    /// Any other single punctuation character.
    #[regex(r#"[^ \t\r\n\x0B\x0CA-Za-z0-9_"'{};*!]"#)]
    Punct,

    #[regex(r"[A-Za-z_][A-Za-z0-9_]*")]
    Id,

    /// Preprocessing number: covers integers, floats, suffixes and exponents.
    #[regex(r"\.?[0-9](?:[0-9A-Za-z_.]|[eEpP][+-])*")]
    Number,

    #[regex(r#""(?:[^"\\\n]|\\(?:.|\n))*""#)]
    StringLiteral,

    #[regex(r"'(?:[^'\\\n]|\\(?:.|\n))*'")]
    CharLiteral,

    #[regex(r"[ \t\r\n\x0B\x0C]+")]
    Whitespace,

    #[regex(r"\\\r?\n")]
    LineContinuation,

    #[regex(r"//[^\n]*", allow_greedy = true)]
    LineComment,

    #[token("/*", block_comment)]
    BlockComment,
}

impl TokenKind {
    pub fn is_trivia(self) -> bool {
        matches!(
            self,
            Self::Whitespace | Self::LineContinuation | Self::LineComment | Self::BlockComment
        )
    }
}

fn block_comment(lex: &mut logos::Lexer<TokenKind>) -> FilterResult<(), LexError> {
    match lex.remainder().find("*/") {
        Some(end) => {
            lex.bump(end + 2);
            FilterResult::Emit(())
        }
        None => {
            lex.bump(lex.remainder().len());
            FilterResult::Error(LexError::UnterminatedComment)
        }
    }
}

/// Zero-copy token: kind + span, text retrieved via [`token_text`] when needed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    #[inline]
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }

    /// Byte offset of the token's first character.
    #[inline]
    pub fn offset(&self) -> usize {
        self.span.start
    }
}

/// Retrieves the text slice for a token. O(1) slice into source.
#[inline]
pub fn token_text<'src>(source: &'src str, token: &Token) -> &'src str {
    &source[token.span.range()]
}

/// Restartable, trivia-free token stream with one token of lookahead.
///
/// `Ok(None)` is end of input. After an `Err` the stream should not be
/// polled again; the scanner and parser both stop at the first lexical error.
pub struct TokenStream<'src> {
    source: &'src str,
    lexer: logos::Lexer<'src, TokenKind>,
    peeked: Option<Result<Option<Token>, Diagnostic>>,
}

impl<'src> TokenStream<'src> {
    pub fn new(source: &'src str) -> Self {
        Self {
            source,
            lexer: TokenKind::lexer(source),
            peeked: None,
        }
    }

    pub fn source(&self) -> &'src str {
        self.source
    }

    pub fn text(&self, token: &Token) -> &'src str {
        token_text(self.source, token)
    }

    /// Zero-width span at the end of the source.
    pub fn eof_span(&self) -> Span {
        Span::empty(self.source.len())
    }

    pub fn next_token(&mut self) -> Result<Option<Token>, Diagnostic> {
        match self.peeked.take() {
            Some(result) => result,
            None => self.advance(),
        }
    }

    pub fn peek(&mut self) -> Result<Option<Token>, Diagnostic> {
        if let Some(result) = &self.peeked {
            return result.clone();
        }
        let result = self.advance();
        self.peeked = Some(result.clone());
        result
    }

    fn advance(&mut self) -> Result<Option<Token>, Diagnostic> {
        loop {
            let Some(result) = self.lexer.next() else {
                return Ok(None);
            };
            let span = Span::from(self.lexer.span());
            match result {
                Ok(kind) if kind.is_trivia() => continue,
                Ok(kind) => return Ok(Some(Token::new(kind, span))),
                Err(err) => return Err(self.lex_diagnostic(err, span)),
            }
        }
    }

    fn lex_diagnostic(&self, err: LexError, span: Span) -> Diagnostic {
        let kind = match err {
            LexError::UnterminatedComment => DiagnosticKind::UnterminatedComment,
            LexError::Invalid => match self.source[span.range()].chars().next() {
                Some('"') | Some('\'') => DiagnosticKind::UnterminatedLiteral,
                _ => DiagnosticKind::InvalidCharacter,
            },
        };
        Diagnostic::with_default_message(kind, span)
    }
}

impl Iterator for TokenStream<'_> {
    type Item = Result<Token, Diagnostic>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_token().transpose()
    }
}

/// Tokenizes the whole source, stopping at the first lexical error.
pub fn lex(source: &str) -> Result<Vec<Token>, Diagnostic> {
    TokenStream::new(source).collect()
}
