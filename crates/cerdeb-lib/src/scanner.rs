//! Annotation scanner.
//!
//! Walks the token stream tracking brace depth and reports every `!debug`
//! marker found at depth zero. Markers inside function bodies or initializer
//! blocks are ordinary tokens.

use log::{debug, trace};

use crate::diagnostics::{Diagnostic, Span};
use crate::lexer::{Token, TokenKind, TokenStream};

/// Identifier that must follow `!` to form an annotation.
pub const MARKER_NAME: &str = "debug";

/// A `!debug` marker found at brace depth zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Annotation {
    /// Covers both marker tokens.
    pub span: Span,
}

impl Annotation {
    /// Byte offset of the marker's `!`.
    pub fn offset(&self) -> usize {
        self.span.start
    }
}

pub struct Scanner<'src> {
    tokens: TokenStream<'src>,
    depth: u32,
}

impl<'src> Scanner<'src> {
    pub fn new(source: &'src str) -> Self {
        Self {
            tokens: TokenStream::new(source),
            depth: 0,
        }
    }

    /// The underlying stream, positioned right after the last reported marker.
    pub fn tokens(&mut self) -> &mut TokenStream<'src> {
        &mut self.tokens
    }

    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// Advances to the next annotation. `Ok(None)` at end of input.
    pub fn next_annotation(&mut self) -> Result<Option<Annotation>, Diagnostic> {
        while let Some(token) = self.tokens.next_token()? {
            match token.kind {
                TokenKind::BraceOpen => self.depth += 1,
                // Stray closers in malformed input must not wrap the counter.
                TokenKind::BraceClose => self.depth = self.depth.saturating_sub(1),
                TokenKind::Bang if self.depth == 0 => {
                    if let Some(annotation) = self.match_marker(token)? {
                        return Ok(Some(annotation));
                    }
                }
                _ => {}
            }
        }
        Ok(None)
    }

    /// Consumes the marker identifier only on a full match; a near miss
    /// leaves the following token for the main loop.
    fn match_marker(&mut self, bang: Token) -> Result<Option<Annotation>, Diagnostic> {
        let Some(next) = self.tokens.peek()? else {
            return Ok(None);
        };

        if next.kind != TokenKind::Id || self.tokens.text(&next) != MARKER_NAME {
            trace!("`!` at {} is not an annotation", bang.offset());
            return Ok(None);
        }

        self.tokens.next_token()?;
        debug!("annotation at offset {}", bang.offset());
        Ok(Some(Annotation {
            span: Span::new(bang.span.start, next.span.end),
        }))
    }
}
