//! Parser for annotated structure declarations.
//!
//! Accepts exactly `typedef struct { (type name ;)* } Name ;` where `type` is
//! an optional qualifier, a base keyword, and an optional `*`. Any deviation
//! fails the whole declaration; no partial descriptor is produced.

use logos::Logos;
use serde::Serialize;

use crate::classify::{FormatFamily, is_qualifier};
use crate::diagnostics::{Diagnostic, DiagnosticKind, Span};
use crate::lexer::{Token, TokenKind, TokenStream};
use crate::scanner::Annotation;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Field {
    pub name: String,
    pub family: FormatFamily,
}

impl Field {
    pub fn new(name: impl Into<String>, family: FormatFamily) -> Self {
        Self {
            name: name.into(),
            family,
        }
    }
}

/// One annotated declaration, with offsets into the original buffer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StructureDescriptor {
    pub name: String,
    pub fields: Vec<Field>,
    /// Offset of the annotation's `!`.
    pub marker_offset: usize,
    /// First byte after the declaration's terminating `;`.
    pub insertion_offset: usize,
    #[serde(skip)]
    pub name_span: Span,
}

pub struct StructParser<'t, 'src> {
    tokens: &'t mut TokenStream<'src>,
}

impl<'t, 'src> StructParser<'t, 'src> {
    /// The stream must be positioned right after the annotation.
    pub fn new(tokens: &'t mut TokenStream<'src>) -> Self {
        Self { tokens }
    }

    pub fn parse(mut self, annotation: &Annotation) -> Result<StructureDescriptor, Diagnostic> {
        self.parse_declaration(annotation)
            .map_err(|diag| diag.related_to("annotation here", annotation.span))
    }

    fn parse_declaration(
        &mut self,
        annotation: &Annotation,
    ) -> Result<StructureDescriptor, Diagnostic> {
        let typedef = self.expect_keyword("typedef")?;
        self.ensure_marker_line_ends(annotation, &typedef)?;
        self.expect_keyword("struct")?;
        self.expect(TokenKind::BraceOpen, "{")?;

        let mut fields = Vec::new();
        loop {
            let token = self.bump()?;
            if token.kind == TokenKind::BraceClose {
                break;
            }
            fields.push(self.parse_field(token)?);
        }

        let name = self.bump()?;
        if name.kind != TokenKind::Id {
            return Err(Diagnostic::with_default_message(
                DiagnosticKind::ExpectedStructName,
                name.span,
            ));
        }
        let semicolon = self.expect(TokenKind::Semicolon, ";")?;

        Ok(StructureDescriptor {
            name: self.tokens.text(&name).to_string(),
            fields,
            marker_offset: annotation.offset(),
            insertion_offset: semicolon.span.end,
            name_span: name.span,
        })
    }

    fn parse_field(&mut self, first: Token) -> Result<Field, Diagnostic> {
        let family = self.parse_type(first)?;

        let name = self.bump()?;
        if name.kind != TokenKind::Id {
            return Err(Diagnostic::with_default_message(
                DiagnosticKind::ExpectedFieldName,
                name.span,
            ));
        }
        self.expect(TokenKind::Semicolon, ";")?;

        Ok(Field::new(self.tokens.text(&name), family))
    }

    /// The marker's line becomes a line comment, so nothing after the marker
    /// on that line may reach the compiler: the declaration starts on a later
    /// line and no comment or continuation carries the marker line over.
    fn ensure_marker_line_ends(
        &self,
        annotation: &Annotation,
        declaration: &Token,
    ) -> Result<(), Diagnostic> {
        let reject =
            |span: Span| Diagnostic::with_default_message(DiagnosticKind::DeclarationOnMarkerLine, span);

        let gap_start = annotation.span.end;
        let gap = &self.tokens.source()[gap_start..declaration.span.start];
        let Some(line_end) = gap.find('\n') else {
            return Err(reject(declaration.span));
        };

        // Only trivia sits between the marker and the declaration.
        let mut trivia = TokenKind::lexer(gap);
        while let Some(Ok(kind)) = trivia.next() {
            let range = trivia.span();
            if range.start >= line_end {
                break;
            }
            if kind != TokenKind::Whitespace && range.end > line_end {
                return Err(reject(Span::new(gap_start + range.start, gap_start + range.end)));
            }
        }
        Ok(())
    }

    /// Skips one qualifier, classifies the keyword, then looks one token
    /// ahead for `*`.
    fn parse_type(&mut self, first: Token) -> Result<FormatFamily, Diagnostic> {
        let mut keyword = first;
        if keyword.kind == TokenKind::Id && is_qualifier(self.tokens.text(&keyword)) {
            keyword = self.bump()?;
        }

        let text = self.tokens.text(&keyword);
        if keyword.kind != TokenKind::Id || !FormatFamily::classify(text, false).is_valid() {
            return Err(Diagnostic::with_detail(
                DiagnosticKind::UnsupportedFieldType,
                keyword.span,
                text,
            ));
        }

        let pointer = self.eat(TokenKind::Star)?;
        Ok(FormatFamily::classify(text, pointer))
    }

    /// Next token; end of input is an error inside a declaration.
    fn bump(&mut self) -> Result<Token, Diagnostic> {
        match self.tokens.next_token()? {
            Some(token) => Ok(token),
            None => Err(Diagnostic::with_default_message(
                DiagnosticKind::UnexpectedEof,
                self.tokens.eof_span(),
            )),
        }
    }

    fn eat(&mut self, kind: TokenKind) -> Result<bool, Diagnostic> {
        match self.tokens.peek()? {
            Some(token) if token.kind == kind => {
                self.tokens.next_token()?;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    fn expect(&mut self, kind: TokenKind, what: &str) -> Result<Token, Diagnostic> {
        let token = self.bump()?;
        if token.kind != kind {
            return Err(Diagnostic::with_detail(
                DiagnosticKind::ExpectedToken,
                token.span,
                what,
            ));
        }
        Ok(token)
    }

    fn expect_keyword(&mut self, keyword: &str) -> Result<Token, Diagnostic> {
        let token = self.bump()?;
        if token.kind != TokenKind::Id || self.tokens.text(&token) != keyword {
            return Err(Diagnostic::with_detail(
                DiagnosticKind::ExpectedKeyword,
                token.span,
                keyword,
            ));
        }
        Ok(token)
    }
}
