use std::collections::HashSet;

use schema_bridge_core::types::{AttributeDef, ClassDef, Identifier};

use crate::error::{DslError, ParseWarning, Span};
use crate::lexer::{tokenize, SpannedToken};
use crate::token::Token;

/// Parsed classes together with everything the parser skipped over.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedDocument {
    pub classes: Vec<ClassDef>,
    pub warnings: Vec<ParseWarning>,
}

/// Block parser for the class-definition subset.
///
/// Walks a flat list of lexemes, picks out `class Name { ... }` blocks and
/// splits each body into `;`-terminated statements. Anything outside a block
/// is ignored.
struct Parser {
    tokens: Vec<SpannedToken>,
    pos: usize,
    warnings: Vec<ParseWarning>,
}

impl Parser {
    fn new(tokens: Vec<SpannedToken>) -> Self {
        Self {
            tokens,
            pos: 0,
            warnings: Vec::new(),
        }
    }

    // -- Cursor helpers --

    fn peek(&self) -> Option<&SpannedToken> {
        self.tokens.get(self.pos)
    }

    fn peek_nth(&self, n: usize) -> Option<&SpannedToken> {
        self.tokens.get(self.pos + n)
    }

    fn advance(&mut self) -> Option<SpannedToken> {
        if self.pos < self.tokens.len() {
            let tok = self.tokens[self.pos].clone();
            self.pos += 1;
            Some(tok)
        } else {
            None
        }
    }

    /// Consumes the next lexeme only if it is `token`.
    fn eat(&mut self, token: Token) -> Option<SpannedToken> {
        if self.peek().is_some_and(|st| st.is(token)) {
            self.advance()
        } else {
            None
        }
    }

    fn end_of_input(&self) -> usize {
        self.tokens.last().map(|st| st.span.end).unwrap_or(0)
    }

    /// End offset of the last consumed lexeme.
    fn consumed_end(&self) -> usize {
        self.pos
            .checked_sub(1)
            .and_then(|i| self.tokens.get(i))
            .map(|st| st.span.end)
            .unwrap_or(0)
    }

    /// True when the cursor sits on `class <name> {`.
    fn at_block_start(&self) -> bool {
        let is = |n: usize, token: Token| self.peek_nth(n).is_some_and(|st| st.is(token));
        is(0, Token::Class) && (is(1, Token::Ident) || is(1, Token::Class)) && is(2, Token::LBrace)
    }

    // -- Grammar productions --

    /// file = (class_def | ignored)*
    fn parse_file(&mut self) -> Result<Vec<ClassDef>, Vec<DslError>> {
        let mut classes = Vec::new();
        let mut errors = Vec::new();

        while let Some(st) = self.advance() {
            if !st.is(Token::Class) {
                continue;
            }
            match self.parse_class(&st) {
                Ok(Some(class)) => classes.push(class),
                Ok(None) => {}
                Err(mut class_errors) => errors.append(&mut class_errors),
            }
        }

        if errors.is_empty() {
            Ok(classes)
        } else {
            Err(errors)
        }
    }

    /// class_def = "class" IDENT "{" statement* "}"
    fn parse_class(&mut self, keyword: &SpannedToken) -> Result<Option<ClassDef>, Vec<DslError>> {
        let Some(name_tok) = self.class_name() else {
            self.warnings.push(ParseWarning::UnnamedClass {
                span: keyword.span.clone(),
            });
            self.skip_unnamed_block();
            return Ok(None);
        };

        if self.eat(Token::LBrace).is_none() {
            self.warnings.push(ParseWarning::MissingBody {
                name: name_tok.text.clone(),
                span: name_tok.span.clone(),
            });
            return Ok(None);
        }

        let mut attributes: Vec<(AttributeDef, Span)> = Vec::new();
        let mut errors = Vec::new();
        let mut statement = Vec::new();

        let rbrace = loop {
            if self.at_block_start() {
                // Leave the next block for parse_file.
                self.warnings.push(ParseWarning::UnterminatedClass {
                    name: name_tok.text.clone(),
                    span: Span::new(keyword.span.start, self.consumed_end()),
                });
                return Ok(None);
            }
            let Some(st) = self.advance() else {
                self.warnings.push(ParseWarning::UnterminatedClass {
                    name: name_tok.text.clone(),
                    span: Span::new(keyword.span.start, self.end_of_input()),
                });
                return Ok(None);
            };
            let token = st.token;
            match token {
                Some(Token::RBrace) => {
                    if !statement.is_empty() {
                        self.ignore_statement(&name_tok.text, &statement);
                    }
                    break st;
                }
                Some(Token::Semicolon) => {
                    let tokens = std::mem::take(&mut statement);
                    match self.parse_attribute(&name_tok.text, &tokens) {
                        Ok(Some(attribute)) => attributes.push(attribute),
                        Ok(None) => {}
                        Err(e) => errors.push(e),
                    }
                }
                _ => statement.push(st),
            }
        };
        let class_span = Span::new(keyword.span.start, rbrace.span.end);

        let mut seen = HashSet::new();
        for (attribute, span) in &attributes {
            if !seen.insert(attribute.name.as_str()) {
                errors.push(DslError::DuplicateAttribute {
                    class: name_tok.text.clone(),
                    attribute: attribute.name.to_string(),
                    span: span.clone(),
                });
            }
        }
        if !errors.is_empty() {
            return Err(errors);
        }

        let name = identifier(&name_tok).map_err(|e| vec![e])?;
        let attributes = attributes.into_iter().map(|(a, _)| a).collect::<Vec<_>>();
        tracing::debug!(class = %name, attributes = attributes.len(), "parsed class");
        ClassDef::new(name, attributes)
            .map(Some)
            .map_err(|source| {
                vec![DslError::CoreSchemaError {
                    source,
                    span: class_span,
                }]
            })
    }

    /// A class name is an identifier, or the `class` keyword itself when a
    /// body follows directly.
    fn class_name(&mut self) -> Option<SpannedToken> {
        let next = self.peek()?;
        let is_name = next.is(Token::Ident)
            || (next.is(Token::Class) && self.peek_nth(1).is_some_and(|st| st.is(Token::LBrace)));
        if is_name {
            self.advance()
        } else {
            None
        }
    }

    /// statement = WORD ":" WORD ";"
    fn parse_attribute(
        &mut self,
        class: &str,
        tokens: &[SpannedToken],
    ) -> Result<Option<(AttributeDef, Span)>, DslError> {
        match tokens {
            [] => Ok(None),
            [name, colon, type_name]
                if name.is_word() && colon.is(Token::Colon) && type_name.is_word() =>
            {
                let attribute = AttributeDef::new(identifier(name)?, identifier(type_name)?);
                Ok(Some((attribute, name.span.clone())))
            }
            _ => {
                self.ignore_statement(class, tokens);
                Ok(None)
            }
        }
    }

    fn ignore_statement(&mut self, class: &str, tokens: &[SpannedToken]) {
        let (Some(first), Some(last)) = (tokens.first(), tokens.last()) else {
            return;
        };
        let text = tokens
            .iter()
            .map(|st| st.text.as_str())
            .collect::<Vec<_>>()
            .join(" ");
        self.warnings.push(ParseWarning::IgnoredStatement {
            class: class.to_string(),
            text,
            span: Span::new(first.span.start, last.span.end),
        });
    }

    /// Skips the body of a class that has no usable name. Stops early at the
    /// next `class` keyword if no body starts before it, and inside the body
    /// at the next `class <name> {` block.
    fn skip_unnamed_block(&mut self) {
        while let Some(st) = self.peek() {
            if st.is(Token::Class) {
                return;
            }
            let opens_body = st.is(Token::LBrace);
            self.advance();
            if opens_body {
                while !self.at_block_start() {
                    match self.advance() {
                        Some(st) if st.is(Token::RBrace) => return,
                        Some(_) => {}
                        None => return,
                    }
                }
                return;
            }
        }
    }
}

fn identifier(st: &SpannedToken) -> Result<Identifier, DslError> {
    Identifier::new(st.text.as_str()).map_err(|_| DslError::InvalidIdentifier {
        name: st.text.clone(),
        span: st.span.clone(),
    })
}

/// Parses class-definition source text into an ordered list of classes.
///
/// Skipped text is logged at warn level; use [`parse_document`] to inspect
/// it instead.
///
/// # Errors
///
/// Returns every [`DslError`] found in the document.
pub fn parse(source: &str) -> Result<Vec<ClassDef>, Vec<DslError>> {
    let document = parse_document(source)?;
    for warning in &document.warnings {
        tracing::warn!(span = %warning.span(), "{warning}");
    }
    Ok(document.classes)
}

/// Parses class-definition source text, returning the classes together with
/// the non-fatal [`ParseWarning`]s.
///
/// # Errors
///
/// Returns every [`DslError`] found in the document. Warnings are discarded
/// when the document fails.
pub fn parse_document(source: &str) -> Result<ParsedDocument, Vec<DslError>> {
    let mut parser = Parser::new(tokenize(source));
    let classes = parser.parse_file()?;
    Ok(ParsedDocument {
        classes,
        warnings: parser.warnings,
    })
}
