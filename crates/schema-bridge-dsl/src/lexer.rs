use logos::Logos;

use crate::error::Span;
use crate::token::Token;

/// A lexeme paired with its source span.
///
/// `token` is `None` for a stray run of characters no token rule matches.
/// Stray lexemes are kept rather than reported so that the parser can decide
/// whether they matter; outside a class body they never do.
#[derive(Debug, Clone)]
pub struct SpannedToken {
    pub token: Option<Token>,
    pub span: Span,
    pub text: String,
}

impl SpannedToken {
    /// Returns true if this lexeme is the given token.
    pub fn is(&self, token: Token) -> bool {
        self.token == Some(token)
    }

    /// Returns true if this lexeme can stand where an identifier is expected.
    pub fn is_word(&self) -> bool {
        self.token.is_some_and(|t| t.is_word())
    }
}

/// Tokenizes DSL source text into a sequence of spanned lexemes.
///
/// Never fails: characters outside the token grammar become stray lexemes.
pub fn tokenize(source: &str) -> Vec<SpannedToken> {
    Token::lexer(source)
        .spanned()
        .map(|(result, range)| SpannedToken {
            token: result.ok(),
            span: Span::new(range.start, range.end),
            text: source[range].to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokenize_simple_class() {
        let tokens = tokenize("class Employee { }");
        assert_eq!(tokens.len(), 4);
        assert!(tokens[0].is(Token::Class));
        assert_eq!(tokens[0].text, "class");
        assert!(tokens[1].is(Token::Ident));
        assert_eq!(tokens[1].text, "Employee");
        assert!(tokens[2].is(Token::LBrace));
        assert!(tokens[3].is(Token::RBrace));
    }

    #[test]
    fn tokenize_preserves_spans() {
        let tokens = tokenize("class Employee");
        assert_eq!(tokens[0].span, Span::new(0, 5));
        assert_eq!(tokens[1].span, Span::new(6, 14));
    }

    #[test]
    fn tokenize_keeps_stray_characters() {
        let tokens = tokenize("name # Employee");
        assert_eq!(tokens.len(), 3);
        assert!(tokens[1].token.is_none());
        assert_eq!(tokens[1].text, "#");
        assert!(!tokens[1].is_word());
    }

    #[test]
    fn tokenize_empty_input() {
        assert!(tokenize("").is_empty());
    }

    #[test]
    fn tokenize_whitespace_only() {
        assert!(tokenize("   \n\t  ").is_empty());
    }

    #[test]
    fn tokenize_comments_only() {
        assert!(tokenize("// just a comment\n/* block */").is_empty());
    }

    #[test]
    fn tokenize_pure_path_as_separate_lexemes() {
        let tokens = tokenize("model::Employee");
        let kinds: Vec<_> = tokens.iter().map(|t| t.token).collect();
        assert_eq!(
            kinds,
            vec![
                Some(Token::Ident),
                Some(Token::Colon),
                Some(Token::Colon),
                Some(Token::Ident),
            ]
        );
    }
}
