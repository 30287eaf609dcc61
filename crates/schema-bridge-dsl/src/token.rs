use logos::Logos;

/// Tokens produced by the class-definition lexer.
///
/// Whitespace and comments are skipped automatically by logos. Characters
/// that match no rule are not tokens; the lexer keeps them as stray lexemes.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\r\n\f]+")]
#[logos(skip r"//[^\n]*")]
#[logos(skip r"/\*([^*]|\*+[^*/])*\*+/")]
pub enum Token {
    // -- Keywords --
    #[token("class")]
    Class,

    // -- Punctuation --
    #[token("{")]
    LBrace,

    #[token("}")]
    RBrace,

    #[token(":")]
    Colon,

    #[token(";")]
    Semicolon,

    // -- Words --
    /// An identifier: letters, digits, and underscores, starting with a letter or underscore.
    /// This must come after keywords so that logos prefers keyword tokens.
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*")]
    Ident,

    /// A word that starts with a digit, e.g. `1st`. Never a valid identifier.
    #[regex(r"[0-9][a-zA-Z0-9_]*")]
    DigitWord,
}

impl Token {
    /// Returns a human-readable description of this token kind.
    pub fn description(&self) -> &'static str {
        match self {
            Self::Class => "'class'",
            Self::LBrace => "'{'",
            Self::RBrace => "'}'",
            Self::Colon => "':'",
            Self::Semicolon => "';'",
            Self::Ident => "identifier",
            Self::DigitWord => "digit-leading word",
        }
    }

    /// Returns true for tokens that can stand where an identifier is expected.
    pub fn is_word(&self) -> bool {
        matches!(self, Self::Ident | Self::Class | Self::DigitWord)
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.description())
    }
}
