//! Tokens of a dependency parse, independent of the format they were read from.

/// One word or punctuation unit together with its dependency edge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub text: String,
    pub label: String,
    /// Index of the governing token. Equal to the token's own index for a root.
    pub head: usize,
}

impl Token {
    #[must_use]
    pub fn new(text: impl Into<String>, label: impl Into<String>, head: usize) -> Self {
        Token { text: text.into(), label: label.into(), head }
    }
}

/// An ordered token sequence as produced by one analysis request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    pub tokens: Vec<Token>,
}

impl Document {
    #[must_use]
    pub fn new(tokens: Vec<Token>) -> Self {
        Document { tokens }
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

/// "A hammer is a tool." with its analyzer parse, shown by `--demo`.
#[must_use]
pub fn hammer_sentence() -> Document {
    Document::new(vec![
        Token::new("A", "DET", 1),
        Token::new("hammer", "NSUBJ", 2),
        Token::new("is", "ROOT", 2),
        Token::new("a", "DET", 4),
        Token::new("tool", "ATTR", 2),
        Token::new(".", "P", 2),
    ])
}
