//! Lexer (tokenizer) for AtomC source code
//!
//! Converts raw source text into a flat [`Token`] vector consumed by the parser.
//! Unknown characters are not fatal: each one is reported as a [`LexWarning`]
//! and skipped, and scanning carries on.

use rustc_hash::FxHashMap;
use std::fmt;
use std::sync::LazyLock;
use thiserror::Error;
use tracing::warn;

/// Every token class the lexer can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Identifiers
    Id,

    // Keywords
    Break,
    Char,
    Double,
    Else,
    For,
    If,
    Int,
    Return,
    Struct,
    Void,
    While,

    // Literals
    CtInt,
    CtReal,
    CtString,
    CtChar,

    // Punctuation
    Comma,     // ,
    Semicolon, // ;
    LPar,      // (
    RPar,      // )
    LBracket,  // [
    RBracket,  // ]
    LAcc,      // {
    RAcc,      // }

    // Operators
    Add,       // +
    Sub,       // -
    Mul,       // *
    Div,       // /
    Dot,       // .
    And,       // &&
    Or,        // ||
    Not,       // !
    Assign,    // =
    Equal,     // ==
    NotEq,     // !=
    Less,      // <
    LessEq,    // <=
    Greater,   // >
    GreaterEq, // >=

    // End of input
    End,
}

impl TokenKind {
    /// Upper-case tag used in the external token form, e.g. `CT_INT`.
    pub fn name(self) -> &'static str {
        match self {
            TokenKind::Id => "ID",
            TokenKind::Break => "BREAK",
            TokenKind::Char => "CHAR",
            TokenKind::Double => "DOUBLE",
            TokenKind::Else => "ELSE",
            TokenKind::For => "FOR",
            TokenKind::If => "IF",
            TokenKind::Int => "INT",
            TokenKind::Return => "RETURN",
            TokenKind::Struct => "STRUCT",
            TokenKind::Void => "VOID",
            TokenKind::While => "WHILE",
            TokenKind::CtInt => "CT_INT",
            TokenKind::CtReal => "CT_REAL",
            TokenKind::CtString => "CT_STRING",
            TokenKind::CtChar => "CT_CHAR",
            TokenKind::Comma => "COMMA",
            TokenKind::Semicolon => "SEMICOLON",
            TokenKind::LPar => "LPAR",
            TokenKind::RPar => "RPAR",
            TokenKind::LBracket => "LBRACKET",
            TokenKind::RBracket => "RBRACKET",
            TokenKind::LAcc => "LACC",
            TokenKind::RAcc => "RACC",
            TokenKind::Add => "ADD",
            TokenKind::Sub => "SUB",
            TokenKind::Mul => "MUL",
            TokenKind::Div => "DIV",
            TokenKind::Dot => "DOT",
            TokenKind::And => "AND",
            TokenKind::Or => "OR",
            TokenKind::Not => "NOT",
            TokenKind::Assign => "ASSIGN",
            TokenKind::Equal => "EQUAL",
            TokenKind::NotEq => "NOTEQ",
            TokenKind::Less => "LESS",
            TokenKind::LessEq => "LESSEQ",
            TokenKind::Greater => "GREATER",
            TokenKind::GreaterEq => "GREATEREQ",
            TokenKind::End => "END",
        }
    }

    /// Returns true for the reserved words.
    pub fn is_keyword(self) -> bool {
        KEYWORDS.values().any(|&kind| kind == self)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Reserved words. Lookup is exact and case-sensitive.
static KEYWORDS: LazyLock<FxHashMap<&'static str, TokenKind>> = LazyLock::new(|| {
    [
        ("break", TokenKind::Break),
        ("char", TokenKind::Char),
        ("double", TokenKind::Double),
        ("else", TokenKind::Else),
        ("for", TokenKind::For),
        ("if", TokenKind::If),
        ("int", TokenKind::Int),
        ("return", TokenKind::Return),
        ("struct", TokenKind::Struct),
        ("void", TokenKind::Void),
        ("while", TokenKind::While),
    ]
    .into_iter()
    .collect()
});

/// A classified, line-tagged slice of source text.
///
/// For string and character literals `text` holds the raw content between
/// the delimiters. The end-of-input token carries the text `EOF`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub line: usize,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, line: usize) -> Self {
        Self {
            kind,
            text: text.into(),
            line,
        }
    }

    /// The end-of-input marker for the given line.
    pub fn end(line: usize) -> Self {
        Self::new(TokenKind::End, "EOF", line)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Token({}, \"{}\", Line: {})", self.kind, self.text, self.line)
    }
}

/// Non-fatal lexical diagnostic.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexWarning {
    #[error("Unknown character {ch}")]
    UnknownCharacter { ch: char, line: usize },
}

impl LexWarning {
    pub fn line(&self) -> usize {
        match self {
            LexWarning::UnknownCharacter { line, .. } => *line,
        }
    }
}

/// Everything a scan produces: the tokens (always terminated by
/// [`TokenKind::End`]) and the warnings raised along the way.
#[derive(Debug, Clone, Default)]
pub struct LexOutput {
    pub tokens: Vec<Token>,
    pub warnings: Vec<LexWarning>,
}

/// Lexer for AtomC source code
pub struct Lexer {
    input: Vec<char>,
    position: usize,
    line: usize,
}

impl Lexer {
    /// Create a new lexer for the given source string.
    pub fn new(input: &str) -> Self {
        Self {
            input: input.chars().collect(),
            position: 0,
            line: 1,
        }
    }

    /// Tokenize the entire input
    pub fn tokenize(&mut self) -> LexOutput {
        let mut output = LexOutput::default();

        while let Some(ch) = self.peek() {
            if ch.is_whitespace() {
                self.advance();
                continue;
            }

            if ch == '/' && self.peek_ahead(1) == Some('/') {
                self.skip_line_comment();
                continue;
            }

            if ch == '/' && self.peek_ahead(1) == Some('*') {
                self.skip_block_comment();
                continue;
            }

            self.advance();
            match self.next_token(ch) {
                Ok(token) => output.tokens.push(token),
                Err(warning) => {
                    warn!(line = warning.line(), "{warning}");
                    output.warnings.push(warning);
                }
            }
        }

        output.tokens.push(Token::end(self.line));
        output
    }

    /// Produce the token starting with `ch`, which has already been consumed.
    fn next_token(&mut self, ch: char) -> Result<Token, LexWarning> {
        let line = self.line;
        let start = self.position - 1;

        let kind = match ch {
            '"' => return Ok(self.quoted_literal('"', TokenKind::CtString, line)),
            '\'' => return Ok(self.quoted_literal('\'', TokenKind::CtChar, line)),

            '0'..='9' => self.number_literal(ch),

            c if c.is_alphabetic() || c == '_' => self.identifier_or_keyword(start),

            '+' => TokenKind::Add,
            '-' => TokenKind::Sub,
            '*' => TokenKind::Mul,
            '/' => TokenKind::Div,
            '.' => TokenKind::Dot,
            ',' => TokenKind::Comma,
            ';' => TokenKind::Semicolon,
            '(' => TokenKind::LPar,
            ')' => TokenKind::RPar,
            '[' => TokenKind::LBracket,
            ']' => TokenKind::RBracket,
            '{' => TokenKind::LAcc,
            '}' => TokenKind::RAcc,

            '<' => {
                if self.match_char('=') {
                    TokenKind::LessEq
                } else {
                    TokenKind::Less
                }
            }
            '>' => {
                if self.match_char('=') {
                    TokenKind::GreaterEq
                } else {
                    TokenKind::Greater
                }
            }
            '=' => {
                if self.match_char('=') {
                    TokenKind::Equal
                } else {
                    TokenKind::Assign
                }
            }
            '!' => {
                if self.match_char('=') {
                    TokenKind::NotEq
                } else {
                    TokenKind::Not
                }
            }
            '&' if self.match_char('&') => TokenKind::And,
            '|' if self.match_char('|') => TokenKind::Or,

            _ => return Err(LexWarning::UnknownCharacter { ch, line }),
        };

        Ok(Token::new(kind, self.slice(start, self.position), line))
    }

    /// Numeric literal: hex, leading-zero decimal, or decimal with optional
    /// fraction and exponent. Only the last form can become `CT_REAL`.
    fn number_literal(&mut self, first_digit: char) -> TokenKind {
        if first_digit == '0' {
            if self.match_char('x') || self.match_char('X') {
                self.consume_while(|c| c.is_ascii_hexdigit());
                return TokenKind::CtInt;
            }
            if self.peek().is_some_and(|c| c.is_ascii_digit()) {
                self.consume_while(|c| c.is_ascii_digit());
                return TokenKind::CtInt;
            }
        }

        self.consume_while(|c| c.is_ascii_digit());

        let mut is_real = false;
        if self.match_char('.') {
            is_real = true;
            self.consume_while(|c| c.is_ascii_digit());
        }
        if self.match_char('e') || self.match_char('E') {
            is_real = true;
            if !self.match_char('+') {
                self.match_char('-');
            }
            self.consume_while(|c| c.is_ascii_digit());
        }

        if is_real {
            TokenKind::CtReal
        } else {
            TokenKind::CtInt
        }
    }

    /// Identifier or keyword; the first character is already consumed.
    fn identifier_or_keyword(&mut self, start: usize) -> TokenKind {
        self.consume_while(|c| c.is_alphanumeric() || c == '_');

        let text = self.slice(start, self.position);
        KEYWORDS.get(text.as_str()).copied().unwrap_or(TokenKind::Id)
    }

    /// String or character literal. An unterminated literal runs to the end
    /// of input and is closed there.
    fn quoted_literal(&mut self, delimiter: char, kind: TokenKind, line: usize) -> Token {
        let start = self.position;
        self.consume_while(|c| c != delimiter);
        let text = self.slice(start, self.position);
        self.match_char(delimiter);

        Token::new(kind, text, line)
    }

    /// Skip single-line comment (// ...), leaving the newline in place
    fn skip_line_comment(&mut self) {
        self.advance();
        self.advance();
        self.consume_while(|c| c != '\n');
    }

    /// Skip multi-line comment (/* ... */). An unterminated comment swallows
    /// the rest of the input.
    fn skip_block_comment(&mut self) {
        self.advance(); // skip '/'
        self.advance(); // skip '*'

        while !self.is_at_end() {
            if self.peek() == Some('*') && self.peek_ahead(1) == Some('/') {
                self.advance();
                self.advance();
                return;
            }
            self.advance();
        }
    }

    fn consume_while(&mut self, predicate: impl Fn(char) -> bool) {
        while self.peek().is_some_and(&predicate) {
            self.advance();
        }
    }

    fn match_char(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn slice(&self, start: usize, end: usize) -> String {
        self.input[start..end].iter().collect()
    }

    /// Peek at current character without consuming
    fn peek(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    /// Peek ahead n characters
    fn peek_ahead(&self, n: usize) -> Option<char> {
        self.input.get(self.position + n).copied()
    }

    /// Advance to next character, counting lines
    fn advance(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.position += 1;

        if ch == '\n' {
            self.line += 1;
        }

        Some(ch)
    }

    fn is_at_end(&self) -> bool {
        self.position >= self.input.len()
    }
}
