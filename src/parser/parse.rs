//! Main parser coordinator
//!
//! This module provides the [`Parser`] struct and core parsing infrastructure:
//! error types, options, cursor helpers, and the [`Parser::parse_unit`] entry
//! point.
//!
//! # Parser Architecture
//!
//! The Parser is a backtracking recursive descent verifier:
//! - This module: Parser struct, cursor handling, and coordination
//! - `declarations`: struct, variable, and function declarations
//! - `statements`: statements and compound blocks
//! - `expressions`: the expression grammar, one method per precedence level
//!
//! # Production results
//!
//! Every production returns [`Production`], a `Result<bool, SyntaxError>`:
//! - `Ok(true)`: the production matched and the cursor sits after it
//! - `Ok(false)`: the production does not apply here; the cursor is back
//!   where the attempt started, so a sibling alternative can be tried
//! - `Err(_)`: the production committed and then found broken input; the
//!   error unwinds to the top of the parse
//!
//! Tokens are never mutated, so restoring the cursor index fully restores
//! parse state.

use crate::parser::lexer::{Token, TokenKind};
use rustc_hash::FxHashMap;
use thiserror::Error;
use tracing::{debug, trace};

/// Syntax error reported by the parser
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyntaxError {
    /// A committed production found its required follow-on missing.
    #[error("Syntax error at token: {} {message}", .token.line)]
    Fatal { token: Token, message: &'static str },

    /// `unit` stopped before consuming the end of input without any
    /// production committing.
    #[error("Syntax error at token: {token}")]
    Stalled { token: Token },
}

impl SyntaxError {
    /// The token at which the error was detected.
    pub fn token(&self) -> &Token {
        match self {
            SyntaxError::Fatal { token, .. } | SyntaxError::Stalled { token } => token,
        }
    }

    pub fn line(&self) -> usize {
        self.token().line
    }
}

/// Outcome of a single grammar production.
pub(crate) type Production = Result<bool, SyntaxError>;

/// Grammar switches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseOptions {
    /// When false (the default), `struct ID` inside a type position consumes
    /// its tokens but does not count as a type, so struct-typed variables,
    /// arguments, and casts are rejected. When true it is a regular type.
    pub accept_struct_types: bool,
}

/// Recursive descent verifier for AtomC
pub struct Parser {
    pub(crate) tokens: Vec<Token>,
    pub(crate) position: usize,
    /// Furthest index at which a token match was attempted and failed.
    pub(crate) furthest: usize,
    /// Unary expression results by start index: end index, or `None` for no
    /// match. Keeps the assignment probe from re-parsing nested parentheses.
    pub(crate) unary_memo: FxHashMap<usize, Option<usize>>,
    pub(crate) options: ParseOptions,
}

impl Parser {
    /// Create a parser over a token sequence produced by the lexer.
    pub fn new(tokens: Vec<Token>) -> Self {
        Self::with_options(tokens, ParseOptions::default())
    }

    pub fn with_options(mut tokens: Vec<Token>, options: ParseOptions) -> Self {
        if tokens.last().map(|t| t.kind) != Some(TokenKind::End) {
            let line = tokens.last().map_or(1, |t| t.line);
            tokens.push(Token::end(line));
        }

        Self {
            tokens,
            position: 0,
            furthest: 0,
            unary_memo: FxHashMap::default(),
            options,
        }
    }

    /// Verify that the whole token sequence is a `unit`.
    ///
    /// Can be called again; each call starts from the first token.
    pub fn parse_unit(&mut self) -> Result<(), SyntaxError> {
        self.position = 0;
        self.furthest = 0;
        self.unary_memo.clear();

        match self.unit() {
            Ok(true) => {
                debug!(tokens = self.tokens.len(), "parsed successfully");
                Ok(())
            }
            Ok(false) => {
                let index = self.furthest.max(self.position);
                let error = SyntaxError::Stalled {
                    token: self.tokens[index].clone(),
                };
                debug!(%error, "unit stalled");
                Err(error)
            }
            Err(error) => {
                debug!(%error, "fatal syntax error");
                Err(error)
            }
        }
    }

    // ===== Cursor helpers =====

    /// The current token
    pub fn peek(&self) -> &Token {
        &self.tokens[self.position]
    }

    /// Current cursor index
    pub fn position(&self) -> usize {
        self.position
    }

    /// Save the cursor before a speculative attempt.
    pub(crate) fn mark(&self) -> usize {
        self.position
    }

    /// Roll the cursor back to a saved mark.
    pub(crate) fn reset(&mut self, mark: usize) {
        if mark != self.position {
            trace!(from = self.position, to = mark, "backtrack");
        }
        self.position = mark;
    }

    /// Reset to `mark` and report the production as not applicable.
    pub(crate) fn backtrack(&mut self, mark: usize) -> Production {
        self.reset(mark);
        Ok(false)
    }

    pub(crate) fn check(&self, kind: TokenKind) -> bool {
        self.peek().kind == kind
    }

    /// Consume the current token if it has the given kind.
    pub(crate) fn consume(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            // END is never stepped over
            if kind != TokenKind::End {
                self.position += 1;
            }
            true
        } else {
            self.furthest = self.furthest.max(self.position);
            false
        }
    }

    /// Consume the current token if it has any of the given kinds.
    pub(crate) fn consume_any(&mut self, kinds: &[TokenKind]) -> bool {
        kinds.iter().any(|&kind| self.consume(kind))
    }

    /// Build a fatal error at the current token.
    pub(crate) fn error(&self, message: &'static str) -> SyntaxError {
        SyntaxError::Fatal {
            token: self.peek().clone(),
            message,
        }
    }

    /// Consume a required token or fail fatally.
    pub(crate) fn expect(
        &mut self,
        kind: TokenKind,
        message: &'static str,
    ) -> Result<(), SyntaxError> {
        if self.consume(kind) {
            Ok(())
        } else {
            Err(self.error(message))
        }
    }

    /// Run a required production; not matching is fatal.
    pub(crate) fn require(
        &mut self,
        production: impl FnOnce(&mut Self) -> Production,
        message: &'static str,
    ) -> Result<(), SyntaxError> {
        if production(self)? {
            Ok(())
        } else {
            Err(self.error(message))
        }
    }
}
