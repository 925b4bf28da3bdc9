//! Source → tokens → verdict pipeline
//!
//! [`check`] runs the lexer and the parser back to back and keeps everything
//! a front end needs to report on the run.

use crate::parser::{LexWarning, Lexer, ParseOptions, Parser, SyntaxError, Token};
use tracing::debug;

/// Result of checking one source text.
#[derive(Debug, Clone)]
pub struct CheckReport {
    /// Tokens in source order, ending with the end-of-input token
    pub tokens: Vec<Token>,
    /// Non-fatal lexical warnings, in source order
    pub warnings: Vec<LexWarning>,
    pub result: Result<(), SyntaxError>,
}

impl CheckReport {
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }

    pub fn error(&self) -> Option<&SyntaxError> {
        self.result.as_ref().err()
    }
}

/// Tokenize `source` and verify it against the grammar.
pub fn check(source: &str, options: ParseOptions) -> CheckReport {
    let output = Lexer::new(source).tokenize();
    debug!(
        tokens = output.tokens.len(),
        warnings = output.warnings.len(),
        "tokenized"
    );

    let mut parser = Parser::with_options(output.tokens.clone(), options);
    let result = parser.parse_unit();

    CheckReport {
        tokens: output.tokens,
        warnings: output.warnings,
        result,
    }
}
