//! # Introduction
//!
//! atomc is the front end of an AtomC compiler: it tokenizes source text and
//! verifies the tokens against the language grammar, reporting the first
//! syntax error or confirming a successful parse.
//!
//! ## Pipeline
//!
//! ```text
//! Source → Lexer → Tokens → Parser → Ok / SyntaxError
//! ```
//!
//! 1. [`parser::lexer`]: maximal-munch scanner producing line-tagged
//!    [`parser::Token`]s. Unknown characters become [`parser::LexWarning`]s.
//! 2. [`parser::parse`]: backtracking recursive descent verifier. Speculative
//!    productions rewind the cursor; committed ones fail with a
//!    [`parser::SyntaxError`].
//! 3. [`check`]: runs both stages and collects a [`check::CheckReport`].
//!
//! ## Example
//!
//! ```
//! use atomc::check::check;
//! use atomc::parser::ParseOptions;
//!
//! let report = check("int main() { return; }", ParseOptions::default());
//! assert!(report.is_success());
//! ```

pub mod check;
pub mod parser;
