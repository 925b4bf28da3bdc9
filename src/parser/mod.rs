//! AtomC source checker
//!
//! This module turns AtomC source text into tokens and verifies the tokens
//! against the grammar:
//! - [`lexer`]: Tokenization (source text → tokens)
//! - [`parse`]: Parser state, errors, and the entry point
//! - `declarations`, `statements`, `expressions`: the grammar productions
//! - `stack`: on-demand stack growth for deeply nested input
//!
//! # Supported language
//!
//! - Types: `int`, `double`, `char`, `struct Name`, unsized arrays `[]`
//! - Declarations: structs, global and local variables, functions
//! - Statements: blocks, `if`/`else`, `while`, `for (;;)`, `break`, `return;`
//! - Expressions: assignment, logical, equality, relational, additive,
//!   multiplicative, casts, unary `-`/`!`, indexing, field access, calls
//!
//! # Parser Implementation
//!
//! Hand-written backtracking recursive descent. No tree is built; the parser
//! only decides whether the input is grammatical and where it first fails.

mod declarations;
mod expressions;
pub mod lexer;
pub mod parse;
mod stack;
mod statements;

pub use lexer::{LexOutput, LexWarning, Lexer, Token, TokenKind};
pub use parse::{ParseOptions, Parser, SyntaxError};
