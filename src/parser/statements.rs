//! Statement parsing implementation
//!
//! This module handles parsing of all AtomC statement types:
//!
//! - Compound statements: `{ ... }` mixing declarations and statements
//! - Control flow: `if`/`else`, `while`, `for`
//! - Jump statements: `break`, `return`
//! - Expression statements and the empty statement
//!
//! # Grammar
//!
//! ```text
//! stm         ::= stmCompound
//!               | "if" "(" expr ")" stm ("else" stm)?
//!               | "while" "(" expr ")" stm
//!               | "for" "(" ";" ";" ")" stm
//!               | "break" ";"
//!               | "return" ";"
//!               | expr ";"
//!               | ";"
//! stmCompound ::= "{" (declVar | stm)* "}"
//! ```
//!
//! The `for` header only accepts empty clauses.
//!
//! All parsing methods are implemented as `pub(crate)` methods on the [`Parser`] struct.

use crate::parser::lexer::TokenKind;
use crate::parser::parse::{Parser, Production};
use crate::parser::stack::ensure_sufficient_stack;

impl Parser {
    /// Parse a statement
    pub(crate) fn stm(&mut self) -> Production {
        ensure_sufficient_stack(|| self.stm_inner())
    }

    fn stm_inner(&mut self) -> Production {
        let mark = self.mark();

        if self.stm_compound()? {
            return Ok(true);
        }

        if self.consume(TokenKind::If) {
            self.expect(TokenKind::LPar, "missing '(' after if")?;
            self.require(Self::expr, "invalid expression inside if")?;
            self.expect(TokenKind::RPar, "missing ')' after if condition")?;
            self.require(Self::stm, "missing statement after if")?;
            if self.consume(TokenKind::Else) {
                self.require(Self::stm, "missing statement after else")?;
            }
            return Ok(true);
        }

        if self.consume(TokenKind::While) {
            self.expect(TokenKind::LPar, "missing '(' after while")?;
            self.require(Self::expr, "invalid expression inside while")?;
            self.expect(TokenKind::RPar, "missing ')' after while condition")?;
            self.require(Self::stm, "missing statement after while")?;
            return Ok(true);
        }

        if self.consume(TokenKind::For) {
            self.expect(TokenKind::LPar, "missing '(' after for")?;
            self.expect(TokenKind::Semicolon, "missing ';' after first for expression")?;
            self.expect(TokenKind::Semicolon, "missing ';' after second for expression")?;
            self.expect(TokenKind::RPar, "missing ')' after for expressions")?;
            self.require(Self::stm, "missing statement after for")?;
            return Ok(true);
        }

        if self.consume(TokenKind::Break) {
            self.expect(TokenKind::Semicolon, "missing ';' after break")?;
            return Ok(true);
        }

        if self.consume(TokenKind::Return) {
            self.expect(TokenKind::Semicolon, "missing ';' after return")?;
            return Ok(true);
        }

        if self.expr()? {
            self.expect(TokenKind::Semicolon, "missing ';' after expression")?;
            return Ok(true);
        }

        if self.consume(TokenKind::Semicolon) {
            return Ok(true);
        }

        self.backtrack(mark)
    }

    /// Parse a block: { declarations and statements }
    pub(crate) fn stm_compound(&mut self) -> Production {
        if !self.consume(TokenKind::LAcc) {
            return Ok(false);
        }

        while self.decl_var()? || self.stm()? {}

        self.expect(TokenKind::RAcc, "missing '}' or syntax error in stmCompound")?;
        Ok(true)
    }
}
