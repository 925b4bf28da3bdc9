//! Expression parsing implementation
//!
//! One method per precedence level, lowest first. Every binary level is
//! left-associative; assignment is right-associative and only applies when
//! its left side parses as a unary expression.
//!
//! # Grammar
//!
//! ```text
//! expr        ::= exprAssign
//! exprAssign  ::= exprUnary "=" exprAssign | exprOr
//! exprOr      ::= exprAnd ("||" exprAnd)*
//! exprAnd     ::= exprEq ("&&" exprEq)*
//! exprEq      ::= exprRel (("==" | "!=") exprRel)*
//! exprRel     ::= exprAdd (("<" | "<=" | ">" | ">=") exprAdd)*
//! exprAdd     ::= exprMul (("+" | "-") exprMul)*
//! exprMul     ::= exprCast (("*" | "/") exprCast)*
//! exprCast    ::= "(" typeName ")" exprCast | exprUnary
//! exprUnary   ::= ("-" | "!") exprUnary | exprPostfix
//! exprPostfix ::= exprPrimary ("[" expr "]" | "." ID)*
//! exprPrimary ::= ID ("(" (expr ("," expr)*)? ")")?
//!               | CT_INT | CT_REAL | CT_CHAR | CT_STRING
//!               | "(" expr ")"
//! ```
//!
//! Once a binary or unary operator is consumed its operand is required.
//!
//! The self-recursive levels (assignment, cast, unary) run under
//! `ensure_sufficient_stack`, so nesting depth is limited by memory only.
//!
//! All parsing methods are implemented as `pub(crate)` methods on the [`Parser`] struct.

use crate::parser::lexer::TokenKind;
use crate::parser::parse::{Parser, Production};
use crate::parser::stack::ensure_sufficient_stack;

impl Parser {
    /// Parse expression (top-level entry point)
    pub(crate) fn expr(&mut self) -> Production {
        self.expr_assign()
    }

    /// Parse assignment (right-associative)
    fn expr_assign(&mut self) -> Production {
        ensure_sufficient_stack(|| self.expr_assign_inner())
    }

    fn expr_assign_inner(&mut self) -> Production {
        let mark = self.mark();

        if self.expr_unary()? {
            if self.consume(TokenKind::Assign) {
                self.require(Self::expr_assign, "invalid assignment")?;
                return Ok(true);
            }
            self.reset(mark);
        }

        self.expr_or()
    }

    /// One left-associative binary level: operand (op operand)*
    fn binary_level(
        &mut self,
        operand: fn(&mut Self) -> Production,
        operators: &[TokenKind],
        message: &'static str,
    ) -> Production {
        if !operand(self)? {
            return Ok(false);
        }

        while self.consume_any(operators) {
            self.require(operand, message)?;
        }

        Ok(true)
    }

    /// Parse logical OR (||)
    fn expr_or(&mut self) -> Production {
        self.binary_level(Self::expr_and, &[TokenKind::Or], "invalid expression after ||")
    }

    /// Parse logical AND (&&)
    fn expr_and(&mut self) -> Production {
        self.binary_level(Self::expr_eq, &[TokenKind::And], "invalid expression after &&")
    }

    /// Parse equality (== !=)
    fn expr_eq(&mut self) -> Production {
        self.binary_level(
            Self::expr_rel,
            &[TokenKind::Equal, TokenKind::NotEq],
            "invalid expression after == or !=",
        )
    }

    /// Parse relational (< <= > >=)
    fn expr_rel(&mut self) -> Production {
        self.binary_level(
            Self::expr_add,
            &[TokenKind::Less, TokenKind::LessEq, TokenKind::Greater, TokenKind::GreaterEq],
            "invalid expression after relational operator",
        )
    }

    /// Parse additive (+ -)
    fn expr_add(&mut self) -> Production {
        self.binary_level(
            Self::expr_mul,
            &[TokenKind::Add, TokenKind::Sub],
            "invalid expression after '+' or '-'",
        )
    }

    /// Parse multiplicative (* /)
    fn expr_mul(&mut self) -> Production {
        self.binary_level(
            Self::expr_cast,
            &[TokenKind::Mul, TokenKind::Div],
            "invalid expression after '*' or '/'",
        )
    }

    /// Parse cast: (type) expr
    fn expr_cast(&mut self) -> Production {
        ensure_sufficient_stack(|| self.expr_cast_inner())
    }

    fn expr_cast_inner(&mut self) -> Production {
        let mark = self.mark();

        if self.consume(TokenKind::LPar) {
            if self.type_name()? {
                self.expect(TokenKind::RPar, "missing ')' after cast")?;
                self.require(Self::expr_cast, "invalid expression after cast")?;
                return Ok(true);
            }
            self.reset(mark);
        }

        self.expr_unary()
    }

    /// Parse prefix unary (- !), memoized by start position
    fn expr_unary(&mut self) -> Production {
        let start = self.position();

        if let Some(&end) = self.unary_memo.get(&start) {
            return Ok(match end {
                Some(end) => {
                    self.position = end;
                    true
                }
                None => false,
            });
        }

        let matched = ensure_sufficient_stack(|| self.expr_unary_uncached())?;
        self.unary_memo.insert(start, matched.then_some(self.position));
        Ok(matched)
    }

    fn expr_unary_uncached(&mut self) -> Production {
        if self.consume_any(&[TokenKind::Sub, TokenKind::Not]) {
            self.require(Self::expr_unary, "invalid expression after unary '-' or '!'")?;
            return Ok(true);
        }

        self.expr_postfix()
    }

    /// Parse postfix chain: primary followed by [index] and .field
    fn expr_postfix(&mut self) -> Production {
        if !self.expr_primary()? {
            return Ok(false);
        }

        loop {
            if self.consume(TokenKind::LBracket) {
                self.require(Self::expr, "invalid index expression in array access")?;
                self.expect(TokenKind::RBracket, "missing ']' in array access")?;
            } else if self.consume(TokenKind::Dot) {
                self.expect(TokenKind::Id, "missing field name after '.'")?;
            } else {
                break;
            }
        }

        Ok(true)
    }

    /// Parse primary: identifiers, calls, constants, parenthesized expressions
    fn expr_primary(&mut self) -> Production {
        let mark = self.mark();

        if self.consume(TokenKind::Id) {
            if self.consume(TokenKind::LPar) {
                if self.expr()? {
                    while self.consume(TokenKind::Comma) {
                        self.require(Self::expr, "invalid expression after ',' in call")?;
                    }
                }
                self.expect(TokenKind::RPar, "missing ')' after function call arguments")?;
            }
            return Ok(true);
        }

        if self.consume_any(&[
            TokenKind::CtInt,
            TokenKind::CtReal,
            TokenKind::CtChar,
            TokenKind::CtString,
        ]) {
            return Ok(true);
        }

        // `(` may still open a cast, so it only commits once an expression follows
        if self.consume(TokenKind::LPar) {
            if !self.expr()? {
                return self.backtrack(mark);
            }
            self.expect(TokenKind::RPar, "missing ')' after expression")?;
            return Ok(true);
        }

        Ok(false)
    }
}
