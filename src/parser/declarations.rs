//! Declaration parsing implementation
//!
//! This module handles the top level of an AtomC translation unit:
//!
//! - Struct definitions: `struct Name { ... };`
//! - Variable declarations: `int a, b[];`
//! - Function definitions: `type name(args) { ... }`
//! - Base types and array suffixes
//!
//! # Grammar
//!
//! ```text
//! unit       ::= (declStruct | declFunc | declVar)* END
//! declStruct ::= "struct" ID "{" declVar* "}" ";"
//! declVar    ::= typeBase ID arrayDecl? ("," ID arrayDecl?)* ";"
//! declFunc   ::= (typeBase | "void") ID "(" (funcArg ("," funcArg)*)? ")" stmCompound
//! funcArg    ::= typeBase ID arrayDecl?
//! typeBase   ::= "int" | "double" | "char" | "struct" ID
//! arrayDecl  ::= "[" "]"
//! typeName   ::= typeBase
//! ```
//!
//! All parsing methods are implemented as `pub(crate)` methods on the [`Parser`] struct.

use crate::parser::lexer::TokenKind;
use crate::parser::parse::{Parser, Production};

impl Parser {
    /// Parse the whole translation unit, including the end-of-input token.
    pub(crate) fn unit(&mut self) -> Production {
        while self.decl_struct()? || self.decl_func()? || self.decl_var()? {}

        Ok(self.consume(TokenKind::End))
    }

    /// Parse struct definition: struct Name { fields };
    ///
    /// `struct Name` followed by anything but `{` is left for the other
    /// declaration forms.
    pub(crate) fn decl_struct(&mut self) -> Production {
        let mark = self.mark();

        if !self.consume(TokenKind::Struct) {
            return Ok(false);
        }
        self.expect(TokenKind::Id, "missing ID after 'struct'")?;
        if !self.consume(TokenKind::LAcc) {
            return self.backtrack(mark);
        }

        while self.decl_var()? {}

        self.expect(TokenKind::RAcc, "missing '}' in struct declaration")?;
        self.expect(TokenKind::Semicolon, "missing ';' after struct declaration")?;
        Ok(true)
    }

    /// Parse variable declaration list: type a, b[], c;
    pub(crate) fn decl_var(&mut self) -> Production {
        let mark = self.mark();

        if !self.type_base()? || !self.consume(TokenKind::Id) {
            return self.backtrack(mark);
        }
        self.array_decl()?;
        while self.consume(TokenKind::Comma) {
            self.expect(TokenKind::Id, "missing ID after ',' in variable list")?;
            self.array_decl()?;
        }

        self.expect(TokenKind::Semicolon, "missing ';' after variable declaration")?;
        Ok(true)
    }

    /// Parse function definition: type name(args) { body }
    pub(crate) fn decl_func(&mut self) -> Production {
        let mark = self.mark();

        let has_type = if self.type_base()? {
            true
        } else {
            self.reset(mark);
            self.consume(TokenKind::Void)
        };

        if !has_type || !self.consume(TokenKind::Id) || !self.consume(TokenKind::LPar) {
            return self.backtrack(mark);
        }

        if self.func_arg()? {
            while self.consume(TokenKind::Comma) {
                self.require(Self::func_arg, "invalid funcArg after ','")?;
            }
        }

        self.expect(TokenKind::RPar, "missing ')' in function declaration")?;
        self.require(Self::stm_compound, "invalid function body")?;
        Ok(true)
    }

    /// Parse a single function argument: type name[]
    pub(crate) fn func_arg(&mut self) -> Production {
        let mark = self.mark();

        if self.type_base()? && self.consume(TokenKind::Id) {
            self.array_decl()?;
            return Ok(true);
        }

        self.backtrack(mark)
    }

    /// Parse a base type.
    ///
    /// May leave `struct ID` consumed while still reporting no match (see
    /// [`ParseOptions::accept_struct_types`](crate::parser::parse::ParseOptions)),
    /// so callers reset to their own mark on `Ok(false)`.
    pub(crate) fn type_base(&mut self) -> Production {
        if self.consume_any(&[TokenKind::Int, TokenKind::Double, TokenKind::Char]) {
            return Ok(true);
        }

        if self.consume(TokenKind::Struct) {
            self.expect(TokenKind::Id, "missing ID after 'struct'")?;
            return Ok(self.options.accept_struct_types);
        }

        Ok(false)
    }

    /// Parse an unsized array suffix: []
    pub(crate) fn array_decl(&mut self) -> Production {
        if !self.consume(TokenKind::LBracket) {
            return Ok(false);
        }

        self.expect(TokenKind::RBracket, "missing ']' in array declaration")?;
        Ok(true)
    }

    /// Type inside a cast
    pub(crate) fn type_name(&mut self) -> Production {
        self.type_base()
    }
}

#[cfg(test)]
mod tests {
    use crate::parser::lexer::{Lexer, Token, TokenKind};
    use crate::parser::parse::{ParseOptions, Parser, SyntaxError};

    fn parse(source: &str) -> Result<(), SyntaxError> {
        Parser::new(Lexer::new(source).tokenize().tokens).parse_unit()
    }

    fn parse_with_structs(source: &str) -> Result<(), SyntaxError> {
        let options = ParseOptions {
            accept_struct_types: true,
        };
        Parser::with_options(Lexer::new(source).tokenize().tokens, options).parse_unit()
    }

    fn fatal_message(source: &str) -> &'static str {
        match parse(source) {
            Err(SyntaxError::Fatal { message, .. }) => message,
            other => panic!("expected a fatal error, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_variables() {
        assert_eq!(parse("int x;"), Ok(()));
        assert_eq!(parse("double a, b[], c;\nchar s[];"), Ok(()));
    }

    #[test]
    fn test_parse_struct() {
        assert_eq!(parse("struct Point { int x; int y; };"), Ok(()));
        assert_eq!(parse("struct Empty { };"), Ok(()));
    }

    #[test]
    fn test_parse_functions() {
        assert_eq!(parse("int main() { return; }"), Ok(()));
        assert_eq!(parse("void f(int a, double b[], char c) { }"), Ok(()));
        assert_eq!(parse("double g(int v[]) { }"), Ok(()));
    }

    #[test]
    fn test_variable_then_function() {
        assert_eq!(parse("int x; int f(){}"), Ok(()));
        assert_eq!(parse("int f(){} int x;"), Ok(()));
    }

    #[test]
    fn test_struct_without_name_is_fatal() {
        let err = parse("struct { }").unwrap_err();

        assert_eq!(
            err,
            SyntaxError::Fatal {
                token: Token::new(TokenKind::LAcc, "{", 1),
                message: "missing ID after 'struct'",
            }
        );
    }

    #[test]
    fn test_struct_missing_pieces() {
        assert_eq!(fatal_message("struct S { int x; "), "missing '}' in struct declaration");
        assert_eq!(fatal_message("struct S { int x; }"), "missing ';' after struct declaration");
    }

    #[test]
    fn test_variable_missing_pieces() {
        assert_eq!(fatal_message("int x"), "missing ';' after variable declaration");
        assert_eq!(fatal_message("int x, ;"), "missing ID after ',' in variable list");
        assert_eq!(fatal_message("int x[;"), "missing ']' in array declaration");
        assert_eq!(fatal_message("int x y;"), "missing ';' after variable declaration");
    }

    #[test]
    fn test_function_missing_pieces() {
        assert_eq!(fatal_message("int f(int a,) {}"), "invalid funcArg after ','");
        assert_eq!(fatal_message("int f(int a {}"), "missing ')' in function declaration");
        assert_eq!(fatal_message("int foo("), "missing ')' in function declaration");
        assert_eq!(fatal_message("int f();"), "invalid function body");
    }

    #[test]
    fn test_digit_after_type_stalls_at_digit() {
        let err = parse("int 3x;").unwrap_err();

        assert_eq!(
            err,
            SyntaxError::Stalled {
                token: Token::new(TokenKind::CtInt, "3", 1),
            }
        );
        assert_eq!(err.to_string(), r#"Syntax error at token: Token(CT_INT, "3", Line: 1)"#);
    }

    #[test]
    fn test_function_header_inside_block_is_a_broken_variable() {
        let err = parse("void f() { int g(); }").unwrap_err();

        assert_eq!(
            err,
            SyntaxError::Fatal {
                token: Token::new(TokenKind::LPar, "(", 1),
                message: "missing ';' after variable declaration",
            }
        );
        assert_eq!(
            fatal_message("struct S { int f(); };"),
            "missing ';' after variable declaration"
        );
    }

    #[test]
    fn test_void_is_not_a_variable_type() {
        assert!(matches!(parse("void x;"), Err(SyntaxError::Stalled { .. })));
        assert!(matches!(parse("int f(void) {}"), Err(SyntaxError::Fatal { .. })));
    }

    #[test]
    fn test_struct_typed_declarations_rejected_by_default() {
        let err = parse("struct P { int x; };\nstruct P p;").unwrap_err();
        assert_eq!(err, SyntaxError::Stalled { token: Token::new(TokenKind::Id, "p", 2) });

        let err = parse("int f() { struct P p; }").unwrap_err();
        assert_eq!(
            err,
            SyntaxError::Fatal {
                token: Token::new(TokenKind::Struct, "struct", 1),
                message: "missing '}' or syntax error in stmCompound",
            }
        );
    }

    #[test]
    fn test_struct_typed_declarations_with_option() {
        let source = "struct P { int x; struct P next[]; };\n\
                      struct P origin;\n\
                      struct P shift(struct P p, int dx) { struct P q; return; }";

        assert_eq!(parse_with_structs(source), Ok(()));
    }

    #[test]
    fn test_struct_keyword_alone_in_type_position_is_fatal() {
        assert_eq!(fatal_message("int f(struct) {}"), "missing ID after 'struct'");
    }
}
