//! Property-based tests for the lexer and parser.
//!
//! 1. **Lexer never panics** and always ends with exactly one `END` token
//! 2. **Lines are monotonic** across the token stream
//! 3. **Line tracking**: a token after `N` newlines is on line `N + 1`
//! 4. **Round-trip**: space-separated tokens rebuild the source from their text
//! 5. **Keyword classification** is exact and case-sensitive
//! 6. **Parser never panics** on lexer output and is deterministic
//! 7. **Generated declarations** always parse

use atomc::check::check;
use atomc::parser::{Lexer, ParseOptions, Parser, TokenKind};
use proptest::prelude::*;

const KEYWORDS: &[&str] = &[
    "break", "char", "double", "else", "for", "if", "int", "return", "struct", "void", "while",
];

/// Single-token fragments and the kind each one lexes to.
const FRAGMENTS: &[(&str, TokenKind)] = &[
    ("x", TokenKind::Id),
    ("_tmp9", TokenKind::Id),
    ("42", TokenKind::CtInt),
    ("0x1f", TokenKind::CtInt),
    ("007", TokenKind::CtInt),
    ("3.25", TokenKind::CtReal),
    ("6e-2", TokenKind::CtReal),
    ("'c'", TokenKind::CtChar),
    ("\"str\"", TokenKind::CtString),
    ("int", TokenKind::Int),
    ("while", TokenKind::While),
    ("(", TokenKind::LPar),
    ("}", TokenKind::RAcc),
    ("<=", TokenKind::LessEq),
    ("==", TokenKind::Equal),
    ("!=", TokenKind::NotEq),
    ("&&", TokenKind::And),
    ("||", TokenKind::Or),
    ("/", TokenKind::Div),
    (";", TokenKind::Semicolon),
];

const BASE_TYPES: &[&str] = &["int", "double", "char"];

/// Text that may precede a token without producing one.
const FILLERS: &[&str] = &["", "  ", "// note\n", "/* a\nb */", "\t"];

fn fragment() -> impl Strategy<Value = (&'static str, TokenKind)> {
    prop::sample::select(FRAGMENTS)
}

/// Source text of one token, including quoted literals with arbitrary content.
fn token_source() -> impl Strategy<Value = String> {
    prop_oneof![
        fragment().prop_map(|(text, _)| text.to_string()),
        "[a-z0-9 ;,(){}=]{0,10}".prop_map(|body| format!("\"{body}\"")),
        "[a-z0-9 ]{0,1}".prop_map(|body| format!("'{body}'")),
    ]
}

fn identifier() -> impl Strategy<Value = String> {
    "[a-z_][a-z0-9_]{0,8}".prop_filter("keywords are not identifiers", |s| {
        !KEYWORDS.contains(&s.as_str())
    })
}

fn declaration() -> impl Strategy<Value = String> {
    (
        prop::sample::select(BASE_TYPES),
        prop::collection::vec((identifier(), any::<bool>()), 1..4),
    )
        .prop_map(|(ty, names)| {
            let names: Vec<String> = names
                .into_iter()
                .map(|(name, array)| if array { format!("{name}[]") } else { name })
                .collect();
            format!("{ty} {};", names.join(", "))
        })
}

proptest! {
    #[test]
    fn lexer_never_panics_and_ends_with_end(source in "\\PC{0,200}") {
        let tokens = Lexer::new(&source).tokenize().tokens;

        prop_assert_eq!(tokens.last().map(|t| t.kind), Some(TokenKind::End));
        prop_assert_eq!(tokens.iter().filter(|t| t.kind == TokenKind::End).count(), 1);
    }

    #[test]
    fn token_lines_are_monotonic(source in "[a-z0-9 ;(){}\\n/*\"'.=<>!+-]{0,200}") {
        let tokens = Lexer::new(&source).tokenize().tokens;

        for pair in tokens.windows(2) {
            prop_assert!(pair[0].line <= pair[1].line);
        }
    }

    #[test]
    fn line_tracks_preceding_newlines(
        newlines in 0usize..20,
        filler in prop::sample::select(FILLERS),
        (text, kind) in fragment(),
    ) {
        let prefix = format!("{filler}{}", "\n".repeat(newlines));
        let expected_line = prefix.matches('\n').count() + 1;
        let tokens = Lexer::new(&format!("{prefix}{text}")).tokenize().tokens;

        prop_assert_eq!(tokens.len(), 2);
        prop_assert_eq!(tokens[0].kind, kind);
        prop_assert_eq!(tokens[0].line, expected_line);
    }

    #[test]
    fn space_separated_fragments_keep_their_kinds(
        fragments in prop::collection::vec(fragment(), 0..30),
    ) {
        let source: Vec<&str> = fragments.iter().map(|(text, _)| *text).collect();
        let tokens = Lexer::new(&source.join(" ")).tokenize().tokens;

        let kinds: Vec<TokenKind> = tokens.iter().map(|t| t.kind).collect();
        let mut expected: Vec<TokenKind> = fragments.iter().map(|(_, kind)| *kind).collect();
        expected.push(TokenKind::End);
        prop_assert_eq!(kinds, expected);
    }

    #[test]
    fn token_text_rebuilds_the_source(parts in prop::collection::vec(token_source(), 0..30)) {
        let source = parts.join(" ");
        let tokens = Lexer::new(&source).tokenize().tokens;

        let rebuilt: Vec<String> = tokens
            .iter()
            .filter(|t| t.kind != TokenKind::End)
            .map(|t| match t.kind {
                TokenKind::CtString => format!("\"{}\"", t.text),
                TokenKind::CtChar => format!("'{}'", t.text),
                _ => t.text.clone(),
            })
            .collect();
        prop_assert_eq!(rebuilt.join(" "), source);
    }

    #[test]
    fn identifiers_are_never_keywords(name in identifier()) {
        let tokens = Lexer::new(&name).tokenize().tokens;

        prop_assert_eq!(tokens[0].kind, TokenKind::Id);
        prop_assert_eq!(&tokens[0].text, &name);
    }

    #[test]
    fn keywords_are_case_sensitive(index in 0..KEYWORDS.len()) {
        let upper = KEYWORDS[index].to_uppercase();
        let tokens = Lexer::new(&upper).tokenize().tokens;

        prop_assert_eq!(tokens[0].kind, TokenKind::Id);
    }

    #[test]
    fn parser_is_deterministic(source in "[a-z0-9 ;(){}\\[\\],.=<>!+*-]{0,80}") {
        let tokens = Lexer::new(&source).tokenize().tokens;

        let first = Parser::new(tokens.clone()).parse_unit();
        let second = Parser::new(tokens).parse_unit();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn generated_declarations_parse(decls in prop::collection::vec(declaration(), 0..8)) {
        let globals = decls.join("\n");
        let source = format!("{globals}\nvoid main() {{\n{globals}\n}}");

        let report = check(&source, ParseOptions::default());
        prop_assert!(report.is_success(), "{:?} for {}", report.result, source);
    }
}
