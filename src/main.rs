// atomc: AtomC lexer and syntax checker

use std::fs;
use std::io::{self, IsTerminal};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use crossterm::style::{Color, Stylize};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use atomc::check::{check, CheckReport};
use atomc::parser::{ParseOptions, TokenKind};

/// Tokenize an AtomC source file and check its syntax
#[derive(Debug, Parser)]
#[command(name = "atomc", version, about)]
struct Cli {
    /// Source file to check
    #[arg(default_value = "0.c")]
    file: PathBuf,

    /// Do not print the token list
    #[arg(short, long)]
    quiet: bool,

    /// Treat `struct Name` as a regular type in declarations, arguments and casts
    #[arg(long)]
    accept_struct_types: bool,

    /// When to color the output
    #[arg(long, value_enum, default_value_t = ColorChoice::Auto)]
    color: ColorChoice,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ColorChoice {
    Auto,
    Always,
    Never,
}

impl ColorChoice {
    fn enabled(self) -> bool {
        match self {
            ColorChoice::Auto => io::stdout().is_terminal() && io::stderr().is_terminal(),
            ColorChoice::Always => true,
            ColorChoice::Never => false,
        }
    }
}

/// Install the log subscriber. `RUST_LOG` overrides the default `warn` level.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr).with_target(false))
        .with(filter)
        .init();
}

fn paint(text: String, color: Color, enabled: bool) -> String {
    if enabled {
        text.with(color).to_string()
    } else {
        text
    }
}

fn token_color(kind: TokenKind) -> Color {
    match kind {
        TokenKind::Id => Color::White,
        TokenKind::CtInt | TokenKind::CtReal => Color::DarkYellow,
        TokenKind::CtString | TokenKind::CtChar => Color::Green,
        TokenKind::End => Color::DarkGrey,
        kind if kind.is_keyword() => Color::Blue,
        _ => Color::Cyan,
    }
}

fn print_report(report: &CheckReport, quiet: bool, color: bool) {
    if !quiet {
        for token in &report.tokens {
            println!("{}", paint(token.to_string(), token_color(token.kind), color));
        }
    }

    for warning in &report.warnings {
        eprintln!("{}", paint(warning.to_string(), Color::Yellow, color));
    }

    match &report.result {
        Ok(()) => println!("{}", paint("Parsed successfully".to_string(), Color::Green, color)),
        Err(error) => eprintln!("{}", paint(error.to_string(), Color::Red, color)),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing();

    let source = match fs::read_to_string(&cli.file) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("Error reading file '{}': {}", cli.file.display(), e);
            return ExitCode::FAILURE;
        }
    };

    let options = ParseOptions {
        accept_struct_types: cli.accept_struct_types,
    };
    tracing::info!(file = %cli.file.display(), ?options, "checking");

    let report = check(&source, options);
    print_report(&report, cli.quiet, cli.color.enabled());

    if report.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
