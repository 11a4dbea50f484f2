//! Plurals CLI entry point.
//!
//! Provides command-line tools for working with CLDR plural rules:
//! - `plurals check` - Validate rule files
//! - `plurals eval` - Select plural categories for numbers
//! - `plurals locales` - List locales and their rules

mod commands;
mod output;

use std::io::stderr;
use std::process::exit;

use clap::{Parser, Subcommand, ValueEnum};
use commands::{CheckArgs, EvalArgs, LocalesArgs, run_check, run_eval, run_locales};
use tracing::Level;

/// CLDR plural rule tools.
#[derive(Debug, Parser)]
#[command(name = "plurals")]
#[command(about = "CLDR plural rule tools", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Color output control
    #[arg(long, value_enum, default_value_t = ColorWhen::Auto, global = true)]
    pub color: ColorWhen,

    /// Log rule compilation to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// When to use colored output.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ColorWhen {
    Auto,
    Always,
    Never,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Check rule files (.json)
    Check(CheckArgs),
    /// Select the plural category of numbers
    Eval(EvalArgs),
    /// List locales and their plural rules
    Locales(LocalesArgs),
}

/// Set up color output based on user preference.
fn setup_colors(color_when: ColorWhen) {
    match color_when {
        ColorWhen::Auto => {
            // owo-colors automatically checks TTY, NO_COLOR, FORCE_COLOR
        }
        ColorWhen::Always => {
            owo_colors::set_override(true);
        }
        ColorWhen::Never => {
            owo_colors::set_override(false);
        }
    }
}

/// Log to stderr so command output on stdout stays machine readable.
fn setup_logging(verbose: bool, color_when: ColorWhen) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    tracing_subscriber::fmt()
        .with_writer(stderr)
        .with_max_level(level)
        .with_ansi(!matches!(color_when, ColorWhen::Never))
        .with_target(false)
        .init();
}

fn main() -> miette::Result<()> {
    let cli = Cli::parse();
    setup_colors(cli.color);
    setup_logging(cli.verbose, cli.color);

    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .build(),
        )
    }))?;

    let result = match cli.command {
        Commands::Check(args) => run_check(args),
        Commands::Eval(args) => run_eval(args),
        Commands::Locales(args) => run_locales(args),
    };

    match result {
        Ok(code) => exit(code),
        Err(e) => {
            eprintln!("{:?}", e);
            exit(exitcode::DATAERR);
        }
    }
}
