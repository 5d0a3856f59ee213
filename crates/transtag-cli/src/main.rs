//! transtag CLI entry point.
//!
//! Provides command-line tools for translated templates:
//! - `transtag check` - Validate template tag syntax
//! - `transtag coverage` - Compare catalogs against a source language
//! - `transtag render` - Render a template against a catalog directory

mod commands;
mod output;

use std::io::stderr;
use std::process::exit;

use clap::{Parser, Subcommand, ValueEnum};
use commands::{CheckArgs, CoverageArgs, RenderArgs, run_check, run_coverage, run_render};
use tracing_subscriber::EnvFilter;

/// Template translation tools.
#[derive(Debug, Parser)]
#[command(name = "transtag")]
#[command(about = "Template translation tag tools", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Color output control
    #[arg(long, value_enum, default_value_t = ColorWhen::Auto, global = true)]
    pub color: ColorWhen,

    /// Enable verbose output
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
    /// Check template tag syntax
    Check(CheckArgs),
    /// Report translation coverage across languages
    Coverage(CoverageArgs),
    /// Render a template against a catalog directory
    Render(RenderArgs),
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

/// Log to stderr; `RUST_LOG` overrides the default level.
fn setup_logging(verbose: bool, color_when: ColorWhen) -> miette::Result<()> {
    let level = if verbose { "transtag=debug" } else { "transtag=warn" };
    let directive = level
        .parse()
        .map_err(|e| miette::miette!("invalid log directive '{level}': {e}"))?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(directive))
        .with_ansi(!matches!(color_when, ColorWhen::Never))
        .with_writer(stderr)
        .with_target(false)
        .init();
    Ok(())
}

fn main() -> miette::Result<()> {
    let cli = Cli::parse();
    setup_colors(cli.color);
    setup_logging(cli.verbose, cli.color)?;

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
        Commands::Coverage(args) => run_coverage(args),
        Commands::Render(args) => run_render(args),
    };

    match result {
        Ok(code) => exit(code),
        Err(e) => {
            eprintln!("{e:?}");
            exit(exitcode::SOFTWARE);
        }
    }
}
