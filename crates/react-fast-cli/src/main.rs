//! react-fast-cli - Scaffold a react + redux + antd project from the template repository

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use scaffolder_core::{ProductConfig, ScaffoldRequest};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Program name shown in usage messages
const BIN_NAME: &str = "react-fast-cli";

const ISSUES_URL: &str = "https://github.com/react-fast-cli/react-fast-cli/issues/new";

/// react-fast-cli product configuration
#[derive(Clone)]
pub struct ReactFastConfig;

impl ProductConfig for ReactFastConfig {
    fn name(&self) -> &'static str {
        BIN_NAME
    }

    fn display_name(&self) -> &'static str {
        "react + redux + antd"
    }

    fn default_template_repository(&self) -> &'static str {
        "https://github.com/react-fast-cli/react-fast-template.git"
    }

    fn template_repository_env(&self) -> &'static str {
        "REACT_FAST_CLI_TEMPLATE_REPOSITORY"
    }

    fn issues_url(&self) -> &'static str {
        ISSUES_URL
    }

    fn info_packages(&self) -> &'static [&'static str] {
        &["react", "react-dom", "antd"]
    }
}

#[derive(Parser, Debug)]
#[command(name = BIN_NAME)]
#[command(about = "Create a new react + redux + antd project")]
#[command(version)]
#[command(override_usage = "react-fast-cli <project-directory> [options]")]
#[command(after_help = concat!(
    "Only <project-directory> is required.\n\n",
    "If you have any problems, do not hesitate to file an issue:\n",
    "  https://github.com/react-fast-cli/react-fast-cli/issues/new"
))]
#[command(args_override_self = true)]
pub struct Args {
    /// Directory to create the project in
    #[arg(value_name = "project-directory")]
    pub project_directory: Option<String>,

    /// Print additional logs
    #[arg(long)]
    pub verbose: bool,

    /// Print environment debug info
    #[arg(long)]
    pub info: bool,

    /// Install dependencies with npm even when yarn is available
    #[arg(long = "use-npm")]
    pub use_npm: bool,

    /// Positionals after the project directory are accepted and unused
    #[arg(hide = true)]
    pub extra_args: Vec<String>,
}

/// Long options [`Args`] understands, help and version included
const KNOWN_LONG: &[&str] = &["verbose", "info", "use-npm", "help", "version"];

/// Short options [`Args`] understands
const KNOWN_SHORT: &[char] = &['h', 'V'];

/// Drop options `Args` does not know so the rest of the line still parses.
///
/// Only the unknown token itself goes; a following value stays a positional.
/// Everything after `--` is passed through untouched.
fn known_args<I>(args: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let mut kept = Vec::new();
    let mut rest_literal = false;

    for (i, arg) in args.into_iter().enumerate() {
        if i == 0 || rest_literal {
            kept.push(arg);
            continue;
        }

        let known = if arg == "--" {
            rest_literal = true;
            true
        } else if let Some(long) = arg.strip_prefix("--") {
            let name = long.split('=').next().unwrap_or(long);
            KNOWN_LONG.contains(&name)
        } else if let Some(shorts) = arg.strip_prefix('-').filter(|s| !s.is_empty()) {
            shorts.chars().all(|c| KNOWN_SHORT.contains(&c))
        } else {
            true
        };

        if known {
            kept.push(arg);
        }
    }

    kept
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "warn,scaffolder_core=debug,react_fast_cli=debug"
    } else {
        "warn"
    };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .init();
}

fn print_usage_error() {
    eprintln!("Please specify the project directory:");
    eprintln!("  {} {}", BIN_NAME.cyan(), "<project-directory>".green());
    eprintln!();
    eprintln!("For example:");
    eprintln!("  {} {}", BIN_NAME.cyan(), "test-react-app".green());
    eprintln!();
    eprintln!("Run {} to see all options.", format!("{} --help", BIN_NAME).cyan());
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    // Ensure terminal cursor is restored on panic
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = console::Term::stderr().show_cursor();
        default_panic(info);
    }));

    // Handle Ctrl+C gracefully
    ctrlc::set_handler(move || {
        let _ = console::Term::stderr().show_cursor();
        std::process::exit(130);
    })
    .ok();

    let args = Args::parse_from(known_args(std::env::args()));
    init_tracing(args.verbose);
    let config = ReactFastConfig;

    if args.info {
        scaffolder_core::tui::print_info(&config).context("Failed to collect environment info")?;
        return Ok(ExitCode::SUCCESS);
    }

    let request = match args
        .project_directory
        .map(|dir| ScaffoldRequest::new(dir, args.use_npm, args.verbose))
    {
        Some(Ok(request)) => request,
        _ => {
            print_usage_error();
            return Ok(ExitCode::from(1));
        }
    };
    tracing::debug!(?request, template = %config.template_repository(), "starting");

    let result = scaffolder_core::run(&config, &request).await;

    // Ensure cursor is visible on normal exit
    let _ = console::Term::stderr().show_cursor();

    Ok(match result {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => ExitCode::from(err.exit_code()),
    })
}
