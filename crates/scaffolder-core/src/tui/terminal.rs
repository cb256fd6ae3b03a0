//! cliclack rendering of a scaffolding run

use crate::error::ScaffoldError;
use crate::pipeline::{ScaffoldOutcome, Scaffolder};
use crate::product::ProductConfig;
use crate::project::ScaffoldRequest;
use crate::report::Reporter;
use crate::runtime::check::{check_binaries, installed_packages};
use crate::runtime::network::SystemResolver;
use crate::runtime::process::SystemRunner;
use colored::Colorize;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// [`Reporter`] drawing cliclack log lines and spinners on stderr
#[derive(Default)]
pub struct TerminalReporter {
    spinner: Mutex<Option<cliclack::ProgressBar>>,
}

impl TerminalReporter {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Reporter for TerminalReporter {
    fn info(&self, message: &str) {
        let _ = cliclack::log::info(message);
    }

    fn warning(&self, message: &str) {
        let _ = cliclack::log::warning(message);
    }

    fn spinner_start(&self, message: &str) {
        let spinner = cliclack::spinner();
        spinner.start(message);
        if let Ok(mut slot) = self.spinner.lock() {
            *slot = Some(spinner);
        }
    }

    fn spinner_stop(&self, success: bool, message: &str) {
        let spinner = self.spinner.lock().ok().and_then(|mut slot| slot.take());
        match spinner {
            Some(spinner) if success => {
                spinner.stop(message);
            }
            Some(spinner) => {
                spinner.error(message);
            }
            None if success => {
                let _ = cliclack::log::success(message);
            }
            None => {
                let _ = cliclack::log::error(message);
            }
        }
    }
}

/// Scaffold `request` against the real system and render the result
pub async fn run<C: ProductConfig>(
    config: &C,
    request: &ScaffoldRequest,
) -> Result<ScaffoldOutcome, ScaffoldError> {
    let _ = cliclack::intro(config.display_name());

    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let reporter = TerminalReporter::new();
    let scaffolder = Scaffolder::new(config, &SystemRunner, &SystemResolver, &reporter);

    match scaffolder.run(request, &cwd).await {
        Ok(outcome) => {
            print_next_steps(&outcome, &cwd);
            Ok(outcome)
        }
        Err(err) => {
            print_failure(&err);
            let _ = cliclack::log::remark(format!(
                "If the problem persists, please file an issue: {}",
                config.issues_url()
            ));
            let _ = cliclack::outro_cancel("Project creation aborted");
            Err(err)
        }
    }
}

fn print_next_steps(outcome: &ScaffoldOutcome, cwd: &Path) {
    let _ = cliclack::log::success(format!(
        "Created {} at {}",
        outcome.paths.app_name,
        outcome.paths.root.display()
    ));

    let mut steps = Vec::new();
    if outcome.paths.root != cwd {
        steps.push(format!("cd {}", outcome.paths.root.display()));
    }
    steps.push(outcome.choice.manager.start_command().to_string());

    println!();
    println!("  Next steps");
    println!();
    for (i, step) in steps.iter().enumerate() {
        println!("  {}.  {}", i + 1, step.cyan());
    }
    println!();

    let _ = cliclack::outro("Happy hacking!");
}

/// Explain why a run aborted, naming the command to retry by hand when there is one
pub fn print_failure(err: &ScaffoldError) {
    let message = match err {
        ScaffoldError::WorkingDirectoryMismatch { expected, reported } => {
            let mut text = format!(
                "{}\n\n{} {}\n{} {}\n\n{}",
                "Could not start an npm process in the right directory.".red(),
                "The current directory is:".red(),
                expected.display().to_string().bold(),
                "However, a newly started npm process runs in:".red(),
                reported.display().to_string().bold(),
                "This is probably caused by a misconfigured system terminal shell.".red()
            );
            if cfg!(windows) {
                text.push_str(&windows_autorun_hint());
            }
            text
        }
        ScaffoldError::CloneFailed { command, exit_code } => format!(
            "{}\n  {} exited with code {}",
            "Cloning the template failed, please check your network.".red(),
            command.cyan(),
            exit_code
        ),
        ScaffoldError::InstallFailed { command, exit_code } => format!(
            "{}\n  {} has failed (exit code {}).",
            "Aborting installation.".red(),
            command.cyan(),
            exit_code
        ),
        ScaffoldError::Manifest { path, reason } => format!(
            "{} {}\n  {}",
            "The template's package.json is missing or malformed:".red(),
            path.display().to_string().bold(),
            reason
        ),
        other => other.to_string().red().to_string(),
    };

    let _ = cliclack::log::error(message);
}

/// Registry fix for a `cmd.exe` AutoRun script that changes directory
fn windows_autorun_hint() -> String {
    format!(
        "\n\n{}\n\n  {} delete \"HKCU\\Software\\Microsoft\\Command Processor\" /v AutoRun /f\n  \
         {} delete \"HKLM\\Software\\Microsoft\\Command Processor\" /v AutoRun /f\n\n{}\n{}",
        "On Windows, this can usually be fixed by running:".red(),
        "reg".cyan(),
        "reg".cyan(),
        "Try to run the above two lines in the terminal.".red(),
        format!("To learn more about this problem, read: {}", AUTORUN_ARTICLE).red()
    )
}

const AUTORUN_ARTICLE: &str =
    "https://blogs.msdn.microsoft.com/oldnewthing/20071121-00/?p=24433/";

/// Print the environment report shown by `--info`
pub fn print_info<C: ProductConfig>(config: &C) -> std::io::Result<()> {
    let cwd = std::env::current_dir()?;

    println!();
    println!("{}", "Environment Info:".bold());
    println!();
    println!("  {}", "System:".cyan());
    println!(
        "    OS: {} {}",
        std::env::consts::OS,
        std::env::consts::ARCH
    );

    println!("  {}", "Binaries:".cyan());
    for info in check_binaries(&SystemRunner) {
        println!("    {}: {}", info.name, info.version_or_missing());
    }

    let packages = config.info_packages();
    if !packages.is_empty() {
        println!("  {}", "npmPackages:".cyan());
        for (package, version) in installed_packages(&cwd, packages) {
            println!(
                "    {}: {}",
                package,
                version.as_deref().unwrap_or("Not Found")
            );
        }
    }
    println!();

    Ok(())
}
