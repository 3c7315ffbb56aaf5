use std::env;
use std::fmt::{self, Write as _};
use std::process::ExitCode;

use colored::Colorize;
use gitter_sdk::{Commit, FileDiff, Repository, ValidationReport, WorkdirStatus};

use crate::cli::*;

pub fn run_command(cli: Cli) -> anyhow::Result<ExitCode> {
    match cli.command {
        Command::Init(args) => cmd_init(args),
        Command::Add(args) => cmd_add(args),
        Command::Commit(args) => cmd_commit(args),
        Command::Status(_) => cmd_status(),
        Command::Diff(args) => cmd_diff(args),
        Command::Log(_) => cmd_log(),
        Command::Verify(_) => cmd_verify(),
    }
}

fn discover() -> anyhow::Result<Repository> {
    Ok(Repository::discover(env::current_dir()?)?)
}

fn cmd_init(args: InitArgs) -> anyhow::Result<ExitCode> {
    let path = args.path.unwrap_or_else(|| ".".into());
    let repo = Repository::init(&path)?;
    println!(
        "Initialized empty Gitter repository in {}/",
        repo.git_dir().display()
    );
    Ok(ExitCode::SUCCESS)
}

fn cmd_add(args: AddArgs) -> anyhow::Result<ExitCode> {
    let repo = discover()?;
    let report = repo.add(&args.paths)?;
    for (path, err) in &report.failed {
        eprintln!("{} {path}: {err}", "error adding".red());
    }
    Ok(if report.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn cmd_commit(args: CommitArgs) -> anyhow::Result<ExitCode> {
    let repo = discover()?;
    let result = repo.commit(&args.message, args.all)?;
    println!("{}", result.summary_line()?);
    Ok(ExitCode::SUCCESS)
}

fn cmd_status() -> anyhow::Result<ExitCode> {
    let repo = discover()?;
    print!("{}", render_status(&repo.status()?)?);
    Ok(ExitCode::SUCCESS)
}

fn cmd_diff(args: DiffArgs) -> anyhow::Result<ExitCode> {
    let repo = discover()?;
    let diffs = repo.diff(args.path.as_deref())?;
    print!("{}", render_diffs(&diffs)?);
    Ok(ExitCode::SUCCESS)
}

fn cmd_log() -> anyhow::Result<ExitCode> {
    let repo = discover()?;
    print!("{}", render_log(&repo.log()?)?);
    Ok(ExitCode::SUCCESS)
}

fn cmd_verify() -> anyhow::Result<ExitCode> {
    let repo = discover()?;
    let report = repo.verify()?;
    print!("{}", render_verify(&report)?);
    Ok(if report.is_valid() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

fn render_status(status: &WorkdirStatus) -> Result<String, fmt::Error> {
    if status.is_clean() {
        return Ok("nothing to commit, working tree clean\n".into());
    }

    let mut out = String::new();
    if !status.staged.is_empty() {
        out.push_str("Changes to be committed:\n");
        for path in &status.staged {
            writeln!(out, "  {} {}", "modified:".green(), path.green())?;
        }
        out.push('\n');
    }
    if !status.not_staged.is_empty() {
        out.push_str("Changes not staged for commit:\n");
        for path in &status.not_staged {
            writeln!(out, "  {} {}", "modified:".red(), path.red())?;
        }
        out.push('\n');
    }
    if !status.untracked.is_empty() {
        out.push_str("Untracked files:\n");
        for path in &status.untracked {
            writeln!(out, "  {}", path.red())?;
        }
    }
    Ok(out)
}

fn render_diffs(diffs: &[FileDiff]) -> Result<String, fmt::Error> {
    let mut out = String::new();
    for diff in diffs {
        for line in diff.to_string().lines() {
            let painted = if line.starts_with("---") || line.starts_with("+++") {
                line.bold()
            } else if line.starts_with("@@") {
                line.cyan()
            } else if line.starts_with('+') {
                line.green()
            } else if line.starts_with('-') {
                line.red()
            } else {
                line.normal()
            };
            writeln!(out, "{painted}")?;
        }
    }
    Ok(out)
}

fn render_log(commits: &[Commit]) -> anyhow::Result<String> {
    if commits.is_empty() {
        return Ok("No commits yet\n".into());
    }

    let mut out = String::new();
    for commit in commits {
        writeln!(out, "{}", format!("commit {}", commit.id()?).yellow())?;
        writeln!(out, "Author: {}", commit.author)?;
        writeln!(out, "Date: {}", commit.display_date())?;
        writeln!(out)?;
        writeln!(out, "    {}", commit.message)?;
        writeln!(out)?;
    }
    Ok(out)
}

fn render_verify(report: &ValidationReport) -> Result<String, fmt::Error> {
    let mut out = String::new();
    if report.is_valid() {
        writeln!(
            out,
            "{} History verified: {} commits",
            "✓".green().bold(),
            report.commit_count
        )?;
        return Ok(out);
    }

    writeln!(
        out,
        "{} {} problem(s) in {} commits",
        "✗".red().bold(),
        report.violations.len(),
        report.commit_count
    )?;
    for violation in &report.violations {
        writeln!(
            out,
            "  {} {:?}: {}",
            violation.commit.short_hex().yellow(),
            violation.kind,
            violation.description
        )?;
    }
    Ok(out)
}
