// Licensed under the Apache-2.0 license

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::process::Command;

mod build;

#[derive(Parser)]
#[command(name = "xtask", version, about = "Developer tasks for the tee-host workspace")]
struct Xtask {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the tee-host crates
    Build {
        #[arg(short, long)]
        release: bool,
        /// Limit to these package(s)
        #[arg(short, long)]
        package: Vec<String>,
    },

    /// Run unit and integration tests
    Test {
        #[arg(short, long)]
        release: bool,
        #[arg(short, long)]
        package: Vec<String>,
        /// Only run tests whose name contains this filter
        filter: Option<String>,
    },

    /// Remove the cargo target directory
    Clean,

    /// Format the workspace, or only verify it with --check
    Fmt {
        #[arg(long)]
        check: bool,
    },

    /// Lint with clippy, warnings denied
    Clippy,

    /// Format check, clippy, build and tests
    Check {
        /// Skip the tests
        #[arg(long)]
        quick: bool,
    },
}

fn main() -> Result<()> {
    match Xtask::parse().command {
        Commands::Build { release, package } => build::run(release, &package),
        Commands::Test {
            release,
            package,
            filter,
        } => test::run(release, &package, filter.as_deref()),
        Commands::Clean => run_command("cargo clean", &mut cargo(&["clean"])),
        Commands::Fmt { check } => fmt(check),
        Commands::Clippy => clippy(),
        Commands::Check { quick } => {
            fmt(true)?;
            clippy()?;
            build::run(false, &[])?;
            if !quick {
                test::run(false, &[], None)?;
            }
            println!("✓ All checks passed!");
            Ok(())
        }
    }
}

/// `cargo` with the given leading arguments.
pub fn cargo(args: &[&str]) -> Command {
    let mut cmd = Command::new("cargo");
    cmd.args(args);
    cmd
}

pub fn run_command(name: &str, cmd: &mut Command) -> Result<()> {
    println!("Running: {}", name);
    let status = cmd
        .status()
        .with_context(|| format!("Failed to execute command: {}", name))?;
    anyhow::ensure!(status.success(), "Command failed: {}", name);
    println!("✓ {}", name);
    Ok(())
}

/// Add `-p` for each package, or `--workspace` when none is given.
pub fn select_packages(cmd: &mut Command, packages: &[String]) {
    if packages.is_empty() {
        cmd.arg("--workspace");
    }
    for package in packages {
        cmd.args(["-p", package]);
    }
}

fn fmt(check: bool) -> Result<()> {
    let mut cmd = cargo(&["fmt", "--all"]);
    if check {
        cmd.args(["--", "--check"]);
    }
    run_command("cargo fmt", &mut cmd)
}

fn clippy() -> Result<()> {
    let mut cmd = cargo(&["clippy", "--workspace", "--all-targets", "--", "-D", "warnings"]);
    run_command("cargo clippy", &mut cmd)
}
