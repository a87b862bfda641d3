// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Tatari, Inc.

//! Turnstile CLI entry point.

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt};

use turnstile::checks::identifiers::NameKind;
use turnstile::checks::{
    branch, buckets, constraints, docker, identifiers, imports, migrations, operators, spark,
};
use turnstile::cli::{Cli, Command};
use turnstile::error::ExitCode;
use turnstile::output::{self, Reporter};
use turnstile::Config;

fn init_logging() {
    let filter =
        EnvFilter::try_from_env("TURNSTILE_LOG").unwrap_or_else(|_| EnvFilter::new("off"));

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    init_logging();

    let exit_code = match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("turnstile: {}", e);
            ExitCode::Fail
        }
    };

    std::process::exit(exit_code as i32);
}

fn run() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let config = Config::load(cli.config.as_deref())?;
    let color = output::color_choice(cli.color, cli.no_color);
    let mut reporter = Reporter::new(cli.format, color);

    let code = match &cli.command {
        Command::DisallowedAttributes(args) => {
            identifiers::run_fixed(NameKind::Attribute, args, &config, &mut reporter)?
        }
        Command::DisallowedFunctionCalls(args) => {
            identifiers::run_fixed(NameKind::Function, args, &config, &mut reporter)?
        }
        Command::DisallowedIdentifiers(args) => {
            identifiers::run_identifiers(args, &config, &mut reporter)?
        }
        Command::ForbiddenImports(args) => imports::run_forbidden(args, &mut reporter)?,
        Command::NoBoto3InAirflowDags(args) => imports::run_boto3(args, &config, &mut reporter)?,
        Command::NoHardcodedBuckets(args) => buckets::run(args, &config, &mut reporter)?,
        Command::NoNonSparkBuckets(args) => spark::run(args, &config, &mut reporter)?,
        Command::ImageTagBranch(args) => operators::run(args, &config, &mut reporter)?,
        Command::GeneratedColumns(args) => migrations::run(args, &mut reporter)?,
        Command::DockerfilePoetry(args) => docker::run(args, &mut reporter)?,
        Command::AppConstraints(args) => constraints::run_app(args, &config, &mut reporter)?,
        Command::PkgConstraints(args) => constraints::run_pkg(args, &config, &mut reporter)?,
        Command::PoetryAppConstraints(args) => {
            constraints::run_poetry_app(args, &config, &mut reporter)?
        }
        Command::PoetryPkgConstraints(args) => {
            constraints::run_poetry_pkg(args, &config, &mut reporter)?
        }
        Command::PoetryPkgDepConstraints(args) => {
            constraints::run_poetry_pkg_dep(args, &config, &mut reporter)?
        }
        Command::ValidateBranchName => branch::run()?,
    };

    reporter.finish(code)?;
    Ok(code)
}
