use anyhow::Result;
use clap::{CommandFactory, Parser};
use clap_complete::{Generator, generate};
use diffcheck::cli::{CheckArgs, Cli, Commands};
use diffcheck::config::Config;
use diffcheck::output::{self, Verbosity};
use diffcheck::producers::{CountLines, ExecProducer, RoutesProducer};
use diffcheck::{ContentProducer, Runner};
use std::io::{self, IsTerminal, Write};
use std::path::Path;
use std::process;
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();

    init_tracing(cli.verbose);
    output::set_verbosity(Verbosity::from_flags(cli.quiet, cli.verbose));
    if cli.no_color {
        colored::control::set_override(false);
    }

    let code = match run(cli) {
        Ok(code) => code,
        Err(e) => {
            output::error(&format!("{e:#}"));
            1
        }
    };

    let _ = io::stdout().flush();
    process::exit(code);
}

/// Logs go to stderr; `RUST_LOG` wins over `--verbose`.
fn init_tracing(verbose: bool) {
    let fallback = if verbose { "diffcheck=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> Result<i32> {
    let Cli {
        command, config, ..
    } = cli;
    let config_path = config.as_deref();

    match command {
        Commands::CountLines { lines, check } => {
            execute(config_path, &check, &mut CountLines::new(lines))
        }
        Commands::Exec { shell, argv, check } => {
            let mut producer = match shell {
                Some(cmd) => ExecProducer::from_command_line(&cmd)?,
                None => ExecProducer::new(argv)?,
            };
            execute(config_path, &check, &mut producer)
        }
        Commands::Routes { manifest, check } => {
            execute(config_path, &check, &mut RoutesProducer::new(manifest))
        }
        Commands::Completion { shell } => {
            print_completions(shell, &mut Cli::command());
            Ok(0)
        }
    }
}

fn execute(
    config_path: Option<&Path>,
    args: &CheckArgs,
    producer: &mut dyn ContentProducer,
) -> Result<i32> {
    if let Some(path) = Config::locate(config_path) {
        output::verbose(&format!("Using configuration from {}", path.display()));
    }
    let config = Config::resolve(config_path)?;
    let options = args
        .to_run_options(&config)
        .restrict_color_to_terminal(io::stderr().is_terminal());
    let check = options.check;

    let outcome = {
        let mut out = io::stdout().lock();
        let mut err = io::stderr().lock();
        let mut runner = Runner::new(options, &mut out, &mut err);
        runner.run(producer)?
    };

    if outcome.differs() && !check {
        output::info("Content differs from the input file; pass --check to fail on it.");
    }

    Ok(outcome.exit_code)
}

fn print_completions<G: Generator>(g: G, cmd: &mut clap::Command) {
    generate(g, cmd, cmd.get_name().to_string(), &mut io::stdout());
}
