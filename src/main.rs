//! The `rogu` binary.
use clap::Parser;
use std::process::ExitCode;

use rogu::config::{Flags, flags};
use rogu::logging::{self, Logger};
use rogu::{cli, commands};

fn main() -> ExitCode {
    let _ = enable_ansi_support::enable_ansi_support();
    let args = cli::Cli::parse();
    let command = command_name(&args.command);
    if matches!(args.command, cli::Command::Completions(_) | cli::Command::Version) {
        return run(&args, Flags::new(), &Logger::new(command));
    }
    logging::init_subscriber(args.verbose, command);
    let log = Logger::new(command);
    let flags = Flags::new().with(flags::VERBOSE, args.verbose);
    run(&args, flags, &log)
}

fn run(args: &cli::Cli, flags: Flags, log: &Logger) -> ExitCode {
    let result = match &args.command {
        cli::Command::Sync(opts) => commands::sync::run(&args.global, opts, flags, log),
        cli::Command::Doctor(opts) => commands::doctor::run(&args.global, opts, flags, log),
        cli::Command::Uninstall(opts) => commands::uninstall::run(&args.global, opts, flags, log),
        cli::Command::List(opts) => commands::list::run(&args.global, opts, flags, log),
        cli::Command::Init(opts) => commands::init::run(&args.global, opts, flags, log),
        cli::Command::Boilerplate(opts) => {
            commands::boilerplate::run(&args.global, opts, flags, log)
        }
        cli::Command::Completions(opts) => {
            commands::completions::run(opts);
            Ok(())
        }
        cli::Command::Version => {
            commands::version::run();
            Ok(())
        }
    };
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log.error(&format!("{e:#}"));
            ExitCode::FAILURE
        }
    }
}

/// Name used for the per-command log file.
const fn command_name(command: &cli::Command) -> &'static str {
    match command {
        cli::Command::Sync(_) => "sync",
        cli::Command::Doctor(_) => "doctor",
        cli::Command::Uninstall(_) => "uninstall",
        cli::Command::List(_) => "list",
        cli::Command::Init(_) => "init",
        cli::Command::Boilerplate(_) => "boilerplate",
        cli::Command::Completions(_) => "completions",
        cli::Command::Version => "version",
    }
}
