mod cli;
mod config;
mod core;
mod form;

use anyhow::Result;
use clap::Parser;
use cli::{AssessArgs, Cli, Commands};
use form::prompt::Prompter;
use log::LevelFilter;
use std::io;

fn main() {
    let exit_code = match run() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err:#}");
            2
        }
    };

    std::process::exit(exit_code);
}

fn run() -> Result<i32> {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    match cli.command {
        Commands::Assess(args) => run_assess(args),
        Commands::Init => {
            let path = std::env::current_dir()?.join(config::CONFIG_FILE_NAME);
            config::write_default_config(&path)?;
            println!("created {}", path.display());
            Ok(0)
        }
        Commands::Advice { level } => {
            println!("{}", core::report::advice(level.into()));
            Ok(0)
        }
    }
}

fn init_logger(verbose: bool) {
    let default_level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    env_logger::Builder::new()
        .filter_level(default_level)
        .parse_default_env()
        .format_timestamp(None)
        .init();
}

fn run_assess(args: AssessArgs) -> Result<i32> {
    let cwd = std::env::current_dir()?;
    let cfg = config::load_config(args.config.as_deref(), &cwd)?;
    let answers = args.answers();

    let inputs = if args.no_input || !cfg.general.interactive {
        form::fill_from_defaults(&answers, &cfg.defaults)?
    } else {
        let stdin = io::stdin();
        // prompts go to stderr so `--json` output stays parseable
        let mut prompter = Prompter::new(stdin.lock(), io::stderr());
        form::fill_interactive(&answers, &cfg.defaults, &mut prompter)?
    };

    let assessment = core::assess(&inputs);
    log::debug!("highest risk level: {}", assessment.highest());
    let exit = core::report::evaluate_exit(&assessment, &cfg);

    if args.json || cfg.general.json {
        let json_report = core::report::JsonReport::new(&inputs, &assessment, &cfg, &exit);
        println!("{}", serde_json::to_string_pretty(&json_report)?);
    } else {
        core::report::print_human(&inputs, &assessment, &exit);
    }

    if exit.ok {
        Ok(0)
    } else {
        log::info!("fail_on={} tripped: {}", cfg.general.fail_on, exit.reason_line());
        Ok(1)
    }
}
