mod annotate;
mod dedup;
mod pipeline;
mod run;
mod shared;

use anyhow::Result;
use clap::{Arg, ArgAction, Command};

pub mod consts {
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");
    pub const PKG_NAME: &str = "mutctx";
    pub const BIN_NAME: &str = "mutctx";
}

fn build_parser() -> Command {
    Command::new(consts::BIN_NAME)
        .bin_name(consts::BIN_NAME)
        .version(consts::VERSION)
        .about("Annotate SNV calls with reference sequence context, flag APOBEC3A-like substitutions and deduplicate calls across batches.")
        .subcommand_required(true)
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::Count)
                .global(true)
                .help("Raise log verbosity (-v info, -vv debug); RUST_LOG overrides"),
        )
        .subcommand(annotate::cli::create_annotate_cli())
        .subcommand(dedup::cli::create_dedup_cli())
        .subcommand(run::cli::create_run_cli())
}

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_module_path(false)
        .init();
}

fn main() -> Result<()> {
    let app = build_parser();
    let matches = app.get_matches();

    init_logging(matches.get_count("verbose"));
    log::debug!("{} v{}", consts::PKG_NAME, consts::VERSION);

    match matches.subcommand() {
        //
        // ANNOTATE
        //
        Some((annotate::cli::ANNOTATE_CMD, matches)) => {
            annotate::handlers::run_annotate(matches)?;
        }

        //
        // DEDUP
        //
        Some((dedup::cli::DEDUP_CMD, matches)) => {
            dedup::handlers::run_dedup(matches)?;
        }

        //
        // WHOLE PIPELINE
        //
        Some((run::cli::RUN_CMD, matches)) => {
            run::handlers::run_pipeline(matches)?;
        }

        _ => unreachable!("Subcommand not found"),
    };

    Ok(())
}
