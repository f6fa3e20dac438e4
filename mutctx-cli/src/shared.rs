use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Arg, ArgAction, ArgMatches, arg, value_parser};

use mutctx_core::PipelineConfig;

pub fn fasta_arg() -> Arg {
    arg!(--fasta <FASTA>)
        .required(true)
        .value_parser(value_parser!(PathBuf))
        .help("Reference genome FASTA (plain or .gz)")
}

pub fn output_dir_arg() -> Arg {
    Arg::new("output-dir")
        .long("output-dir")
        .short('o')
        .required(true)
        .value_parser(value_parser!(PathBuf))
        .help("Directory for annotated and deduplicated tables")
}

pub fn config_arg() -> Arg {
    arg!(--config <CONFIG>)
        .required(false)
        .value_parser(value_parser!(PathBuf))
        .help("Pipeline configuration TOML (column names, filters, context)")
}

pub fn report_arg() -> Arg {
    arg!(--report <REPORT>)
        .required(false)
        .value_parser(value_parser!(PathBuf))
        .help("Also write the deduplication report as JSON")
}

pub fn context_args() -> [Arg; 3] {
    [
        arg!(--flank <FLANK>)
            .required(false)
            .value_parser(value_parser!(usize))
            .help("Bases to fetch on each side of a variant [default: 1]"),
        Arg::new("allow-partial-context")
            .long("allow-partial-context")
            .action(ArgAction::SetTrue)
            .help("Keep variants whose context is truncated at a contig edge"),
        arg!(--threads <THREADS>)
            .required(false)
            .value_parser(value_parser!(usize))
            .help("Worker threads for per-batch annotation [default: all cores]"),
    ]
}

pub fn get_path<'a>(matches: &'a ArgMatches, id: &str) -> Result<&'a Path> {
    matches
        .get_one::<PathBuf>(id)
        .map(PathBuf::as_path)
        .with_context(|| format!("--{} is required", id))
}

///
/// Build the pipeline configuration: the `--config` file if given,
/// defaults otherwise, then any command-line overrides on top.
///
pub fn load_config(matches: &ArgMatches) -> Result<PipelineConfig> {
    let mut config = match matches.get_one::<PathBuf>("config") {
        Some(path) => PipelineConfig::try_from(path.as_path())
            .with_context(|| format!("Failed to load config: {}", path.display()))?,
        None => PipelineConfig::default(),
    };

    // dedup has no context flags, hence try_get_one
    if let Ok(Some(&flank)) = matches.try_get_one::<usize>("flank") {
        config.context.flank = flank;
    }
    if let Ok(Some(&allow_partial)) = matches.try_get_one::<bool>("allow-partial-context") {
        if allow_partial {
            config.context.require_full_context = false;
        }
    }

    Ok(config)
}

pub fn get_threads(matches: &ArgMatches) -> Option<usize> {
    matches.get_one::<usize>("threads").copied()
}
