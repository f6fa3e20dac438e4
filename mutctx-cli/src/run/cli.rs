use std::path::PathBuf;

use clap::{Arg, Command, value_parser};

use crate::shared::{config_arg, context_args, fasta_arg, output_dir_arg, report_arg};

pub const RUN_CMD: &str = "run";

pub fn create_run_cli() -> Command {
    Command::new(RUN_CMD)
        .about("Annotate every call table in a directory, then deduplicate across them.")
        .arg(fasta_arg())
        .arg(
            Arg::new("input-dir")
                .long("input-dir")
                .short('i')
                .required(true)
                .value_parser(value_parser!(PathBuf))
                .help("Directory of variant call CSV files (.csv or .csv.gz)"),
        )
        .arg(output_dir_arg())
        .arg(report_arg())
        .arg(config_arg())
        .args(context_args())
}
