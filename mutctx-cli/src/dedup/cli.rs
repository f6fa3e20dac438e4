use std::path::PathBuf;

use clap::{Arg, ArgAction, Command, value_parser};

use crate::shared::{config_arg, output_dir_arg, report_arg};

pub const DEDUP_CMD: &str = "dedup";

pub fn create_dedup_cli() -> Command {
    Command::new(DEDUP_CMD)
        .about("Combine annotated tables, remove duplicate mutations and report per file.")
        .arg(output_dir_arg())
        .arg(report_arg())
        .arg(config_arg())
        .arg(
            Arg::new("annotated")
                .required(true)
                .num_args(1..)
                .action(ArgAction::Append)
                .value_parser(value_parser!(PathBuf))
                .help("Annotated CSV files written by `annotate`"),
        )
}
