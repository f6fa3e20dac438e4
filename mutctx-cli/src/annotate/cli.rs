use std::path::PathBuf;

use clap::{Arg, ArgAction, Command, value_parser};

use crate::shared::{config_arg, context_args, fasta_arg, output_dir_arg};

pub const ANNOTATE_CMD: &str = "annotate";

pub fn create_annotate_cli() -> Command {
    Command::new(ANNOTATE_CMD)
        .about("Annotate SNV call tables with reference context and flag A3A-like substitutions.")
        .arg(fasta_arg())
        .arg(output_dir_arg())
        .arg(config_arg())
        .args(context_args())
        .arg(
            Arg::new("calls")
                .required(true)
                .num_args(1..)
                .action(ArgAction::Append)
                .value_parser(value_parser!(PathBuf))
                .help("Variant call CSV files (plain or .gz)"),
        )
}
