#![cfg_attr(feature = "strict", deny(warnings))]
#![cfg_attr(feature = "strict", deny(clippy::all))]

use common::util::{read_file_or_stdin, write_serializable_to_json};
use common::{logging, AlgoError, AlgoResult};
use executables::config::{AlgebraKind, RangeOpsConfig};
use executables::script::{run_script_with, Operation, Script};
use std::path::PathBuf;
use structopt::StructOpt;

#[derive(StructOpt, Debug)]
struct Cli {
    #[structopt(
        short = "i",
        long = "input",
        parse(from_os_str),
        help = "Script to run. Read from stdin if omitted."
    )]
    input_path: Option<PathBuf>,
    #[structopt(
        short = "o",
        long = "output",
        parse(from_os_str),
        help = "Also write all query results as JSON to this file."
    )]
    output_path: Option<PathBuf>,
    #[structopt(long = "config", parse(from_os_str))]
    config_path: Option<PathBuf>,
    #[structopt(
        short = "a",
        long,
        help = "One of sum_add, sum_assign, min_add, max_add. Overrides the config."
    )]
    algebra: Option<AlgebraKind>,
}

fn main() -> AlgoResult<()> {
    logging::init_logging();

    let args = Cli::from_args();

    let mut config = match &args.config_path {
        Some(path) => RangeOpsConfig::from_file(path)
            .map_err(AlgoError::rethrow_with("reading the config failed"))?,
        None => RangeOpsConfig::default(),
    };
    if let Some(algebra) = args.algebra {
        config.algebra = algebra;
    }
    log::info!("Running script with {:?}", config);

    let script: Script = read_file_or_stdin(args.input_path.as_deref())?.parse()?;
    let records = run_script_with(config.algebra, &script)?;

    let mut records_iter = records.iter();
    for (line, operation) in &script.operations {
        match operation {
            Operation::Query(range) => {
                if let Some(record) = records_iter.next() {
                    match record.result {
                        Some(result) => println!("{:?}: {}", range, result),
                        None => println!("{:?}: -", range),
                    }
                }
            }
            Operation::Update(range, modification) if config.echo_updates => {
                println!("{:?} <- {} (line {})", range, modification, line);
            }
            Operation::Update(..) => {}
        }
    }

    if let Some(path) = &args.output_path {
        write_serializable_to_json(&records, path)?;
        log::info!("Wrote {} query results to {}", records.len(), path.display());
    }

    Ok(())
}
