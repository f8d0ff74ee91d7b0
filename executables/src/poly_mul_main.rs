#![cfg_attr(feature = "strict", deny(warnings))]
#![cfg_attr(feature = "strict", deny(clippy::all))]

use algorithms::dft::{multiply_polynomials, multiply_polynomials_mod};
use common::util::read_file_or_stdin;
use common::{logging, AlgoResult};
use executables::parse_coefficients;
use itertools::Itertools;
use std::path::PathBuf;
use structopt::StructOpt;

#[derive(StructOpt, Debug)]
struct Cli {
    #[structopt(
        short = "i",
        long = "input",
        parse(from_os_str),
        help = "File holding n, the n coefficients of a, m and the m coefficients of b. Read from stdin if omitted."
    )]
    input_path: Option<PathBuf>,
    #[structopt(
        long,
        help = "Multiply exactly in the prime field of the modular transform instead of over the complex numbers."
    )]
    modular: bool,
}

fn main() -> AlgoResult<()> {
    logging::init_logging();

    let args = Cli::from_args();

    let (a, b) = parse_coefficients(&read_file_or_stdin(args.input_path.as_deref())?)?;
    log::info!(
        "Multiplying polynomials with {} and {} coefficients",
        a.len(),
        b.len()
    );

    let product = if args.modular {
        multiply_polynomials_mod(&a, &b).iter().join(" ")
    } else {
        multiply_polynomials(&a, &b).iter().join(" ")
    };
    println!("Product: {}", product);

    Ok(())
}
