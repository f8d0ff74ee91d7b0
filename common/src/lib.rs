#![cfg_attr(feature = "strict", deny(warnings))]
#![cfg_attr(feature = "strict", deny(clippy::all))]
#![cfg_attr(feature = "strict", deny(missing_docs))]

//! This crate contains everything which is shared between the algorithm, test and binary crates.

mod error;

pub use error::{AlgoError, AlgoResult};

mod traits;
pub use traits::*;

pub mod logging;
pub mod util;
