//! Configuration of the `range_ops` binary.
use std::{path::Path, str::FromStr};

use common::{AlgoError, AlgoResult};
use serde::Deserialize;

/// The stock algebras a script can be run with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum AlgebraKind {
    /// Range sums, range additions.
    SumAdd,
    /// Range sums, range assignments.
    SumAssign,
    /// Range minima, range additions.
    MinAdd,
    /// Range maxima, range additions.
    MaxAdd,
}

impl Default for AlgebraKind {
    fn default() -> Self {
        AlgebraKind::SumAdd
    }
}

impl FromStr for AlgebraKind {
    type Err = AlgoError;

    fn from_str(name: &str) -> AlgoResult<Self> {
        match name {
            "sum_add" => Ok(AlgebraKind::SumAdd),
            "sum_assign" => Ok(AlgebraKind::SumAssign),
            "min_add" => Ok(AlgebraKind::MinAdd),
            "max_add" => Ok(AlgebraKind::MaxAdd),
            other => Err(format!(
                "unknown algebra {:?}, expected one of sum_add, sum_assign, min_add, max_add",
                other
            )
            .into()),
        }
    }
}

/// Settings for `range_ops` read from a dhall file.
/// ```text
/// { algebra = < SumAdd | SumAssign | MinAdd | MaxAdd >.MinAdd, echo_updates = True }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RangeOpsConfig {
    /// Which algebra to run the script with.
    pub algebra: AlgebraKind,
    /// Print updates next to the query results.
    pub echo_updates: bool,
}

impl RangeOpsConfig {
    /// Reads a config from the dhall file at `path`.
    pub fn from_file<P: AsRef<Path>>(path: P) -> AlgoResult<Self> {
        let config: RangeOpsConfig = serde_dhall::from_file(path).parse()?;
        Ok(config)
    }

    /// Parses a config from a dhall expression.
    pub fn from_dhall_str(source: &str) -> AlgoResult<Self> {
        let config: RangeOpsConfig = serde_dhall::from_str(source).parse()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn algebra_names_parse() {
        assert_eq!("min_add".parse::<AlgebraKind>().unwrap(), AlgebraKind::MinAdd);
        assert_eq!(
            "sum_assign".parse::<AlgebraKind>().unwrap(),
            AlgebraKind::SumAssign
        );
        assert!("product".parse::<AlgebraKind>().is_err());
    }

    #[test]
    fn config_parses_from_dhall() {
        let config = RangeOpsConfig::from_dhall_str(
            "{ algebra = < SumAdd | SumAssign | MinAdd | MaxAdd >.MaxAdd, echo_updates = True }",
        )
        .unwrap();
        assert_eq!(
            config,
            RangeOpsConfig {
                algebra: AlgebraKind::MaxAdd,
                echo_updates: true
            }
        );
    }

    #[test]
    fn default_config_sums() {
        let config = RangeOpsConfig::default();
        assert_eq!(config.algebra, AlgebraKind::SumAdd);
        assert!(!config.echo_updates);
    }
}
