//! Parsing and running of range operation scripts.
//!
//! A script consists of one command per line. Empty lines and lines starting with `#` are ignored.
//! The first command builds the tree, every following one queries or updates it.
//! ```text
//! values 2 1 3 7     # positions hold 2, 1, 3 and 7
//! fill 8 5           # 8 positions holding 5
//! empty 8            # 8 positions holding the neutral value
//! query 0 4          # combine positions 0..4
//! update 1 3 10      # modify positions 1..3 with 10
//! ```

use std::{ops::Range, str::FromStr};

use algorithms::segment_tree::{
    algebras::{MaxAdd, MinAdd, SumAdd, SumAssign, SumCount},
    LazySegmentTree,
};
use common::{AlgoError, AlgoResult, LazyAlgebra};
use serde::Serialize;

use crate::config::AlgebraKind;

/// How the tree of a script gets built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Build {
    /// One position per value.
    Values(Vec<i64>),
    /// `len` positions all holding `value`.
    Fill {
        /// Number of positions.
        len: usize,
        /// The value of every position.
        value: i64,
    },
    /// `len` positions holding the neutral value.
    Empty(usize),
}

/// A query or update of a script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    /// Combine all values in the range.
    Query(Range<usize>),
    /// Modify all values in the range.
    Update(Range<usize>, i64),
}

/// A parsed script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Script {
    /// How to build the tree.
    pub build: Build,
    /// The operations together with the (1-based) line they were read from.
    pub operations: Vec<(usize, Operation)>,
}

/// The result of a single query of a script.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueryRecord {
    /// The (1-based) line of the query.
    pub line: usize,
    /// The queried range as given, before clamping.
    pub start: usize,
    /// The end of the queried range as given, before clamping.
    pub end: usize,
    /// The rendered result, `None` if the algebra has nothing to show for an empty range.
    pub result: Option<i64>,
}

fn parse_number<T: FromStr>(line: usize, token: &str) -> AlgoResult<T>
where
    AlgoError: From<T::Err>,
{
    token.parse::<T>().map_err(|err| {
        AlgoError::RethrowAlgoError(
            format!("line {}: invalid number {:?}", line, token),
            Box::new(AlgoError::from(err)),
        )
    })
}

fn expect_arguments(line: usize, command: &str, arguments: &[&str], count: usize) -> AlgoResult<()> {
    if arguments.len() == count {
        Ok(())
    } else {
        Err(format!(
            "line {}: {} expects {} arguments, got {}",
            line,
            command,
            count,
            arguments.len()
        )
        .into())
    }
}

fn parse_build(line: usize, command: &str, arguments: &[&str]) -> AlgoResult<Build> {
    match command {
        "values" => Ok(Build::Values(
            arguments
                .iter()
                .map(|token| parse_number(line, token))
                .collect::<AlgoResult<_>>()?,
        )),
        "fill" => {
            expect_arguments(line, command, arguments, 2)?;
            Ok(Build::Fill {
                len: parse_number(line, arguments[0])?,
                value: parse_number(line, arguments[1])?,
            })
        }
        "empty" => {
            expect_arguments(line, command, arguments, 1)?;
            Ok(Build::Empty(parse_number(line, arguments[0])?))
        }
        other => Err(format!(
            "line {}: expected one of values, fill, empty to build the tree, got {:?}",
            line, other
        )
        .into()),
    }
}

fn parse_operation(line: usize, command: &str, arguments: &[&str]) -> AlgoResult<Operation> {
    match command {
        "query" => {
            expect_arguments(line, command, arguments, 2)?;
            let start = parse_number(line, arguments[0])?;
            let end = parse_number(line, arguments[1])?;
            Ok(Operation::Query(start..end))
        }
        "update" => {
            expect_arguments(line, command, arguments, 3)?;
            let start = parse_number(line, arguments[0])?;
            let end = parse_number(line, arguments[1])?;
            Ok(Operation::Update(start..end, parse_number(line, arguments[2])?))
        }
        other => Err(format!("line {}: expected query or update, got {:?}", line, other).into()),
    }
}

impl FromStr for Script {
    type Err = AlgoError;

    fn from_str(source: &str) -> AlgoResult<Self> {
        let mut build = None;
        let mut operations = Vec::new();

        for (index, raw_line) in source.lines().enumerate() {
            let line = index + 1;
            let content = raw_line.split('#').next().unwrap_or("").trim();
            if content.is_empty() {
                continue;
            }
            let tokens: Vec<&str> = content.split_whitespace().collect();
            let (command, arguments) = (tokens[0], &tokens[1..]);

            if build.is_none() {
                build = Some(parse_build(line, command, arguments)?);
            } else {
                operations.push((line, parse_operation(line, command, arguments)?));
            }
        }

        match build {
            Some(build) => Ok(Script { build, operations }),
            None => Err("script is empty, it has to build a tree first".into()),
        }
    }
}

/// An algebra that can be driven by a script, which only knows about integers.
pub trait ScriptAlgebra: LazyAlgebra {
    /// The value of a single position holding `value`.
    fn value_from(value: i64) -> Self::Value;
    /// The modification a script means by `modification`.
    fn modification_from(modification: i64) -> Self::Modification;
    /// Converts an aggregate for output.
    fn render(value: &Self::Value) -> Option<i64>;
}

impl ScriptAlgebra for SumAdd {
    fn value_from(value: i64) -> SumCount {
        SumCount::single(value)
    }
    fn modification_from(modification: i64) -> i64 {
        modification
    }
    fn render(value: &SumCount) -> Option<i64> {
        Some(value.sum)
    }
}

impl ScriptAlgebra for SumAssign {
    fn value_from(value: i64) -> SumCount {
        SumCount::single(value)
    }
    fn modification_from(modification: i64) -> Option<i64> {
        Some(modification)
    }
    fn render(value: &SumCount) -> Option<i64> {
        Some(value.sum)
    }
}

impl ScriptAlgebra for MinAdd {
    fn value_from(value: i64) -> Option<i64> {
        Some(value)
    }
    fn modification_from(modification: i64) -> i64 {
        modification
    }
    fn render(value: &Option<i64>) -> Option<i64> {
        *value
    }
}

impl ScriptAlgebra for MaxAdd {
    fn value_from(value: i64) -> Option<i64> {
        Some(value)
    }
    fn modification_from(modification: i64) -> i64 {
        modification
    }
    fn render(value: &Option<i64>) -> Option<i64> {
        *value
    }
}

fn build_tree<A: ScriptAlgebra>(build: &Build) -> AlgoResult<LazySegmentTree<A>> {
    match build {
        Build::Values(values) => {
            LazySegmentTree::from_exact_iter(values.iter().map(|&value| A::value_from(value)))
        }
        Build::Fill { len, value } => Ok(LazySegmentTree::with_value(*len, A::value_from(*value))),
        Build::Empty(len) => Ok(LazySegmentTree::with_len(*len)),
    }
}

/// Runs `script` with the algebra `A` and gives the results of all queries in order.
pub fn run_script<A: ScriptAlgebra>(script: &Script) -> AlgoResult<Vec<QueryRecord>> {
    let mut tree = build_tree::<A>(&script.build)
        .map_err(AlgoError::rethrow_with("building the tree failed"))?;
    log::info!("Built tree with {} positions", tree.len());

    let mut records = Vec::new();
    for (line, operation) in &script.operations {
        match operation {
            Operation::Query(range) => {
                let result = A::render(&tree.query(range.clone()));
                log::debug!("line {}: query {:?} = {:?}", line, range, result);
                records.push(QueryRecord {
                    line: *line,
                    start: range.start,
                    end: range.end,
                    result,
                });
            }
            Operation::Update(range, modification) => {
                log::debug!("line {}: update {:?} with {}", line, range, modification);
                tree.update(range.clone(), &A::modification_from(*modification));
            }
        }
    }
    Ok(records)
}

/// Like [run_script], but picks the algebra at runtime.
pub fn run_script_with(kind: AlgebraKind, script: &Script) -> AlgoResult<Vec<QueryRecord>> {
    match kind {
        AlgebraKind::SumAdd => run_script::<SumAdd>(script),
        AlgebraKind::SumAssign => run_script::<SumAssign>(script),
        AlgebraKind::MinAdd => run_script::<MinAdd>(script),
        AlgebraKind::MaxAdd => run_script::<MaxAdd>(script),
    }
}
