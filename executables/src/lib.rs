#![cfg_attr(feature = "strict", deny(warnings))]
#![cfg_attr(feature = "strict", deny(clippy::all))]
#![cfg_attr(feature = "strict", deny(missing_docs))]

//! This crate contains helper functions that are used exclusively in defining binaries, that is
//! main functions.
use common::{AlgoError, AlgoResult};

pub mod config;
pub mod script;

fn next_number<'a, I>(tokens: &mut I, what: &str) -> AlgoResult<i64>
where
    I: Iterator<Item = &'a str>,
{
    let token = tokens
        .next()
        .ok_or_else(|| AlgoError::from(format!("input ended before {}", what)))?;
    token.parse().map_err(|err| {
        AlgoError::RethrowAlgoError(
            format!("invalid {}: {:?}", what, token),
            Box::new(AlgoError::from(err)),
        )
    })
}

fn next_count<'a, I>(tokens: &mut I, what: &str) -> AlgoResult<usize>
where
    I: Iterator<Item = &'a str>,
{
    let count = next_number(tokens, what)?;
    if count < 0 {
        return Err(format!("{} must not be negative, got {}", what, count).into());
    }
    Ok(count as usize)
}

/// Reads two polynomials given as `n a_0 .. a_{n-1} m b_0 .. b_{m-1}`, separated by whitespace.
/// Coefficients start with the constant one.
/// # Returns
/// - An `Err` if a number is malformed, a count is negative or the input ends too early.
///   Anything after the second polynomial is ignored.
pub fn parse_coefficients(input: &str) -> AlgoResult<(Vec<i64>, Vec<i64>)> {
    let mut tokens = input.split_whitespace();
    let mut polynomial = |name: &str| -> AlgoResult<Vec<i64>> {
        let len = next_count(&mut tokens, &format!("the degree bound of {}", name))?;
        (0..len)
            .map(|i| next_number(&mut tokens, &format!("coefficient {} of {}", i, name)))
            .collect()
    };
    let a = polynomial("a")?;
    let b = polynomial("b")?;
    Ok((a, b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coefficients_parse_across_lines() {
        let (a, b) = parse_coefficients("3\n1 2 3\n2\n4 5\n").unwrap();
        assert_eq!(a, vec![1, 2, 3]);
        assert_eq!(b, vec![4, 5]);
    }

    #[test]
    fn empty_polynomials_are_allowed() {
        let (a, b) = parse_coefficients("0 1 -7").unwrap();
        assert!(a.is_empty());
        assert_eq!(b, vec![-7]);
    }

    #[test]
    fn malformed_coefficients_are_rejected() {
        assert!(parse_coefficients("").is_err());
        assert!(parse_coefficients("2 1").is_err());
        assert!(parse_coefficients("-1 2").is_err());
        assert!(parse_coefficients("1 x 1 1").is_err());
        assert!(parse_coefficients("1 2 2 3").is_err());
    }
}
