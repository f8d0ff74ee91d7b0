use std::{error::Error, fmt::Display};

/// This type gets used to be our catch all error.
/// We implement conversions for all Library errors to ease error management.
#[derive(Debug)]
pub enum AlgoError {
    /// Allows a generic Error message.
    StringAlgoError(String),
    /// Anticipated errors, may be rethrown with an additional error message
    RethrowAlgoError(String, Box<dyn Error>),
    /// A datastructure was built from a sequence whose length differs from the declared one.
    LengthMismatch {
        /// The length the caller declared.
        expected: usize,
        /// The number of elements the sequence actually yielded.
        /// Sequences which are too long are only read up to `expected + 1`.
        actual: usize,
    },
    /// All other library Errors get converted to this error.
    OtherAlgoError(Box<dyn Error>),
}

/// This type is our goto Result, as it allows us to convert between many different errors.
pub type AlgoResult<O> = Result<O, AlgoError>;

impl Display for AlgoError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AlgoError::StringAlgoError(str) => str.fmt(f),
            AlgoError::RethrowAlgoError(str, err) => {
                str.fmt(f)?;
                " with: ".fmt(f)?;
                err.fmt(f)?;
                Ok(())
            }
            AlgoError::LengthMismatch { expected, actual } if actual > expected => write!(
                f,
                "Sequence yielded more than the declared {} elements",
                expected
            ),
            AlgoError::LengthMismatch { expected, actual } => write!(
                f,
                "Sequence yielded {} elements, but a length of {} was declared",
                actual, expected
            ),
            AlgoError::OtherAlgoError(err) => err.fmt(f),
        }
    }
}
impl Error for AlgoError {}

impl AlgoError {
    /// Allows to annotate an AlgoError with a message to better detect the origin of errors.
    /// # Usage
    /// ```
    /// # use common::{AlgoError, AlgoResult};
    /// # fn fallible_function() -> AlgoResult<()> {
    /// # Err(AlgoError::StringAlgoError("".into()))
    /// # }
    /// # fn container_function() -> AlgoResult<()> {
    /// fallible_function().map_err(AlgoError::rethrow_with("function failed"))?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn rethrow_with(str: &'static str) -> impl Fn(AlgoError) -> AlgoError {
        move |err| AlgoError::RethrowAlgoError(str.to_string(), Box::new(err))
    }
}

macro_rules! implement_from {
    ($type:ty) => {
        impl From<$type> for AlgoError {
            fn from(other: $type) -> Self {
                AlgoError::OtherAlgoError(Box::from(other))
            }
        }
    };
}
implement_from!(std::io::Error);
implement_from!(std::num::ParseIntError);
implement_from!(serde_json::Error);
implement_from!(serde_dhall::Error);

impl<'a> From<&'a str> for AlgoError {
    fn from(other: &'a str) -> Self {
        AlgoError::StringAlgoError(other.to_string())
    }
}
impl From<String> for AlgoError {
    fn from(other: String) -> Self {
        AlgoError::StringAlgoError(other)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn length_mismatch_names_both_lengths() {
        let message = AlgoError::LengthMismatch {
            expected: 4,
            actual: 3,
        }
        .to_string();
        assert!(message.contains('4'));
        assert!(message.contains('3'));
    }

    #[test]
    fn length_mismatch_of_too_long_sequence_does_not_claim_a_count() {
        let message = AlgoError::LengthMismatch {
            expected: 4,
            actual: 5,
        }
        .to_string();
        assert!(message.contains("more than"));
        assert!(!message.contains('5'));
    }

    #[test]
    fn rethrow_keeps_inner_message() {
        let err = AlgoError::rethrow_with("parsing failed")("bad token".into());
        assert_eq!(err.to_string(), "parsing failed with: bad token");
    }

    #[test]
    fn parse_errors_convert() {
        let result: AlgoResult<i64> = "x".parse::<i64>().map_err(Into::into);
        assert!(matches!(result, Err(AlgoError::OtherAlgoError(_))));
    }
}
