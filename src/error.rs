use std::{
    error::Error,
    fmt::{self, Display},
    io,
};

/// The result type used in the entire crate.
pub type Result<T> = std::result::Result<T, OptimErr>;

/// The crate's error type.
///
/// Only construction and configuration paths fail, an `update` call never does.
#[derive(Debug)]
pub enum OptimErr {
    UnknownAlgorithm(String),
    InvalidHyperparameter {
        name: &'static str,
        value: f32,
        expected: &'static str,
    },
    SizeMismatch {
        what: &'static str,
        got: usize,
        expected: usize,
    },
    Json(serde_json::Error),
    Io(io::Error),
}

impl Display for OptimErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptimErr::UnknownAlgorithm(name) => write!(
                f,
                "unknown optimization algorithm {name:?}, expected one of sgd, adagrad or adam"
            ),
            OptimErr::InvalidHyperparameter {
                name,
                value,
                expected,
            } => write!(f, "invalid hyperparameter {name}={value}, expected {expected}"),
            OptimErr::SizeMismatch {
                what,
                got,
                expected,
            } => write!(f, "size mismatch in {what}, got {got} and expected {expected}"),
            OptimErr::Json(e) => write!(f, "malformed config: {e}"),
            OptimErr::Io(e) => write!(f, "io error: {e}"),
        }
    }
}

impl Error for OptimErr {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            OptimErr::Json(e) => Some(e),
            OptimErr::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for OptimErr {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

impl From<io::Error> for OptimErr {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_names_the_offending_value() {
        let err = OptimErr::InvalidHyperparameter {
            name: "eta",
            value: -1.0,
            expected: "a finite value > 0",
        };

        assert_eq!(
            err.to_string(),
            "invalid hyperparameter eta=-1, expected a finite value > 0"
        );
    }

    #[test]
    fn test_io_source_is_kept() {
        let err = OptimErr::from(io::Error::other("boom"));
        assert!(err.source().is_some());
    }
}
