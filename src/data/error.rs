use std::{error::Error, fmt, io};

/// The data module's result type.
pub type Result<T> = std::result::Result<T, DatasetErr>;

/// Failures while reading or partitioning the training file.
#[derive(Debug)]
pub enum DatasetErr {
    Io(io::Error),
    /// The file has no header line.
    MissingHeader,
    MissingColumn(String),
    RowLength {
        line: usize,
        got: usize,
        expected: usize,
    },
    NotNumeric {
        line: usize,
        column: String,
        value: String,
    },
    InvalidLabel {
        line: usize,
        value: f64,
    },
    Empty,
    /// The requested ratio leaves one side of the split without samples.
    EmptySplit {
        len: usize,
        ratio: f64,
    },
}

impl fmt::Display for DatasetErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DatasetErr::Io(e) => write!(f, "io error: {e}"),
            DatasetErr::MissingHeader => write!(f, "dataset has no header line"),
            DatasetErr::MissingColumn(name) => write!(f, "dataset has no column named '{name}'"),
            DatasetErr::RowLength {
                line,
                got,
                expected,
            } => write!(f, "dataset line {line}: expected {expected} values, got {got}"),
            DatasetErr::NotNumeric {
                line,
                column,
                value,
            } => write!(
                f,
                "dataset line {line}: cannot parse '{value}' in column '{column}' as a number"
            ),
            DatasetErr::InvalidLabel { line, value } => {
                write!(f, "dataset line {line}: label must be 0 or 1, got {value}")
            }
            DatasetErr::Empty => write!(f, "dataset is empty"),
            DatasetErr::EmptySplit { len, ratio } => write!(
                f,
                "splitting {len} samples with ratio {ratio} leaves an empty partition"
            ),
        }
    }
}

impl Error for DatasetErr {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            DatasetErr::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for DatasetErr {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}
