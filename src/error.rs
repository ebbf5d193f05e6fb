use cancel_this::Cancelled;
use std::path::PathBuf;

/// Errors reported while building or analysing a multi-valued network.
#[derive(Debug)]
pub enum AttractorError {
    /// The synchronous transition relation is identically false. This happens when the
    /// update tables contradict each other (e.g. two rows with the same inputs but
    /// different outputs cover every state).
    EmptyTransitionRelation,
    /// A row value or an output value does not fit into the range of its variable.
    EncodingOverflow {
        variable: usize,
        value: u32,
        range: u32,
    },
    /// The network description is structurally malformed.
    InvalidNetwork(String),
    /// The encoded state requires more BDD variables than the engine supports.
    TooManyBits(usize),
    /// A result file cannot be created or written.
    OutputIo {
        path: PathBuf,
        source: std::io::Error,
    },
    /// The computation was cancelled or exceeded one of its configured limits.
    Cancelled(Cancelled),
}

impl From<Cancelled> for AttractorError {
    fn from(value: Cancelled) -> Self {
        AttractorError::Cancelled(value)
    }
}

impl std::fmt::Display for AttractorError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AttractorError::EmptyTransitionRelation => {
                write!(f, "The synchronous transition relation is empty")
            }
            AttractorError::EncodingOverflow {
                variable,
                value,
                range,
            } => {
                write!(
                    f,
                    "Value {} is out of range [0, {}] of variable {}",
                    value, range, variable
                )
            }
            AttractorError::InvalidNetwork(msg) => write!(f, "Invalid network: {}", msg),
            AttractorError::TooManyBits(bits) => {
                write!(f, "Network state requires {} bits, which is too many", bits)
            }
            AttractorError::OutputIo { path, source } => {
                write!(f, "Cannot write `{}`: {}", path.display(), source)
            }
            AttractorError::Cancelled(c) => write!(f, "{}", c),
        }
    }
}

impl std::error::Error for AttractorError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AttractorError::OutputIo { source, .. } => Some(source),
            _ => None,
        }
    }
}
