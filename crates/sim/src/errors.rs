use std::error;
use std::fmt;

/// Error returned when attempting to convert an invalid byte/character into
/// an `Allele`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidAllele(pub u8);

impl fmt::Display for InvalidAllele {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invalid allele byte: {} ('{}')", self.0, self.0 as char)
    }
}

impl error::Error for InvalidAllele {}

/// Error type for failures when parsing an `AlleleSequence`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvalidSequence {
    /// A character was neither '0' (wild) nor '1' (crop).
    InvalidChar(char),

    /// The sequence was empty when a non-empty sequence was required.
    EmptySequence,
}

impl fmt::Display for InvalidSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidChar(c) => write!(f, "Invalid character in allele sequence: '{c}'"),
            Self::EmptySequence => write!(f, "Empty sequence not allowed"),
        }
    }
}

impl error::Error for InvalidSequence {}

/// Errors raised when genome data supplied by a caller does not match the
/// configured geometry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenomeError {
    /// The two haplotypes of an individual carry different numbers of
    /// linkage groups.
    GroupCountMismatch { expected: usize, found: usize },
    /// A homolog has the wrong number of loci.
    LengthMismatch {
        group: usize,
        expected: usize,
        found: usize,
    },
}

impl fmt::Display for GenomeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GroupCountMismatch { expected, found } => {
                write!(f, "Linkage group count mismatch: expected {expected}, found {found}")
            }
            Self::LengthMismatch {
                group,
                expected,
                found,
            } => write!(
                f,
                "Homolog length mismatch in linkage group {group}: \
                 expected {expected} loci, found {found}"
            ),
        }
    }
}

impl error::Error for GenomeError {}

/// Invalid configuration value, detected once before any simulation work.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigError {
    /// Name of the offending parameter
    pub parameter: &'static str,
    /// Human-readable explanation
    pub message: String,
}

impl ConfigError {
    pub fn new(parameter: &'static str, message: impl Into<String>) -> Self {
        Self {
            parameter,
            message: message.into(),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invalid configuration for '{}': {}", self.parameter, self.message)
    }
}

impl error::Error for ConfigError {}

/// Errors that can occur during simulation building.
#[derive(Debug, Clone, PartialEq)]
pub enum BuilderError {
    /// A required parameter is missing
    MissingRequired(&'static str),
    /// A parameter failed validation
    InvalidParameter(ConfigError),
}

impl fmt::Display for BuilderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingRequired(param) => write!(f, "Missing required parameter: {param}"),
            Self::InvalidParameter(e) => write!(f, "{e}"),
        }
    }
}

impl error::Error for BuilderError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Self::MissingRequired(_) => None,
            Self::InvalidParameter(e) => Some(e),
        }
    }
}

impl From<ConfigError> for BuilderError {
    fn from(e: ConfigError) -> Self {
        Self::InvalidParameter(e)
    }
}
