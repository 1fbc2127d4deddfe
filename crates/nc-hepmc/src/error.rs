//! Error type for HepMC3 ASCII reading.

use std::path::PathBuf;

use thiserror::Error;

/// Errors from opening or decoding a HepMC3 ASCII file.
#[derive(Error, Debug)]
pub enum HepmcError {
    /// The file could not be opened or its format could not be deduced.
    #[error("cannot open {path}: {reason}")]
    Open {
        /// Path that was attempted.
        path: PathBuf,
        /// Why deduction or opening failed.
        reason: String,
    },

    /// I/O failure mid-stream.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A record line that does not conform to the Asciiv3 grammar.
    #[error("parse error at line {line_no}: {msg}")]
    Parse {
        /// 1-based line number in the input.
        line_no: u64,
        /// What went wrong.
        msg: String,
    },

    /// A required attribute was demanded but is absent.
    #[error("missing attribute '{name}'; present: [{}]", present.join(", "))]
    MissingAttribute {
        /// Name of the attribute that was demanded.
        name: String,
        /// All attribute names actually present, to aid debugging.
        present: Vec<String>,
    },

    /// An attribute exists but its value does not parse as the demanded type.
    #[error("attribute '{name}' has unparseable value '{value}'")]
    AttributeType {
        /// Attribute name.
        name: String,
        /// The raw stored value.
        value: String,
    },
}

/// Result type alias for this crate.
pub type Result<T> = std::result::Result<T, HepmcError>;
