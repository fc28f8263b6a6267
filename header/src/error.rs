use num_bigint::BigUint;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum HeaderError {
    #[error("macro {0} is already defined")]
    DuplicateMacro(String),

    #[error("invalid macro name {0:?}")]
    InvalidMacroName(String),

    #[error("macro {name} = {value:?} is not a valid {expected}")]
    InvalidOverrideType {
        name: String,
        value: Option<String>,
        expected: &'static str,
    },

    #[error("{value:#x} does not fit in {bits} bits")]
    LiteralOverflow { value: BigUint, bits: usize },

    #[error(transparent)]
    Math(#[from] ntt_math::Error),

    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("header generation aborted, partial file written to {}", partial.display())]
    Aborted {
        partial: PathBuf,
        #[source]
        source: Box<HeaderError>,
    },
}

pub type Result<T> = std::result::Result<T, HeaderError>;
