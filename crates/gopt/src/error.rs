use thiserror::Error;

/// Errors surfaced by [`Parser::parse`](crate::Parser::parse) and the typed accessors.
///
/// Option names are rendered the way the user typed them (`--name`, `-n`) for
/// `UnknownOption`, and as `-n/--name` everywhere else.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    #[error("unknown option {0}")]
    UnknownOption(String),

    #[error("option requires a value: {0}")]
    MissingValue(String),

    /// Raised only by `get_int`/`get_float`, never by `parse`.
    #[error("cannot convert {value:?} to {target} for {option}: {reason}")]
    TypeConversion {
        option: String,
        value: String,
        target: &'static str,
        reason: String,
    },

    #[error("validation failed for {option}: {message}")]
    ValidationFailed { option: String, message: String },

    #[error("required option missing: {0}")]
    RequiredMissing(String),
}

impl ParseError {
    /// Display name of the option the error is about.
    pub fn option(&self) -> &str {
        match self {
            Self::UnknownOption(name) | Self::MissingValue(name) | Self::RequiredMissing(name) => {
                name
            }
            Self::TypeConversion { option, .. } | Self::ValidationFailed { option, .. } => option,
        }
    }
}

/// Invalid option definitions. These are programming errors in the command
/// definition; the `add_*` helpers panic with this message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DefinitionError {
    #[error("duplicate short option: -{0}")]
    DuplicateShort(char),

    #[error("duplicate long option: --{0}")]
    DuplicateLong(String),

    #[error("option needs a short or a long name")]
    Unnamed,

    #[error("short option must be a single character without dashes (got {0:?})")]
    InvalidShort(String),

    #[error("long option must not start with '-' or contain '=' (got {0:?})")]
    InvalidLong(String),
}
