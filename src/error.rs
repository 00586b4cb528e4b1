//! Error types for ByteGen.
//!
//! All fallible operations in the crate return [`Result`], which defaults
//! to this module's [`Error`].

use snafu::Snafu;

#[derive(Debug, Snafu)]
pub enum Error {
    /// Rejected input (bad length, unparsable value, unknown command)
    #[snafu(display("Invalid: {message}"))]
    Invalid { message: String },

    /// No characters to sample from
    #[snafu(display("Character alphabet is empty"))]
    EmptyAlphabet,

    /// The system clipboard could not be opened or written
    #[snafu(display("Clipboard error: {message}"))]
    Clipboard { message: String },

    #[snafu(display("IO error: {source}"))]
    Io { source: std::io::Error },

    #[snafu(display("TOML parse error: {source}"))]
    TomlDe { source: toml::de::Error },

    #[snafu(display("TOML serialize error: {source}"))]
    TomlSe { source: toml::ser::Error },
}

impl Error {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        Error::Invalid {
            message: message.into(),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Error::Io { source }
    }
}

impl From<toml::de::Error> for Error {
    fn from(source: toml::de::Error) -> Self {
        Error::TomlDe { source }
    }
}

impl From<toml::ser::Error> for Error {
    fn from(source: toml::ser::Error) -> Self {
        Error::TomlSe { source }
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
