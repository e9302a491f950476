use std::path::PathBuf;
use thiserror::Error;

pub type Result<T, E = RetrieverError> = std::result::Result<T, E>;

#[derive(Error, Debug)]
#[non_exhaustive]
pub enum RetrieverError {
    #[error("config not found: {}", .0.display())]
    ConfigNotFound(PathBuf),

    #[error(
        "TOML reader not available: rebuild md-retriever with the `toml-config` feature, or run without a config file"
    )]
    MissingTomlReader,

    #[error("Config Read Error: Path '{}', Error: {source}", .path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Config Parse Error: Path '{}', Error: {message}", .path.display())]
    ConfigParse { path: PathBuf, message: String },

    #[error("Invalid glob pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    #[error("File Read Error: Path '{}', Error: {source}", .path.display())]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("File Write Error: Path '{}', Error: {source}", .path.display())]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Walk Error: {0}")]
    Walk(#[from] ignore::Error),
}
