// src/error.rs
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// The layout handed to the editor lacks an element it attaches to.
    #[error("required page element missing: {0}")]
    MissingElement(&'static str),

    #[error("unknown output format `{0}`")]
    UnknownFormat(String),

    #[error("malformed draft: {0}")]
    MalformedDraft(String),

    #[error("invalid key binding `{0}`")]
    InvalidKeybinding(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("front matter: {0}")]
    TomlDecode(#[from] toml::de::Error),

    #[error("front matter: {0}")]
    TomlEncode(#[from] toml::ser::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
