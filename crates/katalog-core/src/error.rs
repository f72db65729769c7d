use thiserror::Error;

/// All errors that can occur in katalog-core.
///
/// Normalization and aggregation never fail; these variants belong to the
/// catalog sources and to configuration handling.
#[derive(Debug, Error)]
pub enum KatalogError {
    #[error("Catalog unavailable ({source_name}): {reason}")]
    CatalogUnavailable { source_name: String, reason: String },

    #[error("Book not found: {0}")]
    BookNotFound(String),

    #[error("Config error: {0}")]
    ConfigError(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

impl KatalogError {
    pub fn unavailable(source_name: impl Into<String>, reason: impl std::fmt::Display) -> Self {
        Self::CatalogUnavailable {
            source_name: source_name.into(),
            reason: reason.to_string(),
        }
    }

    /// Short machine-readable kind, used in JSON error envelopes.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::CatalogUnavailable { .. } => "catalog_unavailable",
            Self::BookNotFound(_) => "not_found",
            Self::ConfigError(_) | Self::TomlParse(_) | Self::TomlSerialize(_) => "config",
            Self::Io(_) => "io",
            Self::Json(_) => "json",
        }
    }

    pub fn exit_code(&self) -> ExitCode {
        match self {
            Self::CatalogUnavailable { .. } => ExitCode::SourceUnavailable,
            Self::BookNotFound(_) => ExitCode::NotFound,
            Self::ConfigError(_) | Self::TomlParse(_) => ExitCode::InvalidArgs,
            _ => ExitCode::GeneralError,
        }
    }
}

/// Process exit codes used by the CLI.
#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    Success = 0,
    GeneralError = 1,
    NotFound = 2,
    InvalidArgs = 3,
    SourceUnavailable = 4,
}

pub type Result<T> = std::result::Result<T, KatalogError>;
