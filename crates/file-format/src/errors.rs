/// Errors during draft file loading.
#[derive(Debug, Clone, thiserror::Error)]
pub enum LoadError {
    #[error("failed to parse file: {0}")]
    ParseError(String),

    #[error("unknown file format: {0}")]
    UnknownFormat(String),

    #[error("file version {file_version} is newer than supported version {supported_version}")]
    FutureVersion {
        file_version: u32,
        supported_version: u32,
    },

    #[error("migration failed from version {from} to {to}: {reason}")]
    MigrationFailed { from: u32, to: u32, reason: String },
}

/// Errors during asset export.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ExportError {
    #[error("material references image {index} but the scene holds {count}")]
    MissingImage { index: usize, count: usize },

    #[error("failed to encode asset JSON: {0}")]
    JsonEncode(String),
}
