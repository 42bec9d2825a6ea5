//! Errors specific to version-catalog failure handling.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("no catalog file found for '{name}'")]
    UnknownCatalog { name: String },

    #[error("failed to parse catalog file: {message}")]
    TomlParse { message: String },

    #[error(transparent)]
    Reader(#[from] lens_core::ReaderError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, CatalogError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_catalog_display() {
        let err = CatalogError::UnknownCatalog {
            name: "libs".into(),
        };
        assert!(err.to_string().contains("libs"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::from(std::io::ErrorKind::NotFound);
        let err: CatalogError = io_err.into();
        assert!(matches!(err, CatalogError::Io(_)));
    }

    #[test]
    fn test_reader_error_conversion() {
        let err: CatalogError = lens_core::ReaderError::PushBackBeyondHistory {
            requested: 3,
            available: 0,
        }
        .into();
        assert!(matches!(err, CatalogError::Reader(_)));
    }
}
