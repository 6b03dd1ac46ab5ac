//! Error types for Garland

use thiserror::Error;

/// The main error type for Garland operations
#[derive(Debug, Error)]
pub enum GarlandError {
    #[error("Invalid particle count for {class}: {count} (must be at least 1)")]
    InvalidParticleCount { class: String, count: usize },

    #[error("Index out of range for layer {layer}: {index} >= {len}")]
    IndexOutOfRange {
        layer: String,
        index: usize,
        len: usize,
    },

    #[error("Layer not mounted: {0}")]
    LayerNotMounted(String),

    #[error("Audio error: {0}")]
    AudioError(String),

    #[error("Config error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParseError(String),

    #[error("TOML serialization error: {0}")]
    TomlSerError(String),
}

/// Result type alias for Garland operations
pub type Result<T> = std::result::Result<T, GarlandError>;

impl From<toml::de::Error> for GarlandError {
    fn from(err: toml::de::Error) -> Self {
        GarlandError::TomlParseError(err.to_string())
    }
}

impl From<toml::ser::Error> for GarlandError {
    fn from(err: toml::ser::Error) -> Self {
        GarlandError::TomlSerError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_count_message_names_class() {
        let err = GarlandError::InvalidParticleCount {
            class: "foliage".into(),
            count: 0,
        };
        assert!(err.to_string().contains("foliage"));
    }

    #[test]
    fn toml_error_converts() {
        let parsed: std::result::Result<toml::Value, _> = toml::from_str("= broken");
        let err: GarlandError = parsed.unwrap_err().into();
        assert!(matches!(err, GarlandError::TomlParseError(_)));
    }
}
