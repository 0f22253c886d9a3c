use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReviewBotError {
    #[error("Review bot overlay element not found: #{id}")]
    MissingElement { id: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for '{field}': '{value}' ({reason})")]
    InvalidConfigValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Unsupported selector: {selector}")]
    InvalidSelector { selector: String },

    #[error("Unsupported catalog format: {path}")]
    UnsupportedCatalogFormat { path: String },
}

impl ReviewBotError {
    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::MissingElement { id } => {
                format!("The page has no review overlay (expected an element with id '{}')", id)
            }
            Self::IoError(e) => format!("Could not read a file: {}", e),
            Self::SerializationError(e) => format!("The catalog is not valid JSON: {}", e),
            Self::TomlError(e) => format!("The file is not valid TOML: {}", e),
            Self::ConfigError { message } => message.clone(),
            Self::InvalidConfigValue { field, reason, .. } => {
                format!("Setting '{}' is invalid: {}", field, reason)
            }
            Self::InvalidSelector { selector } => {
                format!("Selector '{}' is not supported", selector)
            }
            Self::UnsupportedCatalogFormat { path } => {
                format!("Don't know how to read catalog '{}'", path)
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::MissingElement { .. } => {
                "Check that overlay_id in the markup config matches the page"
            }
            Self::IoError(_) => "Make sure the file exists and is readable",
            Self::SerializationError(_) | Self::TomlError(_) => {
                "Fix the syntax error reported above and try again"
            }
            Self::ConfigError { .. } | Self::InvalidConfigValue { .. } => {
                "Review the configuration values and their allowed ranges"
            }
            Self::InvalidSelector { .. } => {
                "Use .class, #id, [data-key=\"value\"], [data-key] or a tag name"
            }
            Self::UnsupportedCatalogFormat { .. } => "Use a .toml or .json catalog file",
        }
    }
}

pub type Result<T> = std::result::Result<T, ReviewBotError>;
