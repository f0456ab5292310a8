//! Error types and handling for the `cinqueterre` fetcher

use thiserror::Error;

/// Main error type for the fetcher
#[derive(Error, Debug)]
pub enum CinqueTerreError {
    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Language model API or network errors
    #[error("API error: {message}")]
    Api {
        message: String,
        /// HTTP status of the failed response, when one was received
        status: Option<u16>,
    },

    /// The model reply did not contain a `{ ... }` span
    #[error("No JSON object found in response")]
    JsonNotFound,

    /// The extracted span was not valid JSON
    #[error("JSON parsing error: {source}")]
    JsonParse {
        #[source]
        source: serde_json::Error,
    },

    /// A document failed the field-presence checks
    #[error("Invalid document: {message}")]
    Validation { message: String },

    /// I/O operation errors
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

impl CinqueTerreError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new API error without a status code
    pub fn api<S: Into<String>>(message: S) -> Self {
        Self::Api {
            message: message.into(),
            status: None,
        }
    }

    /// Create a new API error for an HTTP status
    pub fn api_status<S: Into<String>>(status: u16, message: S) -> Self {
        Self::Api {
            message: message.into(),
            status: Some(status),
        }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            CinqueTerreError::Config { message } => {
                format!("Configuration error: {message}. Make sure ANTHROPIC_API_KEY is set.")
            }
            CinqueTerreError::Api {
                status: Some(401), ..
            } => "Authentication failed. Please check your Anthropic API key.".to_string(),
            CinqueTerreError::Api {
                status: Some(429), ..
            } => "Rate limit exceeded. Please wait before trying again.".to_string(),
            CinqueTerreError::Api { message, .. } => {
                format!("Unable to reach the language model API: {message}")
            }
            CinqueTerreError::JsonNotFound => {
                "The model reply did not contain a JSON object.".to_string()
            }
            CinqueTerreError::JsonParse { source } => format!("JSON parsing error: {source}"),
            CinqueTerreError::Validation { message } => message.clone(),
            CinqueTerreError::Io { source } => {
                format!("File operation failed ({source}). Please check file permissions.")
            }
        }
    }
}

impl From<serde_json::Error> for CinqueTerreError {
    fn from(source: serde_json::Error) -> Self {
        Self::JsonParse { source }
    }
}
