//! Error types for the collaborators around the cost model
//!
//! The cost model itself is total and never fails. Everything that touches
//! the network, the file system or configuration reports through
//! [`CloudCostError`].

use thiserror::Error;

/// Main error type for the `cloudcost` crate
#[derive(Error, Debug)]
pub enum CloudCostError {
    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Weather API communication errors
    #[error("API error: {message}")]
    Api { message: String },

    /// Input validation errors
    #[error("Invalid input: {message}")]
    Validation { message: String },

    /// Region catalog loading errors
    #[error("Region catalog error: {message}")]
    Catalog { message: String },

    /// I/O operation errors
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    /// General application errors
    #[error("Application error: {message}")]
    General { message: String },
}

impl CloudCostError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new API error
    pub fn api<S: Into<String>>(message: S) -> Self {
        Self::Api {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a new region catalog error
    pub fn catalog<S: Into<String>>(message: S) -> Self {
        Self::Catalog {
            message: message.into(),
        }
    }

    /// Create a new general error
    pub fn general<S: Into<String>>(message: S) -> Self {
        Self::General {
            message: message.into(),
        }
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            CloudCostError::Config { .. } => {
                "Configuration error. Please check your config file and Azure Maps key.".to_string()
            }
            CloudCostError::Api { .. } => {
                "Unable to fetch weather data. Please check your internet connection.".to_string()
            }
            CloudCostError::Validation { message } => {
                format!("Invalid input: {message}")
            }
            CloudCostError::Catalog { .. } => {
                "Region catalog could not be loaded. Using built-in regions instead.".to_string()
            }
            CloudCostError::Io { .. } => {
                "File operation failed. Please check file permissions.".to_string()
            }
            CloudCostError::General { message } => message.clone(),
        }
    }
}

impl From<reqwest::Error> for CloudCostError {
    fn from(err: reqwest::Error) -> Self {
        CloudCostError::api(err.to_string())
    }
}

impl From<reqwest_middleware::Error> for CloudCostError {
    fn from(err: reqwest_middleware::Error) -> Self {
        CloudCostError::api(err.to_string())
    }
}

impl From<serde_json::Error> for CloudCostError {
    fn from(err: serde_json::Error) -> Self {
        CloudCostError::catalog(err.to_string())
    }
}
