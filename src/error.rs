//! Error types for the fallible edges of the game
//!
//! The simulation itself never fails. Errors only come from the host side:
//! a missing drawing surface, an audio backend the browser refuses, or a
//! settings file that can't be read or parsed.

use std::fmt;

/// Top-level error enum
#[derive(Debug)]
pub enum GameError {
    /// No drawing surface is available (canvas missing or 2D context refused).
    /// The driver skips rendering until one becomes available again.
    SurfaceUnavailable {
        /// Where the lookup failed
        context: &'static str,
    },

    /// The audio backend could not be created or driven.
    Audio {
        /// Backend message, if any
        message: String,
    },

    /// Settings could not be read from or written to storage.
    SettingsIo(std::io::Error),

    /// Stored settings were not valid JSON for the current schema.
    SettingsParse(serde_json::Error),
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::SurfaceUnavailable { context } => {
                write!(f, "drawing surface unavailable ({})", context)
            }
            GameError::Audio { message } => write!(f, "audio backend error: {}", message),
            GameError::SettingsIo(err) => write!(f, "settings storage error: {}", err),
            GameError::SettingsParse(err) => write!(f, "settings are not valid JSON: {}", err),
        }
    }
}

impl std::error::Error for GameError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GameError::SettingsIo(err) => Some(err),
            GameError::SettingsParse(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for GameError {
    fn from(err: std::io::Error) -> Self {
        GameError::SettingsIo(err)
    }
}

impl From<serde_json::Error> for GameError {
    fn from(err: serde_json::Error) -> Self {
        GameError::SettingsParse(err)
    }
}

/// Convenience alias
pub type Result<T> = std::result::Result<T, GameError>;
