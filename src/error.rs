//! Error types for the fallible entry points.
//!
//! Ticks and clicks never fail: a click with no ammo left is a defined no-op,
//! not an error. Errors are reserved for caller mistakes (bad level index,
//! bad target index, degenerate scene) and for rejected settings.

use std::fmt;

/// Top-level error enum for the game core.
#[derive(Debug)]
pub enum GameError {
    /// Level index outside `1..=6`.
    InvalidLevelIndex {
        /// The rejected index.
        index: u8,
    },

    /// A target index that does not exist in the current level.
    InvalidTargetIndex {
        /// The rejected index.
        index: usize,
        /// Number of targets in the level.
        count: usize,
    },

    /// Scene dimensions must be finite and strictly positive.
    InvalidScene { width: f32, height: f32 },

    /// A setting value is outside its accepted range or failed to parse.
    InvalidSetting {
        /// Setting name (for logging).
        name: &'static str,
        /// The rejected raw value.
        value: String,
        /// Human-readable description of what is accepted.
        reason: &'static str,
    },

    /// Settings JSON could not be decoded.
    SettingsParse(serde_json::Error),
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::InvalidLevelIndex { index } => {
                write!(f, "level index {} is outside 1..=6", index)
            }
            GameError::InvalidTargetIndex { index, count } => write!(
                f,
                "target index {} out of range (level has {} targets)",
                index, count
            ),
            GameError::InvalidScene { width, height } => {
                write!(f, "invalid scene size {}x{}", width, height)
            }
            GameError::InvalidSetting {
                name,
                value,
                reason,
            } => write!(f, "setting '{}' = '{}' rejected: {}", name, value, reason),
            GameError::SettingsParse(err) => write!(f, "failed to parse settings: {}", err),
        }
    }
}

impl std::error::Error for GameError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GameError::SettingsParse(err) => Some(err),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for GameError {
    fn from(err: serde_json::Error) -> Self {
        GameError::SettingsParse(err)
    }
}

/// Convenience alias: a `Result` using `GameError` as the error type.
pub type GameResult<T> = Result<T, GameError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err = GameError::InvalidLevelIndex { index: 7 };
        assert_eq!(err.to_string(), "level index 7 is outside 1..=6");

        let err = GameError::InvalidTargetIndex { index: 3, count: 2 };
        assert!(err.to_string().contains("has 2 targets"));
    }

    #[test]
    fn test_parse_error_has_source() {
        let json_err = serde_json::from_str::<u32>("not json").unwrap_err();
        let err: GameError = json_err.into();
        assert!(std::error::Error::source(&err).is_some());
    }
}
