//! Session configuration: account, server address, match preferences.

use rookline_protocol::SeekFilter;
use serde::{Deserialize, Serialize};

use crate::SessionError;

// ---------------------------------------------------------------------------
// Account
// ---------------------------------------------------------------------------

/// Whether the login intends a registered account or a guest.
///
/// The distinction drives the credential exchange: a guest must never be
/// asked for a password, and a registered name must not fall through to a
/// guest login.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountKind {
    #[default]
    Guest,
    Registered,
}

// ---------------------------------------------------------------------------
// Game types
// ---------------------------------------------------------------------------

/// Variants of the `wild` game type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WildVariant {
    Wild0,
    Wild1,
    Wild2,
    Wild3,
    Wild4,
    Wild5,
    Wild8,
    Wild8a,
    WildFr,
}

impl WildVariant {
    /// The name the server knows this variant by.
    pub fn name(self) -> &'static str {
        match self {
            Self::Wild0 => "wild0",
            Self::Wild1 => "wild1",
            Self::Wild2 => "wild2",
            Self::Wild3 => "wild3",
            Self::Wild4 => "wild4",
            Self::Wild5 => "wild5",
            Self::Wild8 => "wild8",
            Self::Wild8a => "wild8a",
            Self::WildFr => "wild fr",
        }
    }
}

/// Game types the client can ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameType {
    Standard,
    Blitz,
    Lightning,
    Untimed,
    Crazyhouse,
    Wild(WildVariant),
    Suicide,
}

impl GameType {
    /// The name used in commands and matched against listing records.
    pub fn name(self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Blitz => "blitz",
            Self::Lightning => "lightning",
            Self::Untimed => "untimed",
            Self::Crazyhouse => "crazyhouse",
            Self::Wild(variant) => variant.name(),
            Self::Suicide => "suicide",
        }
    }

    /// Whether an open seek may be posted for this type.
    pub fn seek_eligible(self) -> bool {
        matches!(self.name().as_bytes().get(1), Some(b'u' | b'i' | b'r'))
    }
}

// ---------------------------------------------------------------------------
// SessionConfig
// ---------------------------------------------------------------------------

/// Everything the engine needs to log in and find a match.
///
/// Front ends edit this and persist it however they like; the defaults
/// reach the public server as a guest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub user_name: String,
    pub password: String,
    pub account: AccountKind,
    pub host: String,
    pub port: u16,
    /// The local player's rating, used to rank listing candidates.
    pub rating: u16,
    /// Prefer rated games over unrated ones.
    pub rated: bool,
    pub game_type: GameType,
    /// Starting clock in minutes.
    pub start_time: u16,
    /// Clock increment in seconds.
    pub increment: u16,
    pub min_rating: u16,
    pub max_rating: u16,
    /// Post an open seek instead of scanning the listing.
    pub use_seek: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            user_name: "Guest".to_string(),
            password: String::new(),
            account: AccountKind::Guest,
            host: "freechess.org".to_string(),
            port: 5000,
            rating: 0,
            rated: false,
            game_type: GameType::Standard,
            start_time: 15,
            increment: 0,
            min_rating: 0,
            max_rating: 9999,
            use_seek: false,
        }
    }
}

impl SessionConfig {
    /// Checks the parts a connection attempt depends on.
    ///
    /// # Errors
    /// [`SessionError::EmptyPassword`] when a registered login has no
    /// stored password.
    pub fn validate(&self) -> Result<(), SessionError> {
        if self.account == AccountKind::Registered && self.password.is_empty() {
            return Err(SessionError::EmptyPassword);
        }
        Ok(())
    }

    /// The rated-column letter candidates must show: `r` or `u`.
    pub fn rated_letter(&self) -> u8 {
        if self.rated { b'r' } else { b'u' }
    }

    /// Value for the server's `rated` variable.
    pub fn rated_code(&self) -> &'static str {
        if self.rated { "1" } else { "0" }
    }

    /// Filter handed to the listing scanner.
    pub fn seek_filter(&self) -> SeekFilter {
        SeekFilter {
            game_type: Some(self.game_type.name().to_string()),
            rated: self.rated_letter(),
            rating: self.rating,
        }
    }

    /// The open-seek command, when the configured type allows one.
    pub fn seek_command(&self) -> Option<String> {
        self.game_type
            .seek_eligible()
            .then(|| format!("seek {}", self.game_type.name()))
    }
}

// =========================================================================
// Tests
// =========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_a_guest_on_the_public_server() {
        let config = SessionConfig::default();
        assert_eq!(config.user_name, "Guest");
        assert_eq!(config.account, AccountKind::Guest);
        assert_eq!(config.host, "freechess.org");
        assert_eq!(config.port, 5000);
        assert_eq!(config.game_type, GameType::Standard);
        assert!(!config.use_seek);
    }

    #[test]
    fn test_validate_registered_without_password_fails() {
        let config = SessionConfig {
            account: AccountKind::Registered,
            ..SessionConfig::default()
        };
        assert_eq!(config.validate(), Err(SessionError::EmptyPassword));
    }

    #[test]
    fn test_validate_guest_without_password_is_fine() {
        assert_eq!(SessionConfig::default().validate(), Ok(()));
    }

    #[test]
    fn test_seek_eligibility_follows_type_name() {
        assert!(!GameType::Standard.seek_eligible());
        assert!(!GameType::Blitz.seek_eligible());
        assert!(GameType::Lightning.seek_eligible());
        assert!(!GameType::Untimed.seek_eligible());
        assert!(GameType::Crazyhouse.seek_eligible());
        assert!(GameType::Suicide.seek_eligible());
        assert!(GameType::Wild(WildVariant::Wild0).seek_eligible());
    }

    #[test]
    fn test_seek_command_uses_type_name() {
        let config = SessionConfig {
            game_type: GameType::Wild(WildVariant::WildFr),
            ..SessionConfig::default()
        };
        assert_eq!(config.seek_command().as_deref(), Some("seek wild fr"));
        let standard = SessionConfig::default();
        assert_eq!(standard.seek_command(), None);
    }

    #[test]
    fn test_seek_filter_mirrors_preferences() {
        let config = SessionConfig {
            game_type: GameType::Blitz,
            rated: true,
            rating: 1650,
            ..SessionConfig::default()
        };
        let filter = config.seek_filter();
        assert_eq!(filter.game_type.as_deref(), Some("blitz"));
        assert_eq!(filter.rated, b'r');
        assert_eq!(filter.rating, 1650);
    }

    #[test]
    fn test_config_round_trips_through_json() {
        let config = SessionConfig {
            user_name: "tal".to_string(),
            password: "hunter2".to_string(),
            account: AccountKind::Registered,
            game_type: GameType::Wild(WildVariant::Wild5),
            rated: true,
            ..SessionConfig::default()
        };
        let json = serde_json::to_string(&config).expect("serialize");
        let back: SessionConfig = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, config);
    }

    #[test]
    fn test_config_missing_fields_take_defaults() {
        let back: SessionConfig =
            serde_json::from_str(r#"{"user_name":"keres"}"#).expect("deserialize");
        assert_eq!(back.user_name, "keres");
        assert_eq!(back.port, 5000);
        assert_eq!(back.max_rating, 9999);
    }
}
