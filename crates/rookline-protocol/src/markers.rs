//! Protocol text constants.
//!
//! The server speaks free-form ASCII with no message framing; the client
//! recognizes situations by exact, case-sensitive byte substrings. Matching
//! is always done against raw inbound bytes, never against a decoded string,
//! so every constant here is a byte literal.

/// Login prompt; the handshake entry trigger.
pub const LOGIN_PROMPT: &[u8] = b"login:";

/// Password prompt inside the credential exchange.
pub const PASSWORD_PROMPT: &[u8] = b"password:";

/// Greeting line confirming a registered login succeeded.
pub const REGISTERED_GREETING: &[u8] = b"Starting FICS";

/// The password was not accepted.
pub const BAD_PASSWORD: &[u8] = b"Invalid password!";

/// Guest confirmation line; also what a registered-intent login sees when
/// the name turns out to be unregistered.
pub const GUEST_CONFIRMED: &[u8] = b"enter the server as \"";

/// Acknowledgment of the last setup variable; arms the fully-online state.
pub const SETTINGS_ACK: &[u8] = b"increment set to";

/// Final server line after `quit`; the connection is done.
pub const CONNECTION_CLOSED: &[u8] = b"(http://www.freechess.org).";

/// Start of a full-board snapshot line.
pub const SNAPSHOT: &[u8] = b"<12>";

/// Brace notice carrying game creation or game result text.
pub const GAME_BRACE: &[u8] = b"{Game ";

/// First word of the brace notice when a game is starting, not ending.
pub const GAME_CREATED: &[u8] = b"Creating";

/// An observed game was torn down.
pub const OBSERVED_REMOVED: &[u8] = b"Removing game";

/// The client is neither playing, observing, nor examining anything.
pub const QUIESCENT: &[u8] = b"nor examining a game.";

/// Chat marker; the rest of the line is the message text.
pub const CHAT_SAYS: &[u8] = b"says: ";

/// Outbound command to re-request the current snapshot.
pub const CMD_REFRESH: &str = "refresh";

/// Outbound command requesting the open-match listing.
pub const CMD_SOUGHT: &str = "sought";

/// Outbound command closing the session.
pub const CMD_QUIT: &str = "quit";
