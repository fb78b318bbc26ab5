//! Session layer for Rookline.
//!
//! Everything about who is logging in and where the session stands:
//!
//! - [`SessionConfig`] — account, server address, and match preferences,
//!   serializable so front ends can persist them.
//! - [`SessionPhase`] — the handshake state machine from offline through
//!   fully online.
//! - [`LoginScanner`] — the credential-exchange scanner with every
//!   rejection path.
//!
//! The scanner is pure: it reports what to do ([`LoginStep`]) and the
//! client engine performs the sends, trigger changes, and teardown.

mod config;
mod error;
mod login;
mod phase;

pub use config::{AccountKind, GameType, SessionConfig, WildVariant};
pub use error::SessionError;
pub use login::{LoginRejection, LoginScanner, LoginStep};
pub use phase::SessionPhase;
