//! Error types for the session layer.

use crate::LoginRejection;

/// Errors that can occur while establishing or holding a session.
///
/// Both are recoverable: the client tears the link down, returns to the
/// offline phase, and surfaces the message to the user.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SessionError {
    /// A registered login was requested with no stored password.
    #[error("Empty Password")]
    EmptyPassword,

    /// The server refused the credential exchange.
    #[error("{0}")]
    Rejected(#[from] LoginRejection),
}
