//! The credential-exchange scanner.
//!
//! After the user name goes out, the server's reply stream is scanned
//! byte-by-byte for four markers. Whichever matches at the earliest offset
//! is acted on first, and scanning continues through the rest of the chunk
//! so that several markers in one delivery (password prompt, then the
//! success greeting) are all honored. A rejection stops the scan — the
//! session is being torn down anyway.

use tracing::{info, warn};

use rookline_protocol::markers::{
    BAD_PASSWORD, GUEST_CONFIRMED, PASSWORD_PROMPT, REGISTERED_GREETING,
};

use crate::AccountKind;

/// Why the server refused the login.
///
/// The display strings are surfaced to the user verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum LoginRejection {
    /// A guest login hit a password prompt: the name belongs to a
    /// registered account.
    #[error("Registered account")]
    RegisteredAccount,

    /// The stored password was not accepted.
    #[error("Invalid password")]
    InvalidPassword,

    /// A registered login was requested, but the server offered the name
    /// as a fresh guest: the account is not registered.
    #[error("Not a registered account")]
    NotRegistered,
}

/// What the engine must do in reaction to a scanned marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginStep {
    /// Password prompt on a registered login: send the stored password.
    SendPassword,
    /// Credentials accepted: arm the ready trigger and start online
    /// initialization.
    CredentialOk,
    /// Abort: clear handlers, disconnect, go offline, show the message.
    Reject(LoginRejection),
}

/// Scanner over the credential-exchange replies.
///
/// Stateless apart from the account intent; each chunk is scanned on its
/// own, which also means a marker split across two deliveries is not
/// recognized — the server resends prompts on its own cadence.
#[derive(Debug, Clone, Copy)]
pub struct LoginScanner {
    account: AccountKind,
}

impl LoginScanner {
    /// Scanner for a login with the given account intent.
    pub fn new(account: AccountKind) -> Self {
        Self { account }
    }

    /// Scans one chunk and returns the steps to take, in order.
    pub fn scan(&self, chunk: &[u8]) -> Vec<LoginStep> {
        let mut steps = Vec::new();
        let mut offset = 0usize;
        while offset < chunk.len() {
            let rest = &chunk[offset..];
            if rest.starts_with(PASSWORD_PROMPT) {
                match self.account {
                    AccountKind::Registered => {
                        info!("password prompt, sending stored password");
                        steps.push(LoginStep::SendPassword);
                    }
                    AccountKind::Guest => {
                        warn!("password prompt on a guest login");
                        steps.push(LoginStep::Reject(LoginRejection::RegisteredAccount));
                        break;
                    }
                }
            } else if rest.starts_with(REGISTERED_GREETING) {
                info!("registered login accepted");
                steps.push(LoginStep::CredentialOk);
            } else if rest.starts_with(BAD_PASSWORD) {
                warn!("password rejected");
                steps.push(LoginStep::Reject(LoginRejection::InvalidPassword));
                break;
            } else if rest.starts_with(GUEST_CONFIRMED) {
                match self.account {
                    AccountKind::Registered => {
                        warn!("name is unregistered but a registered login was asked for");
                        steps.push(LoginStep::Reject(LoginRejection::NotRegistered));
                        break;
                    }
                    AccountKind::Guest => {
                        info!("guest login confirmed");
                        steps.push(LoginStep::CredentialOk);
                    }
                }
            }
            offset += 1;
        }
        steps
    }
}

// =========================================================================
// Tests
// =========================================================================
