//! The session phase state machine.

use std::fmt;

/// Where the session stands, from cold to fully online.
///
/// The forward path is strictly ordered:
///
/// ```text
/// Offline → AwaitLoginPrompt → AwaitCredentialResult
///         → AwaitOnlineReady → Online
/// ```
///
/// Any failure (transport error, login rejection, user cancel) drops
/// straight back to `Offline`; there is no retry at this layer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SessionPhase {
    /// No connection; the pre-game front end is in charge.
    #[default]
    Offline,
    /// Dialed; waiting for the server's login prompt.
    AwaitLoginPrompt,
    /// Name sent; scanning for the credential-exchange markers.
    AwaitCredentialResult,
    /// Credentials accepted; setup commands sent, waiting for the final
    /// acknowledgment.
    AwaitOnlineReady,
    /// Fully online: game traffic flows.
    Online,
}

impl SessionPhase {
    /// `true` once game traffic can flow.
    pub fn is_online(self) -> bool {
        matches!(self, Self::Online)
    }

    /// `true` while a login attempt is in flight.
    pub fn is_connecting(self) -> bool {
        matches!(
            self,
            Self::AwaitLoginPrompt | Self::AwaitCredentialResult | Self::AwaitOnlineReady
        )
    }

    /// The phase a successful step leads to, `None` from `Online`.
    pub fn next(self) -> Option<Self> {
        match self {
            Self::Offline => Some(Self::AwaitLoginPrompt),
            Self::AwaitLoginPrompt => Some(Self::AwaitCredentialResult),
            Self::AwaitCredentialResult => Some(Self::AwaitOnlineReady),
            Self::AwaitOnlineReady => Some(Self::Online),
            Self::Online => None,
        }
    }
}

impl fmt::Display for SessionPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Offline => "Offline",
            Self::AwaitLoginPrompt => "AwaitLoginPrompt",
            Self::AwaitCredentialResult => "AwaitCredentialResult",
            Self::AwaitOnlineReady => "AwaitOnlineReady",
            Self::Online => "Online",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_next_follows_strict_order() {
        assert_eq!(
            SessionPhase::Offline.next(),
            Some(SessionPhase::AwaitLoginPrompt)
        );
        assert_eq!(
            SessionPhase::AwaitLoginPrompt.next(),
            Some(SessionPhase::AwaitCredentialResult)
        );
        assert_eq!(
            SessionPhase::AwaitCredentialResult.next(),
            Some(SessionPhase::AwaitOnlineReady)
        );
        assert_eq!(
            SessionPhase::AwaitOnlineReady.next(),
            Some(SessionPhase::Online)
        );
        assert_eq!(SessionPhase::Online.next(), None);
    }

    #[test]
    fn test_phase_predicates() {
        assert!(!SessionPhase::Offline.is_connecting());
        assert!(SessionPhase::AwaitCredentialResult.is_connecting());
        assert!(!SessionPhase::Online.is_connecting());
        assert!(SessionPhase::Online.is_online());
    }

    #[test]
    fn test_phase_display() {
        assert_eq!(SessionPhase::Offline.to_string(), "Offline");
        assert_eq!(SessionPhase::Online.to_string(), "Online");
    }
}
