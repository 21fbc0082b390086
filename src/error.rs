//! Error types for the adapter surface.
//!
//! Configuration problems are fatal at construction time and surface here.
//! Everything the transport reports after construction is non-fatal and
//! reaches the host through `connection:error` notifications instead, so the
//! variants stay deliberately small.

use crate::transport::TransportError;

/// Errors surfaced by hub construction and [`Hub::start`](crate::Hub::start).
#[derive(Debug)]
pub enum HubError {
    /// No hub name was configured. The adapter is never constructed in a
    /// partially-initialized state; this is raised before any connection or
    /// proxy exists.
    MissingHubName,
    /// The transport failed to open or start the connection.
    Transport(TransportError),
}

impl std::fmt::Display for HubError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingHubName => write!(
                f,
                "hub name was not specified; set HubSettings::hub_name before constructing the hub"
            ),
            Self::Transport(err) => write!(f, "transport error: {err}"),
        }
    }
}

impl std::error::Error for HubError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::MissingHubName => None,
            Self::Transport(err) => Some(err),
        }
    }
}

impl From<TransportError> for HubError {
    fn from(err: TransportError) -> Self {
        Self::Transport(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_hub_name_display() {
        let msg = HubError::MissingHubName.to_string();
        assert!(msg.contains("hub name was not specified"));
    }

    #[test]
    fn test_transport_error_source() {
        use std::error::Error;

        let err = HubError::from(TransportError::ConnectionFailed("refused".to_string()));
        assert!(err.source().is_some());
        assert!(err.to_string().contains("refused"));
    }
}
