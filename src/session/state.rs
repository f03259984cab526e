//! Control session lifecycle

/// Where a control session is in its lifecycle.
///
/// `Unauthenticated -> TlsNegotiating -> Authenticated -> Closed`. A session
/// can move to `Closed` from any state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Unauthenticated,
    TlsNegotiating,
    Authenticated,
    Closed,
}

impl SessionState {
    pub fn is_closed(self) -> bool {
        self == SessionState::Closed
    }
}
