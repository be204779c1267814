use serde::{Deserialize, Serialize};

/// Credentials posted by the login form. Never stored client-side.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// An authenticated Odoo session as remembered by the browser.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionInfo {
    pub uid: u64,
    pub username: String,
    pub expires_at_ms: u64,
}

impl SessionInfo {
    pub fn is_valid_at(&self, now_ms: u64) -> bool {
        self.uid > 0 && now_ms < self.expires_at_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_expires_and_requires_a_uid() {
        let session = SessionInfo { uid: 2, username: "shop@example.com".to_string(), expires_at_ms: 1000 };
        assert!(session.is_valid_at(999));
        assert!(!session.is_valid_at(1000));
        assert!(!SessionInfo { uid: 0, ..session }.is_valid_at(0));
    }
}
