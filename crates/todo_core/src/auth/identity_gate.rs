//! Session-less login check.

use log::info;
use uuid::Uuid;

/// Minimum trimmed password length, in UTF-16 code units.
pub const MIN_PASSWORD_LEN: usize = 4;

/// User recorded after an accepted login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: Uuid,
    pub username: String,
}

/// Owned login state; construct one per UI session.
#[derive(Debug, Default)]
pub struct IdentityGate {
    current_user: Option<User>,
}

impl IdentityGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accepts any non-empty username with a password of at least
    /// `MIN_PASSWORD_LEN` UTF-16 code units, both after trimming.
    ///
    /// A rejected attempt leaves the current user untouched.
    pub fn login(&mut self, username: &str, password: &str) -> bool {
        let username = username.trim();
        let password = password.trim();

        if username.is_empty() || password.encode_utf16().count() < MIN_PASSWORD_LEN {
            info!("event=login module=auth status=rejected");
            return false;
        }

        self.current_user = Some(User {
            id: Uuid::new_v4(),
            username: username.to_string(),
        });
        info!("event=login module=auth status=ok");
        true
    }

    pub fn logout(&mut self) {
        if self.current_user.take().is_some() {
            info!("event=logout module=auth status=ok");
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.current_user.is_some()
    }

    pub fn current_user(&self) -> Option<&User> {
        self.current_user.as_ref()
    }
}
