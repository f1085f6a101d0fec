//! Session domain module.
//!
//! The signed-in user is passed explicitly into library operations as a
//! [`UserIdentity`]. A [`SessionGate`] publishes identity changes so the
//! library can reset and reload.

use serde::{Deserialize, Serialize};
use tokio::sync::watch;

/// The authenticated user a library belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserIdentity {
    /// Stable user id; used as `owner_id` on records.
    pub id: String,
    /// Optional name for display.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
}

impl UserIdentity {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            display_name: None,
        }
    }

    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    /// Display name, or the id when none is set.
    pub fn label(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.id)
    }
}

/// How the signed-in identity changed between two observations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionTransition {
    SignedIn(UserIdentity),
    SignedOut,
    Switched { from: UserIdentity, to: UserIdentity },
    Unchanged,
}

impl SessionTransition {
    /// Classifies the change from `previous` to `next`.
    ///
    /// Identities are compared by `id`; a display-name edit is `Unchanged`.
    pub fn between(previous: Option<&UserIdentity>, next: Option<&UserIdentity>) -> Self {
        match (previous, next) {
            (None, None) => Self::Unchanged,
            (None, Some(user)) => Self::SignedIn(user.clone()),
            (Some(_), None) => Self::SignedOut,
            (Some(from), Some(to)) if from.id == to.id => Self::Unchanged,
            (Some(from), Some(to)) => Self::Switched {
                from: from.clone(),
                to: to.clone(),
            },
        }
    }

    /// The identity active after the transition, if any.
    pub fn current(&self) -> Option<&UserIdentity> {
        match self {
            Self::SignedIn(user) | Self::Switched { to: user, .. } => Some(user),
            Self::SignedOut | Self::Unchanged => None,
        }
    }
}

/// Source of the current identity and its change notifications.
///
/// Implementations own authentication; the library only observes.
pub trait SessionGate: Send + Sync {
    /// The identity signed in right now, if any.
    fn current(&self) -> Option<UserIdentity>;

    /// A receiver that observes every sign-in, sign-out and user switch.
    fn subscribe(&self) -> watch::Receiver<Option<UserIdentity>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transitions() {
        let alice = UserIdentity::new("alice");
        let bob = UserIdentity::new("bob");

        assert_eq!(
            SessionTransition::between(None, Some(&alice)),
            SessionTransition::SignedIn(alice.clone())
        );
        assert_eq!(
            SessionTransition::between(Some(&alice), None),
            SessionTransition::SignedOut
        );
        assert!(matches!(
            SessionTransition::between(Some(&alice), Some(&bob)),
            SessionTransition::Switched { .. }
        ));
        assert_eq!(
            SessionTransition::between(Some(&alice), Some(&alice.clone().with_display_name("Al"))),
            SessionTransition::Unchanged
        );
        assert_eq!(SessionTransition::between(None, None), SessionTransition::Unchanged);
    }

    #[test]
    fn test_label_falls_back_to_id() {
        assert_eq!(UserIdentity::new("u-1").label(), "u-1");
        assert_eq!(UserIdentity::new("u-1").with_display_name("Kim").label(), "Kim");
    }
}
