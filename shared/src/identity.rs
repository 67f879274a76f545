use once_cell::sync::OnceCell;
use uuid::Uuid;

/// Supplies the id of the person using the wheel.
pub trait IdentityProvider {
    fn current_user_id(&self) -> String;
}

pub fn generate_user_id() -> Uuid {
    Uuid::new_v4()
}

/// Lazily creates a UUID v4 on first use and hands out the same id afterwards.
#[derive(Debug, Default)]
pub struct LocalIdentity {
    user_id: OnceCell<Uuid>,
}

impl LocalIdentity {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resumes an id persisted by an earlier run.
    pub fn restore(user_id: Uuid) -> Self {
        Self {
            user_id: OnceCell::with_value(user_id),
        }
    }

    pub fn user_id(&self) -> Uuid {
        *self.user_id.get_or_init(generate_user_id)
    }

    /// Forgets the current id and switches to a freshly generated one.
    pub fn reset(&mut self) -> Uuid {
        self.user_id = OnceCell::with_value(generate_user_id());
        self.user_id()
    }
}

impl IdentityProvider for LocalIdentity {
    fn current_user_id(&self) -> String {
        self.user_id().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::is_valid_user_id;

    #[test]
    fn test_id_is_stable() {
        let identity = LocalIdentity::new();
        let first = identity.current_user_id();
        assert!(is_valid_user_id(&first));
        assert_eq!(identity.current_user_id(), first);
        assert_eq!(identity.user_id().get_version_num(), 4);
    }

    #[test]
    fn test_restored_id_is_reused() {
        let id = generate_user_id();
        let identity = LocalIdentity::restore(id);
        assert_eq!(identity.current_user_id(), id.to_string());
    }

    #[test]
    fn test_reset_switches_to_new_id() {
        let mut identity = LocalIdentity::restore(generate_user_id());
        let old = identity.user_id();

        let fresh = identity.reset();
        assert_ne!(fresh, old);
        assert_eq!(identity.user_id(), fresh);
        assert!(is_valid_user_id(&identity.current_user_id()));
    }
}
