//! `CredentialStore` backed by a mutex-guarded map.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::ports::{CredentialStore, CredentialStoreError};
use crate::domain::{NewUser, User, UserId, Username};

/// Credential store keeping users in process memory.
///
/// The uniqueness check and the insert happen under one lock acquisition.
#[derive(Debug, Default)]
pub struct InMemoryCredentialStore {
    users: Mutex<HashMap<String, User>>,
}

impl InMemoryCredentialStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned() -> CredentialStoreError {
    CredentialStoreError::query("in-memory credential store lock poisoned")
}

#[async_trait]
impl CredentialStore for InMemoryCredentialStore {
    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<User>, CredentialStoreError> {
        let users = self.users.lock().map_err(|_| poisoned())?;
        Ok(users.get(username.as_str()).cloned())
    }

    async fn insert(&self, user: NewUser) -> Result<User, CredentialStoreError> {
        let mut users = self.users.lock().map_err(|_| poisoned())?;
        let key = user.username.as_str().to_owned();
        if users.contains_key(&key) {
            return Err(CredentialStoreError::duplicate_username(key));
        }
        let stored = User::from_new(UserId::random(), user);
        users.insert(key, stored.clone());
        Ok(stored)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::{PasswordHash, UserProfile};
    use rstest::{fixture, rstest};

    fn new_user(username: &str, email: &str) -> NewUser {
        NewUser {
            username: Username::new(username).expect("valid username"),
            password_hash: PasswordHash::new("$argon2id$v=19$stub").expect("valid hash"),
            profile_photo: None,
            profile: UserProfile {
                first_name: "Ada".to_owned(),
                last_name: "Lovelace".to_owned(),
                email: email.to_owned(),
                phone: None,
            },
        }
    }

    #[fixture]
    fn store() -> InMemoryCredentialStore {
        InMemoryCredentialStore::new()
    }

    #[rstest]
    #[tokio::test]
    async fn inserted_users_can_be_found(store: InMemoryCredentialStore) {
        store
            .insert(new_user("ada", "ada@example.com"))
            .await
            .expect("insert succeeds");

        let found = store
            .find_by_username(&Username::new("ada").expect("valid username"))
            .await
            .expect("lookup succeeds")
            .expect("user present");
        assert_eq!(found.profile.email, "ada@example.com");
        assert_eq!(store.users.lock().expect("lock").len(), 1);
    }

    #[rstest]
    #[tokio::test]
    async fn duplicate_insert_keeps_first_record(store: InMemoryCredentialStore) {
        store
            .insert(new_user("ada", "first@example.com"))
            .await
            .expect("first insert succeeds");
        let err = store
            .insert(new_user("ada", "second@example.com"))
            .await
            .expect_err("duplicate rejected");

        assert_eq!(err, CredentialStoreError::duplicate_username("ada"));
        let found = store
            .find_by_username(&Username::new("ada").expect("valid username"))
            .await
            .expect("lookup succeeds")
            .expect("user present");
        assert_eq!(found.profile.email, "first@example.com");
    }

    #[rstest]
    #[tokio::test]
    async fn lookups_are_case_sensitive(store: InMemoryCredentialStore) {
        store
            .insert(new_user("Ada", "ada@example.com"))
            .await
            .expect("insert succeeds");
        let missing = store
            .find_by_username(&Username::new("ada").expect("valid username"))
            .await
            .expect("lookup succeeds");
        assert!(missing.is_none());
    }
}
