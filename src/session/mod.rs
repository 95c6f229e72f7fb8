//! The signed-in identity, restored at startup and persisted on login.
//!
//! No real credential check happens here: the mock login only validates
//! that the form was filled in, then fabricates a user for the chosen role.

mod error;

pub use error::SessionError;

use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;

use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::domain::{Credentials, Role, User};
use crate::pending::PendingFlag;
use crate::storage::{load_json, save_json, KeyValueStore, StorageError, SESSION_KEY};

const STAFF_PHONE: &str = "0000000000";

/// Handle to the current session. Cheap to clone; all clones share state.
#[derive(Clone)]
pub struct Session {
    store: Arc<dyn KeyValueStore>,
    current: Arc<RwLock<Option<User>>>,
    login_delay: Duration,
    pending: PendingFlag,
}

impl Session {
    /// Reads the persisted session record once.
    ///
    /// # Errors
    /// Fails if storage cannot be read. An unreadable record is dropped with
    /// a warning and the session starts signed out.
    pub fn restore(store: Arc<dyn KeyValueStore>, login_delay: Duration) -> Result<Self, SessionError> {
        let user = match load_json::<User>(store.as_ref(), SESSION_KEY) {
            Ok(user) => user,
            Err(StorageError::Serialization(e)) => {
                warn!(error = %e, "Discarding unreadable session record");
                None
            }
            Err(e) => return Err(e.into()),
        };
        if let Some(user) = &user {
            info!(user_id = %user.id, role = %user.role, "Session restored");
        }
        Ok(Self {
            store,
            current: Arc::new(RwLock::new(user)),
            login_delay,
            pending: PendingFlag::new(),
        })
    }

    pub fn current(&self) -> Option<User> {
        self.current.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.current().is_some()
    }

    pub fn is_login_pending(&self) -> bool {
        self.pending.is_pending()
    }

    /// Signs in after the simulated network delay and persists the user.
    ///
    /// # Errors
    /// `LoginInProgress` if another login has not finished yet,
    /// `MissingCredentials` for blank form fields.
    #[instrument(skip(self, credentials), fields(role = %credentials.role()))]
    pub async fn login(&self, credentials: Credentials) -> Result<User, SessionError> {
        let Some(_guard) = self.pending.try_begin() else {
            warn!("Login already in progress");
            return Err(SessionError::LoginInProgress);
        };

        tokio::time::sleep(self.login_delay).await;

        let user = user_for(credentials)?;
        save_json(self.store.as_ref(), SESSION_KEY, &user)?;
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = Some(user.clone());

        info!(user_id = %user.id, "Logged in");
        Ok(user)
    }

    #[instrument(skip(self))]
    pub fn logout(&self) -> Result<(), SessionError> {
        self.store.remove(SESSION_KEY)?;
        let previous = self.current.write().unwrap_or_else(PoisonError::into_inner).take();
        if let Some(user) = previous {
            info!(user_id = %user.id, "Logged out");
        }
        Ok(())
    }
}

fn require(value: &str, what: &str) -> Result<(), SessionError> {
    if value.trim().is_empty() {
        return Err(SessionError::MissingCredentials(format!("{what} is required")));
    }
    Ok(())
}

fn new_user_id(role: Role) -> String {
    format!("{role}-{}", Uuid::new_v4().simple())
}

fn user_for(credentials: Credentials) -> Result<User, SessionError> {
    let role = credentials.role();
    match credentials {
        Credentials::Client {
            roll_number,
            phone_number,
        } => {
            require(&roll_number, "roll number")?;
            require(&phone_number, "phone number")?;
            let name = format!("Student {}", roll_number.trim());
            Ok(User::new(new_user_id(role), name, role, phone_number.trim())
                .with_roll_number(roll_number.trim()))
        }
        Credentials::Admin { username, password } => {
            require(&username, "username")?;
            require(&password, "password")?;
            Ok(User::new(new_user_id(role), "Admin User", role, STAFF_PHONE))
        }
        Credentials::Cafeteria { username, password } => {
            require(&username, "username")?;
            require(&password, "password")?;
            Ok(User::new(new_user_id(role), "Cafeteria Staff", role, STAFF_PHONE))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    fn client_credentials() -> Credentials {
        Credentials::Client {
            roll_number: "21CS001".to_string(),
            phone_number: "9876543210".to_string(),
        }
    }

    #[tokio::test]
    async fn test_login_persists_and_restores() {
        let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        let session = Session::restore(store.clone(), Duration::ZERO).unwrap();
        assert!(!session.is_authenticated());

        let user = session.login(client_credentials()).await.unwrap();
        assert_eq!(user.name, "Student 21CS001");
        assert_eq!(user.role, Role::Client);
        assert_eq!(user.roll_number.as_deref(), Some("21CS001"));
        assert!(user.id.starts_with("client-"));

        let restored = Session::restore(store, Duration::ZERO).unwrap();
        assert_eq!(restored.current(), Some(user));
    }

    #[tokio::test]
    async fn test_logout_clears_record() {
        let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        let session = Session::restore(store.clone(), Duration::ZERO).unwrap();
        session
            .login(Credentials::Admin { username: "admin".to_string(), password: "pw".to_string() })
            .await
            .unwrap();

        session.logout().unwrap();
        assert!(session.current().is_none());
        assert_eq!(store.get(SESSION_KEY).unwrap(), None);
    }

    #[tokio::test]
    async fn test_blank_fields_rejected() {
        let session = Session::restore(Arc::new(MemoryStore::new()), Duration::ZERO).unwrap();
        let result = session
            .login(Credentials::Client { roll_number: " ".to_string(), phone_number: "1".to_string() })
            .await;

        assert_eq!(
            result,
            Err(SessionError::MissingCredentials("roll number is required".to_string()))
        );
        assert!(!session.is_authenticated());
        assert!(!session.is_login_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn test_second_login_while_pending_refused() {
        let session = Session::restore(Arc::new(MemoryStore::new()), Duration::from_millis(1000)).unwrap();

        let first = tokio::spawn({
            let session = session.clone();
            async move { session.login(client_credentials()).await }
        });
        tokio::task::yield_now().await;
        assert!(session.is_login_pending());

        let second = session
            .login(Credentials::Cafeteria { username: "k".to_string(), password: "p".to_string() })
            .await;
        assert_eq!(second, Err(SessionError::LoginInProgress));

        let user = first.await.unwrap().unwrap();
        assert_eq!(session.current(), Some(user));
    }

    #[test]
    fn test_corrupt_record_starts_signed_out() {
        let store = Arc::new(MemoryStore::new());
        store.put(SESSION_KEY, "not json").unwrap();
        let session = Session::restore(store, Duration::ZERO).unwrap();
        assert!(session.current().is_none());
    }
}
