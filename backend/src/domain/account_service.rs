//! Account domain service: registration, login, and credential lifecycle.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::auth::LoginCredentials;
use crate::domain::error::Error;
use crate::domain::password::CredentialHasher;
use crate::domain::ports::{
    AccountCommand, ChangePasswordRequest, LoginService, NewUserRecord, RegisterRequest,
    UserPersistenceError, UserRepository,
};
use crate::domain::user::{User, UserId};

/// Generic credential failure message; never distinguishes "no such user"
/// from "wrong password".
const INVALID_CREDENTIALS: &str = "invalid email or password";

/// Account service implementing the [`LoginService`] and [`AccountCommand`]
/// driving ports over a user repository.
#[derive(Clone)]
pub struct AccountService<U> {
    users: Arc<U>,
    hasher: CredentialHasher,
}

impl<U> AccountService<U> {
    /// Create a new service backed by the given user repository.
    pub fn new(users: Arc<U>) -> Self {
        Self {
            users,
            hasher: CredentialHasher::new(),
        }
    }
}

impl<U> AccountService<U>
where
    U: UserRepository,
{
    fn map_user_error(error: UserPersistenceError) -> Error {
        match error {
            UserPersistenceError::Connection { message } => Error::service_unavailable(message),
            UserPersistenceError::Query { message } => Error::internal(message),
            UserPersistenceError::DuplicateEmail { .. } => {
                Error::conflict("an account with this email already exists")
            }
        }
    }
}

#[async_trait]
impl<U> LoginService for AccountService<U>
where
    U: UserRepository,
{
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<UserId, Error> {
        let user = self
            .users
            .find_by_email(credentials.email())
            .await
            .map_err(Self::map_user_error)?;

        match user {
            Some(user) if self.hasher.verify(credentials.password(), user.password_hash()) => {
                Ok(user.id())
            }
            _ => Err(Error::unauthorized(INVALID_CREDENTIALS)),
        }
    }
}

#[async_trait]
impl<U> AccountCommand for AccountService<U>
where
    U: UserRepository,
{
    async fn register(&self, request: RegisterRequest) -> Result<User, Error> {
        let password_hash = self.hasher.hash(&request.password)?;
        let record = NewUserRecord {
            name: request.name,
            email: request.email,
            password_hash,
        };
        self.users
            .create(&record)
            .await
            .map_err(Self::map_user_error)
    }

    async fn rename(&self, user: UserId, name: String) -> Result<User, Error> {
        self.users
            .update_name(user, &name)
            .await
            .map_err(Self::map_user_error)?
            .ok_or_else(|| Error::not_found("account not found"))
    }

    async fn change_password(
        &self,
        user: UserId,
        request: ChangePasswordRequest,
    ) -> Result<(), Error> {
        let current = self
            .users
            .find_by_id(user)
            .await
            .map_err(Self::map_user_error)?
            .ok_or_else(|| Error::not_found("account not found"))?;

        if !self
            .hasher
            .verify(&request.old_password, current.password_hash())
        {
            return Err(Error::unauthorized("current password is incorrect"));
        }

        let password_hash = self.hasher.hash(&request.new_password)?;
        let updated = self
            .users
            .update_password_hash(user, &password_hash)
            .await
            .map_err(Self::map_user_error)?;
        if !updated {
            return Err(Error::not_found("account not found"));
        }
        Ok(())
    }

    async fn delete_account(&self, user: UserId) -> Result<bool, Error> {
        self.users.delete(user).await.map_err(Self::map_user_error)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for account registration and credential checks.
    use std::sync::Mutex;

    use rstest::rstest;
    use zeroize::Zeroizing;

    use super::*;
    use crate::domain::error::ErrorCode;
    use crate::domain::user::EmailAddress;

    #[derive(Default)]
    struct StubState {
        users: Vec<User>,
        next_id: i32,
        fail_with: Option<UserPersistenceError>,
    }

    #[derive(Default)]
    struct StubUserRepository {
        state: Mutex<StubState>,
    }

    impl StubUserRepository {
        fn set_failure(&self, failure: UserPersistenceError) {
            self.state.lock().expect("state lock").fail_with = Some(failure);
        }

        fn user_count(&self) -> usize {
            self.state.lock().expect("state lock").users.len()
        }

        fn stored_hash(&self, id: UserId) -> Option<String> {
            self.state
                .lock()
                .expect("state lock")
                .users
                .iter()
                .find(|user| user.id() == id)
                .map(|user| user.password_hash().to_owned())
        }
    }

    #[async_trait]
    impl UserRepository for StubUserRepository {
        async fn create(&self, record: &NewUserRecord) -> Result<User, UserPersistenceError> {
            let mut state = self.state.lock().expect("state lock");
            if let Some(failure) = state.fail_with.clone() {
                return Err(failure);
            }
            if state
                .users
                .iter()
                .any(|user| user.email() == &record.email)
            {
                return Err(UserPersistenceError::duplicate_email(
                    record.email.as_ref(),
                ));
            }
            state.next_id += 1;
            let user = User::new(
                UserId::new(state.next_id),
                record.name.clone(),
                record.email.clone(),
                record.password_hash.clone(),
            );
            state.users.push(user.clone());
            Ok(user)
        }

        async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserPersistenceError> {
            let state = self.state.lock().expect("state lock");
            if let Some(failure) = state.fail_with.clone() {
                return Err(failure);
            }
            Ok(state.users.iter().find(|user| user.id() == id).cloned())
        }

        async fn find_by_email(
            &self,
            email: &EmailAddress,
        ) -> Result<Option<User>, UserPersistenceError> {
            let state = self.state.lock().expect("state lock");
            if let Some(failure) = state.fail_with.clone() {
                return Err(failure);
            }
            Ok(state.users.iter().find(|user| user.email() == email).cloned())
        }

        async fn update_name(
            &self,
            id: UserId,
            name: &str,
        ) -> Result<Option<User>, UserPersistenceError> {
            let mut state = self.state.lock().expect("state lock");
            let Some(position) = state.users.iter().position(|user| user.id() == id) else {
                return Ok(None);
            };
            let existing = state.users.remove(position);
            let updated = User::new(
                existing.id(),
                name,
                existing.email().clone(),
                existing.password_hash(),
            );
            state.users.push(updated.clone());
            Ok(Some(updated))
        }

        async fn update_password_hash(
            &self,
            id: UserId,
            password_hash: &str,
        ) -> Result<bool, UserPersistenceError> {
            let mut state = self.state.lock().expect("state lock");
            let Some(position) = state.users.iter().position(|user| user.id() == id) else {
                return Ok(false);
            };
            let existing = state.users.remove(position);
            let updated = User::new(
                existing.id(),
                existing.name(),
                existing.email().clone(),
                password_hash,
            );
            state.users.push(updated);
            Ok(true)
        }

        async fn delete(&self, id: UserId) -> Result<bool, UserPersistenceError> {
            let mut state = self.state.lock().expect("state lock");
            let before = state.users.len();
            state.users.retain(|user| user.id() != id);
            Ok(state.users.len() < before)
        }
    }

    fn email(raw: &str) -> EmailAddress {
        EmailAddress::new(raw).expect("valid test email")
    }

    fn register_request(name: &str, raw_email: &str, password: &str) -> RegisterRequest {
        RegisterRequest {
            name: name.to_owned(),
            email: email(raw_email),
            password: Zeroizing::new(password.to_owned()),
        }
    }

    fn service(repository: Arc<StubUserRepository>) -> AccountService<StubUserRepository> {
        AccountService::new(repository)
    }

    #[tokio::test]
    async fn register_stores_a_hash_that_verifies() {
        let repository = Arc::new(StubUserRepository::default());
        let service = service(repository.clone());

        let user = service
            .register(register_request("Alice", "alice@example.com", "password123"))
            .await
            .expect("registration succeeds");

        let stored = repository.stored_hash(user.id()).expect("hash stored");
        assert_ne!(stored, "password123");
        let hasher = CredentialHasher::new();
        assert!(hasher.verify("password123", &stored));
        assert!(!hasher.verify("wrong", &stored));
    }

    #[tokio::test]
    async fn register_rejects_duplicate_email_without_creating_an_account() {
        let repository = Arc::new(StubUserRepository::default());
        let service = service(repository.clone());

        service
            .register(register_request("Alice", "alice@example.com", "password123"))
            .await
            .expect("first registration succeeds");

        let err = service
            .register(register_request("Impostor", "alice@example.com", "other"))
            .await
            .expect_err("duplicate email must fail");

        assert_eq!(err.code(), ErrorCode::Conflict);
        assert_eq!(repository.user_count(), 1);
    }

    #[tokio::test]
    async fn authenticate_accepts_the_registered_password() {
        let repository = Arc::new(StubUserRepository::default());
        let service = service(repository.clone());
        let user = service
            .register(register_request("Alice", "alice@example.com", "password123"))
            .await
            .expect("registration succeeds");

        let credentials = LoginCredentials::try_from_parts("alice@example.com", "password123")
            .expect("valid credentials");
        let authenticated = service
            .authenticate(&credentials)
            .await
            .expect("authentication succeeds");
        assert_eq!(authenticated, user.id());
    }

    #[rstest]
    #[case("alice@example.com", "wrong-password")]
    #[case("nobody@example.com", "password123")]
    #[tokio::test]
    async fn authenticate_collapses_failures_into_one_message(
        #[case] login_email: &str,
        #[case] password: &str,
    ) {
        let repository = Arc::new(StubUserRepository::default());
        let service = service(repository.clone());
        service
            .register(register_request("Alice", "alice@example.com", "password123"))
            .await
            .expect("registration succeeds");

        let credentials =
            LoginCredentials::try_from_parts(login_email, password).expect("valid credentials");
        let err = service
            .authenticate(&credentials)
            .await
            .expect_err("bad credentials must fail");

        assert_eq!(err.code(), ErrorCode::Unauthorized);
        assert_eq!(err.message(), INVALID_CREDENTIALS);
    }

    #[tokio::test]
    async fn change_password_requires_the_old_password() {
        let repository = Arc::new(StubUserRepository::default());
        let service = service(repository.clone());
        let user = service
            .register(register_request("Alice", "alice@example.com", "password123"))
            .await
            .expect("registration succeeds");

        let err = service
            .change_password(
                user.id(),
                ChangePasswordRequest {
                    old_password: Zeroizing::new("wrong".to_owned()),
                    new_password: Zeroizing::new("next-password".to_owned()),
                },
            )
            .await
            .expect_err("wrong old password must fail");
        assert_eq!(err.code(), ErrorCode::Unauthorized);

        service
            .change_password(
                user.id(),
                ChangePasswordRequest {
                    old_password: Zeroizing::new("password123".to_owned()),
                    new_password: Zeroizing::new("next-password".to_owned()),
                },
            )
            .await
            .expect("matching old password succeeds");

        let stored = repository.stored_hash(user.id()).expect("hash stored");
        assert!(CredentialHasher::new().verify("next-password", &stored));
    }

    #[tokio::test]
    async fn rename_updates_the_display_name() {
        let repository = Arc::new(StubUserRepository::default());
        let service = service(repository.clone());
        let user = service
            .register(register_request("Alice", "alice@example.com", "password123"))
            .await
            .expect("registration succeeds");

        let renamed = service
            .rename(user.id(), "Alice Liddell".to_owned())
            .await
            .expect("rename succeeds");
        assert_eq!(renamed.name(), "Alice Liddell");
    }

    #[tokio::test]
    async fn rename_of_missing_account_is_not_found() {
        let service = service(Arc::new(StubUserRepository::default()));
        let err = service
            .rename(UserId::new(41), "Nobody".to_owned())
            .await
            .expect_err("missing account must fail");
        assert_eq!(err.code(), ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn delete_account_reports_whether_a_row_existed() {
        let repository = Arc::new(StubUserRepository::default());
        let service = service(repository.clone());
        let user = service
            .register(register_request("Alice", "alice@example.com", "password123"))
            .await
            .expect("registration succeeds");

        assert!(service.delete_account(user.id()).await.expect("delete"));
        assert!(!service.delete_account(user.id()).await.expect("redelete"));
        assert_eq!(repository.user_count(), 0);
    }

    #[rstest]
    #[case(
        UserPersistenceError::connection("database unavailable"),
        ErrorCode::ServiceUnavailable
    )]
    #[case(UserPersistenceError::query("query failed"), ErrorCode::InternalError)]
    #[tokio::test]
    async fn authenticate_maps_persistence_failures(
        #[case] failure: UserPersistenceError,
        #[case] expected: ErrorCode,
    ) {
        let repository = Arc::new(StubUserRepository::default());
        repository.set_failure(failure);
        let service = service(repository);

        let credentials = LoginCredentials::try_from_parts("alice@example.com", "password123")
            .expect("valid credentials");
        let err = service
            .authenticate(&credentials)
            .await
            .expect_err("repository failures surface as domain errors");
        assert_eq!(err.code(), expected);
    }
}
