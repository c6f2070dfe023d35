//! `SeaORM` implementation of the `AccountService` trait.

use crate::config::SecurityConfig;
use crate::db::Store;
use crate::domain::{Filter, Page, Role};
use crate::models::account::{Account, NewAccount};
use crate::services::account_service::{AccountError, AccountService, LoginResult};
use async_trait::async_trait;
use tracing::info;

pub struct SeaOrmAccountService {
    store: Store,
    security: SecurityConfig,
}

impl SeaOrmAccountService {
    #[must_use]
    pub const fn new(store: Store, security: SecurityConfig) -> Self {
        Self { store, security }
    }

    fn check_password(&self, password: &str) -> Result<(), AccountError> {
        let min = self.security.min_password_length;
        if password.chars().count() < min {
            return Err(AccountError::Validation(format!(
                "Password must be at least {min} characters"
            )));
        }
        Ok(())
    }
}

fn check_roles(roles: &[Role]) -> Result<(), AccountError> {
    if roles.is_empty() {
        return Err(AccountError::Validation(
            "An account needs at least one role".to_string(),
        ));
    }
    Ok(())
}

#[async_trait]
impl AccountService for SeaOrmAccountService {
    async fn login(&self, username: &str, password: &str) -> Result<LoginResult, AccountError> {
        let is_valid = self
            .store
            .verify_account_password(username, password)
            .await?;

        if !is_valid {
            return Err(AccountError::InvalidCredentials);
        }

        let account = self
            .store
            .get_account_by_username(username)
            .await?
            .ok_or(AccountError::InvalidCredentials)?;

        Ok(LoginResult {
            username: account.username,
            api_key: account.api_key,
        })
    }

    async fn authenticate_api_key(&self, api_key: &str) -> Result<Option<Account>, AccountError> {
        Ok(self.store.verify_api_key(api_key).await?)
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<Account>, AccountError> {
        Ok(self.store.get_account_by_username(username).await?)
    }

    async fn change_password(
        &self,
        username: &str,
        current_password: &str,
        new_password: &str,
    ) -> Result<(), AccountError> {
        self.check_password(new_password)?;

        if current_password == new_password {
            return Err(AccountError::Validation(
                "New password must be different from current password".to_string(),
            ));
        }

        let is_valid = self
            .store
            .verify_account_password(username, current_password)
            .await?;

        if !is_valid {
            return Err(AccountError::Validation(
                "Current password is incorrect".to_string(),
            ));
        }

        self.store
            .update_account_password(username, new_password, &self.security)
            .await?;

        info!(username, "Password changed");
        Ok(())
    }

    async fn regenerate_api_key(&self, username: &str) -> Result<String, AccountError> {
        let key = self.store.regenerate_account_api_key(username).await?;
        info!(username, "API key regenerated");
        Ok(key)
    }

    async fn list(&self, filter: &Filter) -> Result<Page<Account>, AccountError> {
        Ok(self.store.accounts().list(filter).await?)
    }

    async fn get(&self, uuid: &str) -> Result<Account, AccountError> {
        self.store
            .accounts()
            .get_by_uuid(uuid)
            .await?
            .ok_or_else(|| AccountError::NotFound(uuid.to_string()))
    }

    async fn create(&self, account: NewAccount) -> Result<Account, AccountError> {
        let username = account.username.trim();
        if username.is_empty() {
            return Err(AccountError::Validation(
                "Username must not be blank".to_string(),
            ));
        }
        self.check_password(&account.password)?;
        check_roles(&account.roles)?;

        let repo = self.store.accounts();
        if repo.username_exists(username).await? {
            return Err(AccountError::Conflict(format!(
                "Username '{username}' is already taken"
            )));
        }

        let account = NewAccount {
            username: username.to_string(),
            ..account
        };
        let created = repo.create(&account, &self.security).await?;
        info!(username = %created.username, uuid = %created.uuid, "Account created");
        Ok(created)
    }

    async fn update_roles(&self, uuid: &str, roles: Vec<Role>) -> Result<Account, AccountError> {
        check_roles(&roles)?;

        self.store
            .accounts()
            .update_roles(uuid, &roles)
            .await?
            .ok_or_else(|| AccountError::NotFound(uuid.to_string()))
    }

    async fn delete(&self, actor: &Account, uuid: &str) -> Result<(), AccountError> {
        if actor.uuid == uuid {
            return Err(AccountError::Validation(
                "You cannot delete your own account".to_string(),
            ));
        }

        if !self.store.accounts().delete(uuid).await? {
            return Err(AccountError::NotFound(uuid.to_string()));
        }

        info!(uuid, "Account deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Paging;

    async fn service() -> SeaOrmAccountService {
        let store = Store::new("sqlite::memory:").await.unwrap();
        SeaOrmAccountService::new(store, SecurityConfig::default())
    }

    fn new_account(username: &str) -> NewAccount {
        NewAccount {
            username: username.to_string(),
            password: "correct horse".to_string(),
            roles: vec![Role::User],
        }
    }

    #[tokio::test]
    async fn login_with_seeded_admin() {
        let service = service().await;

        let result = service.login("admin", "password").await.unwrap();
        assert_eq!(result.username, "admin");

        let err = service.login("admin", "wrong").await.unwrap_err();
        assert!(matches!(err, AccountError::InvalidCredentials));

        let err = service.login("nobody", "password").await.unwrap_err();
        assert!(matches!(err, AccountError::InvalidCredentials));
    }

    #[tokio::test]
    async fn create_rejects_duplicates_and_short_passwords() {
        let service = service().await;

        service.create(new_account("reader")).await.unwrap();
        let err = service.create(new_account("reader")).await.unwrap_err();
        assert!(matches!(err, AccountError::Conflict(_)));

        let mut short = new_account("short");
        short.password = "abc".to_string();
        let err = service.create(short).await.unwrap_err();
        assert!(matches!(err, AccountError::Validation(_)));
    }

    #[tokio::test]
    async fn change_password_requires_current_one() {
        let service = service().await;
        service.create(new_account("reader")).await.unwrap();

        let err = service
            .change_password("reader", "wrong password", "new password")
            .await
            .unwrap_err();
        assert!(matches!(err, AccountError::Validation(_)));

        service
            .change_password("reader", "correct horse", "battery staple")
            .await
            .unwrap();
        assert!(service.login("reader", "battery staple").await.is_ok());
    }

    #[tokio::test]
    async fn cannot_delete_self() {
        let service = service().await;
        let admin = service.find_by_username("admin").await.unwrap().unwrap();
        let reader = service.create(new_account("reader")).await.unwrap();

        let err = service.delete(&admin, &admin.uuid).await.unwrap_err();
        assert!(matches!(err, AccountError::Validation(_)));

        service.delete(&admin, &reader.uuid).await.unwrap();
        let err = service.get(&reader.uuid).await.unwrap_err();
        assert!(matches!(err, AccountError::NotFound(_)));

        let page = service
            .list(&Filter {
                name: None,
                paging: Paging::new(1, 20),
            })
            .await
            .unwrap();
        assert_eq!(page.total, 1);
    }

    #[tokio::test]
    async fn update_roles_requires_one_role() {
        let service = service().await;
        let reader = service.create(new_account("reader")).await.unwrap();

        let err = service.update_roles(&reader.uuid, Vec::new()).await.unwrap_err();
        assert!(matches!(err, AccountError::Validation(_)));

        let updated = service
            .update_roles(&reader.uuid, vec![Role::Admin, Role::User])
            .await
            .unwrap();
        assert!(updated.is_admin());
    }
}
