use super::{fetch_page, now};
use crate::config::SecurityConfig;
use crate::domain::{Filter, Page, Role};
use crate::entities::{accounts, prelude::*};
use crate::models::account::{Account, NewAccount, format_roles, parse_roles};
use anyhow::{Context, Result};
use argon2::{
    Algorithm, Argon2, Params, Version,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};
use tokio::task;

impl From<accounts::Model> for Account {
    fn from(model: accounts::Model) -> Self {
        Self {
            id: model.id,
            uuid: model.uuid,
            username: model.username,
            api_key: model.api_key,
            roles: parse_roles(&model.roles),
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

pub struct AccountRepository {
    conn: DatabaseConnection,
}

impl AccountRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn list(&self, filter: &Filter) -> Result<Page<Account>> {
        let mut query = Accounts::find()
            .order_by_asc(accounts::Column::Username)
            .order_by_asc(accounts::Column::Id);

        if let Some(name) = &filter.name {
            query = query.filter(accounts::Column::Username.contains(name));
        }

        let page = fetch_page(&self.conn, query, filter.paging).await?;
        Ok(page.map(Account::from))
    }

    /// Get account by username
    pub async fn get_by_username(&self, username: &str) -> Result<Option<Account>> {
        let account = Accounts::find()
            .filter(accounts::Column::Username.eq(username))
            .one(&self.conn)
            .await
            .context("Failed to query account by username")?;

        Ok(account.map(Account::from))
    }

    /// Get account by its public identifier
    pub async fn get_by_uuid(&self, uuid: &str) -> Result<Option<Account>> {
        let account = Accounts::find()
            .filter(accounts::Column::Uuid.eq(uuid))
            .one(&self.conn)
            .await
            .context("Failed to query account by UUID")?;

        Ok(account.map(Account::from))
    }

    /// Verify password for an account.
    /// Argon2 verification runs on the blocking pool.
    pub async fn verify_password(&self, username: &str, password: &str) -> Result<bool> {
        let account = Accounts::find()
            .filter(accounts::Column::Username.eq(username))
            .one(&self.conn)
            .await
            .context("Failed to query account for password verification")?;

        let Some(account) = account else {
            return Ok(false);
        };

        let password_hash = account.password_hash;
        let password = password.to_string();

        let is_valid = task::spawn_blocking(move || {
            let parsed_hash = PasswordHash::new(&password_hash)
                .map_err(|e| anyhow::anyhow!("Invalid password hash format: {e}"))?;

            Ok::<bool, anyhow::Error>(
                Argon2::default()
                    .verify_password(password.as_bytes(), &parsed_hash)
                    .is_ok(),
            )
        })
        .await
        .context("Password verification task panicked")??;

        Ok(is_valid)
    }

    pub async fn create(&self, account: &NewAccount, config: &SecurityConfig) -> Result<Account> {
        let password = account.password.clone();
        let config = config.clone();
        let password_hash = task::spawn_blocking(move || hash_password(&password, &config))
            .await
            .context("Password hashing task panicked")??;

        let timestamp = now();
        let model = accounts::ActiveModel {
            uuid: Set(uuid::Uuid::new_v4().to_string()),
            username: Set(account.username.clone()),
            password_hash: Set(password_hash),
            api_key: Set(generate_api_key()),
            roles: Set(format_roles(&account.roles)),
            created_at: Set(timestamp.clone()),
            updated_at: Set(timestamp),
            ..Default::default()
        }
        .insert(&self.conn)
        .await
        .context("Failed to insert account")?;

        Ok(model.into())
    }

    /// Hashes and stores a new password for the account.
    pub async fn update_password(
        &self,
        username: &str,
        new_password: &str,
        config: &SecurityConfig,
    ) -> Result<()> {
        let account = Accounts::find()
            .filter(accounts::Column::Username.eq(username))
            .one(&self.conn)
            .await
            .context("Failed to query account for password update")?
            .ok_or_else(|| anyhow::anyhow!("Account not found: {username}"))?;

        let password = new_password.to_string();
        let config = config.clone();
        let new_hash = task::spawn_blocking(move || hash_password(&password, &config))
            .await
            .context("Password hashing task panicked")??;

        let mut active: accounts::ActiveModel = account.into();
        active.password_hash = Set(new_hash);
        active.updated_at = Set(now());
        active.update(&self.conn).await?;

        Ok(())
    }

    /// Verify API key and return the associated account
    pub async fn verify_api_key(&self, api_key: &str) -> Result<Option<Account>> {
        let account = Accounts::find()
            .filter(accounts::Column::ApiKey.eq(api_key))
            .one(&self.conn)
            .await
            .context("Failed to query account by API key")?;

        Ok(account.map(Account::from))
    }

    /// Regenerate API key for an account
    pub async fn regenerate_api_key(&self, username: &str) -> Result<String> {
        let account = Accounts::find()
            .filter(accounts::Column::Username.eq(username))
            .one(&self.conn)
            .await
            .context("Failed to query account for API key regeneration")?
            .ok_or_else(|| anyhow::anyhow!("Account not found: {username}"))?;

        let new_api_key = generate_api_key();

        let mut active: accounts::ActiveModel = account.into();
        active.api_key = Set(new_api_key.clone());
        active.updated_at = Set(now());
        active.update(&self.conn).await?;

        Ok(new_api_key)
    }

    pub async fn update_roles(&self, uuid: &str, roles: &[Role]) -> Result<Option<Account>> {
        let Some(account) = Accounts::find()
            .filter(accounts::Column::Uuid.eq(uuid))
            .one(&self.conn)
            .await?
        else {
            return Ok(None);
        };

        let mut active: accounts::ActiveModel = account.into();
        active.roles = Set(format_roles(roles));
        active.updated_at = Set(now());
        let model = active.update(&self.conn).await?;

        Ok(Some(model.into()))
    }

    pub async fn delete(&self, uuid: &str) -> Result<bool> {
        let result = Accounts::delete_many()
            .filter(accounts::Column::Uuid.eq(uuid))
            .exec(&self.conn)
            .await?;

        Ok(result.rows_affected > 0)
    }

    pub async fn username_exists(&self, username: &str) -> Result<bool> {
        let count = Accounts::find()
            .filter(accounts::Column::Username.eq(username))
            .count(&self.conn)
            .await?;

        Ok(count > 0)
    }
}

/// Hash a password using Argon2id with the configured cost parameters.
pub fn hash_password(password: &str, config: &SecurityConfig) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);

    let params = Params::new(
        config.argon2_memory_cost_kib,
        config.argon2_time_cost,
        config.argon2_parallelism,
        None,
    )
    .map_err(|e| anyhow::anyhow!("Invalid Argon2 params: {e}"))?;
    let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);

    let hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!("Failed to hash password: {e}"))?;

    Ok(hash.to_string())
}

/// Generate a random API key (64 character hex string)
#[must_use]
pub fn generate_api_key() -> String {
    use rand::Rng;

    let mut rng = rand::rng();
    let bytes: [u8; 32] = rng.random();

    bytes.iter().fold(String::with_capacity(64), |mut acc, b| {
        use std::fmt::Write;
        let _ = write!(acc, "{b:02x}");
        acc
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Store;

    fn cheap_security() -> SecurityConfig {
        SecurityConfig {
            argon2_memory_cost_kib: 1024,
            argon2_time_cost: 1,
            argon2_parallelism: 1,
            min_password_length: 8,
        }
    }

    #[test]
    fn api_keys_are_hex_and_unique() {
        let a = generate_api_key();
        let b = generate_api_key();
        assert_eq!(a.len(), 64);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(a, b);
    }

    #[test]
    fn hash_uses_argon2id() {
        let hash = hash_password("secret-password", &cheap_security()).unwrap();
        assert!(hash.starts_with("$argon2id$"));
    }

    #[tokio::test]
    async fn create_and_verify_account() {
        let store = Store::new("sqlite::memory:").await.unwrap();
        let repo = store.accounts();

        let account = repo
            .create(
                &NewAccount {
                    username: "reader".to_string(),
                    password: "reader-password".to_string(),
                    roles: vec![Role::User],
                },
                &cheap_security(),
            )
            .await
            .unwrap();

        assert!(!account.is_admin());
        assert!(repo.verify_password("reader", "reader-password").await.unwrap());
        assert!(!repo.verify_password("reader", "wrong").await.unwrap());
        assert!(!repo.verify_password("ghost", "reader-password").await.unwrap());

        let found = repo.verify_api_key(&account.api_key).await.unwrap().unwrap();
        assert_eq!(found.uuid, account.uuid);
    }

    #[tokio::test]
    async fn seeded_admin_can_log_in() {
        let store = Store::new("sqlite::memory:").await.unwrap();
        let repo = store.accounts();

        assert!(repo.verify_password("admin", "password").await.unwrap());
        let admin = repo.get_by_username("admin").await.unwrap().unwrap();
        assert!(admin.is_admin());
    }
}
