use crate::config::SecurityConfig;
use crate::models::account::Account;
use anyhow::Result;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Statement};
use std::path::Path;
use std::time::Duration;
use tracing::info;

pub mod migrator;
pub mod repositories;

pub use migrator::DEFAULT_API_KEY;
pub use repositories::{
    account::AccountRepository, author::AuthorRepository, book::BookRepository,
    game::GameRepository, genre::GenreRepository, movie::MovieRepository,
    music::MusicRepository, picture::PictureRepository, program::ProgramRepository,
    register::RegisterRepository, show::ShowRepository, statistics::StatisticsRepository,
};

#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

impl Store {
    pub async fn new(db_url: &str) -> Result<Self> {
        Self::with_pool_options(db_url, 5, 1).await
    }

    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        use sea_orm_migration::MigratorTrait;

        let in_memory = db_url.contains(":memory:");

        if !in_memory {
            let path_str = db_url.trim_start_matches("sqlite:").trim_start_matches("//");
            if let Some(parent) = Path::new(path_str).parent() {
                tokio::fs::create_dir_all(parent).await.ok();
            }
            if !Path::new(path_str).exists() {
                std::fs::File::create(path_str)?;
            }
        }

        let mut opt = ConnectOptions::new(db_url.to_string());
        if in_memory {
            // Every pooled connection would open its own empty database.
            opt.max_connections(1).min_connections(1);
        } else {
            opt.max_connections(max_connections)
                .min_connections(min_connections)
                .idle_timeout(Duration::from_secs(300))
                .max_lifetime(Duration::from_secs(600));
        }
        opt.connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .sqlx_logging(false);

        let conn = Database::connect(opt).await?;

        migrator::Migrator::up(&conn, None).await?;

        info!(
            "Database connected & migrations applied (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(Self { conn })
    }

    pub async fn ping(&self) -> Result<()> {
        let backend = self.conn.get_database_backend();
        self.conn
            .query_one(Statement::from_string(backend, "SELECT 1".to_string()))
            .await?;
        Ok(())
    }

    #[must_use]
    pub fn accounts(&self) -> AccountRepository {
        AccountRepository::new(self.conn.clone())
    }

    #[must_use]
    pub fn registers(&self) -> RegisterRepository {
        RegisterRepository::new(self.conn.clone())
    }

    #[must_use]
    pub fn genres(&self) -> GenreRepository {
        GenreRepository::new(self.conn.clone())
    }

    #[must_use]
    pub fn authors(&self) -> AuthorRepository {
        AuthorRepository::new(self.conn.clone())
    }

    #[must_use]
    pub fn pictures(&self) -> PictureRepository {
        PictureRepository::new(self.conn.clone())
    }

    #[must_use]
    pub fn movies(&self) -> MovieRepository {
        MovieRepository::new(self.conn.clone())
    }

    #[must_use]
    pub fn shows(&self) -> ShowRepository {
        ShowRepository::new(self.conn.clone())
    }

    #[must_use]
    pub fn books(&self) -> BookRepository {
        BookRepository::new(self.conn.clone())
    }

    #[must_use]
    pub fn games(&self) -> GameRepository {
        GameRepository::new(self.conn.clone())
    }

    #[must_use]
    pub fn music(&self) -> MusicRepository {
        MusicRepository::new(self.conn.clone())
    }

    #[must_use]
    pub fn programs(&self) -> ProgramRepository {
        ProgramRepository::new(self.conn.clone())
    }

    #[must_use]
    pub fn statistics(&self) -> StatisticsRepository {
        StatisticsRepository::new(self.conn.clone())
    }

    pub async fn verify_account_password(&self, username: &str, password: &str) -> Result<bool> {
        self.accounts().verify_password(username, password).await
    }

    pub async fn get_account_by_username(&self, username: &str) -> Result<Option<Account>> {
        self.accounts().get_by_username(username).await
    }

    pub async fn verify_api_key(&self, api_key: &str) -> Result<Option<Account>> {
        self.accounts().verify_api_key(api_key).await
    }

    pub async fn update_account_password(
        &self,
        username: &str,
        new_password: &str,
        config: &SecurityConfig,
    ) -> Result<()> {
        self.accounts()
            .update_password(username, new_password, config)
            .await
    }

    pub async fn regenerate_account_api_key(&self, username: &str) -> Result<String> {
        self.accounts().regenerate_api_key(username).await
    }
}
