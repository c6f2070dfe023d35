use super::{
    author::AuthorRepository, book::BookRepository, game::GameRepository,
    genre::GenreRepository, movie::MovieRepository, music::MusicRepository,
    picture::PictureRepository, program::ProgramRepository, show::ShowRepository,
};
use crate::models::statistics::Statistics;
use anyhow::Result;
use sea_orm::DatabaseConnection;

/// Aggregates counts across every catalog table.
pub struct StatisticsRepository {
    conn: DatabaseConnection,
}

impl StatisticsRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn collect(&self) -> Result<Statistics> {
        let conn = &self.conn;

        Ok(Statistics {
            movies: MovieRepository::new(conn.clone()).statistics().await?,
            shows: ShowRepository::new(conn.clone()).statistics().await?,
            books: BookRepository::new(conn.clone()).count().await?,
            games: GameRepository::new(conn.clone()).statistics().await?,
            music: MusicRepository::new(conn.clone()).statistics().await?,
            programs: ProgramRepository::new(conn.clone()).statistics().await?,
            genres: GenreRepository::new(conn.clone()).count().await?,
            authors: AuthorRepository::new(conn.clone()).count().await?,
            pictures: PictureRepository::new(conn.clone()).count().await?,
        })
    }
}
