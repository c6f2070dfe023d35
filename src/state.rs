use std::sync::Arc;

use crate::config::Config;
use crate::db::Store;
use crate::services::{
    AccountService, AuthorService, BookService, GameService, GenreService, MovieService,
    MusicService, PictureService, ProgramService, SeaOrmAccountService, SeaOrmAuthorService,
    SeaOrmBookService, SeaOrmGameService, SeaOrmGenreService, SeaOrmMovieService,
    SeaOrmMusicService, SeaOrmPictureService, SeaOrmProgramService, SeaOrmShowService,
    ShowService,
};

/// Everything the HTTP layer shares: configuration, the store and one
/// instance of every domain service.
#[derive(Clone)]
pub struct SharedState {
    pub config: Arc<Config>,

    pub store: Store,

    pub account_service: Arc<dyn AccountService>,

    pub genre_service: Arc<dyn GenreService>,

    pub author_service: Arc<dyn AuthorService>,

    pub picture_service: Arc<dyn PictureService>,

    pub movie_service: Arc<dyn MovieService>,

    pub show_service: Arc<dyn ShowService>,

    pub book_service: Arc<dyn BookService>,

    pub game_service: Arc<dyn GameService>,

    pub music_service: Arc<dyn MusicService>,

    pub program_service: Arc<dyn ProgramService>,
}

impl SharedState {
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let store = Store::with_pool_options(
            &config.general.database_path,
            config.general.max_db_connections,
            config.general.min_db_connections,
        )
        .await?;

        Ok(Self::with_store(config, store))
    }

    #[must_use]
    pub fn with_store(config: Config, store: Store) -> Self {
        let account_service = Arc::new(SeaOrmAccountService::new(
            store.clone(),
            config.security.clone(),
        )) as Arc<dyn AccountService>;

        Self {
            account_service,
            genre_service: Arc::new(SeaOrmGenreService::new(store.clone())),
            author_service: Arc::new(SeaOrmAuthorService::new(store.clone())),
            picture_service: Arc::new(SeaOrmPictureService::new(store.clone())),
            movie_service: Arc::new(SeaOrmMovieService::new(store.clone())),
            show_service: Arc::new(SeaOrmShowService::new(store.clone())),
            book_service: Arc::new(SeaOrmBookService::new(store.clone())),
            game_service: Arc::new(SeaOrmGameService::new(store.clone())),
            music_service: Arc::new(SeaOrmMusicService::new(store.clone())),
            program_service: Arc::new(SeaOrmProgramService::new(store.clone())),
            config: Arc::new(config),
            store,
        }
    }
}
