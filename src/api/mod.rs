use axum::{
    Router,
    http::HeaderValue,
    middleware,
    routing::{get, post, put},
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer};

use crate::config::Config;
use crate::services::{
    AccountService, AuthorService, BookService, GameService, GenreService, MovieService,
    MusicService, PictureService, ProgramService, ShowService,
};
use crate::state::SharedState;

mod accounts;
pub mod auth;
mod authors;
mod books;
mod error;
mod games;
mod genres;
mod movies;
mod music;
mod observability;
mod pictures;
mod programs;
mod registers;
mod shows;
mod statistics;
mod system;
mod types;
mod validation;

pub use error::ApiError;
pub use types::*;

#[derive(Clone)]
pub struct AppState {
    pub shared: Arc<SharedState>,

    pub start_time: std::time::Instant,

    pub prometheus_handle: Option<PrometheusHandle>,
}

impl AppState {
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.shared.config
    }

    #[must_use]
    pub fn store(&self) -> &crate::db::Store {
        &self.shared.store
    }

    #[must_use]
    pub fn accounts(&self) -> &Arc<dyn AccountService> {
        &self.shared.account_service
    }

    #[must_use]
    pub fn genres(&self) -> &Arc<dyn GenreService> {
        &self.shared.genre_service
    }

    #[must_use]
    pub fn authors(&self) -> &Arc<dyn AuthorService> {
        &self.shared.author_service
    }

    #[must_use]
    pub fn pictures(&self) -> &Arc<dyn PictureService> {
        &self.shared.picture_service
    }

    #[must_use]
    pub fn movies(&self) -> &Arc<dyn MovieService> {
        &self.shared.movie_service
    }

    #[must_use]
    pub fn shows(&self) -> &Arc<dyn ShowService> {
        &self.shared.show_service
    }

    #[must_use]
    pub fn books(&self) -> &Arc<dyn BookService> {
        &self.shared.book_service
    }

    #[must_use]
    pub fn games(&self) -> &Arc<dyn GameService> {
        &self.shared.game_service
    }

    #[must_use]
    pub fn music(&self) -> &Arc<dyn MusicService> {
        &self.shared.music_service
    }

    #[must_use]
    pub fn programs(&self) -> &Arc<dyn ProgramService> {
        &self.shared.program_service
    }
}

#[must_use]
pub fn create_app_state(
    shared: Arc<SharedState>,
    prometheus_handle: Option<PrometheusHandle>,
) -> Arc<AppState> {
    Arc::new(AppState {
        shared,
        start_time: std::time::Instant::now(),
        prometheus_handle,
    })
}

pub async fn create_app_state_from_config(
    config: Config,
    prometheus_handle: Option<PrometheusHandle>,
) -> anyhow::Result<Arc<AppState>> {
    let shared = Arc::new(SharedState::new(config).await?);
    Ok(create_app_state(shared, prometheus_handle))
}

pub async fn router(state: Arc<AppState>) -> Router {
    let server = state.config().server.clone();

    let session_store = MemoryStore::default();
    let session_layer = SessionManagerLayer::new(session_store)
        .with_secure(server.secure_cookies)
        .with_same_site(tower_sessions::cookie::SameSite::Lax)
        .with_expiry(Expiry::OnInactivity(time::Duration::minutes(
            server.session_expiry_minutes,
        )));

    let api_router = Router::new()
        .merge(create_protected_router(state.clone()))
        .route("/auth/login", post(auth::login))
        .route("/auth/logout", post(auth::logout))
        .route("/health", get(system::health))
        .layer(session_layer)
        .with_state(state);

    let cors_layer = if server.cors_allowed_origins.iter().any(|o| o == "*") {
        CorsLayer::new().allow_origin(Any)
    } else {
        let origins: Vec<HeaderValue> = server
            .cors_allowed_origins
            .iter()
            .filter_map(|s| s.parse().ok())
            .collect();
        CorsLayer::new().allow_origin(origins)
    };

    Router::new()
        .nest("/api", api_router)
        .layer(cors_layer.allow_methods(Any).allow_headers(Any))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(observability::logging_middleware))
}

/// Routes open to any authenticated account.
fn create_read_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/auth/me", get(auth::get_current_account))
        .route("/auth/password", put(auth::change_password))
        .route("/auth/api-key/regenerate", post(auth::regenerate_api_key))
        .route("/registers", get(registers::list_registers))
        .route("/registers/{register}", get(registers::list_items))
        .route("/registers/{register}/{code}", get(registers::get_item))
        .route("/genres", get(genres::list_genres))
        .route("/genres/{id}", get(genres::get_genre))
        .route("/authors", get(authors::list_authors))
        .route("/authors/{id}", get(authors::get_author))
        .route("/pictures", get(pictures::list_pictures))
        .route("/pictures/{id}", get(pictures::get_picture))
        .route("/movies", get(movies::list_movies))
        .route("/movies/{id}", get(movies::get_movie))
        .route("/shows", get(shows::list_shows))
        .route("/shows/{id}", get(shows::get_show))
        .route("/shows/{id}/seasons", get(shows::list_seasons))
        .route("/shows/{id}/seasons/{season_id}", get(shows::get_season))
        .route("/books", get(books::list_books))
        .route("/books/{id}", get(books::get_book))
        .route("/games", get(games::list_games))
        .route("/games/{id}", get(games::get_game))
        .route("/games/{id}/cheat", get(games::get_cheat))
        .route("/music", get(music::list_music))
        .route("/music/{id}", get(music::get_music_item))
        .route("/programs", get(programs::list_programs))
        .route("/programs/{id}", get(programs::get_program))
        .route("/statistics", get(statistics::get_statistics))
        .route("/system/status", get(system::get_status))
        .route("/metrics", get(observability::get_metrics))
}

/// Catalog writes and account administration.
fn create_admin_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/accounts", get(accounts::list_accounts).post(accounts::create_account))
        .route(
            "/accounts/{uuid}",
            get(accounts::get_account).delete(accounts::delete_account),
        )
        .route("/accounts/{uuid}/roles", put(accounts::update_roles))
        .route("/genres", post(genres::create_genre))
        .route(
            "/genres/{id}",
            put(genres::update_genre).delete(genres::delete_genre),
        )
        .route("/genres/{id}/duplicate", post(genres::duplicate_genre))
        .route("/authors", post(authors::create_author))
        .route(
            "/authors/{id}",
            put(authors::update_author).delete(authors::delete_author),
        )
        .route("/authors/{id}/duplicate", post(authors::duplicate_author))
        .route("/pictures", post(pictures::create_picture))
        .route(
            "/pictures/{id}",
            put(pictures::update_picture).delete(pictures::delete_picture),
        )
        .route("/movies", post(movies::create_movie))
        .route(
            "/movies/{id}",
            put(movies::update_movie).delete(movies::delete_movie),
        )
        .route("/movies/{id}/duplicate", post(movies::duplicate_movie))
        .route("/shows", post(shows::create_show))
        .route(
            "/shows/{id}",
            put(shows::update_show).delete(shows::delete_show),
        )
        .route("/shows/{id}/duplicate", post(shows::duplicate_show))
        .route("/shows/{id}/seasons", post(shows::add_season))
        .route(
            "/shows/{id}/seasons/{season_id}",
            put(shows::update_season).delete(shows::remove_season),
        )
        .route("/books", post(books::create_book))
        .route(
            "/books/{id}",
            put(books::update_book).delete(books::delete_book),
        )
        .route("/books/{id}/duplicate", post(books::duplicate_book))
        .route("/games", post(games::create_game))
        .route(
            "/games/{id}",
            put(games::update_game).delete(games::delete_game),
        )
        .route("/games/{id}/duplicate", post(games::duplicate_game))
        .route(
            "/games/{id}/cheat",
            put(games::put_cheat).delete(games::delete_cheat),
        )
        .route("/music", post(music::create_music_item))
        .route(
            "/music/{id}",
            put(music::update_music_item).delete(music::delete_music_item),
        )
        .route("/music/{id}/duplicate", post(music::duplicate_music_item))
        .route("/programs", post(programs::create_program))
        .route(
            "/programs/{id}",
            put(programs::update_program).delete(programs::delete_program),
        )
        .route("/programs/{id}/duplicate", post(programs::duplicate_program))
        .route_layer(middleware::from_fn(auth::require_admin))
}

fn create_protected_router(state: Arc<AppState>) -> Router<Arc<AppState>> {
    create_read_router()
        .merge(create_admin_router())
        .route_layer(middleware::from_fn_with_state(state, auth::auth_middleware))
}
