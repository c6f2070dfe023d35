pub mod catalog_service;
pub use catalog_service::CatalogError;

pub mod rules;

pub mod account_service;
pub mod account_service_impl;
pub use account_service::{AccountError, AccountService, LoginResult};
pub use account_service_impl::SeaOrmAccountService;

pub mod genre_service;
pub mod genre_service_impl;
pub use genre_service::GenreService;
pub use genre_service_impl::SeaOrmGenreService;

pub mod author_service;
pub mod author_service_impl;
pub use author_service::AuthorService;
pub use author_service_impl::SeaOrmAuthorService;

pub mod picture_service;
pub mod picture_service_impl;
pub use picture_service::PictureService;
pub use picture_service_impl::SeaOrmPictureService;

pub mod movie_service;
pub mod movie_service_impl;
pub use movie_service::MovieService;
pub use movie_service_impl::SeaOrmMovieService;

pub mod show_service;
pub mod show_service_impl;
pub use show_service::ShowService;
pub use show_service_impl::SeaOrmShowService;

pub mod book_service;
pub mod book_service_impl;
pub use book_service::BookService;
pub use book_service_impl::SeaOrmBookService;

pub mod game_service;
pub mod game_service_impl;
pub use game_service::GameService;
pub use game_service_impl::SeaOrmGameService;

pub mod music_service;
pub mod music_service_impl;
pub use music_service::MusicService;
pub use music_service_impl::SeaOrmMusicService;

pub mod program_service;
pub mod program_service_impl;
pub use program_service::ProgramService;
pub use program_service_impl::SeaOrmProgramService;
