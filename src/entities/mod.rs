pub mod prelude;

pub mod accounts;
pub mod authors;
pub mod book_authors;
pub mod book_genres;
pub mod books;
pub mod cheat_data;
pub mod cheats;
pub mod episodes;
pub mod games;
pub mod genres;
pub mod media;
pub mod movie_genres;
pub mod movies;
pub mod music;
pub mod pictures;
pub mod programs;
pub mod register_items;
pub mod seasons;
pub mod show_genres;
pub mod shows;
