pub use super::accounts::Entity as Accounts;
pub use super::authors::Entity as Authors;
pub use super::book_authors::Entity as BookAuthors;
pub use super::book_genres::Entity as BookGenres;
pub use super::books::Entity as Books;
pub use super::cheat_data::Entity as CheatData;
pub use super::cheats::Entity as Cheats;
pub use super::episodes::Entity as Episodes;
pub use super::games::Entity as Games;
pub use super::genres::Entity as Genres;
pub use super::media::Entity as Media;
pub use super::movie_genres::Entity as MovieGenres;
pub use super::movies::Entity as Movies;
pub use super::music::Entity as Music;
pub use super::pictures::Entity as Pictures;
pub use super::programs::Entity as Programs;
pub use super::register_items::Entity as RegisterItems;
pub use super::seasons::Entity as Seasons;
pub use super::show_genres::Entity as ShowGenres;
pub use super::shows::Entity as Shows;
