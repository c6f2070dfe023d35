use super::{fetch_page, name_condition, now};
use crate::domain::collation::normalize;
use crate::domain::positional::{MergePlan, merge};
use crate::domain::{Filter, Page};
use crate::entities::{genres, media, movie_genres, movies, prelude::*};
use crate::models::genre::Genre;
use crate::models::movie::{Medium, Movie, MovieInput};
use crate::models::statistics::MovieStatistics;
use crate::models::{join_codes, split_codes};
use anyhow::{Context, Result};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait,
    LoaderTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};

impl From<media::Model> for Medium {
    fn from(model: media::Model) -> Self {
        Self {
            id: Some(model.id),
            position: model.position,
            length: model.length,
        }
    }
}

impl From<Movie> for MovieInput {
    fn from(movie: Movie) -> Self {
        Self {
            czech_name: movie.czech_name,
            original_name: movie.original_name,
            year: movie.year,
            language: movie.language,
            subtitles: movie.subtitles,
            media: movie.media.iter().map(|m| m.length).collect(),
            imdb_code: movie.imdb_code,
            note: movie.note,
            picture: movie.picture,
            genres: movie.genres.iter().map(|g| g.id).collect(),
        }
    }
}

fn to_movie(model: movies::Model, mut media: Vec<media::Model>, mut genres: Vec<genres::Model>) -> Movie {
    media.sort_by_key(|m| m.position);
    genres.sort_by(|a, b| a.normalized_name.cmp(&b.normalized_name));

    Movie {
        id: model.id,
        czech_name: model.czech_name,
        original_name: model.original_name,
        year: model.year,
        language: model.language,
        subtitles: split_codes(&model.subtitles),
        media: media.into_iter().map(Medium::from).collect(),
        imdb_code: model.imdb_code,
        note: model.note,
        picture: model.picture_id,
        genres: genres.into_iter().map(Genre::from).collect(),
    }
}

pub struct MovieRepository {
    conn: DatabaseConnection,
}

impl MovieRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn list(&self, filter: &Filter) -> Result<Page<Movie>> {
        let mut query = Movies::find()
            .order_by_asc(movies::Column::NormalizedName)
            .order_by_asc(movies::Column::Id);

        if let Some(name) = &filter.name {
            query = query.filter(name_condition(
                movies::Column::NormalizedName,
                &[movies::Column::CzechName, movies::Column::OriginalName],
                name,
            ));
        }

        let mut page = fetch_page(&self.conn, query, filter.paging).await?;
        let models = std::mem::take(&mut page.data);
        let movies = self.assemble(models).await?;

        Ok(page.with_data(movies))
    }

    pub async fn get(&self, id: i32) -> Result<Option<Movie>> {
        let Some(model) = Movies::find_by_id(id).one(&self.conn).await? else {
            return Ok(None);
        };

        Ok(self.assemble(vec![model]).await?.pop())
    }

    async fn assemble(&self, models: Vec<movies::Model>) -> Result<Vec<Movie>> {
        let media = models.load_many(Media, &self.conn).await?;
        let genres = models
            .load_many_to_many(Genres, MovieGenres, &self.conn)
            .await?;

        Ok(models
            .into_iter()
            .zip(media)
            .zip(genres)
            .map(|((movie, media), genres)| to_movie(movie, media, genres))
            .collect())
    }

    pub async fn create(&self, input: &MovieInput) -> Result<Movie> {
        let txn = self.conn.begin().await?;

        let timestamp = now();
        let model = movies::ActiveModel {
            czech_name: Set(input.czech_name.clone()),
            original_name: Set(input.original_name.clone()),
            normalized_name: Set(normalize(&input.czech_name)),
            year: Set(input.year),
            language: Set(input.language.clone()),
            subtitles: Set(join_codes(&input.subtitles)),
            imdb_code: Set(input.imdb_code.clone()),
            note: Set(input.note.clone()),
            picture_id: Set(input.picture),
            created_at: Set(timestamp.clone()),
            updated_at: Set(timestamp),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        let media: Vec<Medium> = merge(Vec::new(), input.media.iter().copied());
        apply_media_plan(&txn, model.id, MergePlan::new(&[], media, |m| m.id)).await?;
        replace_genres(&txn, model.id, &input.genres).await?;

        txn.commit().await?;

        self.get(model.id)
            .await?
            .context("Failed to retrieve created movie")
    }

    /// Overwrites the movie and reconciles its media by position.
    pub async fn update(&self, id: i32, input: &MovieInput) -> Result<Option<Movie>> {
        let txn = self.conn.begin().await?;

        let Some(existing) = Movies::find_by_id(id).one(&txn).await? else {
            return Ok(None);
        };

        let mut active: movies::ActiveModel = existing.into();
        active.czech_name = Set(input.czech_name.clone());
        active.original_name = Set(input.original_name.clone());
        active.normalized_name = Set(normalize(&input.czech_name));
        active.year = Set(input.year);
        active.language = Set(input.language.clone());
        active.subtitles = Set(join_codes(&input.subtitles));
        active.imdb_code = Set(input.imdb_code.clone());
        active.note = Set(input.note.clone());
        active.picture_id = Set(input.picture);
        active.updated_at = Set(now());
        active.update(&txn).await?;

        let stored: Vec<Medium> = Media::find()
            .filter(media::Column::MovieId.eq(id))
            .order_by_asc(media::Column::Position)
            .all(&txn)
            .await?
            .into_iter()
            .map(Medium::from)
            .collect();
        let before: Vec<i32> = stored.iter().filter_map(|m| m.id).collect();
        let merged = merge(stored, input.media.iter().copied());

        apply_media_plan(&txn, id, MergePlan::new(&before, merged, |m| m.id)).await?;
        replace_genres(&txn, id, &input.genres).await?;

        txn.commit().await?;

        self.get(id).await
    }

    /// Copies the movie with fresh media rows and the same genres.
    pub async fn duplicate(&self, id: i32) -> Result<Option<Movie>> {
        let Some(movie) = self.get(id).await? else {
            return Ok(None);
        };

        let copy = self.create(&movie.into()).await?;
        Ok(Some(copy))
    }

    pub async fn delete(&self, id: i32) -> Result<bool> {
        let txn = self.conn.begin().await?;

        Media::delete_many()
            .filter(media::Column::MovieId.eq(id))
            .exec(&txn)
            .await?;
        MovieGenres::delete_many()
            .filter(movie_genres::Column::MovieId.eq(id))
            .exec(&txn)
            .await?;
        let result = Movies::delete_by_id(id).exec(&txn).await?;

        txn.commit().await?;
        Ok(result.rows_affected > 0)
    }

    pub async fn statistics(&self) -> Result<MovieStatistics> {
        let count = Movies::find().count(&self.conn).await?;
        let media_count = Media::find().count(&self.conn).await?;
        let length: Option<i64> = Media::find()
            .select_only()
            .column_as(media::Column::Length.sum(), "length")
            .into_tuple()
            .one(&self.conn)
            .await?
            .flatten();

        Ok(MovieStatistics {
            count,
            media_count,
            length: length.unwrap_or_default(),
        })
    }
}

async fn apply_media_plan<C>(conn: &C, movie_id: i32, plan: MergePlan<Medium>) -> Result<()>
where
    C: ConnectionTrait,
{
    if !plan.removed.is_empty() {
        Media::delete_many()
            .filter(media::Column::Id.is_in(plan.removed))
            .exec(conn)
            .await?;
    }

    for medium in plan.update {
        let Some(id) = medium.id else { continue };
        Media::update(media::ActiveModel {
            id: Set(id),
            movie_id: Set(movie_id),
            position: Set(medium.position),
            length: Set(medium.length),
        })
        .exec(conn)
        .await?;
    }

    if !plan.insert.is_empty() {
        let rows = plan.insert.into_iter().map(|medium| media::ActiveModel {
            movie_id: Set(movie_id),
            position: Set(medium.position),
            length: Set(medium.length),
            ..Default::default()
        });
        Media::insert_many(rows).exec_without_returning(conn).await?;
    }

    Ok(())
}

async fn replace_genres<C>(conn: &C, movie_id: i32, genre_ids: &[i32]) -> Result<()>
where
    C: ConnectionTrait,
{
    MovieGenres::delete_many()
        .filter(movie_genres::Column::MovieId.eq(movie_id))
        .exec(conn)
        .await?;

    let mut ids = genre_ids.to_vec();
    ids.sort_unstable();
    ids.dedup();

    if !ids.is_empty() {
        let rows = ids.into_iter().map(|genre_id| movie_genres::ActiveModel {
            movie_id: Set(movie_id),
            genre_id: Set(genre_id),
        });
        MovieGenres::insert_many(rows)
            .exec_without_returning(conn)
            .await?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Store;
    use crate::domain::Paging;
    use crate::models::genre::GenreInput;

    async fn store_with_genre() -> (Store, i32) {
        let store = Store::new("sqlite::memory:").await.unwrap();
        let genre = store
            .genres()
            .create(&GenreInput {
                name: "Drama".to_string(),
            })
            .await
            .unwrap();
        (store, genre.id)
    }

    fn input(name: &str, media: Vec<i32>, genre: i32) -> MovieInput {
        MovieInput {
            czech_name: name.to_string(),
            original_name: name.to_string(),
            year: 2000,
            language: "EN".to_string(),
            subtitles: vec!["CZ".to_string()],
            media,
            imdb_code: None,
            note: None,
            picture: None,
            genres: vec![genre],
        }
    }

    #[tokio::test]
    async fn name_search_covers_both_titles_in_any_case() {
        let (store, genre) = store_with_genre().await;
        let repo = store.movies();

        let mut movie = input("Šakalí léta", vec![100], genre);
        movie.original_name = "Jackal Years".to_string();
        repo.create(&movie).await.unwrap();
        repo.create(&input("Alien", vec![117], genre)).await.unwrap();

        for query in ["šakalí", "ŠAKALÍ LÉTA", "jackal"] {
            let filter = Filter {
                name: Some(query.to_string()),
                paging: Paging::new(1, 10),
            };
            let page = repo.list(&filter).await.unwrap();
            assert_eq!(page.total, 1, "query {query}");
            assert_eq!(page.data[0].czech_name, "Šakalí léta");
        }
    }

    #[tokio::test]
    async fn update_keeps_leading_media_identities() {
        let (store, genre) = store_with_genre().await;
        let repo = store.movies();

        let movie = repo.create(&input("Alien", vec![60, 50], genre)).await.unwrap();
        let ids: Vec<Option<i32>> = movie.media.iter().map(|m| m.id).collect();

        let updated = repo
            .update(movie.id, &input("Alien", vec![61, 51, 40], genre))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.media.len(), 3);
        assert_eq!(updated.media[0].id, ids[0]);
        assert_eq!(updated.media[1].id, ids[1]);
        assert_eq!(
            updated.media.iter().map(|m| m.length).collect::<Vec<_>>(),
            vec![61, 51, 40]
        );
        assert_eq!(
            updated.media.iter().map(|m| m.position).collect::<Vec<_>>(),
            vec![1, 2, 3]
        );

        let shrunk = repo
            .update(movie.id, &input("Alien", vec![90], genre))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(shrunk.media.len(), 1);
        assert_eq!(shrunk.media[0].id, ids[0]);
        assert_eq!(shrunk.media[0].length, 90);
        assert_eq!(Media::find().count(&store.conn).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn list_orders_by_collation_key() {
        let (store, genre) = store_with_genre().await;
        let repo = store.movies();

        for name in ["Zorro", "Žabák", "alien", "2012"] {
            repo.create(&input(name, vec![100], genre)).await.unwrap();
        }

        let filter = Filter {
            name: None,
            paging: Paging::new(1, 10),
        };
        let page = repo.list(&filter).await.unwrap();
        let names: Vec<&str> = page.data.iter().map(|m| m.czech_name.as_str()).collect();

        assert_eq!(names, vec!["2012", "alien", "Zorro", "Žabák"]);
        assert_eq!(page.total, 4);
    }

    #[tokio::test]
    async fn duplicate_creates_fresh_media() {
        let (store, genre) = store_with_genre().await;
        let repo = store.movies();

        let movie = repo.create(&input("Heat", vec![170], genre)).await.unwrap();
        let copy = repo.duplicate(movie.id).await.unwrap().unwrap();

        assert_ne!(copy.id, movie.id);
        assert_ne!(copy.media[0].id, movie.media[0].id);
        assert_eq!(copy.media[0].length, 170);
        assert_eq!(copy.genres, movie.genres);

        assert!(repo.duplicate(9999).await.unwrap().is_none());
    }
}
