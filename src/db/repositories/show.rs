use super::{fetch_page, name_condition, now};
use crate::domain::collation::normalize;
use crate::domain::positional::{MergePlan, merge};
use crate::domain::{Filter, Page};
use crate::entities::{episodes, prelude::*, seasons, show_genres, shows};
use crate::models::genre::Genre;
use crate::models::show::{Episode, EpisodeInput, Season, SeasonInput, Show, ShowInput};
use crate::models::statistics::ShowStatistics;
use crate::models::{join_codes, split_codes};
use anyhow::{Context, Result};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait,
    LoaderTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use std::collections::HashMap;

impl From<episodes::Model> for Episode {
    fn from(model: episodes::Model) -> Self {
        Self {
            id: Some(model.id),
            position: model.position,
            number: model.number,
            name: model.name,
            length: model.length,
            note: model.note,
        }
    }
}

impl From<Episode> for EpisodeInput {
    fn from(episode: Episode) -> Self {
        Self {
            number: episode.number,
            name: episode.name,
            length: episode.length,
            note: episode.note,
        }
    }
}

impl From<Season> for SeasonInput {
    fn from(season: Season) -> Self {
        Self {
            number: season.number,
            start_year: season.start_year,
            end_year: season.end_year,
            language: season.language,
            subtitles: season.subtitles,
            note: season.note,
            episodes: season.episodes.into_iter().map(EpisodeInput::from).collect(),
        }
    }
}

impl From<Show> for ShowInput {
    fn from(show: Show) -> Self {
        Self {
            czech_name: show.czech_name,
            original_name: show.original_name,
            imdb_code: show.imdb_code,
            note: show.note,
            picture: show.picture,
            genres: show.genres.iter().map(|g| g.id).collect(),
        }
    }
}

fn to_season(model: seasons::Model, mut episodes: Vec<episodes::Model>) -> Season {
    episodes.sort_by_key(|e| e.position);

    Season {
        id: model.id,
        show_id: model.show_id,
        position: model.position,
        number: model.number,
        start_year: model.start_year,
        end_year: model.end_year,
        language: model.language,
        subtitles: split_codes(&model.subtitles),
        note: model.note,
        episodes: episodes.into_iter().map(Episode::from).collect(),
    }
}

pub struct ShowRepository {
    conn: DatabaseConnection,
}

impl ShowRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn list(&self, filter: &Filter) -> Result<Page<Show>> {
        let mut query = Shows::find()
            .order_by_asc(shows::Column::NormalizedName)
            .order_by_asc(shows::Column::Id);

        if let Some(name) = &filter.name {
            query = query.filter(name_condition(
                shows::Column::NormalizedName,
                &[shows::Column::CzechName, shows::Column::OriginalName],
                name,
            ));
        }

        let mut page = fetch_page(&self.conn, query, filter.paging).await?;
        let models = std::mem::take(&mut page.data);
        let shows = self.assemble(models).await?;

        Ok(page.with_data(shows))
    }

    pub async fn get(&self, id: i32) -> Result<Option<Show>> {
        let Some(model) = Shows::find_by_id(id).one(&self.conn).await? else {
            return Ok(None);
        };

        Ok(self.assemble(vec![model]).await?.pop())
    }

    pub async fn exists(&self, id: i32) -> Result<bool> {
        let count = Shows::find()
            .filter(shows::Column::Id.eq(id))
            .count(&self.conn)
            .await?;

        Ok(count > 0)
    }

    async fn assemble(&self, models: Vec<shows::Model>) -> Result<Vec<Show>> {
        let genres = models
            .load_many_to_many(Genres, ShowGenres, &self.conn)
            .await?;
        let seasons = models.load_many(Seasons, &self.conn).await?;

        let season_ids: Vec<i32> = seasons.iter().flatten().map(|s| s.id).collect();
        let episode_counts = self.episode_counts(&season_ids).await?;

        Ok(models
            .into_iter()
            .zip(genres)
            .zip(seasons)
            .map(|((show, mut genres), seasons)| {
                genres.sort_by(|a, b| a.normalized_name.cmp(&b.normalized_name));
                let episodes_count = seasons
                    .iter()
                    .filter_map(|s| episode_counts.get(&s.id))
                    .sum();

                Show {
                    id: show.id,
                    czech_name: show.czech_name,
                    original_name: show.original_name,
                    imdb_code: show.imdb_code,
                    note: show.note,
                    picture: show.picture_id,
                    genres: genres.into_iter().map(Genre::from).collect::<Vec<_>>(),
                    seasons_count: u64::try_from(seasons.len()).unwrap_or_default(),
                    episodes_count,
                }
            })
            .collect())
    }

    async fn episode_counts(&self, season_ids: &[i32]) -> Result<HashMap<i32, u64>> {
        if season_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows: Vec<(i32, i64)> = Episodes::find()
            .select_only()
            .column(episodes::Column::SeasonId)
            .column_as(episodes::Column::Id.count(), "count")
            .filter(episodes::Column::SeasonId.is_in(season_ids.to_vec()))
            .group_by(episodes::Column::SeasonId)
            .into_tuple()
            .all(&self.conn)
            .await?;

        Ok(rows
            .into_iter()
            .map(|(id, count)| (id, u64::try_from(count).unwrap_or_default()))
            .collect())
    }

    pub async fn create(&self, input: &ShowInput) -> Result<Show> {
        let txn = self.conn.begin().await?;
        let id = insert_show(&txn, input).await?;
        txn.commit().await?;

        self.get(id).await?.context("Failed to retrieve created show")
    }

    pub async fn update(&self, id: i32, input: &ShowInput) -> Result<Option<Show>> {
        let txn = self.conn.begin().await?;

        let Some(existing) = Shows::find_by_id(id).one(&txn).await? else {
            return Ok(None);
        };

        let mut active: shows::ActiveModel = existing.into();
        active.czech_name = Set(input.czech_name.clone());
        active.original_name = Set(input.original_name.clone());
        active.normalized_name = Set(normalize(&input.czech_name));
        active.imdb_code = Set(input.imdb_code.clone());
        active.note = Set(input.note.clone());
        active.picture_id = Set(input.picture);
        active.updated_at = Set(now());
        active.update(&txn).await?;

        replace_genres(&txn, id, &input.genres).await?;

        txn.commit().await?;
        self.get(id).await
    }

    /// Deep copy: the show, its genres, and every season with its episodes.
    pub async fn duplicate(&self, id: i32) -> Result<Option<Show>> {
        let Some(show) = self.get(id).await? else {
            return Ok(None);
        };
        let seasons = self.list_seasons(id).await?;

        let txn = self.conn.begin().await?;
        let copy_id = insert_show(&txn, &show.into()).await?;
        for (index, season) in seasons.into_iter().enumerate() {
            let position = i32::try_from(index + 1)?;
            insert_season(&txn, copy_id, position, &season.into()).await?;
        }
        txn.commit().await?;

        self.get(copy_id).await
    }

    pub async fn delete(&self, id: i32) -> Result<bool> {
        let txn = self.conn.begin().await?;

        let season_ids: Vec<i32> = Seasons::find()
            .select_only()
            .column(seasons::Column::Id)
            .filter(seasons::Column::ShowId.eq(id))
            .into_tuple()
            .all(&txn)
            .await?;

        if !season_ids.is_empty() {
            Episodes::delete_many()
                .filter(episodes::Column::SeasonId.is_in(season_ids))
                .exec(&txn)
                .await?;
        }
        Seasons::delete_many()
            .filter(seasons::Column::ShowId.eq(id))
            .exec(&txn)
            .await?;
        ShowGenres::delete_many()
            .filter(show_genres::Column::ShowId.eq(id))
            .exec(&txn)
            .await?;
        let result = Shows::delete_by_id(id).exec(&txn).await?;

        txn.commit().await?;
        Ok(result.rows_affected > 0)
    }

    pub async fn list_seasons(&self, show_id: i32) -> Result<Vec<Season>> {
        let models = Seasons::find()
            .filter(seasons::Column::ShowId.eq(show_id))
            .order_by_asc(seasons::Column::Position)
            .all(&self.conn)
            .await?;
        let episodes = models.load_many(Episodes, &self.conn).await?;

        Ok(models
            .into_iter()
            .zip(episodes)
            .map(|(season, episodes)| to_season(season, episodes))
            .collect())
    }

    pub async fn get_season(&self, show_id: i32, season_id: i32) -> Result<Option<Season>> {
        let Some(model) = find_season(&self.conn, show_id, season_id).await? else {
            return Ok(None);
        };

        let episodes = Episodes::find()
            .filter(episodes::Column::SeasonId.eq(model.id))
            .all(&self.conn)
            .await?;

        Ok(Some(to_season(model, episodes)))
    }

    /// Appends a season after the existing ones.
    pub async fn add_season(&self, show_id: i32, input: &SeasonInput) -> Result<Season> {
        let txn = self.conn.begin().await?;

        let existing = Seasons::find()
            .filter(seasons::Column::ShowId.eq(show_id))
            .count(&txn)
            .await?;
        let position = i32::try_from(existing + 1)?;
        let season_id = insert_season(&txn, show_id, position, input).await?;

        txn.commit().await?;

        self.get_season(show_id, season_id)
            .await?
            .context("Failed to retrieve created season")
    }

    /// Overwrites the season and reconciles its episodes by position.
    pub async fn update_season(
        &self,
        show_id: i32,
        season_id: i32,
        input: &SeasonInput,
    ) -> Result<Option<Season>> {
        let txn = self.conn.begin().await?;

        let Some(existing) = find_season(&txn, show_id, season_id).await? else {
            return Ok(None);
        };

        let mut active: seasons::ActiveModel = existing.into();
        active.number = Set(input.number);
        active.start_year = Set(input.start_year);
        active.end_year = Set(input.end_year);
        active.language = Set(input.language.clone());
        active.subtitles = Set(join_codes(&input.subtitles));
        active.note = Set(input.note.clone());
        active.update(&txn).await?;

        let stored: Vec<Episode> = Episodes::find()
            .filter(episodes::Column::SeasonId.eq(season_id))
            .order_by_asc(episodes::Column::Position)
            .all(&txn)
            .await?
            .into_iter()
            .map(Episode::from)
            .collect();
        let before: Vec<i32> = stored.iter().filter_map(|e| e.id).collect();
        let merged = merge(stored, input.episodes.iter().cloned());

        apply_episode_plan(&txn, season_id, MergePlan::new(&before, merged, |e| e.id)).await?;

        txn.commit().await?;
        self.get_season(show_id, season_id).await
    }

    /// Removes the season and closes the gap in the remaining positions.
    pub async fn remove_season(&self, show_id: i32, season_id: i32) -> Result<bool> {
        let txn = self.conn.begin().await?;

        if find_season(&txn, show_id, season_id).await?.is_none() {
            return Ok(false);
        }

        Episodes::delete_many()
            .filter(episodes::Column::SeasonId.eq(season_id))
            .exec(&txn)
            .await?;
        Seasons::delete_by_id(season_id).exec(&txn).await?;

        let remaining = Seasons::find()
            .filter(seasons::Column::ShowId.eq(show_id))
            .order_by_asc(seasons::Column::Position)
            .all(&txn)
            .await?;

        for (index, season) in remaining.into_iter().enumerate() {
            let position = i32::try_from(index + 1)?;
            if season.position != position {
                let mut active: seasons::ActiveModel = season.into();
                active.position = Set(position);
                active.update(&txn).await?;
            }
        }

        txn.commit().await?;
        Ok(true)
    }

    pub async fn statistics(&self) -> Result<ShowStatistics> {
        let count = Shows::find().count(&self.conn).await?;
        let seasons_count = Seasons::find().count(&self.conn).await?;
        let episodes_count = Episodes::find().count(&self.conn).await?;
        let length: Option<i64> = Episodes::find()
            .select_only()
            .column_as(episodes::Column::Length.sum(), "length")
            .into_tuple()
            .one(&self.conn)
            .await?
            .flatten();

        Ok(ShowStatistics {
            count,
            seasons_count,
            episodes_count,
            length: length.unwrap_or_default(),
        })
    }
}

async fn find_season<C>(conn: &C, show_id: i32, season_id: i32) -> Result<Option<seasons::Model>>
where
    C: ConnectionTrait,
{
    Ok(Seasons::find_by_id(season_id)
        .filter(seasons::Column::ShowId.eq(show_id))
        .one(conn)
        .await?)
}

async fn insert_show<C>(conn: &C, input: &ShowInput) -> Result<i32>
where
    C: ConnectionTrait,
{
    let timestamp = now();
    let model = shows::ActiveModel {
        czech_name: Set(input.czech_name.clone()),
        original_name: Set(input.original_name.clone()),
        normalized_name: Set(normalize(&input.czech_name)),
        imdb_code: Set(input.imdb_code.clone()),
        note: Set(input.note.clone()),
        picture_id: Set(input.picture),
        created_at: Set(timestamp.clone()),
        updated_at: Set(timestamp),
        ..Default::default()
    }
    .insert(conn)
    .await?;

    replace_genres(conn, model.id, &input.genres).await?;
    Ok(model.id)
}

async fn insert_season<C>(conn: &C, show_id: i32, position: i32, input: &SeasonInput) -> Result<i32>
where
    C: ConnectionTrait,
{
    let model = seasons::ActiveModel {
        show_id: Set(show_id),
        position: Set(position),
        number: Set(input.number),
        start_year: Set(input.start_year),
        end_year: Set(input.end_year),
        language: Set(input.language.clone()),
        subtitles: Set(join_codes(&input.subtitles)),
        note: Set(input.note.clone()),
        ..Default::default()
    }
    .insert(conn)
    .await?;

    let episodes: Vec<Episode> = merge(Vec::new(), input.episodes.iter().cloned());
    apply_episode_plan(conn, model.id, MergePlan::new(&[], episodes, |e| e.id)).await?;

    Ok(model.id)
}

async fn apply_episode_plan<C>(conn: &C, season_id: i32, plan: MergePlan<Episode>) -> Result<()>
where
    C: ConnectionTrait,
{
    if !plan.removed.is_empty() {
        Episodes::delete_many()
            .filter(episodes::Column::Id.is_in(plan.removed))
            .exec(conn)
            .await?;
    }

    for episode in plan.update {
        let Some(id) = episode.id else { continue };
        Episodes::update(episodes::ActiveModel {
            id: Set(id),
            season_id: Set(season_id),
            position: Set(episode.position),
            number: Set(episode.number),
            name: Set(episode.name),
            length: Set(episode.length),
            note: Set(episode.note),
        })
        .exec(conn)
        .await?;
    }

    if !plan.insert.is_empty() {
        let rows = plan.insert.into_iter().map(|episode| episodes::ActiveModel {
            season_id: Set(season_id),
            position: Set(episode.position),
            number: Set(episode.number),
            name: Set(episode.name),
            length: Set(episode.length),
            note: Set(episode.note),
            ..Default::default()
        });
        Episodes::insert_many(rows)
            .exec_without_returning(conn)
            .await?;
    }

    Ok(())
}

async fn replace_genres<C>(conn: &C, show_id: i32, genre_ids: &[i32]) -> Result<()>
where
    C: ConnectionTrait,
{
    ShowGenres::delete_many()
        .filter(show_genres::Column::ShowId.eq(show_id))
        .exec(conn)
        .await?;

    let mut ids = genre_ids.to_vec();
    ids.sort_unstable();
    ids.dedup();

    if !ids.is_empty() {
        let rows = ids.into_iter().map(|genre_id| show_genres::ActiveModel {
            show_id: Set(show_id),
            genre_id: Set(genre_id),
        });
        ShowGenres::insert_many(rows)
            .exec_without_returning(conn)
            .await?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Store;
    use crate::models::genre::GenreInput;

    async fn store_with_show() -> (Store, Show) {
        let store = Store::new("sqlite::memory:").await.unwrap();
        let genre = store
            .genres()
            .create(&GenreInput {
                name: "Sci-fi".to_string(),
            })
            .await
            .unwrap();
        let show = store
            .shows()
            .create(&ShowInput {
                czech_name: "Star Trek".to_string(),
                original_name: "Star Trek".to_string(),
                imdb_code: None,
                note: None,
                picture: None,
                genres: vec![genre.id],
            })
            .await
            .unwrap();
        (store, show)
    }

    fn episode(number: i32, name: &str) -> EpisodeInput {
        EpisodeInput {
            number,
            name: name.to_string(),
            length: 45,
            note: None,
        }
    }

    fn season(number: i32, episodes: Vec<EpisodeInput>) -> SeasonInput {
        SeasonInput {
            number,
            start_year: 1966,
            end_year: 1967,
            language: "EN".to_string(),
            subtitles: Vec::new(),
            note: None,
            episodes,
        }
    }

    #[tokio::test]
    async fn removing_a_season_renumbers_the_rest() {
        let (store, show) = store_with_show().await;
        let repo = store.shows();

        let first = repo.add_season(show.id, &season(1, vec![])).await.unwrap();
        let second = repo.add_season(show.id, &season(2, vec![])).await.unwrap();
        let third = repo.add_season(show.id, &season(3, vec![])).await.unwrap();
        assert_eq!(
            [first.position, second.position, third.position],
            [1, 2, 3]
        );

        assert!(repo.remove_season(show.id, second.id).await.unwrap());
        let seasons = repo.list_seasons(show.id).await.unwrap();

        assert_eq!(seasons.len(), 2);
        assert_eq!(seasons[0].id, first.id);
        assert_eq!(seasons[1].id, third.id);
        assert_eq!(seasons[1].position, 2);
    }

    #[tokio::test]
    async fn season_update_merges_episodes() {
        let (store, show) = store_with_show().await;
        let repo = store.shows();

        let created = repo
            .add_season(
                show.id,
                &season(1, vec![episode(1, "The Cage"), episode(2, "Charlie X")]),
            )
            .await
            .unwrap();
        let first_id = created.episodes[0].id;

        let updated = repo
            .update_season(show.id, created.id, &season(1, vec![episode(1, "The Man Trap")]))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.episodes.len(), 1);
        assert_eq!(updated.episodes[0].id, first_id);
        assert_eq!(updated.episodes[0].name, "The Man Trap");
        assert_eq!(updated.episodes[0].position, 1);
    }

    #[tokio::test]
    async fn seasons_are_scoped_to_their_show() {
        let (store, show) = store_with_show().await;
        let repo = store.shows();

        let created = repo.add_season(show.id, &season(1, vec![])).await.unwrap();
        assert!(repo.get_season(show.id + 1, created.id).await.unwrap().is_none());
        assert!(!repo.remove_season(show.id + 1, created.id).await.unwrap());
    }

    #[tokio::test]
    async fn duplicate_copies_seasons_and_episodes() {
        let (store, show) = store_with_show().await;
        let repo = store.shows();

        repo.add_season(show.id, &season(1, vec![episode(1, "Pilot"), episode(2, "Two")]))
            .await
            .unwrap();
        repo.add_season(show.id, &season(2, vec![episode(1, "Return")]))
            .await
            .unwrap();

        let copy = repo.duplicate(show.id).await.unwrap().unwrap();
        assert_ne!(copy.id, show.id);
        assert_eq!(copy.seasons_count, 2);
        assert_eq!(copy.episodes_count, 3);
        assert_eq!(copy.genres, show.genres);

        let seasons = repo.list_seasons(copy.id).await.unwrap();
        assert_eq!(seasons[0].episodes[1].name, "Two");
        assert_eq!(seasons[1].position, 2);
    }
}
