use super::{fetch_page, name_condition, now};
use crate::domain::collation::normalize;
use crate::domain::positional::{MergePlan, merge};
use crate::domain::{Filter, Page};
use crate::entities::{cheat_data, cheats, games, prelude::*};
use crate::models::game::{Cheat, CheatDatum, CheatDatumInput, CheatInput, Game, GameInput};
use crate::models::statistics::MediaStatistics;
use anyhow::{Context, Result};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use std::collections::HashSet;

impl From<cheat_data::Model> for CheatDatum {
    fn from(model: cheat_data::Model) -> Self {
        Self {
            id: Some(model.id),
            position: model.position,
            action: model.action,
            description: model.description,
        }
    }
}

impl From<CheatDatum> for CheatDatumInput {
    fn from(datum: CheatDatum) -> Self {
        Self {
            action: datum.action,
            description: datum.description,
        }
    }
}

impl From<Cheat> for CheatInput {
    fn from(cheat: Cheat) -> Self {
        Self {
            game_setting: cheat.game_setting,
            cheat_setting: cheat.cheat_setting,
            data: cheat.data.into_iter().map(CheatDatumInput::from).collect(),
        }
    }
}

impl From<Game> for GameInput {
    fn from(game: Game) -> Self {
        Self {
            name: game.name,
            media_count: game.media_count,
            format: game.format,
            crack: game.crack,
            serial_key: game.serial_key,
            patch: game.patch,
            note: game.note,
            picture: game.picture,
        }
    }
}

fn to_game(model: games::Model, has_cheat: bool) -> Game {
    Game {
        id: model.id,
        name: model.name,
        media_count: model.media_count,
        format: model.format,
        crack: model.crack,
        serial_key: model.serial_key,
        patch: model.patch,
        note: model.note,
        picture: model.picture_id,
        has_cheat,
    }
}

pub struct GameRepository {
    conn: DatabaseConnection,
}

impl GameRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn list(&self, filter: &Filter) -> Result<Page<Game>> {
        let mut query = Games::find()
            .order_by_asc(games::Column::NormalizedName)
            .order_by_asc(games::Column::Id);

        if let Some(name) = &filter.name {
            query = query.filter(name_condition(
                games::Column::NormalizedName,
                &[games::Column::Name],
                name,
            ));
        }

        let mut page = fetch_page(&self.conn, query, filter.paging).await?;
        let models = std::mem::take(&mut page.data);

        let ids: Vec<i32> = models.iter().map(|g| g.id).collect();
        let with_cheat: HashSet<i32> = if ids.is_empty() {
            HashSet::new()
        } else {
            Cheats::find()
                .select_only()
                .column(cheats::Column::GameId)
                .filter(cheats::Column::GameId.is_in(ids))
                .into_tuple::<i32>()
                .all(&self.conn)
                .await?
                .into_iter()
                .collect()
        };

        let games = models
            .into_iter()
            .map(|g| {
                let has_cheat = with_cheat.contains(&g.id);
                to_game(g, has_cheat)
            })
            .collect();

        Ok(page.with_data(games))
    }

    pub async fn get(&self, id: i32) -> Result<Option<Game>> {
        let Some(model) = Games::find_by_id(id).one(&self.conn).await? else {
            return Ok(None);
        };

        let has_cheat = find_cheat(&self.conn, id).await?.is_some();
        Ok(Some(to_game(model, has_cheat)))
    }

    pub async fn create(&self, input: &GameInput) -> Result<Game> {
        let id = insert_game(&self.conn, input).await?;
        self.get(id).await?.context("Failed to retrieve created game")
    }

    pub async fn update(&self, id: i32, input: &GameInput) -> Result<Option<Game>> {
        let Some(existing) = Games::find_by_id(id).one(&self.conn).await? else {
            return Ok(None);
        };

        let mut active: games::ActiveModel = existing.into();
        active.name = Set(input.name.clone());
        active.normalized_name = Set(normalize(&input.name));
        active.media_count = Set(input.media_count);
        active.format = Set(input.format.clone());
        active.crack = Set(input.crack);
        active.serial_key = Set(input.serial_key);
        active.patch = Set(input.patch);
        active.note = Set(input.note.clone());
        active.picture_id = Set(input.picture);
        active.updated_at = Set(now());
        active.update(&self.conn).await?;

        self.get(id).await
    }

    /// Copies the game together with its cheat.
    pub async fn duplicate(&self, id: i32) -> Result<Option<Game>> {
        let Some(game) = self.get(id).await? else {
            return Ok(None);
        };
        let cheat = self.get_cheat(id).await?;

        let txn = self.conn.begin().await?;
        let copy_id = insert_game(&txn, &game.into()).await?;
        if let Some(cheat) = cheat {
            save_cheat(&txn, copy_id, &cheat.into()).await?;
        }
        txn.commit().await?;

        self.get(copy_id).await
    }

    pub async fn delete(&self, id: i32) -> Result<bool> {
        let txn = self.conn.begin().await?;

        delete_cheat(&txn, id).await?;
        let result = Games::delete_by_id(id).exec(&txn).await?;

        txn.commit().await?;
        Ok(result.rows_affected > 0)
    }

    pub async fn get_cheat(&self, game_id: i32) -> Result<Option<Cheat>> {
        let Some(cheat) = find_cheat(&self.conn, game_id).await? else {
            return Ok(None);
        };

        let data = CheatData::find()
            .filter(cheat_data::Column::CheatId.eq(cheat.id))
            .order_by_asc(cheat_data::Column::Position)
            .all(&self.conn)
            .await?;

        Ok(Some(Cheat {
            id: cheat.id,
            game_setting: cheat.game_setting,
            cheat_setting: cheat.cheat_setting,
            data: data.into_iter().map(CheatDatum::from).collect(),
        }))
    }

    /// Creates the game's cheat, or updates it and merges its data by position.
    pub async fn put_cheat(&self, game_id: i32, input: &CheatInput) -> Result<Cheat> {
        let txn = self.conn.begin().await?;
        save_cheat(&txn, game_id, input).await?;
        txn.commit().await?;

        self.get_cheat(game_id)
            .await?
            .context("Failed to retrieve saved cheat")
    }

    pub async fn remove_cheat(&self, game_id: i32) -> Result<bool> {
        let txn = self.conn.begin().await?;
        let removed = delete_cheat(&txn, game_id).await?;
        txn.commit().await?;

        Ok(removed)
    }

    pub async fn statistics(&self) -> Result<MediaStatistics> {
        let count = Games::find().count(&self.conn).await?;
        let media_count: Option<i64> = Games::find()
            .select_only()
            .column_as(games::Column::MediaCount.sum(), "media_count")
            .into_tuple()
            .one(&self.conn)
            .await?
            .flatten();

        Ok(MediaStatistics {
            count,
            media_count: media_count.unwrap_or_default(),
        })
    }
}

async fn insert_game<C>(conn: &C, input: &GameInput) -> Result<i32>
where
    C: ConnectionTrait,
{
    let timestamp = now();
    let model = games::ActiveModel {
        name: Set(input.name.clone()),
        normalized_name: Set(normalize(&input.name)),
        media_count: Set(input.media_count),
        format: Set(input.format.clone()),
        crack: Set(input.crack),
        serial_key: Set(input.serial_key),
        patch: Set(input.patch),
        note: Set(input.note.clone()),
        picture_id: Set(input.picture),
        created_at: Set(timestamp.clone()),
        updated_at: Set(timestamp),
        ..Default::default()
    }
    .insert(conn)
    .await?;

    Ok(model.id)
}

async fn find_cheat<C>(conn: &C, game_id: i32) -> Result<Option<cheats::Model>>
where
    C: ConnectionTrait,
{
    Ok(Cheats::find()
        .filter(cheats::Column::GameId.eq(game_id))
        .one(conn)
        .await?)
}

async fn save_cheat<C>(conn: &C, game_id: i32, input: &CheatInput) -> Result<()>
where
    C: ConnectionTrait,
{
    let (cheat_id, stored) = if let Some(existing) = find_cheat(conn, game_id).await? {
        let cheat_id = existing.id;
        let mut active: cheats::ActiveModel = existing.into();
        active.game_setting = Set(input.game_setting.clone());
        active.cheat_setting = Set(input.cheat_setting.clone());
        active.update(conn).await?;

        let stored: Vec<CheatDatum> = CheatData::find()
            .filter(cheat_data::Column::CheatId.eq(cheat_id))
            .order_by_asc(cheat_data::Column::Position)
            .all(conn)
            .await?
            .into_iter()
            .map(CheatDatum::from)
            .collect();
        (cheat_id, stored)
    } else {
        let model = cheats::ActiveModel {
            game_id: Set(game_id),
            game_setting: Set(input.game_setting.clone()),
            cheat_setting: Set(input.cheat_setting.clone()),
            ..Default::default()
        }
        .insert(conn)
        .await?;
        (model.id, Vec::new())
    };

    let before: Vec<i32> = stored.iter().filter_map(|d| d.id).collect();
    let merged = merge(stored, input.data.iter().cloned());
    let plan = MergePlan::new(&before, merged, |d| d.id);

    if !plan.removed.is_empty() {
        CheatData::delete_many()
            .filter(cheat_data::Column::Id.is_in(plan.removed))
            .exec(conn)
            .await?;
    }

    for datum in plan.update {
        let Some(id) = datum.id else { continue };
        CheatData::update(cheat_data::ActiveModel {
            id: Set(id),
            cheat_id: Set(cheat_id),
            position: Set(datum.position),
            action: Set(datum.action),
            description: Set(datum.description),
        })
        .exec(conn)
        .await?;
    }

    if !plan.insert.is_empty() {
        let rows = plan.insert.into_iter().map(|datum| cheat_data::ActiveModel {
            cheat_id: Set(cheat_id),
            position: Set(datum.position),
            action: Set(datum.action),
            description: Set(datum.description),
            ..Default::default()
        });
        CheatData::insert_many(rows)
            .exec_without_returning(conn)
            .await?;
    }

    Ok(())
}

async fn delete_cheat<C>(conn: &C, game_id: i32) -> Result<bool>
where
    C: ConnectionTrait,
{
    let Some(cheat) = find_cheat(conn, game_id).await? else {
        return Ok(false);
    };

    CheatData::delete_many()
        .filter(cheat_data::Column::CheatId.eq(cheat.id))
        .exec(conn)
        .await?;
    Cheats::delete_by_id(cheat.id).exec(conn).await?;

    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Store;

    fn game(name: &str) -> GameInput {
        GameInput {
            name: name.to_string(),
            media_count: 1,
            format: "ISO".to_string(),
            crack: false,
            serial_key: true,
            patch: false,
            note: None,
            picture: None,
        }
    }

    fn datum(action: &str) -> CheatDatumInput {
        CheatDatumInput {
            action: action.to_string(),
            description: format!("{action} effect"),
        }
    }

    fn cheat(data: Vec<CheatDatumInput>) -> CheatInput {
        CheatInput {
            game_setting: Some("console".to_string()),
            cheat_setting: None,
            data,
        }
    }

    #[tokio::test]
    async fn put_cheat_creates_then_merges() {
        let store = Store::new("sqlite::memory:").await.unwrap();
        let repo = store.games();
        let created = repo.create(&game("Doom")).await.unwrap();
        assert!(!created.has_cheat);

        let first = repo
            .put_cheat(created.id, &cheat(vec![datum("iddqd"), datum("idkfa")]))
            .await
            .unwrap();
        assert_eq!(first.data.len(), 2);

        let second = repo
            .put_cheat(created.id, &cheat(vec![datum("idclip"), datum("idkfa"), datum("idbeholdv")]))
            .await
            .unwrap();

        assert_eq!(second.id, first.id);
        assert_eq!(second.data[0].id, first.data[0].id);
        assert_eq!(second.data[1].id, first.data[1].id);
        assert_eq!(second.data[0].action, "idclip");
        assert_eq!(second.data[2].position, 3);

        assert!(repo.get(created.id).await.unwrap().unwrap().has_cheat);
    }

    #[tokio::test]
    async fn duplicate_copies_cheat() {
        let store = Store::new("sqlite::memory:").await.unwrap();
        let repo = store.games();
        let created = repo.create(&game("Quake")).await.unwrap();
        repo.put_cheat(created.id, &cheat(vec![datum("god")]))
            .await
            .unwrap();

        let copy = repo.duplicate(created.id).await.unwrap().unwrap();
        assert!(copy.has_cheat);

        let copied = repo.get_cheat(copy.id).await.unwrap().unwrap();
        assert_eq!(copied.data.len(), 1);
        assert_eq!(copied.data[0].action, "god");

        assert!(repo.remove_cheat(created.id).await.unwrap());
        assert!(!repo.remove_cheat(created.id).await.unwrap());
        assert!(repo.get_cheat(copy.id).await.unwrap().is_some());
    }
}
