pub mod account;
pub mod author;
pub mod book;
pub mod game;
pub mod genre;
pub mod movie;
pub mod music;
pub mod picture;
pub mod program;
pub mod register;
pub mod show;
pub mod statistics;

use crate::domain::collation::normalize;
use crate::domain::{Page, Paging};
use anyhow::Result;
use sea_orm::{ColumnTrait, Condition, DatabaseConnection, EntityTrait, PaginatorTrait, Select};

/// Fetches one page of `select` together with the total row count.
///
/// Pages are 1-based; page 0 is treated as the first page.
pub(crate) async fn fetch_page<E>(
    conn: &DatabaseConnection,
    select: Select<E>,
    paging: Paging,
) -> Result<Page<E::Model>>
where
    E: EntityTrait,
    E::Model: Sync,
{
    let paginator = select.paginate(conn, paging.limit.max(1));
    let total = paginator.num_items().await?;
    let items = paginator.fetch_page(paging.page.saturating_sub(1)).await?;

    Ok(Page::new(items, paging, total))
}

/// Name search over `columns`.
///
/// SQLite `LIKE` folds ASCII case only, so the query is also matched as a
/// substring of the collation key, which is case-free for every script.
pub(crate) fn name_condition<C: ColumnTrait>(key: C, columns: &[C], name: &str) -> Condition {
    columns.iter().fold(
        Condition::any().add(key.contains(normalize(name))),
        |condition, column| condition.add(column.contains(name)),
    )
}

pub(crate) fn now() -> String {
    chrono::Utc::now().to_rfc3339()
}
