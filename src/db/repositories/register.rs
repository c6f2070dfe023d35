use crate::entities::{prelude::*, register_items};
use crate::models::register::RegisterItem;
use anyhow::Result;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder};

impl From<register_items::Model> for RegisterItem {
    fn from(model: register_items::Model) -> Self {
        Self {
            code: model.code,
            name: model.name,
        }
    }
}

pub struct RegisterRepository {
    conn: DatabaseConnection,
}

impl RegisterRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn list(&self, register: &str) -> Result<Vec<RegisterItem>> {
        let items = RegisterItems::find()
            .filter(register_items::Column::Register.eq(register))
            .order_by_asc(register_items::Column::Position)
            .all(&self.conn)
            .await?;

        Ok(items.into_iter().map(RegisterItem::from).collect())
    }

    pub async fn get(&self, register: &str, code: &str) -> Result<Option<RegisterItem>> {
        let item = RegisterItems::find()
            .filter(register_items::Column::Register.eq(register))
            .filter(register_items::Column::Code.eq(code))
            .one(&self.conn)
            .await?;

        Ok(item.map(RegisterItem::from))
    }

    pub async fn contains(&self, register: &str, code: &str) -> Result<bool> {
        let count = RegisterItems::find()
            .filter(register_items::Column::Register.eq(register))
            .filter(register_items::Column::Code.eq(code))
            .count(&self.conn)
            .await?;

        Ok(count > 0)
    }
}
