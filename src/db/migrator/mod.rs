use sea_orm_migration::prelude::*;

mod m20250301_initial;
mod m20250302_add_accounts;
mod m20250303_seed_registers;

pub use m20250302_add_accounts::DEFAULT_API_KEY;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250301_initial::Migration),
            Box::new(m20250302_add_accounts::Migration),
            Box::new(m20250303_seed_registers::Migration),
        ]
    }
}
