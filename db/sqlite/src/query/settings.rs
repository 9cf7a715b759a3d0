use ps_error::Error;
use sqlx::{Executor, Pool, Sqlite};
use uuid::Uuid;

use crate::{
    db::{not_found_or_store, store, SqliteDb},
    model::settings::SettingsModel,
};

const INSERT: &str = "INSERT INTO \"admin_settings\" (\"admin_id\", \"created_at\", \"updated_at\", \"notify_new_request\", \"notify_approval\") VALUES (?, ?, ?, ?, ?)";
const SELECT: &str = "SELECT \"admin_id\", \"created_at\", \"updated_at\", \"notify_new_request\", \"notify_approval\" FROM \"admin_settings\" WHERE \"admin_id\" = ?";
const UPDATE: &str = "UPDATE \"admin_settings\" SET \"updated_at\" = ?, \"notify_new_request\" = ?, \"notify_approval\" = ? WHERE \"admin_id\" = ?";

pub async fn init(pool: &Pool<Sqlite>) {
    ps_log::info(Some("🔧"), "[SQLite] Setting up admin_settings table");

    pool.execute("CREATE TABLE IF NOT EXISTS \"admin_settings\" (\"admin_id\" blob, \"created_at\" datetime, \"updated_at\" datetime, \"notify_new_request\" boolean, \"notify_approval\" boolean, PRIMARY KEY (\"admin_id\"))").await.unwrap();

    pool.prepare(INSERT).await.unwrap();
    pool.prepare(SELECT).await.unwrap();
    pool.prepare(UPDATE).await.unwrap();
}

impl SqliteDb {
    pub async fn insert_settings(&self, value: &SettingsModel) -> Result<(), Error> {
        self.execute(
            sqlx::query(INSERT)
                .bind(value.admin_id())
                .bind(value.created_at())
                .bind(value.updated_at())
                .bind(value.notify_new_request())
                .bind(value.notify_approval()),
        )
        .await
        .map_err(store)?;
        Ok(())
    }

    pub async fn select_settings(&self, admin_id: &Uuid) -> Result<SettingsModel, Error> {
        self.fetch_one(sqlx::query_as(SELECT).bind(admin_id))
            .await
            .map_err(|err| not_found_or_store(err, "settings"))
    }

    pub async fn update_settings(&self, value: &SettingsModel) -> Result<(), Error> {
        self.execute(
            sqlx::query(UPDATE)
                .bind(value.updated_at())
                .bind(value.notify_new_request())
                .bind(value.notify_approval())
                .bind(value.admin_id()),
        )
        .await
        .map_err(store)?;
        Ok(())
    }
}
