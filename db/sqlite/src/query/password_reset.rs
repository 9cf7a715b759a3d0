use ps_error::Error;
use sqlx::{Executor, Pool, Sqlite};
use uuid::Uuid;

use crate::{
    db::{not_found_or_store, store, SqliteDb},
    model::password_reset::PasswordResetModel,
};

const INSERT: &str = "INSERT INTO \"password_resets\" (\"id\", \"created_at\", \"updated_at\", \"user_id\", \"code\") VALUES (?, ?, ?, ?, ?)";
const SELECT: &str = "SELECT \"id\", \"created_at\", \"updated_at\", \"user_id\", \"code\" FROM \"password_resets\" WHERE \"id\" = ?";
const SELECT_LATEST_BY_USER_ID: &str = "SELECT \"id\", \"created_at\", \"updated_at\", \"user_id\", \"code\" FROM \"password_resets\" WHERE \"user_id\" = ? ORDER BY \"created_at\" DESC LIMIT 1";
const DELETE: &str = "DELETE FROM \"password_resets\" WHERE \"id\" = ?";

pub async fn init(pool: &Pool<Sqlite>) {
    ps_log::info(Some("🔧"), "[SQLite] Setting up password_resets table");

    pool.execute("CREATE TABLE IF NOT EXISTS \"password_resets\" (\"id\" blob, \"created_at\" datetime, \"updated_at\" datetime, \"user_id\" blob, \"code\" text, PRIMARY KEY (\"id\"))").await.unwrap();

    pool.prepare(INSERT).await.unwrap();
    pool.prepare(SELECT).await.unwrap();
    pool.prepare(SELECT_LATEST_BY_USER_ID).await.unwrap();
    pool.prepare(DELETE).await.unwrap();
}

impl SqliteDb {
    pub async fn insert_password_reset(&self, value: &PasswordResetModel) -> Result<(), Error> {
        self.execute(
            sqlx::query(INSERT)
                .bind(value.id())
                .bind(value.created_at())
                .bind(value.updated_at())
                .bind(value.user_id())
                .bind(value.code()),
        )
        .await
        .map_err(store)?;
        Ok(())
    }

    pub async fn select_password_reset(&self, id: &Uuid) -> Result<PasswordResetModel, Error> {
        self.fetch_one(sqlx::query_as(SELECT).bind(id))
            .await
            .map_err(|err| not_found_or_store(err, "password reset"))
    }

    pub async fn select_latest_password_reset_by_user_id(
        &self,
        user_id: &Uuid,
    ) -> Result<PasswordResetModel, Error> {
        self.fetch_one(sqlx::query_as(SELECT_LATEST_BY_USER_ID).bind(user_id))
            .await
            .map_err(|err| not_found_or_store(err, "password reset"))
    }

    pub async fn delete_password_reset(&self, id: &Uuid) -> Result<(), Error> {
        self.execute(sqlx::query(DELETE).bind(id))
            .await
            .map_err(store)?;
        Ok(())
    }
}
