use ps_error::Error;
use sqlx::{Executor, Pool, Sqlite};
use uuid::Uuid;

use crate::{
    db::{not_found_or_store, store, SqliteDb},
    model::user::UserModel,
};

const INSERT: &str = "INSERT INTO \"users\" (\"id\", \"created_at\", \"updated_at\", \"email\", \"password_hash\", \"name\", \"is_admin\") VALUES (?, ?, ?, ?, ?, ?, ?)";
const SELECT: &str = "SELECT \"id\", \"created_at\", \"updated_at\", \"email\", \"password_hash\", \"name\", \"is_admin\" FROM \"users\" WHERE \"id\" = ?";
const SELECT_BY_EMAIL: &str = "SELECT \"id\", \"created_at\", \"updated_at\", \"email\", \"password_hash\", \"name\", \"is_admin\" FROM \"users\" WHERE \"email\" = ?";
const UPDATE: &str = "UPDATE \"users\" SET \"updated_at\" = ?, \"email\" = ?, \"password_hash\" = ?, \"name\" = ? WHERE \"id\" = ?";

pub async fn init(pool: &Pool<Sqlite>) {
    ps_log::info(Some("🔧"), "[SQLite] Setting up users table");

    pool.execute("CREATE TABLE IF NOT EXISTS \"users\" (\"id\" blob, \"created_at\" datetime, \"updated_at\" datetime, \"email\" text UNIQUE, \"password_hash\" text, \"name\" text, \"is_admin\" boolean, PRIMARY KEY (\"id\"))").await.unwrap();

    pool.prepare(INSERT).await.unwrap();
    pool.prepare(SELECT).await.unwrap();
    pool.prepare(SELECT_BY_EMAIL).await.unwrap();
    pool.prepare(UPDATE).await.unwrap();
}

impl SqliteDb {
    pub async fn insert_user(&self, value: &UserModel) -> Result<(), Error> {
        self.execute(
            sqlx::query(INSERT)
                .bind(value.id())
                .bind(value.created_at())
                .bind(value.updated_at())
                .bind(value.email())
                .bind(value.password_hash())
                .bind(value.name())
                .bind(value.is_admin()),
        )
        .await
        .map_err(store)?;
        Ok(())
    }

    pub async fn select_user(&self, id: &Uuid) -> Result<UserModel, Error> {
        self.fetch_one(sqlx::query_as(SELECT).bind(id))
            .await
            .map_err(|err| not_found_or_store(err, "user"))
    }

    pub async fn select_user_by_email(&self, email: &str) -> Result<UserModel, Error> {
        self.fetch_one(sqlx::query_as(SELECT_BY_EMAIL).bind(email))
            .await
            .map_err(|err| not_found_or_store(err, "user"))
    }

    pub async fn update_user(&self, value: &UserModel) -> Result<(), Error> {
        self.execute(
            sqlx::query(UPDATE)
                .bind(value.updated_at())
                .bind(value.email())
                .bind(value.password_hash())
                .bind(value.name())
                .bind(value.id()),
        )
        .await
        .map_err(store)?;
        Ok(())
    }
}
