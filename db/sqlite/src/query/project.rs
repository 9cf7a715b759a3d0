use ps_error::Error;
use sqlx::{Executor, Pool, Row, Sqlite};
use uuid::Uuid;

use crate::{
    db::{not_found_or_store, store, SqliteDb},
    model::project::ProjectModel,
};

const INSERT: &str = "INSERT INTO \"projects\" (\"id\", \"created_at\", \"updated_at\", \"name\", \"description\", \"category\", \"tech_stack\", \"what_included\", \"price\", \"discount_price\", \"github_repo_url\", \"demo_video_url\") VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)";
const SELECT: &str = "SELECT \"id\", \"created_at\", \"updated_at\", \"name\", \"description\", \"category\", \"tech_stack\", \"what_included\", \"price\", \"discount_price\", \"github_repo_url\", \"demo_video_url\" FROM \"projects\" WHERE \"id\" = ?";
const SELECT_MANY: &str = "SELECT \"id\", \"created_at\", \"updated_at\", \"name\", \"description\", \"category\", \"tech_stack\", \"what_included\", \"price\", \"discount_price\", \"github_repo_url\", \"demo_video_url\" FROM \"projects\" ORDER BY \"created_at\" DESC";
const UPDATE: &str = "UPDATE \"projects\" SET \"updated_at\" = ?, \"name\" = ?, \"description\" = ?, \"category\" = ?, \"tech_stack\" = ?, \"what_included\" = ?, \"price\" = ?, \"discount_price\" = ?, \"github_repo_url\" = ?, \"demo_video_url\" = ? WHERE \"id\" = ?";
const DELETE: &str = "DELETE FROM \"projects\" WHERE \"id\" = ?";
const COUNT: &str = "SELECT COUNT(1) FROM \"projects\"";

pub async fn init(pool: &Pool<Sqlite>) {
    ps_log::info(Some("🔧"), "[SQLite] Setting up projects table");

    pool.execute("CREATE TABLE IF NOT EXISTS \"projects\" (\"id\" blob, \"created_at\" datetime, \"updated_at\" datetime, \"name\" text, \"description\" text, \"category\" text, \"tech_stack\" text, \"what_included\" text, \"price\" real, \"discount_price\" real, \"github_repo_url\" text, \"demo_video_url\" text, PRIMARY KEY (\"id\"))").await.unwrap();

    pool.prepare(INSERT).await.unwrap();
    pool.prepare(SELECT).await.unwrap();
    pool.prepare(SELECT_MANY).await.unwrap();
    pool.prepare(UPDATE).await.unwrap();
    pool.prepare(DELETE).await.unwrap();
    pool.prepare(COUNT).await.unwrap();
}

impl SqliteDb {
    pub async fn insert_project(&self, value: &ProjectModel) -> Result<(), Error> {
        self.execute(
            sqlx::query(INSERT)
                .bind(value.id())
                .bind(value.created_at())
                .bind(value.updated_at())
                .bind(value.name())
                .bind(value.description())
                .bind(value.category())
                .bind(value.tech_stack())
                .bind(value.what_included())
                .bind(value.price())
                .bind(value.discount_price())
                .bind(value.github_repo_url())
                .bind(value.demo_video_url()),
        )
        .await
        .map_err(store)?;
        Ok(())
    }

    pub async fn select_project(&self, id: &Uuid) -> Result<ProjectModel, Error> {
        self.fetch_one(sqlx::query_as(SELECT).bind(id))
            .await
            .map_err(|err| not_found_or_store(err, "project"))
    }

    pub async fn select_many_projects(&self) -> Result<Vec<ProjectModel>, Error> {
        self.fetch_all(sqlx::query_as(SELECT_MANY))
            .await
            .map_err(store)
    }

    pub async fn update_project(&self, value: &ProjectModel) -> Result<(), Error> {
        self.execute(
            sqlx::query(UPDATE)
                .bind(value.updated_at())
                .bind(value.name())
                .bind(value.description())
                .bind(value.category())
                .bind(value.tech_stack())
                .bind(value.what_included())
                .bind(value.price())
                .bind(value.discount_price())
                .bind(value.github_repo_url())
                .bind(value.demo_video_url())
                .bind(value.id()),
        )
        .await
        .map_err(store)?;
        Ok(())
    }

    pub async fn delete_project(&self, id: &Uuid) -> Result<(), Error> {
        self.execute(sqlx::query(DELETE).bind(id))
            .await
            .map_err(store)?;
        Ok(())
    }

    pub async fn count_projects(&self) -> Result<i64, Error> {
        let row = self
            .fetch_one_row(sqlx::query(COUNT))
            .await
            .map_err(store)?;
        row.try_get(0).map_err(store)
    }
}
