use chrono::{DateTime, Utc};
use ps_error::Error;
use sqlx::{Executor, Pool, Row, Sqlite};
use uuid::Uuid;

use crate::{
    db::{not_found_or_store, store, SqliteDb},
    model::access_request::AccessRequestModel,
};

const INSERT: &str = "INSERT INTO \"access_requests\" (\"id\", \"requested_at\", \"approved_at\", \"project_id\", \"user_name\", \"user_email\", \"user_college\", \"user_phone\", \"message\", \"status\", \"admin_notes\") VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)";
const SELECT: &str = "SELECT \"id\", \"requested_at\", \"approved_at\", \"project_id\", \"user_name\", \"user_email\", \"user_college\", \"user_phone\", \"message\", \"status\", \"admin_notes\" FROM \"access_requests\" WHERE \"id\" = ?";
const SELECT_MANY: &str = "SELECT \"id\", \"requested_at\", \"approved_at\", \"project_id\", \"user_name\", \"user_email\", \"user_college\", \"user_phone\", \"message\", \"status\", \"admin_notes\" FROM \"access_requests\" ORDER BY \"requested_at\" DESC";
const SELECT_MANY_BY_STATUS: &str = "SELECT \"id\", \"requested_at\", \"approved_at\", \"project_id\", \"user_name\", \"user_email\", \"user_college\", \"user_phone\", \"message\", \"status\", \"admin_notes\" FROM \"access_requests\" WHERE \"status\" = ? ORDER BY \"requested_at\" DESC";
const SELECT_MANY_BY_USER_EMAIL: &str = "SELECT \"id\", \"requested_at\", \"approved_at\", \"project_id\", \"user_name\", \"user_email\", \"user_college\", \"user_phone\", \"message\", \"status\", \"admin_notes\" FROM \"access_requests\" WHERE \"user_email\" = ? ORDER BY \"requested_at\" DESC";
const SELECT_MANY_BY_STATUS_AND_USER_EMAIL: &str = "SELECT \"id\", \"requested_at\", \"approved_at\", \"project_id\", \"user_name\", \"user_email\", \"user_college\", \"user_phone\", \"message\", \"status\", \"admin_notes\" FROM \"access_requests\" WHERE \"status\" = ? AND \"user_email\" = ? ORDER BY \"requested_at\" DESC";
const SELECT_MANY_BY_PROJECT_ID: &str = "SELECT \"id\", \"requested_at\", \"approved_at\", \"project_id\", \"user_name\", \"user_email\", \"user_college\", \"user_phone\", \"message\", \"status\", \"admin_notes\" FROM \"access_requests\" WHERE \"project_id\" = ?";
// The status guard makes this statement the serialization point for the
// pending -> approved/rejected transition: of two racing callers, exactly one
// observes rows_affected == 1.
const UPDATE_IF_PENDING: &str = "UPDATE \"access_requests\" SET \"status\" = ?, \"approved_at\" = ?, \"admin_notes\" = ? WHERE \"id\" = ? AND \"status\" = 'pending'";
const DELETE: &str = "DELETE FROM \"access_requests\" WHERE \"id\" = ?";
const COUNT: &str = "SELECT COUNT(1) FROM \"access_requests\"";
const COUNT_BY_STATUS: &str = "SELECT COUNT(1) FROM \"access_requests\" WHERE \"status\" = ?";

pub async fn init(pool: &Pool<Sqlite>) {
    ps_log::info(Some("🔧"), "[SQLite] Setting up access_requests table");

    pool.execute("CREATE TABLE IF NOT EXISTS \"access_requests\" (\"id\" blob, \"requested_at\" datetime, \"approved_at\" datetime, \"project_id\" blob, \"user_name\" text, \"user_email\" text, \"user_college\" text, \"user_phone\" text, \"message\" text, \"status\" text, \"admin_notes\" text, PRIMARY KEY (\"id\"))").await.unwrap();

    pool.prepare(INSERT).await.unwrap();
    pool.prepare(SELECT).await.unwrap();
    pool.prepare(SELECT_MANY).await.unwrap();
    pool.prepare(SELECT_MANY_BY_STATUS).await.unwrap();
    pool.prepare(SELECT_MANY_BY_USER_EMAIL).await.unwrap();
    pool.prepare(SELECT_MANY_BY_STATUS_AND_USER_EMAIL)
        .await
        .unwrap();
    pool.prepare(SELECT_MANY_BY_PROJECT_ID).await.unwrap();
    pool.prepare(UPDATE_IF_PENDING).await.unwrap();
    pool.prepare(DELETE).await.unwrap();
    pool.prepare(COUNT).await.unwrap();
    pool.prepare(COUNT_BY_STATUS).await.unwrap();
}

impl SqliteDb {
    pub async fn insert_access_request(&self, value: &AccessRequestModel) -> Result<(), Error> {
        self.execute(
            sqlx::query(INSERT)
                .bind(value.id())
                .bind(value.requested_at())
                .bind(value.approved_at())
                .bind(value.project_id())
                .bind(value.user_name())
                .bind(value.user_email())
                .bind(value.user_college())
                .bind(value.user_phone())
                .bind(value.message())
                .bind(value.status())
                .bind(value.admin_notes()),
        )
        .await
        .map_err(store)?;
        Ok(())
    }

    pub async fn select_access_request(&self, id: &Uuid) -> Result<AccessRequestModel, Error> {
        self.fetch_one(sqlx::query_as(SELECT).bind(id))
            .await
            .map_err(|err| not_found_or_store(err, "access request"))
    }

    pub async fn select_many_access_requests(
        &self,
        status: &Option<&str>,
        user_email: &Option<&str>,
    ) -> Result<Vec<AccessRequestModel>, Error> {
        let query = match (status, user_email) {
            (Some(status), Some(user_email)) => {
                sqlx::query_as(SELECT_MANY_BY_STATUS_AND_USER_EMAIL)
                    .bind(*status)
                    .bind(*user_email)
            }
            (Some(status), None) => sqlx::query_as(SELECT_MANY_BY_STATUS).bind(*status),
            (None, Some(user_email)) => sqlx::query_as(SELECT_MANY_BY_USER_EMAIL).bind(*user_email),
            (None, None) => sqlx::query_as(SELECT_MANY),
        };
        self.fetch_all(query).await.map_err(store)
    }

    pub async fn select_many_access_requests_by_project_id(
        &self,
        project_id: &Uuid,
    ) -> Result<Vec<AccessRequestModel>, Error> {
        self.fetch_all(sqlx::query_as(SELECT_MANY_BY_PROJECT_ID).bind(project_id))
            .await
            .map_err(store)
    }

    /// Returns the number of rows the guarded transition touched: 1 when this
    /// caller won the pending row, 0 when the row is absent or already
    /// terminal.
    pub async fn update_access_request_if_pending(
        &self,
        id: &Uuid,
        status: &str,
        approved_at: &Option<DateTime<Utc>>,
        admin_notes: &Option<String>,
    ) -> Result<u64, Error> {
        let result = self
            .execute(
                sqlx::query(UPDATE_IF_PENDING)
                    .bind(status)
                    .bind(approved_at)
                    .bind(admin_notes)
                    .bind(id),
            )
            .await
            .map_err(store)?;
        Ok(result.rows_affected())
    }

    pub async fn delete_access_request(&self, id: &Uuid) -> Result<(), Error> {
        self.execute(sqlx::query(DELETE).bind(id))
            .await
            .map_err(store)?;
        Ok(())
    }

    pub async fn count_access_requests(&self, status: &Option<&str>) -> Result<i64, Error> {
        let query = match status {
            Some(status) => sqlx::query(COUNT_BY_STATUS).bind(*status),
            None => sqlx::query(COUNT),
        };
        let row = self.fetch_one_row(query).await.map_err(store)?;
        row.try_get(0).map_err(store)
    }
}
