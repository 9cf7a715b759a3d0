use chrono::{DateTime, Utc};
use ps_db_sqlite::model::password_reset::PasswordResetModel as PasswordResetSqliteModel;
use ps_error::Error;
use rand::Rng;
use uuid::Uuid;

use crate::Db;

#[derive(Debug)]
pub struct PasswordResetDao {
    id: Uuid,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    user_id: Uuid,
    code: String,
}

impl PasswordResetDao {
    pub fn new(user_id: &Uuid) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            created_at: now,
            updated_at: now,
            user_id: *user_id,
            code: rand::thread_rng().gen_range(100000..=999999).to_string(),
        }
    }

    pub fn id(&self) -> &Uuid {
        &self.id
    }

    pub fn created_at(&self) -> &DateTime<Utc> {
        &self.created_at
    }

    pub fn updated_at(&self) -> &DateTime<Utc> {
        &self.updated_at
    }

    pub fn user_id(&self) -> &Uuid {
        &self.user_id
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn is_expired(&self, ttl_seconds: &u32) -> bool {
        Utc::now().signed_duration_since(self.created_at).num_seconds()
            > i64::from(*ttl_seconds)
    }

    pub async fn db_insert(&self, db: &Db) -> Result<(), Error> {
        match db {
            Db::SqliteDb(db) => db.insert_password_reset(&self.to_sqlitedb_model()).await,
        }
    }

    pub async fn db_select(db: &Db, id: &Uuid) -> Result<Self, Error> {
        match db {
            Db::SqliteDb(db) => Ok(Self::from_sqlitedb_model(
                &db.select_password_reset(id).await?,
            )),
        }
    }

    pub async fn db_select_latest_by_user_id(db: &Db, user_id: &Uuid) -> Result<Self, Error> {
        match db {
            Db::SqliteDb(db) => Ok(Self::from_sqlitedb_model(
                &db.select_latest_password_reset_by_user_id(user_id).await?,
            )),
        }
    }

    pub async fn db_delete(&self, db: &Db) -> Result<(), Error> {
        match db {
            Db::SqliteDb(db) => db.delete_password_reset(&self.id).await,
        }
    }

    fn from_sqlitedb_model(model: &PasswordResetSqliteModel) -> Self {
        Self {
            id: *model.id(),
            created_at: *model.created_at(),
            updated_at: *model.updated_at(),
            user_id: *model.user_id(),
            code: model.code().to_owned(),
        }
    }

    fn to_sqlitedb_model(&self) -> PasswordResetSqliteModel {
        PasswordResetSqliteModel::new(
            &self.id,
            &self.created_at,
            &self.updated_at,
            &self.user_id,
            &self.code,
        )
    }
}

#[cfg(test)]
mod tests {
    use ps_db_sqlite::db::SqliteDb;

    use super::*;

    async fn test_db() -> Db {
        Db::SqliteDb(SqliteDb::new(":memory:", &1).await)
    }

    #[test]
    fn code_is_six_digits() {
        let reset_data = PasswordResetDao::new(&Uuid::now_v7());
        assert_eq!(reset_data.code().len(), 6);
        assert!(reset_data.code().chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn expiry_follows_ttl() {
        let reset_data = PasswordResetDao::new(&Uuid::now_v7());
        assert!(!reset_data.is_expired(&600));
        assert!(!reset_data.is_expired(&3600));
    }

    #[tokio::test]
    async fn insert_select_delete_round_trip() {
        let db = test_db().await;

        let reset_data = PasswordResetDao::new(&Uuid::now_v7());
        reset_data.db_insert(&db).await.unwrap();

        let found = PasswordResetDao::db_select(&db, reset_data.id())
            .await
            .unwrap();
        assert_eq!(found.code(), reset_data.code());
        assert_eq!(found.user_id(), reset_data.user_id());

        found.db_delete(&db).await.unwrap();
        let err = PasswordResetDao::db_select(&db, reset_data.id())
            .await
            .unwrap_err();
        assert_eq!(err.code(), "not_found");
    }
}
