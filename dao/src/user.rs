use chrono::{DateTime, Utc};
use ps_db_sqlite::model::user::UserModel as UserSqliteModel;
use ps_error::Error;
use uuid::Uuid;

use crate::Db;

#[derive(Debug)]
pub struct UserDao {
    id: Uuid,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    email: String,
    password_hash: String,
    name: String,
    is_admin: bool,
}

impl UserDao {
    pub fn new(email: &str, password_hash: &str, name: &str, is_admin: &bool) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            created_at: now,
            updated_at: now,
            email: email.to_owned(),
            password_hash: password_hash.to_owned(),
            name: name.to_owned(),
            is_admin: *is_admin,
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

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn password_hash(&self) -> &str {
        &self.password_hash
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_admin(&self) -> &bool {
        &self.is_admin
    }

    pub fn set_password_hash(&mut self, password_hash: &str) {
        self.password_hash = password_hash.to_owned();
    }

    pub async fn db_insert(&self, db: &Db) -> Result<(), Error> {
        match db {
            Db::SqliteDb(db) => db.insert_user(&self.to_sqlitedb_model()).await,
        }
    }

    pub async fn db_select(db: &Db, id: &Uuid) -> Result<Self, Error> {
        match db {
            Db::SqliteDb(db) => Ok(Self::from_sqlitedb_model(&db.select_user(id).await?)),
        }
    }

    pub async fn db_select_by_email(db: &Db, email: &str) -> Result<Self, Error> {
        match db {
            Db::SqliteDb(db) => Ok(Self::from_sqlitedb_model(
                &db.select_user_by_email(email).await?,
            )),
        }
    }

    pub async fn db_update(&mut self, db: &Db) -> Result<(), Error> {
        self.updated_at = Utc::now();
        match db {
            Db::SqliteDb(db) => db.update_user(&self.to_sqlitedb_model()).await,
        }
    }

    fn from_sqlitedb_model(model: &UserSqliteModel) -> Self {
        Self {
            id: *model.id(),
            created_at: *model.created_at(),
            updated_at: *model.updated_at(),
            email: model.email().to_owned(),
            password_hash: model.password_hash().to_owned(),
            name: model.name().to_owned(),
            is_admin: *model.is_admin(),
        }
    }

    fn to_sqlitedb_model(&self) -> UserSqliteModel {
        UserSqliteModel::new(
            &self.id,
            &self.created_at,
            &self.updated_at,
            &self.email,
            &self.password_hash,
            &self.name,
            &self.is_admin,
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

    #[tokio::test]
    async fn insert_then_select_by_email() {
        let db = test_db().await;

        let user_data = UserDao::new("amina@example.com", "hash", "Amina", &false);
        user_data.db_insert(&db).await.unwrap();

        let found = UserDao::db_select_by_email(&db, "amina@example.com")
            .await
            .unwrap();
        assert_eq!(found.id(), user_data.id());
        assert_eq!(found.name(), "Amina");
        assert!(!found.is_admin());
    }

    #[tokio::test]
    async fn select_unknown_email_is_not_found() {
        let db = test_db().await;

        let err = UserDao::db_select_by_email(&db, "nobody@example.com")
            .await
            .unwrap_err();
        assert_eq!(err, Error::NotFound("user not found".to_owned()));
    }

    #[tokio::test]
    async fn duplicate_email_is_a_store_error() {
        let db = test_db().await;

        UserDao::new("amina@example.com", "hash", "Amina", &false)
            .db_insert(&db)
            .await
            .unwrap();
        let err = UserDao::new("amina@example.com", "hash", "Impostor", &false)
            .db_insert(&db)
            .await
            .unwrap_err();
        assert_eq!(err.code(), "store_error");
    }

    #[tokio::test]
    async fn update_replaces_password_hash() {
        let db = test_db().await;

        let mut user_data = UserDao::new("amina@example.com", "old-hash", "Amina", &false);
        user_data.db_insert(&db).await.unwrap();

        user_data.set_password_hash("new-hash");
        user_data.db_update(&db).await.unwrap();

        let found = UserDao::db_select(&db, user_data.id()).await.unwrap();
        assert_eq!(found.password_hash(), "new-hash");
    }
}
