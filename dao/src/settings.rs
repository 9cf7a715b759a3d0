use chrono::{DateTime, Utc};
use ps_db_sqlite::model::settings::SettingsModel as SettingsSqliteModel;
use ps_error::Error;
use uuid::Uuid;

use crate::Db;

/// Per-admin notification preferences. A server-side record rather than
/// client-local state so it survives sessions and can be audited.
#[derive(Debug)]
pub struct SettingsDao {
    admin_id: Uuid,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    notify_new_request: bool,
    notify_approval: bool,
}

impl SettingsDao {
    pub fn new(admin_id: &Uuid) -> Self {
        let now = Utc::now();
        Self {
            admin_id: *admin_id,
            created_at: now,
            updated_at: now,
            notify_new_request: true,
            notify_approval: true,
        }
    }

    pub fn admin_id(&self) -> &Uuid {
        &self.admin_id
    }

    pub fn created_at(&self) -> &DateTime<Utc> {
        &self.created_at
    }

    pub fn updated_at(&self) -> &DateTime<Utc> {
        &self.updated_at
    }

    pub fn notify_new_request(&self) -> &bool {
        &self.notify_new_request
    }

    pub fn notify_approval(&self) -> &bool {
        &self.notify_approval
    }

    pub fn set_notify_new_request(&mut self, notify_new_request: &bool) {
        self.notify_new_request = *notify_new_request;
    }

    pub fn set_notify_approval(&mut self, notify_approval: &bool) {
        self.notify_approval = *notify_approval;
    }

    pub async fn db_insert(&self, db: &Db) -> Result<(), Error> {
        match db {
            Db::SqliteDb(db) => db.insert_settings(&self.to_sqlitedb_model()).await,
        }
    }

    pub async fn db_select(db: &Db, admin_id: &Uuid) -> Result<Self, Error> {
        match db {
            Db::SqliteDb(db) => Ok(Self::from_sqlitedb_model(
                &db.select_settings(admin_id).await?,
            )),
        }
    }

    pub async fn db_update(&mut self, db: &Db) -> Result<(), Error> {
        self.updated_at = Utc::now();
        match db {
            Db::SqliteDb(db) => db.update_settings(&self.to_sqlitedb_model()).await,
        }
    }

    fn from_sqlitedb_model(model: &SettingsSqliteModel) -> Self {
        Self {
            admin_id: *model.admin_id(),
            created_at: *model.created_at(),
            updated_at: *model.updated_at(),
            notify_new_request: *model.notify_new_request(),
            notify_approval: *model.notify_approval(),
        }
    }

    fn to_sqlitedb_model(&self) -> SettingsSqliteModel {
        SettingsSqliteModel::new(
            &self.admin_id,
            &self.created_at,
            &self.updated_at,
            &self.notify_new_request,
            &self.notify_approval,
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
    fn defaults_notify_everything() {
        let settings_data = SettingsDao::new(&Uuid::now_v7());
        assert!(*settings_data.notify_new_request());
        assert!(*settings_data.notify_approval());
    }

    #[tokio::test]
    async fn update_round_trips_preferences() {
        let db = test_db().await;
        let admin_id = Uuid::now_v7();

        let mut settings_data = SettingsDao::new(&admin_id);
        settings_data.db_insert(&db).await.unwrap();

        settings_data.set_notify_new_request(&false);
        settings_data.db_update(&db).await.unwrap();

        let found = SettingsDao::db_select(&db, &admin_id).await.unwrap();
        assert!(!*found.notify_new_request());
        assert!(*found.notify_approval());
    }

    #[tokio::test]
    async fn missing_settings_is_not_found() {
        let db = test_db().await;
        let err = SettingsDao::db_select(&db, &Uuid::now_v7()).await.unwrap_err();
        assert_eq!(err.code(), "not_found");
    }
}
