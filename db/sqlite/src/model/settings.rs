use sqlx::{
    prelude::FromRow,
    types::chrono::{DateTime, Utc},
};
use uuid::Uuid;

#[derive(FromRow)]
pub struct SettingsModel {
    admin_id: Uuid,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    notify_new_request: bool,
    notify_approval: bool,
}

impl SettingsModel {
    pub fn new(
        admin_id: &Uuid,
        created_at: &DateTime<Utc>,
        updated_at: &DateTime<Utc>,
        notify_new_request: &bool,
        notify_approval: &bool,
    ) -> Self {
        Self {
            admin_id: *admin_id,
            created_at: *created_at,
            updated_at: *updated_at,
            notify_new_request: *notify_new_request,
            notify_approval: *notify_approval,
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
}
