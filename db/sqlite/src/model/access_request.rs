use sqlx::{
    prelude::FromRow,
    types::chrono::{DateTime, Utc},
};
use uuid::Uuid;

#[derive(FromRow)]
pub struct AccessRequestModel {
    id: Uuid,
    requested_at: DateTime<Utc>,
    approved_at: Option<DateTime<Utc>>,
    project_id: Uuid,
    user_name: String,
    user_email: String,
    user_college: String,
    user_phone: String,
    message: String,
    status: String,
    admin_notes: Option<String>,
}

impl AccessRequestModel {
    pub fn new(
        id: &Uuid,
        requested_at: &DateTime<Utc>,
        approved_at: &Option<DateTime<Utc>>,
        project_id: &Uuid,
        user_name: &str,
        user_email: &str,
        user_college: &str,
        user_phone: &str,
        message: &str,
        status: &str,
        admin_notes: &Option<String>,
    ) -> Self {
        Self {
            id: *id,
            requested_at: *requested_at,
            approved_at: *approved_at,
            project_id: *project_id,
            user_name: user_name.to_owned(),
            user_email: user_email.to_owned(),
            user_college: user_college.to_owned(),
            user_phone: user_phone.to_owned(),
            message: message.to_owned(),
            status: status.to_owned(),
            admin_notes: admin_notes.to_owned(),
        }
    }

    pub fn id(&self) -> &Uuid {
        &self.id
    }

    pub fn requested_at(&self) -> &DateTime<Utc> {
        &self.requested_at
    }

    pub fn approved_at(&self) -> &Option<DateTime<Utc>> {
        &self.approved_at
    }

    pub fn project_id(&self) -> &Uuid {
        &self.project_id
    }

    pub fn user_name(&self) -> &str {
        &self.user_name
    }

    pub fn user_email(&self) -> &str {
        &self.user_email
    }

    pub fn user_college(&self) -> &str {
        &self.user_college
    }

    pub fn user_phone(&self) -> &str {
        &self.user_phone
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn admin_notes(&self) -> &Option<String> {
        &self.admin_notes
    }
}
