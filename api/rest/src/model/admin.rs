use chrono::{DateTime, Utc};
use ps_dao::settings::SettingsDao;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Serialize)]
pub struct SettingsResJson {
    admin_id: Uuid,
    updated_at: DateTime<Utc>,
    notify_new_request: bool,
    notify_approval: bool,
}

impl SettingsResJson {
    pub fn new(settings_data: &SettingsDao) -> Self {
        Self {
            admin_id: *settings_data.admin_id(),
            updated_at: *settings_data.updated_at(),
            notify_new_request: *settings_data.notify_new_request(),
            notify_approval: *settings_data.notify_approval(),
        }
    }
}

#[derive(Deserialize)]
pub struct UpdateSettingsReqJson {
    notify_new_request: Option<bool>,
    notify_approval: Option<bool>,
}

impl UpdateSettingsReqJson {
    pub fn notify_new_request(&self) -> &Option<bool> {
        &self.notify_new_request
    }

    pub fn notify_approval(&self) -> &Option<bool> {
        &self.notify_approval
    }

    pub fn is_all_none(&self) -> bool {
        self.notify_new_request.is_none() && self.notify_approval.is_none()
    }
}

#[derive(Serialize)]
pub struct ReportResJson {
    total_projects: i64,
    total_requests: i64,
    pending_requests: i64,
    approved_requests: i64,
    rejected_requests: i64,
    approval_rate: f64,
}

impl ReportResJson {
    pub fn new(
        total_projects: &i64,
        total_requests: &i64,
        pending_requests: &i64,
        approved_requests: &i64,
        rejected_requests: &i64,
    ) -> Self {
        let approval_rate = match *total_requests {
            0 => 0.0,
            total => (*approved_requests as f64 / total as f64) * 100.0,
        };
        Self {
            total_projects: *total_projects,
            total_requests: *total_requests,
            pending_requests: *pending_requests,
            approved_requests: *approved_requests,
            rejected_requests: *rejected_requests,
            approval_rate,
        }
    }
}
