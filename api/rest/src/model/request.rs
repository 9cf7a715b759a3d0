use chrono::{DateTime, Utc};
use ps_dao::access_request::AccessRequestDao;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Deserialize, Validate)]
pub struct SubmitRequestReqJson {
    project_id: Uuid,
    user_name: Option<String>,
    #[validate(length(min = 1), email)]
    user_email: String,
    user_college: Option<String>,
    user_phone: Option<String>,
    message: Option<String>,
}

impl SubmitRequestReqJson {
    pub fn project_id(&self) -> &Uuid {
        &self.project_id
    }

    pub fn user_name(&self) -> &Option<String> {
        &self.user_name
    }

    pub fn user_email(&self) -> &str {
        &self.user_email
    }

    pub fn user_college(&self) -> &Option<String> {
        &self.user_college
    }

    pub fn user_phone(&self) -> &Option<String> {
        &self.user_phone
    }

    pub fn message(&self) -> &Option<String> {
        &self.message
    }
}

#[derive(Deserialize)]
pub struct ListRequestsReqQuery {
    status: Option<String>,
    user_email: Option<String>,
}

impl ListRequestsReqQuery {
    pub fn status(&self) -> &Option<String> {
        &self.status
    }

    pub fn user_email(&self) -> &Option<String> {
        &self.user_email
    }
}

#[derive(Deserialize)]
pub struct ApproveOneRequestReqPath {
    request_id: Uuid,
}

impl ApproveOneRequestReqPath {
    pub fn request_id(&self) -> &Uuid {
        &self.request_id
    }
}

#[derive(Deserialize)]
pub struct ApproveOneRequestReqJson {
    admin_notes: Option<String>,
}

impl ApproveOneRequestReqJson {
    pub fn admin_notes(&self) -> &Option<String> {
        &self.admin_notes
    }
}

#[derive(Deserialize)]
pub struct RejectOneRequestReqPath {
    request_id: Uuid,
}

impl RejectOneRequestReqPath {
    pub fn request_id(&self) -> &Uuid {
        &self.request_id
    }
}

#[derive(Serialize)]
pub struct AccessRequestResJson {
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

impl AccessRequestResJson {
    pub fn new(request_data: &AccessRequestDao) -> Self {
        Self {
            id: *request_data.id(),
            requested_at: *request_data.requested_at(),
            approved_at: *request_data.approved_at(),
            project_id: *request_data.project_id(),
            user_name: request_data.user_name().to_owned(),
            user_email: request_data.user_email().to_owned(),
            user_college: request_data.user_college().to_owned(),
            user_phone: request_data.user_phone().to_owned(),
            message: request_data.message().to_owned(),
            status: request_data.status().as_str().to_owned(),
            admin_notes: request_data.admin_notes().to_owned(),
        }
    }
}

#[derive(Serialize)]
pub struct RequestsResJson {
    requests: Vec<AccessRequestResJson>,
}

impl RequestsResJson {
    pub fn new(requests: Vec<AccessRequestResJson>) -> Self {
        Self { requests }
    }
}

#[derive(Serialize)]
pub struct SubmitRequestResJson {
    success: bool,
    request: AccessRequestResJson,
}

impl SubmitRequestResJson {
    pub fn new(success: &bool, request: AccessRequestResJson) -> Self {
        Self {
            success: *success,
            request,
        }
    }
}

#[derive(Serialize)]
pub struct ApproveRequestResJson {
    approved: AccessRequestResJson,
}

impl ApproveRequestResJson {
    pub fn new(approved: AccessRequestResJson) -> Self {
        Self { approved }
    }
}

#[derive(Serialize)]
pub struct RejectRequestResJson {
    rejected: AccessRequestResJson,
}

impl RejectRequestResJson {
    pub fn new(rejected: AccessRequestResJson) -> Self {
        Self { rejected }
    }
}
