use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Deserialize, Validate)]
pub struct RegisterReqJson {
    name: Option<String>,
    #[validate(email)]
    email: String,
    #[validate(length(min = 8))]
    password: String,
}

impl RegisterReqJson {
    pub fn name(&self) -> &Option<String> {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn password(&self) -> &str {
        &self.password
    }
}

#[derive(Serialize)]
pub struct RegisterResJson {
    id: Uuid,
}

impl RegisterResJson {
    pub fn new(id: &Uuid) -> Self {
        Self { id: *id }
    }
}

#[derive(Deserialize, Validate)]
pub struct PasswordBasedReqJson {
    #[validate(email)]
    email: String,
    password: String,
}

impl PasswordBasedReqJson {
    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn password(&self) -> &str {
        &self.password
    }
}

#[derive(Serialize)]
pub struct AuthTokenResJson {
    token: String,
}

impl AuthTokenResJson {
    pub fn new(token: &str) -> Self {
        Self {
            token: token.to_owned(),
        }
    }
}

#[derive(Deserialize, Validate)]
pub struct RequestPasswordResetReqJson {
    #[validate(email)]
    email: String,
}

impl RequestPasswordResetReqJson {
    pub fn email(&self) -> &str {
        &self.email
    }
}

#[derive(Serialize)]
pub struct RequestPasswordResetResJson {
    message: String,
}

impl RequestPasswordResetResJson {
    pub fn new(message: &str) -> Self {
        Self {
            message: message.to_owned(),
        }
    }
}

#[derive(Deserialize, Validate)]
pub struct ConfirmPasswordResetReqJson {
    #[validate(email)]
    email: String,
    code: String,
    #[validate(length(min = 8))]
    password: String,
}

impl ConfirmPasswordResetReqJson {
    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn password(&self) -> &str {
        &self.password
    }
}

#[derive(Serialize)]
pub struct ConfirmPasswordResetResJson {
    id: Uuid,
}

impl ConfirmPasswordResetResJson {
    pub fn new(id: &Uuid) -> Self {
        Self { id: *id }
    }
}

#[derive(Deserialize, Validate)]
pub struct ChangePasswordReqJson {
    #[validate(email)]
    email: String,
    current_password: String,
    #[validate(length(min = 8))]
    new_password: String,
}

impl ChangePasswordReqJson {
    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn current_password(&self) -> &str {
        &self.current_password
    }

    pub fn new_password(&self) -> &str {
        &self.new_password
    }
}

#[derive(Serialize)]
pub struct ChangePasswordResJson {
    id: Uuid,
}

impl ChangePasswordResJson {
    pub fn new(id: &Uuid) -> Self {
        Self { id: *id }
    }
}
