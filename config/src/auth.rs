use serde::Deserialize;

#[derive(Deserialize)]
pub struct AuthConfig {
    admin_email: String,
    admin_password: String,
    reset_password_ttl: u32,
}

impl AuthConfig {
    pub fn admin_email(&self) -> &str {
        &self.admin_email
    }

    pub fn admin_password(&self) -> &str {
        &self.admin_password
    }

    pub fn reset_password_ttl(&self) -> &u32 {
        &self.reset_password_ttl
    }
}
