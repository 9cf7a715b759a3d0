use std::sync::Arc;

use ps_dao::Db;
use ps_hash_argon2::argon2::Argon2Hash;
use ps_mailer::MailPayload;
use ps_token_jwt::token::JwtToken;
use tokio::sync::mpsc::UnboundedSender;

pub struct ApiRestCtx {
    hash: ApiRestHashCtx,
    token: ApiRestTokenCtx,
    mailer: Option<ApiRestMailerCtx>,
    dao: ApiRestDaoCtx,
    admin_email: String,
    reset_password_ttl: u32,
}

impl ApiRestCtx {
    pub fn new(
        hash: ApiRestHashCtx,
        token: ApiRestTokenCtx,
        mailer: Option<ApiRestMailerCtx>,
        dao: ApiRestDaoCtx,
        admin_email: String,
        reset_password_ttl: u32,
    ) -> Self {
        Self {
            hash,
            token,
            mailer,
            dao,
            admin_email,
            reset_password_ttl,
        }
    }

    pub fn hash(&self) -> &ApiRestHashCtx {
        &self.hash
    }

    pub fn token(&self) -> &ApiRestTokenCtx {
        &self.token
    }

    pub fn mailer(&self) -> &Option<ApiRestMailerCtx> {
        &self.mailer
    }

    pub fn dao(&self) -> &ApiRestDaoCtx {
        &self.dao
    }

    pub fn admin_email(&self) -> &str {
        &self.admin_email
    }

    pub fn reset_password_ttl(&self) -> &u32 {
        &self.reset_password_ttl
    }
}

pub struct ApiRestHashCtx {
    argon2: Argon2Hash,
}

impl ApiRestHashCtx {
    pub fn new(argon2: Argon2Hash) -> Self {
        Self { argon2 }
    }

    pub fn argon2(&self) -> &Argon2Hash {
        &self.argon2
    }
}

pub struct ApiRestTokenCtx {
    jwt: JwtToken,
}

impl ApiRestTokenCtx {
    pub fn new(jwt: JwtToken) -> Self {
        Self { jwt }
    }

    pub fn jwt(&self) -> &JwtToken {
        &self.jwt
    }
}

pub struct ApiRestMailerCtx {
    sender: UnboundedSender<MailPayload>,
}

impl ApiRestMailerCtx {
    pub fn new(sender: UnboundedSender<MailPayload>) -> Self {
        Self { sender }
    }

    pub fn sender(&self) -> &UnboundedSender<MailPayload> {
        &self.sender
    }
}

pub struct ApiRestDaoCtx {
    db: Arc<Db>,
}

impl ApiRestDaoCtx {
    pub fn new(db: Arc<Db>) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &Db {
        &self.db
    }
}
