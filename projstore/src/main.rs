use std::sync::Arc;

use ps_api_rest::{
    context::{ApiRestCtx, ApiRestDaoCtx, ApiRestHashCtx, ApiRestMailerCtx, ApiRestTokenCtx},
    ApiRestServer,
};
use ps_dao::{settings::SettingsDao, user::UserDao, Db};
use ps_db_sqlite::db::SqliteDb;
use ps_error::Error;
use ps_hash_argon2::argon2::Argon2Hash;
use ps_mailer::Mailer;
use ps_token_jwt::token::JwtToken;
use tokio_util::sync::CancellationToken;

mod config_path;

#[tokio::main]
async fn main() {
    let config_path = config_path::get();
    let config = ps_config::from_path(&config_path);

    ps_log::init(config.log().display_level(), config.log().level_filter());

    ps_log::info(Some("🚀"), "[Projstore] Starting");

    let argon2_hash = Argon2Hash::new(
        config.hash().argon2().algorithm(),
        config.hash().argon2().version(),
        config.hash().argon2().salt(),
    );

    let jwt_token = JwtToken::new(
        config.token().jwt().secret(),
        config.token().jwt().expiry_duration(),
    );

    let (mailer, mailer_sender) = match config.mailer() {
        Some(config_mailer) => {
            let (mailer, mailer_sender) = Mailer::new(
                config_mailer.smtp_host(),
                config_mailer.smtp_username(),
                config_mailer.smtp_password(),
                config_mailer.sender_name(),
                config_mailer.sender_email(),
            );
            (Some(mailer), Some(mailer_sender))
        }
        None => (None, None),
    };

    let db = match config.db().sqlite() {
        Some(sqlite) => Arc::new(Db::SqliteDb(
            SqliteDb::new(sqlite.path(), sqlite.max_connections()).await,
        )),
        None => {
            ps_log::panic(None, "[Projstore] No database configuration is specified");
        }
    };

    if let Err(err) = seed_admin(
        &db,
        &argon2_hash,
        config.auth().admin_email(),
        config.auth().admin_password(),
    )
    .await
    {
        ps_log::panic(
            None,
            format!("[Projstore] Seeding administrator account failed: {err}"),
        );
    }

    let api_rest_server = ApiRestServer::new(
        config.app().mode(),
        config.api().rest().host(),
        config.api().rest().port(),
        config.api().rest().allowed_origin(),
        ApiRestCtx::new(
            ApiRestHashCtx::new(argon2_hash),
            ApiRestTokenCtx::new(jwt_token),
            mailer_sender.map(ApiRestMailerCtx::new),
            ApiRestDaoCtx::new(db),
            config.auth().admin_email().to_owned(),
            *config.auth().reset_password_ttl(),
        ),
    );

    let cancel_token = CancellationToken::new();

    match tokio::try_join!(
        async {
            match mailer {
                Some(mailer) => mailer.run(cancel_token.clone()).await,
                None => Mailer::run_none().await,
            }
        },
        api_rest_server.run(cancel_token.clone()),
    ) {
        Ok(_) => ps_log::info(Some("👋"), "[Projstore] Turned off"),
        Err(err) => {
            ps_log::warn(None, "[Projstore] Shutting down all running components");
            cancel_token.cancel();
            ps_log::warn(
                Some("👋"),
                format!("[Projstore] Turned off with error: {err}"),
            );
        }
    }
}

/// Creates the administrator account and its notification settings from the
/// auth configuration when they do not exist yet.
async fn seed_admin(
    db: &Db,
    argon2_hash: &Argon2Hash,
    admin_email: &str,
    admin_password: &str,
) -> Result<(), Error> {
    let admin_data = match UserDao::db_select_by_email(db, admin_email).await {
        Ok(admin_data) => admin_data,
        Err(Error::NotFound(_)) => {
            let password_hash = argon2_hash
                .hash_password(admin_password.as_bytes())
                .map_err(|err| Error::Store(err.to_string()))?;
            let admin_data = UserDao::new(admin_email, &password_hash.to_string(), "Admin", &true);
            admin_data.db_insert(db).await?;
            ps_log::info(Some("🔑"), "[Projstore] Seeded administrator account");
            admin_data
        }
        Err(err) => return Err(err),
    };

    match SettingsDao::db_select(db, admin_data.id()).await {
        Ok(_) => Ok(()),
        Err(Error::NotFound(_)) => SettingsDao::new(admin_data.id()).db_insert(db).await,
        Err(err) => Err(err),
    }
}
