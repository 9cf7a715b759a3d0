use actix_cors::Cors;
use actix_web::{
    middleware::{ErrorHandlers, Logger},
    web, App, HttpServer,
};
use anyhow::Result;
use configure::configure;
use context::ApiRestCtx;
use error_handler::default_error_handler;
use ps_config::app::AppConfigMode;
use tokio_util::sync::CancellationToken;

mod configure;
pub mod context;
mod error_handler;
mod model;
mod service;

pub struct ApiRestServer {
    mode: AppConfigMode,
    address: String,
    allowed_origin: Option<String>,
    context: web::Data<ApiRestCtx>,
}

impl ApiRestServer {
    pub fn new(
        mode: &AppConfigMode,
        host: &str,
        port: &u16,
        allowed_origin: &Option<String>,
        ctx: ApiRestCtx,
    ) -> Self {
        ps_log::info(Some("⚡"), "ApiRestServer: Initializing component");

        let address = format!("{host}:{port}");
        let context = web::Data::new(ctx);

        Self {
            mode: *mode,
            address,
            allowed_origin: allowed_origin.to_owned(),
            context,
        }
    }

    pub async fn run(self, cancel_token: CancellationToken) -> Result<()> {
        ps_log::info(Some("💫"), "ApiRestServer: Running component");

        let mode = self.mode;
        let allowed_origin = self.allowed_origin;
        let context = self.context;

        let server = HttpServer::new(move || {
            let cors = match mode {
                AppConfigMode::Development => Cors::permissive(),
                AppConfigMode::Production => match &allowed_origin {
                    Some(allowed_origin) => Cors::default()
                        .allowed_origin(allowed_origin)
                        .allow_any_header()
                        .allow_any_method(),
                    None => Cors::default(),
                },
            };

            App::new()
                .wrap(Logger::default())
                .wrap(cors)
                .wrap(ErrorHandlers::new().default_handler(default_error_handler))
                .app_data(context.clone())
                .configure(configure)
        })
        .bind(self.address)?
        .run();

        tokio::select! {
            result = server => Ok(result?),
            _ = cancel_token.cancelled() => {
                ps_log::info(Some("🛑"), "ApiRestServer: Shutting down component");
                Ok(())
            }
        }
    }
}
