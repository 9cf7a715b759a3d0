use actix_web::{http::StatusCode, web, HttpResponse};
use actix_web_httpauth::extractors::bearer::BearerAuth;
use ps_dao::{password_reset::PasswordResetDao, user::UserDao};
use ps_mailer::MailPayload;
use ps_token_jwt::kind::JwtTokenKind;
use validator::Validate;

use crate::{
    context::ApiRestCtx,
    model::{
        auth::{
            AuthTokenResJson, ChangePasswordReqJson, ChangePasswordResJson,
            ConfirmPasswordResetReqJson, ConfirmPasswordResetResJson, PasswordBasedReqJson,
            RegisterReqJson, RegisterResJson, RequestPasswordResetReqJson,
            RequestPasswordResetResJson,
        },
        Response,
    },
};

const RESET_SENT_MESSAGE: &str = "If the email exists in our system, a reset code has been sent";

pub fn auth_api(cfg: &mut web::ServiceConfig) {
    cfg.route("/auth/token", web::get().to(token))
        .route("/auth/register", web::post().to(register))
        .route("/auth/password-based", web::post().to(password_based))
        .route(
            "/auth/request-password-reset",
            web::post().to(request_password_reset),
        )
        .route(
            "/auth/confirm-password-reset",
            web::post().to(confirm_password_reset),
        )
        .route("/auth/change-password", web::post().to(change_password));
}

async fn token(ctx: web::Data<ApiRestCtx>, auth: BearerAuth) -> HttpResponse {
    let token = auth.token();

    let token_claim = match ctx.token().jwt().decode(token) {
        Ok(claim) => claim,
        Err(err) => {
            return Response::error_raw(&StatusCode::UNAUTHORIZED, "unauthorized", &err.to_string())
        }
    };

    if let Err(err) = UserDao::db_select(ctx.dao().db(), token_claim.id()).await {
        return Response::error_raw(
            &StatusCode::UNAUTHORIZED,
            "unauthorized",
            &format!("Failed to get user data: {err}"),
        );
    }

    let token = match ctx.token().jwt().need_renew(&token_claim) {
        Ok(need) => {
            if need {
                match ctx.token().jwt().renew(&token_claim) {
                    Ok(token) => token,
                    Err(err) => {
                        return Response::error_raw(
                            &StatusCode::INTERNAL_SERVER_ERROR,
                            "store_error",
                            &err.to_string(),
                        )
                    }
                }
            } else {
                token.to_owned()
            }
        }
        Err(err) => {
            return Response::error_raw(
                &StatusCode::INTERNAL_SERVER_ERROR,
                "store_error",
                &err.to_string(),
            )
        }
    };

    Response::data(&StatusCode::OK, &AuthTokenResJson::new(&token))
}

async fn register(ctx: web::Data<ApiRestCtx>, data: web::Json<RegisterReqJson>) -> HttpResponse {
    if let Err(err) = data.validate() {
        return Response::error_raw(&StatusCode::BAD_REQUEST, "validation_error", &err.to_string());
    }

    if UserDao::db_select_by_email(ctx.dao().db(), data.email())
        .await
        .is_ok()
    {
        return Response::error_raw(
            &StatusCode::BAD_REQUEST,
            "validation_error",
            "Account has been registered",
        );
    }

    let password_hash = match ctx.hash().argon2().hash_password(data.password().as_bytes()) {
        Ok(hash) => hash,
        Err(err) => {
            return Response::error_raw(
                &StatusCode::INTERNAL_SERVER_ERROR,
                "store_error",
                &err.to_string(),
            )
        }
    };

    let user_data = UserDao::new(
        data.email(),
        &password_hash.to_string(),
        data.name().as_deref().unwrap_or_default(),
        &false,
    );

    if let Err(err) = user_data.db_insert(ctx.dao().db()).await {
        return Response::error(&err);
    }

    Response::data(&StatusCode::CREATED, &RegisterResJson::new(user_data.id()))
}

async fn password_based(
    ctx: web::Data<ApiRestCtx>,
    data: web::Json<PasswordBasedReqJson>,
) -> HttpResponse {
    if let Err(err) = data.validate() {
        return Response::error_raw(&StatusCode::BAD_REQUEST, "validation_error", &err.to_string());
    }

    // One message for a missing account and a wrong password.
    let user_data = match UserDao::db_select_by_email(ctx.dao().db(), data.email()).await {
        Ok(user_data) => user_data,
        Err(_) => {
            return Response::error_raw(
                &StatusCode::UNAUTHORIZED,
                "unauthorized",
                "Invalid email or password",
            )
        }
    };

    if ctx
        .hash()
        .argon2()
        .verify_password(data.password(), user_data.password_hash())
        .is_err()
    {
        return Response::error_raw(
            &StatusCode::UNAUTHORIZED,
            "unauthorized",
            "Invalid email or password",
        );
    }

    let kind = match *user_data.is_admin() {
        true => JwtTokenKind::Admin,
        false => JwtTokenKind::User,
    };

    let token = match ctx.token().jwt().encode(user_data.id(), &kind) {
        Ok(token) => token,
        Err(err) => {
            return Response::error_raw(
                &StatusCode::INTERNAL_SERVER_ERROR,
                "store_error",
                &err.to_string(),
            )
        }
    };

    Response::data(&StatusCode::OK, &AuthTokenResJson::new(&token))
}

async fn request_password_reset(
    ctx: web::Data<ApiRestCtx>,
    data: web::Json<RequestPasswordResetReqJson>,
) -> HttpResponse {
    if let Err(err) = data.validate() {
        return Response::error_raw(&StatusCode::BAD_REQUEST, "validation_error", &err.to_string());
    }

    // Whether the account exists is never revealed here.
    let user_data = match UserDao::db_select_by_email(ctx.dao().db(), data.email()).await {
        Ok(user_data) => user_data,
        Err(_) => {
            return Response::data(
                &StatusCode::OK,
                &RequestPasswordResetResJson::new(RESET_SENT_MESSAGE),
            )
        }
    };

    let reset_data = PasswordResetDao::new(user_data.id());

    if let Err(err) = reset_data.db_insert(ctx.dao().db()).await {
        return Response::error(&err);
    }

    if let Some(mailer) = ctx.mailer() {
        if let Err(err) = mailer.sender().send(MailPayload::password_reset_code(
            data.email(),
            reset_data.code(),
            ctx.reset_password_ttl(),
        )) {
            ps_log::error(None, format!("Failed to enqueue reset code email: {err}"));
        }
    }

    Response::data(
        &StatusCode::OK,
        &RequestPasswordResetResJson::new(RESET_SENT_MESSAGE),
    )
}

async fn confirm_password_reset(
    ctx: web::Data<ApiRestCtx>,
    data: web::Json<ConfirmPasswordResetReqJson>,
) -> HttpResponse {
    if let Err(err) = data.validate() {
        return Response::error_raw(&StatusCode::BAD_REQUEST, "validation_error", &err.to_string());
    }

    let mut user_data = match UserDao::db_select_by_email(ctx.dao().db(), data.email()).await {
        Ok(user_data) => user_data,
        Err(_) => {
            return Response::error_raw(
                &StatusCode::BAD_REQUEST,
                "validation_error",
                "Invalid or expired reset code",
            )
        }
    };

    let reset_data =
        match PasswordResetDao::db_select_latest_by_user_id(ctx.dao().db(), user_data.id()).await {
            Ok(reset_data) => reset_data,
            Err(_) => {
                return Response::error_raw(
                    &StatusCode::BAD_REQUEST,
                    "validation_error",
                    "Invalid or expired reset code",
                )
            }
        };

    if data.code() != reset_data.code() {
        return Response::error_raw(
            &StatusCode::BAD_REQUEST,
            "validation_error",
            "Invalid or expired reset code",
        );
    }

    if reset_data.is_expired(ctx.reset_password_ttl()) {
        if let Err(err) = reset_data.db_delete(ctx.dao().db()).await {
            return Response::error(&err);
        }
        return Response::error_raw(
            &StatusCode::BAD_REQUEST,
            "validation_error",
            "Invalid or expired reset code",
        );
    }

    let password_hash = match ctx.hash().argon2().hash_password(data.password().as_bytes()) {
        Ok(hash) => hash,
        Err(err) => {
            return Response::error_raw(
                &StatusCode::INTERNAL_SERVER_ERROR,
                "store_error",
                &err.to_string(),
            )
        }
    };

    user_data.set_password_hash(&password_hash.to_string());

    if let Err(err) = user_data.db_update(ctx.dao().db()).await {
        return Response::error(&err);
    }

    // The code is single-use.
    if let Err(err) = reset_data.db_delete(ctx.dao().db()).await {
        return Response::error(&err);
    }

    if let Some(mailer) = ctx.mailer() {
        if let Err(err) = mailer
            .sender()
            .send(MailPayload::password_changed(user_data.email()))
        {
            ps_log::error(
                None,
                format!("Failed to enqueue password changed email: {err}"),
            );
        }
    }

    Response::data(
        &StatusCode::OK,
        &ConfirmPasswordResetResJson::new(user_data.id()),
    )
}

async fn change_password(
    ctx: web::Data<ApiRestCtx>,
    data: web::Json<ChangePasswordReqJson>,
) -> HttpResponse {
    if let Err(err) = data.validate() {
        return Response::error_raw(&StatusCode::BAD_REQUEST, "validation_error", &err.to_string());
    }

    if data.current_password() == data.new_password() {
        return Response::error_raw(
            &StatusCode::BAD_REQUEST,
            "validation_error",
            "New password must be different from current password",
        );
    }

    let mut user_data = match UserDao::db_select_by_email(ctx.dao().db(), data.email()).await {
        Ok(user_data) => user_data,
        Err(err) => return Response::error(&err),
    };

    if ctx
        .hash()
        .argon2()
        .verify_password(data.current_password(), user_data.password_hash())
        .is_err()
    {
        return Response::error_raw(
            &StatusCode::UNAUTHORIZED,
            "unauthorized",
            "Current password is incorrect",
        );
    }

    let password_hash = match ctx
        .hash()
        .argon2()
        .hash_password(data.new_password().as_bytes())
    {
        Ok(hash) => hash,
        Err(err) => {
            return Response::error_raw(
                &StatusCode::INTERNAL_SERVER_ERROR,
                "store_error",
                &err.to_string(),
            )
        }
    };

    user_data.set_password_hash(&password_hash.to_string());

    if let Err(err) = user_data.db_update(ctx.dao().db()).await {
        return Response::error(&err);
    }

    if let Some(mailer) = ctx.mailer() {
        if let Err(err) = mailer
            .sender()
            .send(MailPayload::password_changed(user_data.email()))
        {
            ps_log::error(
                None,
                format!("Failed to enqueue password changed email: {err}"),
            );
        }
    }

    Response::data(&StatusCode::OK, &ChangePasswordResJson::new(user_data.id()))
}
