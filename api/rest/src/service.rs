use actix_web::{http::StatusCode, HttpResponse};
use actix_web_httpauth::extractors::bearer::BearerAuth;
use ps_dao::user::UserDao;
use ps_token_jwt::kind::JwtTokenKind;

use crate::{context::ApiRestCtx, model::Response};

pub mod admin;
pub mod auth;
pub mod project;
pub mod request;
pub mod root;

pub(crate) async fn authed_user(
    ctx: &ApiRestCtx,
    auth: &BearerAuth,
) -> Result<UserDao, HttpResponse> {
    let token_claim = match ctx.token().jwt().decode(auth.token()) {
        Ok(claim) => claim,
        Err(err) => {
            return Err(Response::error_raw(
                &StatusCode::UNAUTHORIZED,
                "unauthorized",
                &err.to_string(),
            ))
        }
    };

    match UserDao::db_select(ctx.dao().db(), token_claim.id()).await {
        Ok(user_data) => Ok(user_data),
        Err(err) => Err(Response::error_raw(
            &StatusCode::UNAUTHORIZED,
            "unauthorized",
            &format!("Failed to get user data: {err}"),
        )),
    }
}

/// Admin-only operations check the claim kind and the role flag on the user
/// record, never a particular email address.
pub(crate) async fn authed_admin(
    ctx: &ApiRestCtx,
    auth: &BearerAuth,
) -> Result<UserDao, HttpResponse> {
    let token_claim = match ctx.token().jwt().decode(auth.token()) {
        Ok(claim) => claim,
        Err(err) => {
            return Err(Response::error_raw(
                &StatusCode::UNAUTHORIZED,
                "unauthorized",
                &err.to_string(),
            ))
        }
    };

    if token_claim.kind() != &JwtTokenKind::Admin {
        return Err(Response::error_raw(
            &StatusCode::FORBIDDEN,
            "forbidden",
            "Must be signed in as an administrator",
        ));
    }

    let user_data = match UserDao::db_select(ctx.dao().db(), token_claim.id()).await {
        Ok(user_data) => user_data,
        Err(err) => {
            return Err(Response::error_raw(
                &StatusCode::UNAUTHORIZED,
                "unauthorized",
                &format!("Failed to get user data: {err}"),
            ))
        }
    };

    if !user_data.is_admin() {
        return Err(Response::error_raw(
            &StatusCode::FORBIDDEN,
            "forbidden",
            "Must be signed in as an administrator",
        ));
    }

    Ok(user_data)
}
