use actix_web::{http::StatusCode, web, HttpResponse};
use actix_web_httpauth::extractors::bearer::BearerAuth;
use ps_dao::{
    access_request::{AccessRequestDao, RequestStatus},
    project::ProjectDao,
    settings::SettingsDao,
    user::UserDao,
};
use ps_error::Error;

use crate::{
    context::ApiRestCtx,
    model::{
        admin::{ReportResJson, SettingsResJson, UpdateSettingsReqJson},
        Response,
    },
    service::authed_admin,
};

pub fn admin_api(cfg: &mut web::ServiceConfig) {
    cfg.route("/admin/settings", web::get().to(find_settings))
        .route("/admin/settings", web::put().to(update_settings))
        .route("/admin/report", web::get().to(report));
}

async fn find_settings(ctx: web::Data<ApiRestCtx>, auth: BearerAuth) -> HttpResponse {
    let user_data = match authed_admin(&ctx, &auth).await {
        Ok(user_data) => user_data,
        Err(err) => return err,
    };

    let settings_data = match settings_or_default(&ctx, &user_data).await {
        Ok(settings_data) => settings_data,
        Err(err) => return Response::error(&err),
    };

    Response::data(&StatusCode::OK, &SettingsResJson::new(&settings_data))
}

async fn update_settings(
    ctx: web::Data<ApiRestCtx>,
    auth: BearerAuth,
    data: web::Json<UpdateSettingsReqJson>,
) -> HttpResponse {
    let user_data = match authed_admin(&ctx, &auth).await {
        Ok(user_data) => user_data,
        Err(err) => return err,
    };

    let mut settings_data = match settings_or_default(&ctx, &user_data).await {
        Ok(settings_data) => settings_data,
        Err(err) => return Response::error(&err),
    };

    if let Some(notify_new_request) = data.notify_new_request() {
        settings_data.set_notify_new_request(notify_new_request);
    }
    if let Some(notify_approval) = data.notify_approval() {
        settings_data.set_notify_approval(notify_approval);
    }

    if !data.is_all_none() {
        if let Err(err) = settings_data.db_update(ctx.dao().db()).await {
            return Response::error(&err);
        }
    }

    Response::data(&StatusCode::OK, &SettingsResJson::new(&settings_data))
}

async fn report(ctx: web::Data<ApiRestCtx>, auth: BearerAuth) -> HttpResponse {
    if let Err(err) = authed_admin(&ctx, &auth).await {
        return err;
    }

    let db = ctx.dao().db();
    let (total_projects, total_requests, pending_requests, approved_requests, rejected_requests) =
        match tokio::try_join!(
            ProjectDao::db_count(db),
            AccessRequestDao::db_count(db, &None),
            AccessRequestDao::db_count(db, &Some(RequestStatus::Pending)),
            AccessRequestDao::db_count(db, &Some(RequestStatus::Approved)),
            AccessRequestDao::db_count(db, &Some(RequestStatus::Rejected)),
        ) {
            Ok(counts) => counts,
            Err(err) => return Response::error(&err),
        };

    Response::data(
        &StatusCode::OK,
        &ReportResJson::new(
            &total_projects,
            &total_requests,
            &pending_requests,
            &approved_requests,
            &rejected_requests,
        ),
    )
}

/// The settings row is created at service start; self-heal here if it is
/// missing anyway.
async fn settings_or_default(
    ctx: &ApiRestCtx,
    user_data: &UserDao,
) -> Result<SettingsDao, Error> {
    match SettingsDao::db_select(ctx.dao().db(), user_data.id()).await {
        Ok(settings_data) => Ok(settings_data),
        Err(Error::NotFound(_)) => {
            let settings_data = SettingsDao::new(user_data.id());
            settings_data.db_insert(ctx.dao().db()).await?;
            Ok(settings_data)
        }
        Err(err) => Err(err),
    }
}
