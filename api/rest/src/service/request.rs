use actix_web::{http::StatusCode, web, HttpResponse};
use actix_web_httpauth::extractors::bearer::BearerAuth;
use ps_dao::{
    access_request::{AccessRequestDao, RequestStatus},
    project::ProjectDao,
    settings::SettingsDao,
    user::UserDao,
};
use ps_mailer::MailPayload;
use validator::Validate;

use crate::{
    context::ApiRestCtx,
    model::{
        request::{
            AccessRequestResJson, ApproveOneRequestReqJson, ApproveOneRequestReqPath,
            ApproveRequestResJson, ListRequestsReqQuery, RejectOneRequestReqPath,
            RejectRequestResJson, RequestsResJson, SubmitRequestReqJson, SubmitRequestResJson,
        },
        Response,
    },
    service::{authed_admin, authed_user},
};

pub fn request_api(cfg: &mut web::ServiceConfig) {
    cfg.route("/requests", web::get().to(find_many))
        .route("/requests", web::post().to(submit_one))
        .route(
            "/requests/{request_id}/approve",
            web::post().to(approve_one),
        )
        .route("/requests/{request_id}", web::delete().to(reject_one));
}

async fn submit_one(
    ctx: web::Data<ApiRestCtx>,
    auth: BearerAuth,
    data: web::Json<SubmitRequestReqJson>,
) -> HttpResponse {
    if let Err(err) = authed_user(&ctx, &auth).await {
        return err;
    }

    if let Err(err) = data.validate() {
        return Response::error_raw(&StatusCode::BAD_REQUEST, "validation_error", &err.to_string());
    }

    // The request must reference a live catalog entry; nothing is inserted
    // when the lookup fails.
    let project_data = match ProjectDao::db_select(ctx.dao().db(), data.project_id()).await {
        Ok(project_data) => project_data,
        Err(err) => return Response::error(&err),
    };

    let request_data = AccessRequestDao::new(
        data.project_id(),
        data.user_name().as_deref().unwrap_or_default(),
        data.user_email(),
        data.user_college().as_deref().unwrap_or_default(),
        data.user_phone().as_deref().unwrap_or_default(),
        data.message().as_deref().unwrap_or_default(),
    );

    if let Err(err) = request_data.db_insert(ctx.dao().db()).await {
        return Response::error(&err);
    }

    // Notifications ride the mailer queue: the enqueue is instant and its
    // failure never rolls back or fails the submission.
    if let Some(mailer) = ctx.mailer() {
        if let Err(err) = mailer.sender().send(MailPayload::request_received(
            request_data.user_email(),
            project_data.name(),
        )) {
            ps_log::error(
                None,
                format!("Failed to enqueue request confirmation email: {err}"),
            );
        }

        let settings_data = admin_settings(&ctx).await;
        if settings_data
            .as_ref()
            .map_or(true, |settings_data| *settings_data.notify_new_request())
        {
            if let Err(err) = mailer
                .sender()
                .send(MailPayload::admin_alert(ctx.admin_email(), project_data.name()))
            {
                ps_log::error(None, format!("Failed to enqueue admin alert email: {err}"));
            }
        }
    }

    Response::data(
        &StatusCode::CREATED,
        &SubmitRequestResJson::new(&true, AccessRequestResJson::new(&request_data)),
    )
}

async fn approve_one(
    ctx: web::Data<ApiRestCtx>,
    auth: BearerAuth,
    path: web::Path<ApproveOneRequestReqPath>,
    data: web::Json<ApproveOneRequestReqJson>,
) -> HttpResponse {
    if let Err(err) = authed_admin(&ctx, &auth).await {
        return err;
    }

    let request_data =
        match AccessRequestDao::db_approve(ctx.dao().db(), path.request_id(), data.admin_notes())
            .await
        {
            Ok(request_data) => request_data,
            Err(err) => return Response::error(&err),
        };

    if let Some(mailer) = ctx.mailer() {
        let settings_data = admin_settings(&ctx).await;
        if settings_data
            .as_ref()
            .map_or(true, |settings_data| *settings_data.notify_approval())
        {
            match ProjectDao::db_select(ctx.dao().db(), request_data.project_id()).await {
                Ok(project_data) => {
                    if let Err(err) = mailer.sender().send(MailPayload::approved(
                        request_data.user_email(),
                        project_data.name(),
                    )) {
                        ps_log::error(None, format!("Failed to enqueue approval email: {err}"));
                    }
                }
                Err(err) => ps_log::error(
                    None,
                    format!("Failed to get project data for approval email: {err}"),
                ),
            }
        }
    }

    Response::data(
        &StatusCode::OK,
        &ApproveRequestResJson::new(AccessRequestResJson::new(&request_data)),
    )
}

async fn reject_one(
    ctx: web::Data<ApiRestCtx>,
    auth: BearerAuth,
    path: web::Path<RejectOneRequestReqPath>,
) -> HttpResponse {
    if let Err(err) = authed_admin(&ctx, &auth).await {
        return err;
    }

    // Rejection keeps the row: the record flips to its terminal `rejected`
    // status instead of being deleted.
    let request_data = match AccessRequestDao::db_reject(ctx.dao().db(), path.request_id()).await {
        Ok(request_data) => request_data,
        Err(err) => return Response::error(&err),
    };

    Response::data(
        &StatusCode::OK,
        &RejectRequestResJson::new(AccessRequestResJson::new(&request_data)),
    )
}

async fn find_many(
    ctx: web::Data<ApiRestCtx>,
    auth: BearerAuth,
    query: web::Query<ListRequestsReqQuery>,
) -> HttpResponse {
    let user_data = match authed_user(&ctx, &auth).await {
        Ok(user_data) => user_data,
        Err(err) => return err,
    };

    let status = match query.status() {
        Some(status) => match RequestStatus::from_str(status) {
            Ok(status) => Some(status),
            Err(err) => return Response::error(&err),
        },
        None => None,
    };

    // Non-admin callers only ever see their own submissions.
    let user_email = match *user_data.is_admin() {
        true => query.user_email().as_deref(),
        false => Some(user_data.email()),
    };

    let requests_data =
        match AccessRequestDao::db_select_many(ctx.dao().db(), &status, &user_email).await {
            Ok(requests_data) => requests_data,
            Err(err) => return Response::error(&err),
        };

    Response::data(
        &StatusCode::OK,
        &RequestsResJson::new(
            requests_data
                .iter()
                .map(AccessRequestResJson::new)
                .collect::<Vec<_>>(),
        ),
    )
}

/// Notification preferences of the configured administrator. `None` (no
/// admin row or no settings row yet) means notifications stay enabled.
async fn admin_settings(ctx: &ApiRestCtx) -> Option<SettingsDao> {
    let admin_data = match UserDao::db_select_by_email(ctx.dao().db(), ctx.admin_email()).await {
        Ok(admin_data) => admin_data,
        Err(err) => {
            ps_log::warn(
                None,
                format!("Failed to get admin data for notification settings: {err}"),
            );
            return None;
        }
    };

    match SettingsDao::db_select(ctx.dao().db(), admin_data.id()).await {
        Ok(settings_data) => Some(settings_data),
        Err(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::{http::StatusCode, test, web, App};
    use ps_dao::Db;
    use ps_db_sqlite::db::SqliteDb;
    use ps_hash_argon2::argon2::Argon2Hash;
    use ps_mailer::MailPayload;
    use ps_token_jwt::{kind::JwtTokenKind, token::JwtToken};
    use tokio::sync::mpsc::{self, UnboundedReceiver};
    use uuid::Uuid;

    use crate::{
        configure::configure,
        context::{ApiRestCtx, ApiRestDaoCtx, ApiRestHashCtx, ApiRestMailerCtx, ApiRestTokenCtx},
    };

    use super::*;

    const JWT_SECRET: &str = "test-secret";
    const ADMIN_EMAIL: &str = "admin@example.com";

    async fn test_ctx() -> (ApiRestCtx, Arc<Db>, UnboundedReceiver<MailPayload>, JwtToken) {
        let db = Arc::new(Db::SqliteDb(SqliteDb::new(":memory:", &1).await));
        let (mail_sender, mail_receiver) = mpsc::unbounded_channel::<MailPayload>();

        let ctx = ApiRestCtx::new(
            ApiRestHashCtx::new(Argon2Hash::new("Argon2id", "V0x13", "cHJvanN0b3Jlc2FsdA")),
            ApiRestTokenCtx::new(JwtToken::new(JWT_SECRET, &3600)),
            Some(ApiRestMailerCtx::new(mail_sender)),
            ApiRestDaoCtx::new(db.clone()),
            ADMIN_EMAIL.to_owned(),
            600,
        );

        (ctx, db, mail_receiver, JwtToken::new(JWT_SECRET, &3600))
    }

    async fn seeded_user(db: &Db, email: &str, is_admin: &bool) -> UserDao {
        let user_data = UserDao::new(email, "hash", "Tester", is_admin);
        user_data.db_insert(db).await.unwrap();
        user_data
    }

    async fn seeded_project(db: &Db) -> ProjectDao {
        let project_data = ProjectDao::new(
            "Chat App",
            "Realtime chat application",
            "Web",
            &[],
            &[],
            &1000.0,
            &None,
            &None,
            &None,
        );
        project_data.db_insert(db).await.unwrap();
        project_data
    }

    fn bearer(jwt: &JwtToken, id: &Uuid, kind: &JwtTokenKind) -> (&'static str, String) {
        ("Authorization", format!("Bearer {}", jwt.encode(id, kind).unwrap()))
    }

    #[actix_web::test]
    async fn submit_without_token_is_unauthorized() {
        let (ctx, _db, _mail, _jwt) = test_ctx().await;
        let app =
            test::init_service(App::new().app_data(web::Data::new(ctx)).configure(configure)).await;

        let req = test::TestRequest::post()
            .uri("/api/requests")
            .set_json(serde_json::json!({
                "project_id": Uuid::now_v7(),
                "user_email": "amina@example.com",
            }))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn submit_for_missing_project_creates_nothing() {
        let (ctx, db, mut mail_receiver, jwt) = test_ctx().await;
        let user_data = seeded_user(&db, "amina@example.com", &false).await;
        let app =
            test::init_service(App::new().app_data(web::Data::new(ctx)).configure(configure)).await;

        let req = test::TestRequest::post()
            .uri("/api/requests")
            .insert_header(bearer(&jwt, user_data.id(), &JwtTokenKind::User))
            .set_json(serde_json::json!({
                "project_id": Uuid::now_v7(),
                "user_email": "amina@example.com",
            }))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);

        assert_eq!(AccessRequestDao::db_count(&db, &None).await.unwrap(), 0);
        assert!(mail_receiver.try_recv().is_err());
    }

    #[actix_web::test]
    async fn submit_creates_pending_row_and_enqueues_two_mails() {
        let (ctx, db, mut mail_receiver, jwt) = test_ctx().await;
        let user_data = seeded_user(&db, "amina@example.com", &false).await;
        let project_data = seeded_project(&db).await;
        let app =
            test::init_service(App::new().app_data(web::Data::new(ctx)).configure(configure)).await;

        let req = test::TestRequest::post()
            .uri("/api/requests")
            .insert_header(bearer(&jwt, user_data.id(), &JwtTokenKind::User))
            .set_json(serde_json::json!({
                "project_id": project_data.id(),
                "user_name": "Amina",
                "user_email": "amina@example.com",
                "user_college": "MIT",
            }))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::CREATED);

        let body: serde_json::Value = test::read_body_json(res).await;
        assert_eq!(body["success"], serde_json::json!(true));
        assert_eq!(body["request"]["status"], serde_json::json!("pending"));

        // The response arrived with no worker draining the queue: the
        // submission never waits on delivery.
        let confirmation = mail_receiver.try_recv().unwrap();
        assert_eq!(confirmation.to(), "amina@example.com");
        let alert = mail_receiver.try_recv().unwrap();
        assert_eq!(alert.to(), ADMIN_EMAIL);
        assert!(mail_receiver.try_recv().is_err());

        assert_eq!(
            AccessRequestDao::db_count(&db, &Some(RequestStatus::Pending))
                .await
                .unwrap(),
            1
        );
    }

    #[actix_web::test]
    async fn submit_with_empty_email_is_rejected() {
        let (ctx, db, mut mail_receiver, jwt) = test_ctx().await;
        let user_data = seeded_user(&db, "amina@example.com", &false).await;
        let project_data = seeded_project(&db).await;
        let app =
            test::init_service(App::new().app_data(web::Data::new(ctx)).configure(configure)).await;

        let req = test::TestRequest::post()
            .uri("/api/requests")
            .insert_header(bearer(&jwt, user_data.id(), &JwtTokenKind::User))
            .set_json(serde_json::json!({
                "project_id": project_data.id(),
                "user_email": "",
            }))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);

        assert_eq!(AccessRequestDao::db_count(&db, &None).await.unwrap(), 0);
        assert!(mail_receiver.try_recv().is_err());
    }

    #[actix_web::test]
    async fn approve_once_notifies_once_and_is_terminal() {
        let (ctx, db, mut mail_receiver, jwt) = test_ctx().await;
        let admin_data = seeded_user(&db, ADMIN_EMAIL, &true).await;
        let project_data = seeded_project(&db).await;
        let request_data =
            AccessRequestDao::new(project_data.id(), "Amina", "amina@example.com", "", "", "");
        request_data.db_insert(&db).await.unwrap();
        let app =
            test::init_service(App::new().app_data(web::Data::new(ctx)).configure(configure)).await;

        let req = test::TestRequest::post()
            .uri(&format!("/api/requests/{}/approve", request_data.id()))
            .insert_header(bearer(&jwt, admin_data.id(), &JwtTokenKind::Admin))
            .set_json(serde_json::json!({"admin_notes": "Verified"}))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::OK);

        let body: serde_json::Value = test::read_body_json(res).await;
        assert_eq!(body["approved"]["status"], serde_json::json!("approved"));
        assert_eq!(body["approved"]["admin_notes"], serde_json::json!("Verified"));

        let approval = mail_receiver.try_recv().unwrap();
        assert_eq!(approval.to(), "amina@example.com");

        // Second approval: conflict, and no second notification.
        let req = test::TestRequest::post()
            .uri(&format!("/api/requests/{}/approve", request_data.id()))
            .insert_header(bearer(&jwt, admin_data.id(), &JwtTokenKind::Admin))
            .set_json(serde_json::json!({}))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::CONFLICT);
        assert!(mail_receiver.try_recv().is_err());
    }

    #[actix_web::test]
    async fn approve_requires_admin_token() {
        let (ctx, db, _mail, jwt) = test_ctx().await;
        let user_data = seeded_user(&db, "amina@example.com", &false).await;
        let project_data = seeded_project(&db).await;
        let request_data =
            AccessRequestDao::new(project_data.id(), "Amina", "amina@example.com", "", "", "");
        request_data.db_insert(&db).await.unwrap();
        let app =
            test::init_service(App::new().app_data(web::Data::new(ctx)).configure(configure)).await;

        let req = test::TestRequest::post()
            .uri(&format!("/api/requests/{}/approve", request_data.id()))
            .insert_header(bearer(&jwt, user_data.id(), &JwtTokenKind::User))
            .set_json(serde_json::json!({}))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::FORBIDDEN);
    }

    #[actix_web::test]
    async fn reject_keeps_the_row_and_listing_scopes_to_caller() {
        let (ctx, db, _mail, jwt) = test_ctx().await;
        let admin_data = seeded_user(&db, ADMIN_EMAIL, &true).await;
        let user_data = seeded_user(&db, "amina@example.com", &false).await;
        let project_data = seeded_project(&db).await;

        let own_request =
            AccessRequestDao::new(project_data.id(), "Amina", "amina@example.com", "", "", "");
        own_request.db_insert(&db).await.unwrap();
        let other_request =
            AccessRequestDao::new(project_data.id(), "Badri", "badri@example.com", "", "", "");
        other_request.db_insert(&db).await.unwrap();

        let app =
            test::init_service(App::new().app_data(web::Data::new(ctx)).configure(configure)).await;

        let req = test::TestRequest::delete()
            .uri(&format!("/api/requests/{}", other_request.id()))
            .insert_header(bearer(&jwt, admin_data.id(), &JwtTokenKind::Admin))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::OK);

        let body: serde_json::Value = test::read_body_json(res).await;
        assert_eq!(body["rejected"]["status"], serde_json::json!("rejected"));

        // The rejected row is retained and visible to the admin.
        assert_eq!(
            AccessRequestDao::db_count(&db, &Some(RequestStatus::Rejected))
                .await
                .unwrap(),
            1
        );

        // A non-admin caller only ever sees their own submissions.
        let req = test::TestRequest::get()
            .uri("/api/requests")
            .insert_header(bearer(&jwt, user_data.id(), &JwtTokenKind::User))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::OK);
        let body: serde_json::Value = test::read_body_json(res).await;
        let requests = body["requests"].as_array().unwrap();
        assert_eq!(requests.len(), 1);
        assert_eq!(
            requests[0]["user_email"],
            serde_json::json!("amina@example.com")
        );

        // The admin can filter by any requester email.
        let req = test::TestRequest::get()
            .uri("/api/requests?user_email=badri@example.com")
            .insert_header(bearer(&jwt, admin_data.id(), &JwtTokenKind::Admin))
            .to_request();
        let res = test::call_service(&app, req).await;
        let body: serde_json::Value = test::read_body_json(res).await;
        let requests = body["requests"].as_array().unwrap();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0]["status"], serde_json::json!("rejected"));
    }
}
