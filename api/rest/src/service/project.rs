use actix_web::{http::StatusCode, web, HttpResponse};
use actix_web_httpauth::extractors::bearer::BearerAuth;
use ps_dao::project::ProjectDao;
use validator::Validate;

use crate::{
    context::ApiRestCtx,
    model::{
        project::{
            DeleteOneProjectReqPath, DeleteProjectResJson, FindOneProjectReqPath,
            InsertOneProjectReqJson, OneProjectResJson, ProjectResJson, ProjectsResJson,
            UpdateOneProjectReqJson, UpdateOneProjectReqPath,
        },
        Response,
    },
    service::authed_admin,
};

pub fn project_api(cfg: &mut web::ServiceConfig) {
    cfg.route("/projects", web::get().to(find_many))
        .route("/projects", web::post().to(insert_one))
        .route("/projects/{project_id}", web::get().to(find_one))
        .route("/projects/{project_id}", web::put().to(update_one))
        .route("/projects/{project_id}", web::delete().to(delete_one));
}

async fn find_many(ctx: web::Data<ApiRestCtx>) -> HttpResponse {
    let projects_data = match ProjectDao::db_select_many(ctx.dao().db()).await {
        Ok(projects_data) => projects_data,
        Err(err) => return Response::error(&err),
    };

    Response::data(
        &StatusCode::OK,
        &ProjectsResJson::new(
            projects_data
                .iter()
                .map(ProjectResJson::new)
                .collect::<Vec<_>>(),
        ),
    )
}

async fn find_one(
    ctx: web::Data<ApiRestCtx>,
    path: web::Path<FindOneProjectReqPath>,
) -> HttpResponse {
    let project_data = match ProjectDao::db_select(ctx.dao().db(), path.project_id()).await {
        Ok(project_data) => project_data,
        Err(err) => return Response::error(&err),
    };

    Response::data(
        &StatusCode::OK,
        &OneProjectResJson::new(ProjectResJson::new(&project_data)),
    )
}

async fn insert_one(
    ctx: web::Data<ApiRestCtx>,
    auth: BearerAuth,
    data: web::Json<InsertOneProjectReqJson>,
) -> HttpResponse {
    if let Err(err) = authed_admin(&ctx, &auth).await {
        return err;
    }

    if let Err(err) = data.validate() {
        return Response::error_raw(&StatusCode::BAD_REQUEST, "validation_error", &err.to_string());
    }

    let project_data = ProjectDao::new(
        data.name(),
        data.description().as_deref().unwrap_or_default(),
        data.category().as_deref().unwrap_or_default(),
        data.tech_stack().as_deref().unwrap_or_default(),
        data.what_included().as_deref().unwrap_or_default(),
        data.price(),
        data.discount(),
        data.github_repo_url(),
        data.demo_video_url(),
    );

    if let Err(err) = project_data.db_insert(ctx.dao().db()).await {
        return Response::error(&err);
    }

    Response::data(
        &StatusCode::CREATED,
        &OneProjectResJson::new(ProjectResJson::new(&project_data)),
    )
}

async fn update_one(
    ctx: web::Data<ApiRestCtx>,
    auth: BearerAuth,
    path: web::Path<UpdateOneProjectReqPath>,
    data: web::Json<UpdateOneProjectReqJson>,
) -> HttpResponse {
    if let Err(err) = authed_admin(&ctx, &auth).await {
        return err;
    }

    if let Err(err) = data.validate() {
        return Response::error_raw(&StatusCode::BAD_REQUEST, "validation_error", &err.to_string());
    }

    let mut project_data = match ProjectDao::db_select(ctx.dao().db(), path.project_id()).await {
        Ok(project_data) => project_data,
        Err(err) => return Response::error(&err),
    };

    if let Some(name) = data.name() {
        project_data.set_name(name);
    }
    if let Some(description) = data.description() {
        project_data.set_description(description);
    }
    if let Some(category) = data.category() {
        project_data.set_category(category);
    }
    if let Some(tech_stack) = data.tech_stack() {
        project_data.set_tech_stack(tech_stack);
    }
    if let Some(what_included) = data.what_included() {
        project_data.set_what_included(what_included);
    }
    if data.price().is_some() || data.discount().is_some() {
        // The discounted price is always recomputed from the effective
        // price, never taken from the request.
        let price = data.price().unwrap_or(*project_data.price());
        project_data.set_pricing(&price, data.discount());
    }
    if let Some(github_repo_url) = data.github_repo_url() {
        project_data.set_github_repo_url(&Some(github_repo_url.to_owned()));
    }
    if let Some(demo_video_url) = data.demo_video_url() {
        project_data.set_demo_video_url(&Some(demo_video_url.to_owned()));
    }

    if !data.is_all_none() {
        if let Err(err) = project_data.db_update(ctx.dao().db()).await {
            return Response::error(&err);
        }
    }

    Response::data(
        &StatusCode::OK,
        &OneProjectResJson::new(ProjectResJson::new(&project_data)),
    )
}

async fn delete_one(
    ctx: web::Data<ApiRestCtx>,
    auth: BearerAuth,
    path: web::Path<DeleteOneProjectReqPath>,
) -> HttpResponse {
    if let Err(err) = authed_admin(&ctx, &auth).await {
        return err;
    }

    let project_data = match ProjectDao::db_select(ctx.dao().db(), path.project_id()).await {
        Ok(project_data) => project_data,
        Err(err) => return Response::error(&err),
    };

    // Dependent access requests are removed with the project.
    if let Err(err) = ProjectDao::db_delete(ctx.dao().db(), path.project_id()).await {
        return Response::error(&err);
    }

    Response::data(
        &StatusCode::OK,
        &DeleteProjectResJson::new(
            "Project deleted successfully",
            ProjectResJson::new(&project_data),
        ),
    )
}
