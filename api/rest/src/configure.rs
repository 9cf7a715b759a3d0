use actix_web::web;

use crate::service::{
    admin::admin_api, auth::auth_api, project::project_api, request::request_api, root::root_api,
};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.configure(root_api).service(
        web::scope("/api")
            .configure(auth_api)
            .configure(project_api)
            .configure(request_api)
            .configure(admin_api),
    );
}
