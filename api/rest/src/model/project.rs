use chrono::{DateTime, Utc};
use ps_dao::project::ProjectDao;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Deserialize, Validate)]
pub struct InsertOneProjectReqJson {
    #[validate(length(min = 1))]
    name: String,
    description: Option<String>,
    category: Option<String>,
    tech_stack: Option<Vec<String>>,
    what_included: Option<Vec<String>>,
    #[validate(range(min = 0.0))]
    price: f64,
    #[validate(range(min = 0.0, max = 100.0))]
    discount: Option<f64>,
    github_repo_url: Option<String>,
    demo_video_url: Option<String>,
}

impl InsertOneProjectReqJson {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &Option<String> {
        &self.description
    }

    pub fn category(&self) -> &Option<String> {
        &self.category
    }

    pub fn tech_stack(&self) -> &Option<Vec<String>> {
        &self.tech_stack
    }

    pub fn what_included(&self) -> &Option<Vec<String>> {
        &self.what_included
    }

    pub fn price(&self) -> &f64 {
        &self.price
    }

    pub fn discount(&self) -> &Option<f64> {
        &self.discount
    }

    pub fn github_repo_url(&self) -> &Option<String> {
        &self.github_repo_url
    }

    pub fn demo_video_url(&self) -> &Option<String> {
        &self.demo_video_url
    }
}

#[derive(Deserialize)]
pub struct FindOneProjectReqPath {
    project_id: Uuid,
}

impl FindOneProjectReqPath {
    pub fn project_id(&self) -> &Uuid {
        &self.project_id
    }
}

#[derive(Deserialize, Validate)]
pub struct UpdateOneProjectReqJson {
    name: Option<String>,
    description: Option<String>,
    category: Option<String>,
    tech_stack: Option<Vec<String>>,
    what_included: Option<Vec<String>>,
    #[validate(range(min = 0.0))]
    price: Option<f64>,
    #[validate(range(min = 0.0, max = 100.0))]
    discount: Option<f64>,
    github_repo_url: Option<String>,
    demo_video_url: Option<String>,
}

impl UpdateOneProjectReqJson {
    pub fn name(&self) -> &Option<String> {
        &self.name
    }

    pub fn description(&self) -> &Option<String> {
        &self.description
    }

    pub fn category(&self) -> &Option<String> {
        &self.category
    }

    pub fn tech_stack(&self) -> &Option<Vec<String>> {
        &self.tech_stack
    }

    pub fn what_included(&self) -> &Option<Vec<String>> {
        &self.what_included
    }

    pub fn price(&self) -> &Option<f64> {
        &self.price
    }

    pub fn discount(&self) -> &Option<f64> {
        &self.discount
    }

    pub fn github_repo_url(&self) -> &Option<String> {
        &self.github_repo_url
    }

    pub fn demo_video_url(&self) -> &Option<String> {
        &self.demo_video_url
    }

    pub fn is_all_none(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.category.is_none()
            && self.tech_stack.is_none()
            && self.what_included.is_none()
            && self.price.is_none()
            && self.discount.is_none()
            && self.github_repo_url.is_none()
            && self.demo_video_url.is_none()
    }
}

#[derive(Deserialize)]
pub struct UpdateOneProjectReqPath {
    project_id: Uuid,
}

impl UpdateOneProjectReqPath {
    pub fn project_id(&self) -> &Uuid {
        &self.project_id
    }
}

#[derive(Deserialize)]
pub struct DeleteOneProjectReqPath {
    project_id: Uuid,
}

impl DeleteOneProjectReqPath {
    pub fn project_id(&self) -> &Uuid {
        &self.project_id
    }
}

#[derive(Serialize)]
pub struct ProjectResJson {
    id: Uuid,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    name: String,
    description: String,
    category: String,
    tech_stack: Vec<String>,
    what_included: Vec<String>,
    price: f64,
    discount_price: f64,
    github_repo_url: Option<String>,
    demo_video_url: Option<String>,
    demo_video_id: Option<String>,
}

impl ProjectResJson {
    pub fn new(project_data: &ProjectDao) -> Self {
        Self {
            id: *project_data.id(),
            created_at: *project_data.created_at(),
            updated_at: *project_data.updated_at(),
            name: project_data.name().to_owned(),
            description: project_data.description().to_owned(),
            category: project_data.category().to_owned(),
            tech_stack: project_data.tech_stack().to_vec(),
            what_included: project_data.what_included().to_vec(),
            price: *project_data.price(),
            discount_price: *project_data.discount_price(),
            github_repo_url: project_data.github_repo_url().to_owned(),
            demo_video_url: project_data.demo_video_url().to_owned(),
            demo_video_id: project_data.demo_video_id(),
        }
    }
}

#[derive(Serialize)]
pub struct ProjectsResJson {
    projects: Vec<ProjectResJson>,
}

impl ProjectsResJson {
    pub fn new(projects: Vec<ProjectResJson>) -> Self {
        Self { projects }
    }
}

#[derive(Serialize)]
pub struct OneProjectResJson {
    project: ProjectResJson,
}

impl OneProjectResJson {
    pub fn new(project: ProjectResJson) -> Self {
        Self { project }
    }
}

#[derive(Serialize)]
pub struct DeleteProjectResJson {
    message: String,
    project: ProjectResJson,
}

impl DeleteProjectResJson {
    pub fn new(message: &str, project: ProjectResJson) -> Self {
        Self {
            message: message.to_owned(),
            project,
        }
    }
}
