use sqlx::{
    prelude::FromRow,
    types::chrono::{DateTime, Utc},
};
use uuid::Uuid;

#[derive(FromRow)]
pub struct ProjectModel {
    id: Uuid,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    name: String,
    description: String,
    category: String,
    tech_stack: String,
    what_included: String,
    price: f64,
    discount_price: f64,
    github_repo_url: Option<String>,
    demo_video_url: Option<String>,
}

impl ProjectModel {
    pub fn new(
        id: &Uuid,
        created_at: &DateTime<Utc>,
        updated_at: &DateTime<Utc>,
        name: &str,
        description: &str,
        category: &str,
        tech_stack: &str,
        what_included: &str,
        price: &f64,
        discount_price: &f64,
        github_repo_url: &Option<String>,
        demo_video_url: &Option<String>,
    ) -> Self {
        Self {
            id: *id,
            created_at: *created_at,
            updated_at: *updated_at,
            name: name.to_owned(),
            description: description.to_owned(),
            category: category.to_owned(),
            tech_stack: tech_stack.to_owned(),
            what_included: what_included.to_owned(),
            price: *price,
            discount_price: *discount_price,
            github_repo_url: github_repo_url.to_owned(),
            demo_video_url: demo_video_url.to_owned(),
        }
    }

    pub fn id(&self) -> &Uuid {
        &self.id
    }

    pub fn created_at(&self) -> &DateTime<Utc> {
        &self.created_at
    }

    pub fn updated_at(&self) -> &DateTime<Utc> {
        &self.updated_at
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn tech_stack(&self) -> &str {
        &self.tech_stack
    }

    pub fn what_included(&self) -> &str {
        &self.what_included
    }

    pub fn price(&self) -> &f64 {
        &self.price
    }

    pub fn discount_price(&self) -> &f64 {
        &self.discount_price
    }

    pub fn github_repo_url(&self) -> &Option<String> {
        &self.github_repo_url
    }

    pub fn demo_video_url(&self) -> &Option<String> {
        &self.demo_video_url
    }
}
