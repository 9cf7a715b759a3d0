use chrono::{DateTime, Utc};
use futures::future;
use ps_db_sqlite::model::project::ProjectModel as ProjectSqliteModel;
use ps_error::Error;
use uuid::Uuid;

use crate::{access_request::AccessRequestDao, util::array_text, Db};

#[derive(Debug)]
pub struct ProjectDao {
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
}

impl ProjectDao {
    pub fn new(
        name: &str,
        description: &str,
        category: &str,
        tech_stack: &[String],
        what_included: &[String],
        price: &f64,
        discount_percent: &Option<f64>,
        github_repo_url: &Option<String>,
        demo_video_url: &Option<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            created_at: now,
            updated_at: now,
            name: name.to_owned(),
            description: description.to_owned(),
            category: category.to_owned(),
            tech_stack: tech_stack.to_vec(),
            what_included: what_included.to_vec(),
            price: *price,
            discount_price: discounted(price, discount_percent),
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

    pub fn tech_stack(&self) -> &Vec<String> {
        &self.tech_stack
    }

    pub fn what_included(&self) -> &Vec<String> {
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

    pub fn set_name(&mut self, name: &str) {
        self.name = name.to_owned();
    }

    pub fn set_description(&mut self, description: &str) {
        self.description = description.to_owned();
    }

    pub fn set_category(&mut self, category: &str) {
        self.category = category.to_owned();
    }

    pub fn set_tech_stack(&mut self, tech_stack: &[String]) {
        self.tech_stack = tech_stack.to_vec();
    }

    pub fn set_what_included(&mut self, what_included: &[String]) {
        self.what_included = what_included.to_vec();
    }

    /// The discounted price is always derived here, never taken from the
    /// caller, so a price/discount pair can not drift apart.
    pub fn set_pricing(&mut self, price: &f64, discount_percent: &Option<f64>) {
        self.price = *price;
        self.discount_price = discounted(price, discount_percent);
    }

    pub fn set_github_repo_url(&mut self, github_repo_url: &Option<String>) {
        self.github_repo_url = github_repo_url.to_owned();
    }

    pub fn set_demo_video_url(&mut self, demo_video_url: &Option<String>) {
        self.demo_video_url = demo_video_url.to_owned();
    }

    /// YouTube video id of `demo_video_url`, for `?v=` and `youtu.be/` forms.
    pub fn demo_video_id(&self) -> Option<String> {
        youtube_id(self.demo_video_url.as_deref()?)
    }

    pub async fn db_insert(&self, db: &Db) -> Result<(), Error> {
        match db {
            Db::SqliteDb(db) => db.insert_project(&self.to_sqlitedb_model()).await,
        }
    }

    pub async fn db_select(db: &Db, id: &Uuid) -> Result<Self, Error> {
        match db {
            Db::SqliteDb(db) => Ok(Self::from_sqlitedb_model(&db.select_project(id).await?)),
        }
    }

    pub async fn db_select_many(db: &Db) -> Result<Vec<Self>, Error> {
        match db {
            Db::SqliteDb(db) => {
                let projects = db.select_many_projects().await?;
                let mut projects_data = Vec::with_capacity(projects.len());
                for project in &projects {
                    projects_data.push(Self::from_sqlitedb_model(project));
                }
                Ok(projects_data)
            }
        }
    }

    pub async fn db_update(&mut self, db: &Db) -> Result<(), Error> {
        self.updated_at = Utc::now();
        match db {
            Db::SqliteDb(db) => db.update_project(&self.to_sqlitedb_model()).await,
        }
    }

    /// Deletes the project and every access request that references it.
    /// Dependent requests go first so a failure can not leave a request
    /// pointing at a missing project.
    pub async fn db_delete(db: &Db, id: &Uuid) -> Result<(), Error> {
        let requests_data = AccessRequestDao::db_select_many_by_project_id(db, id).await?;

        let mut remove_requests = Vec::with_capacity(requests_data.len());
        for request_data in &requests_data {
            remove_requests.push(AccessRequestDao::db_delete(db, request_data.id()));
        }
        future::try_join_all(remove_requests).await?;

        match db {
            Db::SqliteDb(db) => db.delete_project(id).await,
        }
    }

    pub async fn db_count(db: &Db) -> Result<i64, Error> {
        match db {
            Db::SqliteDb(db) => db.count_projects().await,
        }
    }

    fn from_sqlitedb_model(model: &ProjectSqliteModel) -> Self {
        Self {
            id: *model.id(),
            created_at: *model.created_at(),
            updated_at: *model.updated_at(),
            name: model.name().to_owned(),
            description: model.description().to_owned(),
            category: model.category().to_owned(),
            tech_stack: array_text::decode(model.tech_stack()),
            what_included: array_text::decode(model.what_included()),
            price: *model.price(),
            discount_price: *model.discount_price(),
            github_repo_url: model.github_repo_url().to_owned(),
            demo_video_url: model.demo_video_url().to_owned(),
        }
    }

    fn to_sqlitedb_model(&self) -> ProjectSqliteModel {
        ProjectSqliteModel::new(
            &self.id,
            &self.created_at,
            &self.updated_at,
            &self.name,
            &self.description,
            &self.category,
            &array_text::encode(&self.tech_stack),
            &array_text::encode(&self.what_included),
            &self.price,
            &self.discount_price,
            &self.github_repo_url,
            &self.demo_video_url,
        )
    }
}

fn discounted(price: &f64, discount_percent: &Option<f64>) -> f64 {
    match discount_percent {
        Some(percent) => price * (1.0 - percent / 100.0),
        None => *price,
    }
}

fn youtube_id(url: &str) -> Option<String> {
    for marker in ["?v=", "&v="] {
        if let Some(pos) = url.find(marker) {
            let rest = &url[pos + marker.len()..];
            let end = rest.find('&').unwrap_or(rest.len());
            if end > 0 {
                return Some(rest[..end].to_owned());
            }
        }
    }
    if let Some(pos) = url.find("youtu.be/") {
        let rest = &url[pos + "youtu.be/".len()..];
        let end = rest.find(['?', '&']).unwrap_or(rest.len());
        if end > 0 {
            return Some(rest[..end].to_owned());
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use ps_db_sqlite::{db::SqliteDb, model::project::ProjectModel};

    use crate::access_request::{AccessRequestDao, RequestStatus};

    use super::*;

    async fn test_db() -> Db {
        Db::SqliteDb(SqliteDb::new(":memory:", &1).await)
    }

    fn sample_project(discount_percent: &Option<f64>) -> ProjectDao {
        ProjectDao::new(
            "Chat App",
            "Realtime chat application",
            "Web",
            &["Next.js".to_owned(), "SQLite".to_owned()],
            &["Source code".to_owned()],
            &1000.0,
            discount_percent,
            &None,
            &None,
        )
    }

    #[test]
    fn discount_price_is_derived_from_percent() {
        assert_eq!(*sample_project(&Some(20.0)).discount_price(), 800.0);
        assert_eq!(
            *ProjectDao::new(
                "App",
                "",
                "",
                &[],
                &[],
                &500.0,
                &Some(0.0),
                &None,
                &None
            )
            .discount_price(),
            500.0
        );
        assert_eq!(*sample_project(&None).discount_price(), 1000.0);
    }

    #[test]
    fn set_pricing_recomputes_discount() {
        let mut project_data = sample_project(&Some(20.0));
        project_data.set_pricing(&2000.0, &Some(50.0));
        assert_eq!(*project_data.discount_price(), 1000.0);

        // No percent supplied: the discount resets to the new price.
        project_data.set_pricing(&300.0, &None);
        assert_eq!(*project_data.discount_price(), 300.0);
    }

    #[test]
    fn demo_video_id_handles_both_url_forms() {
        let mut project_data = sample_project(&None);

        project_data
            .set_demo_video_url(&Some("https://www.youtube.com/watch?v=dQw4w9WgXcQ".to_owned()));
        assert_eq!(project_data.demo_video_id().unwrap(), "dQw4w9WgXcQ");

        project_data.set_demo_video_url(&Some("https://youtu.be/dQw4w9WgXcQ?t=42".to_owned()));
        assert_eq!(project_data.demo_video_id().unwrap(), "dQw4w9WgXcQ");

        project_data.set_demo_video_url(&Some("https://example.com/video.mp4".to_owned()));
        assert_eq!(project_data.demo_video_id(), None);

        project_data.set_demo_video_url(&None);
        assert_eq!(project_data.demo_video_id(), None);
    }

    #[tokio::test]
    async fn insert_then_select_round_trips_arrays() {
        let db = test_db().await;

        let project_data = sample_project(&Some(20.0));
        project_data.db_insert(&db).await.unwrap();

        let found = ProjectDao::db_select(&db, project_data.id()).await.unwrap();
        assert_eq!(found.tech_stack(), &vec!["Next.js".to_owned(), "SQLite".to_owned()]);
        assert_eq!(found.what_included(), &vec!["Source code".to_owned()]);
        assert_eq!(*found.discount_price(), 800.0);
    }

    #[tokio::test]
    async fn malformed_tech_stack_reads_as_empty() {
        let db = test_db().await;

        let now = Utc::now();
        let model = ProjectModel::new(
            &Uuid::now_v7(),
            &now,
            &now,
            "Broken",
            "",
            "",
            "definitely-not-json",
            "{\"also\": \"wrong\"}",
            &100.0,
            &100.0,
            &None,
            &None,
        );
        match &db {
            Db::SqliteDb(db) => db.insert_project(&model).await.unwrap(),
        }

        let found = ProjectDao::db_select(&db, model.id()).await.unwrap();
        assert!(found.tech_stack().is_empty());
        assert!(found.what_included().is_empty());
    }

    #[tokio::test]
    async fn delete_cascades_dependent_requests() {
        let db = test_db().await;

        let project_data = sample_project(&None);
        project_data.db_insert(&db).await.unwrap();

        for email in ["a@b.com", "c@d.com"] {
            AccessRequestDao::new(project_data.id(), "Student", email, "", "", "")
                .db_insert(&db)
                .await
                .unwrap();
        }

        ProjectDao::db_delete(&db, project_data.id()).await.unwrap();

        let err = ProjectDao::db_select(&db, project_data.id())
            .await
            .unwrap_err();
        assert_eq!(err.code(), "not_found");

        let remaining = AccessRequestDao::db_select_many(&db, &None, &None)
            .await
            .unwrap();
        assert!(remaining.is_empty());

        let count = AccessRequestDao::db_count(&db, &Some(RequestStatus::Pending))
            .await
            .unwrap();
        assert_eq!(count, 0);
    }
}
