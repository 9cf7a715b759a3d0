use chrono::{DateTime, Utc};
use ps_db_sqlite::model::access_request::AccessRequestModel as AccessRequestSqliteModel;
use ps_error::Error;
use uuid::Uuid;

use crate::Db;

/// `Approved` and `Rejected` are terminal. The only transitions are
/// `Pending -> Approved` and `Pending -> Rejected`, guarded in the store by a
/// conditional update so racing callers serialize there.
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum RequestStatus {
    Pending,
    Approved,
    Rejected,
}

impl RequestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }

    pub fn from_str(value: &str) -> Result<Self, Error> {
        match value {
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            value => Err(Error::Validation(format!("unknown request status '{value}'"))),
        }
    }
}

#[derive(Debug)]
pub struct AccessRequestDao {
    id: Uuid,
    requested_at: DateTime<Utc>,
    approved_at: Option<DateTime<Utc>>,
    project_id: Uuid,
    user_name: String,
    user_email: String,
    user_college: String,
    user_phone: String,
    message: String,
    status: RequestStatus,
    admin_notes: Option<String>,
}

impl AccessRequestDao {
    pub fn new(
        project_id: &Uuid,
        user_name: &str,
        user_email: &str,
        user_college: &str,
        user_phone: &str,
        message: &str,
    ) -> Self {
        Self {
            id: Uuid::now_v7(),
            requested_at: Utc::now(),
            approved_at: None,
            project_id: *project_id,
            user_name: user_name.to_owned(),
            user_email: user_email.to_owned(),
            user_college: user_college.to_owned(),
            user_phone: user_phone.to_owned(),
            message: message.to_owned(),
            status: RequestStatus::Pending,
            admin_notes: None,
        }
    }

    pub fn id(&self) -> &Uuid {
        &self.id
    }

    pub fn requested_at(&self) -> &DateTime<Utc> {
        &self.requested_at
    }

    pub fn approved_at(&self) -> &Option<DateTime<Utc>> {
        &self.approved_at
    }

    pub fn project_id(&self) -> &Uuid {
        &self.project_id
    }

    pub fn user_name(&self) -> &str {
        &self.user_name
    }

    pub fn user_email(&self) -> &str {
        &self.user_email
    }

    pub fn user_college(&self) -> &str {
        &self.user_college
    }

    pub fn user_phone(&self) -> &str {
        &self.user_phone
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn status(&self) -> &RequestStatus {
        &self.status
    }

    pub fn admin_notes(&self) -> &Option<String> {
        &self.admin_notes
    }

    pub async fn db_insert(&self, db: &Db) -> Result<(), Error> {
        match db {
            Db::SqliteDb(db) => db.insert_access_request(&self.to_sqlitedb_model()).await,
        }
    }

    pub async fn db_select(db: &Db, id: &Uuid) -> Result<Self, Error> {
        match db {
            Db::SqliteDb(db) => Self::from_sqlitedb_model(&db.select_access_request(id).await?),
        }
    }

    pub async fn db_select_many(
        db: &Db,
        status: &Option<RequestStatus>,
        user_email: &Option<&str>,
    ) -> Result<Vec<Self>, Error> {
        match db {
            Db::SqliteDb(db) => {
                let requests = db
                    .select_many_access_requests(&status.map(|status| status.as_str()), user_email)
                    .await?;
                let mut requests_data = Vec::with_capacity(requests.len());
                for request in &requests {
                    requests_data.push(Self::from_sqlitedb_model(request)?);
                }
                Ok(requests_data)
            }
        }
    }

    pub async fn db_select_many_by_project_id(db: &Db, project_id: &Uuid) -> Result<Vec<Self>, Error> {
        match db {
            Db::SqliteDb(db) => {
                let requests = db
                    .select_many_access_requests_by_project_id(project_id)
                    .await?;
                let mut requests_data = Vec::with_capacity(requests.len());
                for request in &requests {
                    requests_data.push(Self::from_sqlitedb_model(request)?);
                }
                Ok(requests_data)
            }
        }
    }

    /// Transitions `pending -> approved`, stamping `approved_at` and storing
    /// the admin notes. Exactly one of any set of racing callers wins; the
    /// rest observe `InvalidState`. A request that is already terminal is
    /// never re-processed.
    pub async fn db_approve(
        db: &Db,
        id: &Uuid,
        admin_notes: &Option<String>,
    ) -> Result<Self, Error> {
        Self::db_transition(db, id, &RequestStatus::Approved, &Some(Utc::now()), admin_notes).await
    }

    /// Transitions `pending -> rejected`. The row is retained for audit, not
    /// deleted.
    pub async fn db_reject(db: &Db, id: &Uuid) -> Result<Self, Error> {
        Self::db_transition(db, id, &RequestStatus::Rejected, &None, &None).await
    }

    async fn db_transition(
        db: &Db,
        id: &Uuid,
        status: &RequestStatus,
        approved_at: &Option<DateTime<Utc>>,
        admin_notes: &Option<String>,
    ) -> Result<Self, Error> {
        let rows_affected = match db {
            Db::SqliteDb(db) => {
                db.update_access_request_if_pending(id, status.as_str(), approved_at, admin_notes)
                    .await?
            }
        };

        if rows_affected == 0 {
            // Either the id does not exist or the row left `pending` first;
            // re-read to tell the two apart.
            let existing = Self::db_select(db, id).await?;
            return Err(Error::InvalidState(format!(
                "access request is already {}",
                existing.status().as_str()
            )));
        }

        Self::db_select(db, id).await
    }

    pub async fn db_delete(db: &Db, id: &Uuid) -> Result<(), Error> {
        match db {
            Db::SqliteDb(db) => db.delete_access_request(id).await,
        }
    }

    pub async fn db_count(db: &Db, status: &Option<RequestStatus>) -> Result<i64, Error> {
        match db {
            Db::SqliteDb(db) => {
                db.count_access_requests(&status.map(|status| status.as_str()))
                    .await
            }
        }
    }

    fn from_sqlitedb_model(model: &AccessRequestSqliteModel) -> Result<Self, Error> {
        Ok(Self {
            id: *model.id(),
            requested_at: *model.requested_at(),
            approved_at: *model.approved_at(),
            project_id: *model.project_id(),
            user_name: model.user_name().to_owned(),
            user_email: model.user_email().to_owned(),
            user_college: model.user_college().to_owned(),
            user_phone: model.user_phone().to_owned(),
            message: model.message().to_owned(),
            status: RequestStatus::from_str(model.status())?,
            admin_notes: model.admin_notes().to_owned(),
        })
    }

    fn to_sqlitedb_model(&self) -> AccessRequestSqliteModel {
        AccessRequestSqliteModel::new(
            &self.id,
            &self.requested_at,
            &self.approved_at,
            &self.project_id,
            &self.user_name,
            &self.user_email,
            &self.user_college,
            &self.user_phone,
            &self.message,
            self.status.as_str(),
            &self.admin_notes,
        )
    }
}

#[cfg(test)]
mod tests {
    use ps_db_sqlite::db::SqliteDb;

    use crate::project::ProjectDao;

    use super::*;

    async fn test_db() -> Db {
        Db::SqliteDb(SqliteDb::new(":memory:", &1).await)
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

    #[test]
    fn status_strings_round_trip() {
        for status in [
            RequestStatus::Pending,
            RequestStatus::Approved,
            RequestStatus::Rejected,
        ] {
            assert_eq!(RequestStatus::from_str(status.as_str()).unwrap(), status);
        }
        assert_eq!(
            RequestStatus::from_str("cancelled").unwrap_err().code(),
            "validation_error"
        );
    }

    #[tokio::test]
    async fn new_request_starts_pending_with_timestamp() {
        let db = test_db().await;
        let project_data = seeded_project(&db).await;

        let request_data =
            AccessRequestDao::new(project_data.id(), "Amina", "amina@example.com", "MIT", "", "");
        request_data.db_insert(&db).await.unwrap();

        let found = AccessRequestDao::db_select(&db, request_data.id())
            .await
            .unwrap();
        assert_eq!(found.status(), &RequestStatus::Pending);
        assert_eq!(found.approved_at(), &None);
        assert_eq!(found.requested_at(), request_data.requested_at());
        assert_eq!(found.project_id(), project_data.id());
    }

    #[tokio::test]
    async fn approve_stamps_status_notes_and_timestamp() {
        let db = test_db().await;
        let project_data = seeded_project(&db).await;

        let request_data =
            AccessRequestDao::new(project_data.id(), "Amina", "amina@example.com", "", "", "");
        request_data.db_insert(&db).await.unwrap();

        let approved = AccessRequestDao::db_approve(
            &db,
            request_data.id(),
            &Some("Verified enrollment".to_owned()),
        )
        .await
        .unwrap();

        assert_eq!(approved.status(), &RequestStatus::Approved);
        assert!(approved.approved_at().is_some());
        assert_eq!(approved.admin_notes(), &Some("Verified enrollment".to_owned()));
    }

    #[tokio::test]
    async fn second_approval_is_invalid_state() {
        let db = test_db().await;
        let project_data = seeded_project(&db).await;

        let request_data =
            AccessRequestDao::new(project_data.id(), "Amina", "amina@example.com", "", "", "");
        request_data.db_insert(&db).await.unwrap();

        let approved = AccessRequestDao::db_approve(&db, request_data.id(), &None)
            .await
            .unwrap();

        let err = AccessRequestDao::db_approve(&db, request_data.id(), &None)
            .await
            .unwrap_err();
        assert_eq!(err.code(), "invalid_state");

        // The losing attempt must not restamp the approval time.
        let found = AccessRequestDao::db_select(&db, request_data.id())
            .await
            .unwrap();
        assert_eq!(found.approved_at(), approved.approved_at());
    }

    #[tokio::test]
    async fn approve_unknown_id_is_not_found() {
        let db = test_db().await;

        let err = AccessRequestDao::db_approve(&db, &Uuid::now_v7(), &None)
            .await
            .unwrap_err();
        assert_eq!(err.code(), "not_found");
    }

    #[tokio::test]
    async fn reject_retains_the_row_as_rejected() {
        let db = test_db().await;
        let project_data = seeded_project(&db).await;

        let request_data =
            AccessRequestDao::new(project_data.id(), "Amina", "amina@example.com", "", "", "");
        request_data.db_insert(&db).await.unwrap();

        let rejected = AccessRequestDao::db_reject(&db, request_data.id())
            .await
            .unwrap();
        assert_eq!(rejected.status(), &RequestStatus::Rejected);
        assert_eq!(rejected.approved_at(), &None);

        // Terminal: a later approval attempt must fail.
        let err = AccessRequestDao::db_approve(&db, request_data.id(), &None)
            .await
            .unwrap_err();
        assert_eq!(err.code(), "invalid_state");
    }

    #[tokio::test]
    async fn list_filters_by_status_and_email() {
        let db = test_db().await;
        let project_data = seeded_project(&db).await;

        let first =
            AccessRequestDao::new(project_data.id(), "Amina", "a@b.com", "", "", "");
        first.db_insert(&db).await.unwrap();
        let second =
            AccessRequestDao::new(project_data.id(), "Badri", "c@d.com", "", "", "");
        second.db_insert(&db).await.unwrap();

        AccessRequestDao::db_approve(&db, second.id(), &None)
            .await
            .unwrap();

        let pending =
            AccessRequestDao::db_select_many(&db, &Some(RequestStatus::Pending), &None)
                .await
                .unwrap();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].user_email(), "a@b.com");

        let by_email = AccessRequestDao::db_select_many(&db, &None, &Some("a@b.com"))
            .await
            .unwrap();
        assert_eq!(by_email.len(), 1);
        assert_eq!(by_email[0].id(), first.id());

        // Case-sensitive, exactly as stored.
        let upper = AccessRequestDao::db_select_many(&db, &None, &Some("A@B.COM"))
            .await
            .unwrap();
        assert!(upper.is_empty());

        let approved_by_email = AccessRequestDao::db_select_many(
            &db,
            &Some(RequestStatus::Approved),
            &Some("c@d.com"),
        )
        .await
        .unwrap();
        assert_eq!(approved_by_email.len(), 1);

        assert_eq!(
            AccessRequestDao::db_count(&db, &Some(RequestStatus::Pending))
                .await
                .unwrap(),
            1
        );
        assert_eq!(AccessRequestDao::db_count(&db, &None).await.unwrap(), 2);
    }
}
