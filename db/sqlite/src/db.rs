use ps_error::Error;
use sqlx::{
    query::{Query, QueryAs},
    sqlite::{SqliteArguments, SqlitePoolOptions, SqliteQueryResult, SqliteRow},
    Pool, Sqlite,
};

use crate::query::{access_request, password_reset, project, settings, user};

pub struct SqliteDb {
    pool: Pool<Sqlite>,
}

impl SqliteDb {
    pub async fn new(path: &str, max_connections: &u32) -> Self {
        ps_log::info(Some("⚡"), "[SQLite] Initializing component");

        let url = format!("sqlite:{path}?mode=rwc");
        let pool = match SqlitePoolOptions::new()
            .max_connections(*max_connections)
            .connect(&url)
            .await
        {
            Ok(pool) => pool,
            Err(err) => ps_log::panic(None, format!("[SQLite] Failed to open '{path}': {err}")),
        };

        Self::init(&pool).await;

        Self { pool }
    }

    pub async fn execute<'a>(
        &self,
        query: Query<'a, Sqlite, SqliteArguments<'a>>,
    ) -> Result<SqliteQueryResult, sqlx::Error> {
        query.execute(&self.pool).await
    }

    pub async fn fetch_one<'a, T: Send + Unpin + for<'r> sqlx::FromRow<'r, SqliteRow>>(
        &self,
        query: QueryAs<'a, Sqlite, T, SqliteArguments<'a>>,
    ) -> Result<T, sqlx::Error> {
        query.fetch_one(&self.pool).await
    }

    pub async fn fetch_one_row<'a>(
        &self,
        query: Query<'a, Sqlite, SqliteArguments<'a>>,
    ) -> Result<SqliteRow, sqlx::Error> {
        query.fetch_one(&self.pool).await
    }

    pub async fn fetch_all<'a, T: Send + Unpin + for<'r> sqlx::FromRow<'r, SqliteRow>>(
        &self,
        query: QueryAs<'a, Sqlite, T, SqliteArguments<'a>>,
    ) -> Result<Vec<T>, sqlx::Error> {
        query.fetch_all(&self.pool).await
    }

    async fn init(pool: &Pool<Sqlite>) {
        tokio::join!(
            user::init(pool),
            project::init(pool),
            access_request::init(pool),
            password_reset::init(pool),
            settings::init(pool),
        );
    }
}

/// A missing row is a caller-facing `NotFound`; everything else is a store
/// failure whose detail must stay out of client responses.
pub(crate) fn not_found_or_store(err: sqlx::Error, entity: &str) -> Error {
    match err {
        sqlx::Error::RowNotFound => Error::NotFound(format!("{entity} not found")),
        err => Error::Store(err.to_string()),
    }
}

pub(crate) fn store(err: sqlx::Error) -> Error {
    Error::Store(err.to_string())
}
