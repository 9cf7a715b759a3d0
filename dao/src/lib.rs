use ps_db_sqlite::db::SqliteDb;

pub mod access_request;
pub mod password_reset;
pub mod project;
pub mod settings;
pub mod user;
mod util;

pub enum Db {
    SqliteDb(SqliteDb),
}
