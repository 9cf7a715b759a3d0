use actix_web::{http::StatusCode, HttpResponse, HttpResponseBuilder};
use ps_error::Error;
use serde::Serialize;

pub mod admin;
pub mod auth;
pub mod project;
pub mod request;

pub struct Response;

impl Response {
    pub fn data<T: Serialize>(status_code: &StatusCode, data: T) -> HttpResponse {
        HttpResponseBuilder::new(*status_code).json(data)
    }

    pub fn error(err: &Error) -> HttpResponse {
        match err {
            Error::Validation(_) => Self::error_raw(&StatusCode::BAD_REQUEST, err.code(), err.message()),
            Error::NotFound(_) => Self::error_raw(&StatusCode::NOT_FOUND, err.code(), err.message()),
            Error::InvalidState(_) => {
                Self::error_raw(&StatusCode::CONFLICT, err.code(), err.message())
            }
            Error::Store(msg) => {
                // Detail goes to the log, never to the client.
                ps_log::error(None, format!("Store error: {msg}"));
                Self::error_raw(
                    &StatusCode::INTERNAL_SERVER_ERROR,
                    err.code(),
                    "Internal server error",
                )
            }
        }
    }

    pub fn error_raw(status_code: &StatusCode, code: &str, message: &str) -> HttpResponse {
        ps_log::error(None, message);

        HttpResponseBuilder::new(*status_code).json(ErrorResBody {
            error: ErrorRes {
                code: code.to_owned(),
                message: message.to_owned(),
            },
        })
    }
}

#[derive(Serialize)]
pub struct ErrorResBody {
    error: ErrorRes,
}

#[derive(Serialize)]
pub struct ErrorRes {
    code: String,
    message: String,
}
