use crate::model::{CreateUrlResponse, ErrorDetail, ErrorResponse, MessageResponse, ShortUrlData};
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use burrow_core::ShortUrlId;
use burrow_lifecycle::{CreateOutcome, ResolveOutcome};
use tracing::error;

pub const WELCOME_MESSAGE: &str = "Welcome to my URL shortening service!";
pub const PREFLIGHT_MESSAGE: &str = "Preflight Request Successful";
pub const INVALID_URL_MESSAGE: &str = "Invalid URL. Please send a valid URL to be shortened";
pub const CREATE_FAILED_MESSAGE: &str = "Unable to create short URL, please try again";
pub const REDIRECT_FAILED_MESSAGE: &str = "Something went wrong, unable to redirect to destination";
pub const EXPIRED_MESSAGE: &str = "The specified short URL has expired";
pub const NOT_FOUND_MESSAGE: &str = "Invalid short URL";
pub const METHOD_NOT_ALLOWED_MESSAGE: &str = "Method not allowed";

const CLIENT_SIDE_ERROR: &str = "Client-side error";
const SERVER_SIDE_ERROR: &str = "Server-side error";

/// Everything the gateway can answer with.
///
/// Storage error detail never reaches a response body; it is logged where
/// the failure happens and the caller only sees a generic message.
#[derive(Debug)]
pub enum ApiResponse {
    ShortUrl(ShortUrlId),
    Redirect(String),
    Message(StatusCode, &'static str),
    ClientError(StatusCode, &'static str),
    ServerError(&'static str),
}

impl From<CreateOutcome> for ApiResponse {
    fn from(outcome: CreateOutcome) -> Self {
        match outcome {
            CreateOutcome::Invalid(_) => {
                ApiResponse::ClientError(StatusCode::BAD_REQUEST, INVALID_URL_MESSAGE)
            }
            CreateOutcome::Reused(id) | CreateOutcome::Created(id) => ApiResponse::ShortUrl(id),
            CreateOutcome::BackendReadFailure(_) | CreateOutcome::BackendWriteFailure(_) => {
                ApiResponse::ServerError(CREATE_FAILED_MESSAGE)
            }
        }
    }
}

impl From<ResolveOutcome> for ApiResponse {
    fn from(outcome: ResolveOutcome) -> Self {
        match outcome {
            ResolveOutcome::Found { original_url, .. } => ApiResponse::Redirect(original_url),
            ResolveOutcome::Expired(_) => {
                ApiResponse::Message(StatusCode::NOT_FOUND, EXPIRED_MESSAGE)
            }
            ResolveOutcome::NotFound(_) => {
                ApiResponse::Message(StatusCode::NOT_FOUND, NOT_FOUND_MESSAGE)
            }
            ResolveOutcome::Failure(_) => ApiResponse::ServerError(REDIRECT_FAILED_MESSAGE),
        }
    }
}

fn message_body(status: StatusCode, message: &str) -> Response {
    let body = MessageResponse {
        message: message.to_string(),
    };
    (status, Json(body)).into_response()
}

fn error_body(status: StatusCode, kind: &str, message: &str) -> Response {
    let body = ErrorResponse {
        error: ErrorDetail {
            kind: kind.to_string(),
            message: message.to_string(),
        },
    };
    (status, Json(body)).into_response()
}

impl IntoResponse for ApiResponse {
    fn into_response(self) -> Response {
        match self {
            ApiResponse::ShortUrl(id) => {
                let body = CreateUrlResponse {
                    data: ShortUrlData {
                        short_url: id.to_string(),
                    },
                };
                (StatusCode::OK, Json(body)).into_response()
            }
            ApiResponse::Redirect(location) => match HeaderValue::try_from(location) {
                Ok(location) => {
                    (StatusCode::MOVED_PERMANENTLY, [(header::LOCATION, location)]).into_response()
                }
                Err(e) => {
                    error!(error = %e, "stored url is not a valid Location header");
                    error_body(
                        StatusCode::INTERNAL_SERVER_ERROR,
                        SERVER_SIDE_ERROR,
                        REDIRECT_FAILED_MESSAGE,
                    )
                }
            },
            ApiResponse::Message(status, text) => message_body(status, text),
            ApiResponse::ClientError(status, text) => error_body(status, CLIENT_SIDE_ERROR, text),
            ApiResponse::ServerError(text) => {
                error_body(StatusCode::INTERNAL_SERVER_ERROR, SERVER_SIDE_ERROR, text)
            }
        }
    }
}
