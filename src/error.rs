use axum::extract::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use std::env;
use std::fmt::{self, Debug, Display};

#[derive(Debug, Clone, PartialEq)]
pub struct Error {
    pub code: i32,
    pub message: String,
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl std::error::Error for Error {}

impl From<env::VarError> for Error {
    fn from(err: env::VarError) -> Self {
        env_var_error(err)
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        network_error(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        data_load_error(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        data_load_error(err)
    }
}

impl From<csv::Error> for Error {
    fn from(err: csv::Error) -> Self {
        data_load_error(err)
    }
}

impl Error {
    pub fn status(&self) -> StatusCode {
        match self.code {
            1..=9 => StatusCode::INTERNAL_SERVER_ERROR,
            12 => StatusCode::SERVICE_UNAVAILABLE,
            13 => StatusCode::GATEWAY_TIMEOUT,
            10..=99 => StatusCode::BAD_GATEWAY,
            102 => StatusCode::FORBIDDEN,
            103..=105 => StatusCode::NOT_FOUND,
            _ => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status();
        let error_message = match self.code {
            1..=9 => "Internal Server Error",
            _ => self.message.as_str(),
        };

        let body = Json(json!({
            "code": self.code,
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

pub fn env_var_error(_: env::VarError) -> Error {
    Error {
        code: 1,
        message: "environment variable error".into(),
    }
}

pub fn config_error(name: &str) -> Error {
    Error {
        code: 1,
        message: format!("invalid configuration value for {}", name),
    }
}

pub fn data_load_error<T: Display>(err: T) -> Error {
    Error {
        code: 2,
        message: format!("data load error: {}", err),
    }
}

pub fn unexpected_error() -> Error {
    Error {
        code: 3,
        message: "unexpected error".into(),
    }
}

pub fn network_error(_: reqwest::Error) -> Error {
    Error {
        code: 10,
        message: "network request failed".into(),
    }
}

pub fn upstream_error() -> Error {
    Error {
        code: 11,
        message: "upstream error".into(),
    }
}

pub fn geolocation_unavailable_error() -> Error {
    Error {
        code: 12,
        message: "current location is unavailable".into(),
    }
}

pub fn geolocation_timeout_error() -> Error {
    Error {
        code: 13,
        message: "timed out while locating".into(),
    }
}

pub fn invalid_input_error() -> Error {
    Error {
        code: 100,
        message: "invalid input".into(),
    }
}

pub fn coordinate_error() -> Error {
    Error {
        code: 101,
        message: "invalid or missing coordinates".into(),
    }
}

pub fn geolocation_permission_denied_error() -> Error {
    Error {
        code: 102,
        message: "permission to read the current location was denied".into(),
    }
}

pub fn not_found_error() -> Error {
    Error {
        code: 103,
        message: "point not found".into(),
    }
}

pub fn no_match_error() -> Error {
    Error {
        code: 104,
        message: "no points match the selected filters, relax the filters and try again".into(),
    }
}

pub fn route_not_found_error() -> Error {
    Error {
        code: 105,
        message: "no route found between the given points".into(),
    }
}

pub fn location_required_error() -> Error {
    Error {
        code: 106,
        message: "current location is not set".into(),
    }
}

#[test]
fn internal_errors_hide_their_message() {
    let err = data_load_error("missing file /srv/secret.json");
    assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let response = err.into_response();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[test]
fn user_facing_errors_map_to_client_statuses() {
    assert_eq!(invalid_input_error().status(), StatusCode::BAD_REQUEST);
    assert_eq!(coordinate_error().status(), StatusCode::BAD_REQUEST);
    assert_eq!(location_required_error().status(), StatusCode::BAD_REQUEST);
    assert_eq!(not_found_error().status(), StatusCode::NOT_FOUND);
    assert_eq!(no_match_error().status(), StatusCode::NOT_FOUND);
    assert_eq!(route_not_found_error().status(), StatusCode::NOT_FOUND);
    assert_eq!(
        geolocation_permission_denied_error().status(),
        StatusCode::FORBIDDEN
    );
}

#[test]
fn upstream_failures_map_to_gateway_statuses() {
    assert_eq!(upstream_error().status(), StatusCode::BAD_GATEWAY);
    assert_eq!(
        geolocation_unavailable_error().status(),
        StatusCode::SERVICE_UNAVAILABLE
    );
    assert_eq!(
        geolocation_timeout_error().status(),
        StatusCode::GATEWAY_TIMEOUT
    );
}
