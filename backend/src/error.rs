use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;
use shared::constants::{MISSING_USER_ID_ERROR, SPIN_IN_PROGRESS_ERROR};
use shared::{StoreError, WheelError};

#[derive(Debug)]
pub enum Error {
    Store(StoreError),
    Wheel(WheelError),
    SpinInProgress,
    MissingUserId,
}

impl From<StoreError> for Error {
    fn from(err: StoreError) -> Self {
        Error::Store(err)
    }
}

impl From<WheelError> for Error {
    fn from(err: WheelError) -> Self {
        Error::Wheel(err)
    }
}

impl Error {
    pub fn status(&self) -> StatusCode {
        match self {
            Error::Store(e) => match e {
                StoreError::Duplicate | StoreError::Capacity => StatusCode::CONFLICT,
                StoreError::Validation(_) => StatusCode::BAD_REQUEST,
                StoreError::NotFound => StatusCode::NOT_FOUND,
                StoreError::Unavailable(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Error::Wheel(WheelError::EmptyWheel) => StatusCode::UNPROCESSABLE_ENTITY,
            Error::SpinInProgress => StatusCode::CONFLICT,
            Error::MissingUserId => StatusCode::UNAUTHORIZED,
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> axum::response::Response {
        let status = self.status();
        let message = match &self {
            Error::Store(e) => {
                if let StoreError::Unavailable(detail) = e {
                    tracing::error!("Recipe store failure: {}", detail);
                }
                e.user_message().to_string()
            }
            Error::Wheel(e) => e.to_string(),
            Error::SpinInProgress => SPIN_IN_PROGRESS_ERROR.to_string(),
            Error::MissingUserId => MISSING_USER_ID_ERROR.to_string(),
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
