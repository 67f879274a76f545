use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use shared::constants::USER_ID_HEADER;
use shared::validation::validate_user_id;
use uuid::Uuid;

use crate::error::Error;

/// Caller identity taken from the `X-User-Id` header. The id is generated and persisted on
/// the client; the server only checks that it is a well formed UUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UserId(pub Uuid);

#[async_trait]
impl<S> FromRequestParts<S> for UserId
where
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .ok_or(Error::MissingUserId)?;

        validate_user_id(header).map_err(|_| Error::MissingUserId)?;
        let user_id = Uuid::parse_str(header).map_err(|_| Error::MissingUserId)?;

        Ok(UserId(user_id))
    }
}
