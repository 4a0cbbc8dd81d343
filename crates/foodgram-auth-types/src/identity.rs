//! Gateway-injected identity headers extractor.

use axum::extract::{FromRequestParts, OptionalFromRequestParts};
use http::StatusCode;
use http::request::Parts;
use uuid::Uuid;

use foodgram_domain::user::UserRole;

pub const USER_ID_HEADER: &str = "x-foodgram-user-id";
pub const USER_ROLE_HEADER: &str = "x-foodgram-user-role";

/// User identity injected by the gateway via `x-foodgram-user-id` and `x-foodgram-user-role`.
///
/// As a required extractor it returns 401 if either header is absent or malformed.
/// As `Option<IdentityHeaders>` a request with neither header is anonymous (`None`);
/// a request carrying malformed headers is still rejected with 401.
/// Permission checks (403) are done by handlers and use cases after extraction.
#[derive(Debug, Clone, Copy)]
pub struct IdentityHeaders {
    pub user_id: Uuid,
    pub user_role: UserRole,
}

enum Lookup {
    Absent,
    Invalid,
    Found(IdentityHeaders),
}

fn lookup(parts: &Parts) -> Lookup {
    let user_id = parts.headers.get(USER_ID_HEADER);
    let user_role = parts.headers.get(USER_ROLE_HEADER);
    if user_id.is_none() && user_role.is_none() {
        return Lookup::Absent;
    }

    let user_id = user_id
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.parse::<Uuid>().ok());
    let user_role = user_role
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.parse::<u8>().ok())
        .and_then(UserRole::from_u8);

    match (user_id, user_role) {
        (Some(user_id), Some(user_role)) => Lookup::Found(IdentityHeaders { user_id, user_role }),
        _ => Lookup::Invalid,
    }
}

impl<S> FromRequestParts<S> for IdentityHeaders
where
    S: Send + Sync,
{
    type Rejection = StatusCode;

    // Values are extracted synchronously so the returned future is 'static.
    fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let result = match lookup(parts) {
            Lookup::Found(identity) => Ok(identity),
            Lookup::Absent | Lookup::Invalid => Err(StatusCode::UNAUTHORIZED),
        };
        async move { result }
    }
}

impl<S> OptionalFromRequestParts<S> for IdentityHeaders
where
    S: Send + Sync,
{
    type Rejection = StatusCode;

    fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> impl std::future::Future<Output = Result<Option<Self>, Self::Rejection>> + Send {
        let result = match lookup(parts) {
            Lookup::Found(identity) => Ok(Some(identity)),
            Lookup::Absent => Ok(None),
            Lookup::Invalid => Err(StatusCode::UNAUTHORIZED),
        };
        async move { result }
    }
}
