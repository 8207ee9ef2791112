/// HTTP middleware utilities
///
/// Session issuance lives in the external identity provider; requests reach
/// this service through a gateway that authenticates them and installs the
/// caller's provider user id in the `X-User-Id` header.
use actix_web::{dev::Payload, error::ErrorUnauthorized, Error, FromRequest, HttpRequest};
use futures::future::{ready, Ready};

/// Authenticated caller identifier, extracted per request.
#[derive(Debug, Clone)]
pub struct UserId(pub String);

impl FromRequest for UserId {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let user_id = req
            .headers()
            .get("X-User-Id")
            .and_then(|h| h.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(String::from);

        ready(match user_id {
            Some(id) => Ok(UserId(id)),
            None => Err(ErrorUnauthorized("Missing X-User-Id header")),
        })
    }
}
