//! Request extractors that reject requests with [Error] so that every error
//! response has the same JSON shape.

use axum::{
    extract::{
        FromRequest, FromRequestParts, Path,
        rejection::{JsonRejection, QueryRejection},
    },
    http::request::Parts,
};

use crate::{Error, database_id::TransactionId};

/// Like [axum::Json], but rejects malformed bodies with [Error::Validation].
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(Error))]
pub struct JsonBody<T>(pub T);

impl From<JsonRejection> for Error {
    fn from(rejection: JsonRejection) -> Self {
        Error::Validation(rejection.body_text())
    }
}

/// Like [axum::extract::Query], but rejects malformed query strings with [Error::BadRequest].
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(Error))]
pub struct QueryParams<T>(pub T);

impl From<QueryRejection> for Error {
    fn from(rejection: QueryRejection) -> Self {
        Error::BadRequest(rejection.body_text())
    }
}

/// The transaction ID from the request path.
///
/// An ID that is not an integer cannot refer to a stored transaction, so it
/// is rejected with [Error::NotFound].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransactionIdPath(pub TransactionId);

impl<S> FromRequestParts<S> for TransactionIdPath
where
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Path::<TransactionId>::from_request_parts(parts, state).await {
            Ok(Path(id)) => Ok(Self(id)),
            Err(rejection) => {
                tracing::debug!("Could not read transaction ID from path: {rejection}");
                Err(Error::NotFound)
            }
        }
    }
}
