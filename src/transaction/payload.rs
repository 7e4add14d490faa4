//! Extraction of the transaction JSON body shared by the create and edit endpoints.

use axum::{Json, extract::rejection::JsonRejection};

use crate::{Error, transaction::TransactionBuilder};

/// Unwrap a JSON body, converting a rejection into [Error::InvalidRequestBody].
///
/// Axum's own rejection responses are plain text, this keeps every client
/// error in the same JSON shape.
pub(crate) fn parse_payload(
    payload: Result<Json<TransactionBuilder>, JsonRejection>,
) -> Result<TransactionBuilder, Error> {
    match payload {
        Ok(Json(builder)) => Ok(builder),
        Err(rejection) => {
            tracing::debug!("Rejected transaction body: {rejection}");
            Err(Error::InvalidRequestBody(rejection.body_text()))
        }
    }
}
