//! Parsing and validation of `POST /products` bodies.
//!
//! Validation runs in two stages: the raw text is parsed into a
//! [`serde_json::Value`], then the object fields are checked. Keeping the
//! stages apart lets each failure map onto its own client message.

use serde_json::{Map, Value};

use super::product::{Price, ProductDraft, ProductName};
use super::Error;

/// Reasons a submission is refused before any side effect happens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SubmissionRejection {
    /// The request carried no body at all.
    #[error("Bad request: Missing request body.")]
    MissingBody,
    /// The body was not a JSON object.
    #[error("Bad request: Invalid JSON format.")]
    InvalidJson,
    /// `name` was absent, empty or not a string, or `price` was absent or not
    /// a number.
    #[error("Bad request: Missing or invalid product name or price.")]
    InvalidNameOrPrice,
    /// `description` was present but neither a string nor `null`.
    #[error("Bad request: Invalid product description.")]
    InvalidDescription,
}

impl From<SubmissionRejection> for Error {
    fn from(value: SubmissionRejection) -> Self {
        Error::invalid_request(value.to_string())
    }
}

/// Parse and validate a raw request body.
///
/// An empty body counts as missing; whitespace-only text is invalid JSON.
///
/// # Examples
/// ```
/// use catalogue::domain::{parse_submission, SubmissionRejection};
///
/// let draft = parse_submission(Some(r#"{"name":"Lamp","price":19.99}"#))
///     .expect("valid body");
/// assert_eq!(draft.name.as_ref(), "Lamp");
///
/// assert_eq!(parse_submission(None), Err(SubmissionRejection::MissingBody));
/// ```
pub fn parse_submission(body: Option<&str>) -> Result<ProductDraft, SubmissionRejection> {
    let raw = body
        .filter(|text| !text.is_empty())
        .ok_or(SubmissionRejection::MissingBody)?;
    let value: Value = serde_json::from_str(raw).map_err(|_| SubmissionRejection::InvalidJson)?;
    let Value::Object(fields) = value else {
        return Err(SubmissionRejection::InvalidJson);
    };
    validate_fields(&fields)
}

fn validate_fields(fields: &Map<String, Value>) -> Result<ProductDraft, SubmissionRejection> {
    let name = fields
        .get("name")
        .and_then(Value::as_str)
        .and_then(|raw| ProductName::new(raw).ok());
    let price = match fields.get("price") {
        Some(Value::Number(number)) => Some(Price::new(number.clone())),
        _ => None,
    };
    let (Some(name), Some(price)) = (name, price) else {
        return Err(SubmissionRejection::InvalidNameOrPrice);
    };

    let description = match fields.get("description") {
        None | Some(Value::Null) => None,
        Some(Value::String(text)) => Some(text.clone()),
        Some(_) => return Err(SubmissionRejection::InvalidDescription),
    };

    Ok(ProductDraft {
        name,
        description,
        price,
    })
}
