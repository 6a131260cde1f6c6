//! OpenAPI schema definitions for domain types.
//!
//! Domain types stay free of `ToSchema`; these mirrors carry the OpenAPI
//! description in the adapter layer instead.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
pub enum ErrorCodeSchema {
    /// The request is malformed or fails validation.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// Configuration is missing or a downstream dependency failed.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for [`crate::domain::Error`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Error, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    /// Stable machine-readable error code.
    #[schema(example = "invalid_request")]
    code: ErrorCodeSchema,
    /// Human-readable message returned to clients.
    #[schema(example = "Bad request: Missing or invalid product name or price.")]
    message: String,
    /// Correlation identifier, also sent as the `Trace-Id` header.
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    trace_id: Option<String>,
    /// Supplementary details; never present on internal errors.
    details: Option<serde_json::Value>,
}

/// Request body accepted by `POST /products`.
#[derive(ToSchema)]
#[schema(as = crate::domain::ProductSubmission)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ProductSubmissionSchema {
    /// Non-empty product name.
    #[schema(example = "Desk lamp")]
    name: String,
    /// Free-text description; `null` is treated as absent.
    #[schema(example = "Adjustable LED lamp")]
    description: Option<String>,
    /// Any JSON number, including zero and negatives.
    #[schema(example = 19.99)]
    price: f64,
}

/// OpenAPI schema for [`crate::domain::Product`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Product, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ProductSchema {
    /// Server-generated UUID v4.
    #[schema(value_type = String, format = Uuid, example = "6f1c1b1e-8a55-4d3a-9a0e-2f6f8b7c9d10")]
    product_id: String,
    #[schema(example = "Desk lamp")]
    name: String,
    /// Omitted when the submission had none.
    description: Option<String>,
    #[schema(example = 19.99)]
    price: f64,
    /// ISO-8601 UTC timestamp with millisecond precision.
    #[schema(value_type = String, format = DateTime, example = "2024-05-01T12:30:00.000Z")]
    created_at: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use utoipa::PartialSchema;

    fn schema_to_json<T: PartialSchema>() -> String {
        serde_json::to_string(&T::schema()).expect("schema serialises to JSON")
    }

    #[test]
    fn error_code_schema_lists_both_codes() {
        let schema_json = schema_to_json::<ErrorCodeSchema>();
        assert_eq!(ErrorCodeSchema::name(), "crate.domain.ErrorCode");
        assert!(schema_json.contains("invalid_request"));
        assert!(schema_json.contains("internal_error"));
    }

    #[test]
    fn error_schema_uses_wire_field_names() {
        let schema_json = schema_to_json::<ErrorSchema>();
        assert_eq!(ErrorSchema::name(), "crate.domain.Error");
        assert!(schema_json.contains("traceId"));
    }

    #[test]
    fn product_schema_uses_wire_field_names() {
        let schema_json = schema_to_json::<ProductSchema>();
        assert_eq!(ProductSchema::name(), "crate.domain.Product");
        assert!(schema_json.contains("productId"));
        assert!(schema_json.contains("createdAt"));
    }
}
