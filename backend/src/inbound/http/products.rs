//! Product intake HTTP handler.
//!
//! ```text
//! POST /products
//! ```
//!
//! The body is taken as raw bytes rather than through `web::Json` so that the
//! domain decides how missing, malformed and invalid bodies are reported.

use actix_web::{HttpResponse, post, web};

use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{ErrorSchema, ProductSchema, ProductSubmissionSchema};
use crate::inbound::http::state::HttpState;

fn body_text(body: &web::Bytes) -> Option<String> {
    if body.is_empty() {
        None
    } else {
        Some(String::from_utf8_lossy(body).into_owned())
    }
}

/// Create a product and announce it on the product events channel.
#[utoipa::path(
    post,
    path = "/products",
    request_body(content = ProductSubmissionSchema, content_type = "application/json"),
    responses(
        (status = 201, description = "Product stored and announced", body = ProductSchema),
        (status = 400, description = "Missing, malformed or invalid body", body = ErrorSchema),
        (status = 500, description = "Configuration missing or downstream failure", body = ErrorSchema)
    ),
    tags = ["products"],
    operation_id = "createProduct"
)]
#[post("/products")]
pub async fn create_product(
    state: web::Data<HttpState>,
    body: web::Bytes,
) -> ApiResult<HttpResponse> {
    let product = state.products.submit(body_text(&body)).await?;
    Ok(HttpResponse::Created().json(product))
}
