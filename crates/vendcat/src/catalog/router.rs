use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Router,
};
use serde::Deserialize;
use serde_json::json;

use super::curation::CurationStore;
use super::domain::{CategoryFilter, FilterParams, PriceBucket, ProductId, SortKey};
use super::service::{CatalogService, CatalogServiceError};
use super::submission::{ContactIdentity, SubmissionError, SubmissionTransport};

/// Router builder exposing the catalog browse, curation, and interest
/// endpoints over a shared service.
pub fn catalog_router<S, T>(service: Arc<CatalogService<S, T>>) -> Router
where
    S: CurationStore + 'static,
    T: SubmissionTransport + 'static,
{
    Router::new()
        .route("/api/v1/catalog/products", get(browse_handler::<S, T>))
        .route("/api/v1/catalog/summary", get(summary_handler::<S, T>))
        .route(
            "/api/v1/catalog/products/:product_id/hide",
            post(hide_handler::<S, T>),
        )
        .route(
            "/api/v1/catalog/products/:product_id/unhide",
            post(unhide_handler::<S, T>),
        )
        .route(
            "/api/v1/catalog/products/:product_id/promote",
            post(promote_handler::<S, T>),
        )
        .route(
            "/api/v1/catalog/products/:product_id/demote",
            post(demote_handler::<S, T>),
        )
        .route(
            "/api/v1/catalog/products/:product_id/price",
            put(set_price_handler::<S, T>).delete(clear_price_handler::<S, T>),
        )
        .route("/api/v1/catalog/interest", get(interest_handler::<S, T>))
        .route(
            "/api/v1/catalog/interest/export",
            get(export_handler::<S, T>),
        )
        .route(
            "/api/v1/catalog/interest/submission",
            post(submit_handler::<S, T>),
        )
        .route(
            "/api/v1/catalog/interest/:product_id",
            post(add_interest_handler::<S, T>).delete(remove_interest_handler::<S, T>),
        )
        .with_state(service)
}

/// Raw query-string form of one browse request. Every field is optional;
/// unset fields fall back to the catalog defaults.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct BrowseQuery {
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    brand: Option<String>,
    #[serde(default)]
    price: Option<String>,
    #[serde(default)]
    q: Option<String>,
    #[serde(default)]
    sort: Option<String>,
    #[serde(default)]
    page: Option<usize>,
    #[serde(default)]
    include_hidden: Option<bool>,
}

impl BrowseQuery {
    pub(crate) fn into_request(self) -> (FilterParams, usize) {
        let params = FilterParams {
            category: self
                .category
                .as_deref()
                .map(CategoryFilter::parse)
                .unwrap_or_default(),
            brand: self.brand.filter(|brand| !brand.trim().is_empty()),
            price_bucket: self.price.as_deref().and_then(PriceBucket::parse),
            search: self.q,
            sort: self.sort.as_deref().map(SortKey::parse).unwrap_or_default(),
            include_hidden: self.include_hidden.unwrap_or(false),
        };
        (params, self.page.unwrap_or(1))
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct SetPriceBody {
    price: f64,
}

pub(crate) async fn browse_handler<S, T>(
    State(service): State<Arc<CatalogService<S, T>>>,
    Query(query): Query<BrowseQuery>,
) -> Response
where
    S: CurationStore + 'static,
    T: SubmissionTransport + 'static,
{
    let (params, page) = query.into_request();
    let result = service.browse(&params, page);
    (StatusCode::OK, axum::Json(result)).into_response()
}

pub(crate) async fn summary_handler<S, T>(
    State(service): State<Arc<CatalogService<S, T>>>,
) -> Response
where
    S: CurationStore + 'static,
    T: SubmissionTransport + 'static,
{
    (StatusCode::OK, axum::Json(service.summary())).into_response()
}

pub(crate) async fn hide_handler<S, T>(
    State(service): State<Arc<CatalogService<S, T>>>,
    Path(product_id): Path<String>,
) -> Response
where
    S: CurationStore + 'static,
    T: SubmissionTransport + 'static,
{
    mutation_response(service.hide(&ProductId(product_id)))
}

pub(crate) async fn unhide_handler<S, T>(
    State(service): State<Arc<CatalogService<S, T>>>,
    Path(product_id): Path<String>,
) -> Response
where
    S: CurationStore + 'static,
    T: SubmissionTransport + 'static,
{
    mutation_response(service.unhide(&ProductId(product_id)))
}

pub(crate) async fn promote_handler<S, T>(
    State(service): State<Arc<CatalogService<S, T>>>,
    Path(product_id): Path<String>,
) -> Response
where
    S: CurationStore + 'static,
    T: SubmissionTransport + 'static,
{
    mutation_response(service.promote(&ProductId(product_id)))
}

pub(crate) async fn demote_handler<S, T>(
    State(service): State<Arc<CatalogService<S, T>>>,
    Path(product_id): Path<String>,
) -> Response
where
    S: CurationStore + 'static,
    T: SubmissionTransport + 'static,
{
    mutation_response(service.demote(&ProductId(product_id)))
}

pub(crate) async fn set_price_handler<S, T>(
    State(service): State<Arc<CatalogService<S, T>>>,
    Path(product_id): Path<String>,
    axum::Json(body): axum::Json<SetPriceBody>,
) -> Response
where
    S: CurationStore + 'static,
    T: SubmissionTransport + 'static,
{
    mutation_response(service.set_custom_price(&ProductId(product_id), body.price))
}

pub(crate) async fn clear_price_handler<S, T>(
    State(service): State<Arc<CatalogService<S, T>>>,
    Path(product_id): Path<String>,
) -> Response
where
    S: CurationStore + 'static,
    T: SubmissionTransport + 'static,
{
    mutation_response(service.clear_custom_price(&ProductId(product_id)))
}

pub(crate) async fn interest_handler<S, T>(
    State(service): State<Arc<CatalogService<S, T>>>,
) -> Response
where
    S: CurationStore + 'static,
    T: SubmissionTransport + 'static,
{
    let items = service.interest_list();
    let payload = json!({
        "count": items.len(),
        "items": items,
    });
    (StatusCode::OK, axum::Json(payload)).into_response()
}

pub(crate) async fn add_interest_handler<S, T>(
    State(service): State<Arc<CatalogService<S, T>>>,
    Path(product_id): Path<String>,
) -> Response
where
    S: CurationStore + 'static,
    T: SubmissionTransport + 'static,
{
    mutation_response(service.add_interest(&ProductId(product_id)))
}

pub(crate) async fn remove_interest_handler<S, T>(
    State(service): State<Arc<CatalogService<S, T>>>,
    Path(product_id): Path<String>,
) -> Response
where
    S: CurationStore + 'static,
    T: SubmissionTransport + 'static,
{
    mutation_response(service.remove_interest(&ProductId(product_id)))
}

pub(crate) async fn export_handler<S, T>(
    State(service): State<Arc<CatalogService<S, T>>>,
) -> Response
where
    S: CurationStore + 'static,
    T: SubmissionTransport + 'static,
{
    match service.export_interest_csv() {
        Ok(csv) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/csv; charset=utf-8")],
            csv,
        )
            .into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn submit_handler<S, T>(
    State(service): State<Arc<CatalogService<S, T>>>,
    axum::Json(contact): axum::Json<ContactIdentity>,
) -> Response
where
    S: CurationStore + 'static,
    T: SubmissionTransport + 'static,
{
    match service.submit_interest(contact) {
        Ok(receipt) => (StatusCode::ACCEPTED, axum::Json(receipt)).into_response(),
        Err(err) => error_response(err),
    }
}

fn mutation_response(result: Result<(), CatalogServiceError>) -> Response {
    match result {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => error_response(err),
    }
}

fn error_response(err: CatalogServiceError) -> Response {
    let status = match &err {
        CatalogServiceError::UnknownProduct(_) => StatusCode::NOT_FOUND,
        CatalogServiceError::InvalidCustomPrice => StatusCode::UNPROCESSABLE_ENTITY,
        CatalogServiceError::Submission(SubmissionError::Transport(_)) => StatusCode::BAD_GATEWAY,
        CatalogServiceError::Submission(_) => StatusCode::UNPROCESSABLE_ENTITY,
        CatalogServiceError::NoProducts => StatusCode::SERVICE_UNAVAILABLE,
        CatalogServiceError::Curation(_) | CatalogServiceError::Export(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };

    let payload = json!({ "error": err.to_string() });
    (status, axum::Json(payload)).into_response()
}
