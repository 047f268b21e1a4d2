use axum::{
    Json, Router,
    extract::{Query, State, rejection::QueryRejection},
    http::Uri,
    response::IntoResponse,
    routing::get,
};
use axum_helpers::{
    AppError, IdPath,
    errors::{
        handlers::method_not_allowed,
        responses::{InternalServerErrorResponse, MethodNotAllowedResponse, NotFoundResponse},
    },
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::CatalogResult;
use crate::links::{CATEGORY_ITEMS_PATH, ITEM_PATH, ITEMS_PATH, TAG_ITEMS_PATH};
use crate::models::Product;
use crate::pagination::{MappedPage, Page, PageQuery, PageRequest, PaginatedResponse};
use crate::repository::{CategoryReadRepository, ProductReadRepository, TagReadRepository};
use crate::serializers::{
    CatalogSerializer, Link, ProductCategories, ProductCategory, ProductItem, ProductLinks,
    ProductPrice, ProductTag, ProductView, SelfLinks,
};
use crate::service::CatalogService;

/// OpenAPI documentation for the Catalog API
///
/// Paths are relative to [`ITEMS_PATH`], where the service nests this document.
#[derive(OpenApi)]
#[openapi(
    paths(list_products, list_products_by_category, list_products_by_tag, view_product),
    components(
        schemas(
            ProductItem,
            ProductView,
            ProductCategory,
            ProductCategories,
            ProductTag,
            ProductPrice,
            ProductLinks,
            SelfLinks,
            Link
        ),
        responses(NotFoundResponse, MethodNotAllowedResponse, InternalServerErrorResponse)
    ),
    tags(
        (name = "Catalog", description = "Read-only product catalog")
    )
)]
pub struct ApiDoc;

/// Shared handler state
pub struct CatalogState<P, C, T>
where
    P: ProductReadRepository,
    C: CategoryReadRepository,
    T: TagReadRepository,
{
    pub service: CatalogService<P, C, T>,
    pub serializer: CatalogSerializer,
}

type SharedState<P, C, T> = State<Arc<CatalogState<P, C, T>>>;

/// Create the catalog router. Every route answers GET only.
pub fn router<P, C, T>(service: CatalogService<P, C, T>, serializer: CatalogSerializer) -> Router
where
    P: ProductReadRepository + 'static,
    C: CategoryReadRepository + 'static,
    T: TagReadRepository + 'static,
{
    let state = Arc::new(CatalogState {
        service,
        serializer,
    });

    Router::new()
        .route(ITEMS_PATH, get(list_products))
        .route(CATEGORY_ITEMS_PATH, get(list_products_by_category))
        .route(TAG_ITEMS_PATH, get(list_products_by_tag))
        .route(ITEM_PATH, get(view_product))
        .method_not_allowed_fallback(method_not_allowed)
        .with_state(state)
}

/// Query strings that cannot be decoded at all (repeated keys) are reported in
/// the shared JSON error format. Bad numbers never get here, they fall back to defaults.
fn page_request(query: Result<Query<PageQuery>, QueryRejection>) -> Result<PageRequest, AppError> {
    query
        .map(|Query(query)| query.into_request())
        .map_err(|rejection| AppError::BadRequest(rejection.body_text()))
}

/// Shapes a page of products into list items with paging headers.
///
/// `base_url` is the absolute URL of the listing being served.
fn paginated(
    serializer: CatalogSerializer,
    page: Page<Product>,
    request: PageRequest,
    base_url: String,
) -> impl IntoResponse {
    let items = MappedPage::new(page, move |product: &Product| serializer.list_item(product));
    PaginatedResponse::new(items, base_url, request.sort())
}

fn listing_url<P, C, T>(state: &CatalogState<P, C, T>, uri: &Uri) -> String
where
    P: ProductReadRepository,
    C: CategoryReadRepository,
    T: TagReadRepository,
{
    state.serializer.links().absolute_path(uri.path())
}

/// List all products
#[utoipa::path(
    get,
    path = "",
    tag = "Catalog",
    params(PageQuery),
    responses(
        (status = 200, description = "Page of products", body = Vec<ProductItem>,
            headers(
                ("X-Pagination-Total-Count" = u64, description = "Total number of products"),
                ("X-Pagination-Page-Count" = u32, description = "Number of pages"),
                ("X-Pagination-Current-Page" = u32, description = "Served page, 1-based"),
                ("X-Pagination-Per-Page" = u32, description = "Page size"),
                ("Link" = String, description = "Navigation links (self, first, prev, next, last)")
            )
        ),
        (status = 405, response = MethodNotAllowedResponse),
        (status = 500, response = InternalServerErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
async fn list_products<P, C, T>(
    State(state): SharedState<P, C, T>,
    uri: Uri,
    query: Result<Query<PageQuery>, QueryRejection>,
) -> Result<impl IntoResponse, AppError>
where
    P: ProductReadRepository,
    C: CategoryReadRepository,
    T: TagReadRepository,
{
    let request = page_request(query)?;
    let page = state.service.list_products(request).await?;
    Ok(paginated(
        state.serializer.clone(),
        page,
        request,
        listing_url(&state, &uri),
    ))
}

/// List products in a category
///
/// Includes products whose primary or additional categories contain it.
#[utoipa::path(
    get,
    path = "/category/{categoryId}",
    tag = "Catalog",
    params(
        ("categoryId" = i64, Path, description = "Category ID"),
        PageQuery
    ),
    responses(
        (status = 200, description = "Page of products in the category", body = Vec<ProductItem>,
            headers(
                ("X-Pagination-Total-Count" = u64, description = "Total number of products"),
                ("X-Pagination-Page-Count" = u32, description = "Number of pages"),
                ("X-Pagination-Current-Page" = u32, description = "Served page, 1-based"),
                ("X-Pagination-Per-Page" = u32, description = "Page size"),
                ("Link" = String, description = "Navigation links (self, first, prev, next, last)")
            )
        ),
        (status = 404, response = NotFoundResponse),
        (status = 405, response = MethodNotAllowedResponse),
        (status = 500, response = InternalServerErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
async fn list_products_by_category<P, C, T>(
    State(state): SharedState<P, C, T>,
    IdPath(category_id): IdPath,
    uri: Uri,
    query: Result<Query<PageQuery>, QueryRejection>,
) -> Result<impl IntoResponse, AppError>
where
    P: ProductReadRepository,
    C: CategoryReadRepository,
    T: TagReadRepository,
{
    let request = page_request(query)?;
    let page = state
        .service
        .list_products_by_category(category_id, request)
        .await?;
    Ok(paginated(
        state.serializer.clone(),
        page,
        request,
        listing_url(&state, &uri),
    ))
}

/// List products carrying a tag
#[utoipa::path(
    get,
    path = "/tag/{tagId}",
    tag = "Catalog",
    params(
        ("tagId" = i64, Path, description = "Tag ID"),
        PageQuery
    ),
    responses(
        (status = 200, description = "Page of products with the tag", body = Vec<ProductItem>,
            headers(
                ("X-Pagination-Total-Count" = u64, description = "Total number of products"),
                ("X-Pagination-Page-Count" = u32, description = "Number of pages"),
                ("X-Pagination-Current-Page" = u32, description = "Served page, 1-based"),
                ("X-Pagination-Per-Page" = u32, description = "Page size"),
                ("Link" = String, description = "Navigation links (self, first, prev, next, last)")
            )
        ),
        (status = 404, response = NotFoundResponse),
        (status = 405, response = MethodNotAllowedResponse),
        (status = 500, response = InternalServerErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
async fn list_products_by_tag<P, C, T>(
    State(state): SharedState<P, C, T>,
    IdPath(tag_id): IdPath,
    uri: Uri,
    query: Result<Query<PageQuery>, QueryRejection>,
) -> Result<impl IntoResponse, AppError>
where
    P: ProductReadRepository,
    C: CategoryReadRepository,
    T: TagReadRepository,
{
    let request = page_request(query)?;
    let page = state.service.list_products_by_tag(tag_id, request).await?;
    Ok(paginated(
        state.serializer.clone(),
        page,
        request,
        listing_url(&state, &uri),
    ))
}

/// Get a product by ID
#[utoipa::path(
    get,
    path = "/{productId}",
    tag = "Catalog",
    params(
        ("productId" = i64, Path, description = "ID of product")
    ),
    responses(
        (status = 200, description = "Product detail", body = ProductView),
        (status = 404, response = NotFoundResponse),
        (status = 405, response = MethodNotAllowedResponse),
        (status = 500, response = InternalServerErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
async fn view_product<P, C, T>(
    State(state): SharedState<P, C, T>,
    IdPath(product_id): IdPath,
) -> CatalogResult<Json<ProductView>>
where
    P: ProductReadRepository,
    C: CategoryReadRepository,
    T: TagReadRepository,
{
    let product = state.service.get_product(product_id).await?;
    Ok(Json(state.serializer.detail_view(&product)))
}
