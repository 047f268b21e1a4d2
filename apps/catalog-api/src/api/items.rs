//! Catalog routes wired to the in-memory read model.

use axum::Router;
use domain_catalog::{
    CatalogSerializer, CatalogService, LinkBuilder, ThumbnailResolver, handlers,
};
use std::sync::Arc;

use crate::state::AppState;

pub fn router(state: &AppState) -> Router {
    let catalog = Arc::new(state.catalog.clone());
    let service = CatalogService::from_shared(catalog.clone(), catalog.clone(), catalog);

    let serializer = CatalogSerializer::new(
        LinkBuilder::new(&state.config.public_base_url()),
        ThumbnailResolver::new(&state.config.assets_url()),
    );

    handlers::router(service, serializer)
}
