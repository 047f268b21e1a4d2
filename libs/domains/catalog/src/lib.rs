//! Catalog Domain
//!
//! Read-only product catalog exposed as hypermedia JSON.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints, pagination headers
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Serializers │  ← List item / detail view shapes with _links
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Lookups, not-found handling
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Read traits + in-memory snapshot implementation
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Product, Category, Tag, Photo
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_catalog::{
//!     handlers, CatalogSerializer, CatalogService, InMemoryCatalog, LinkBuilder,
//!     ThumbnailResolver,
//! };
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let catalog = Arc::new(InMemoryCatalog::load("data/catalog.json").await?);
//! let service = CatalogService::from_shared(catalog.clone(), catalog.clone(), catalog);
//! let serializer = CatalogSerializer::new(
//!     LinkBuilder::new("http://localhost:8080"),
//!     ThumbnailResolver::new("http://localhost:8080/static"),
//! );
//!
//! let router = handlers::router(service, serializer);
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod handlers;
pub mod links;
pub mod memory;
pub mod models;
pub mod pagination;
pub mod repository;
pub mod serializers;
pub mod service;
pub mod thumbnails;

// Re-export commonly used types
pub use error::{CatalogError, CatalogResult};
pub use handlers::ApiDoc;
pub use links::{LinkBuilder, Route};
pub use memory::InMemoryCatalog;
pub use models::{CatalogId, Category, Photo, Price, Product, Tag};
pub use pagination::{MappedPage, Page, PageQuery, PageRequest, Pagination, Sort, SortField};
pub use repository::{CategoryReadRepository, ProductReadRepository, TagReadRepository};
pub use serializers::{CatalogSerializer, ProductItem, ProductView};
pub use service::CatalogService;
pub use thumbnails::{ThumbnailProfile, ThumbnailResolver};
