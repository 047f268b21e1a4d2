use async_trait::async_trait;

use crate::error::CatalogResult;
use crate::models::{CatalogId, Category, Product, Tag};
use crate::pagination::{Page, PageRequest};

/// Read access to products
///
/// A missing product is `Ok(None)`; `Err` is reserved for backend failures.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductReadRepository: Send + Sync {
    async fn find(&self, id: CatalogId) -> CatalogResult<Option<Product>>;

    /// All products, ordered and paged as requested
    async fn list_all(&self, page: PageRequest) -> CatalogResult<Page<Product>>;

    /// Products whose primary or additional categories include `category`
    async fn list_by_category(
        &self,
        category: &Category,
        page: PageRequest,
    ) -> CatalogResult<Page<Product>>;

    /// Products carrying `tag`
    async fn list_by_tag(&self, tag: &Tag, page: PageRequest) -> CatalogResult<Page<Product>>;
}

/// Read access to categories
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CategoryReadRepository: Send + Sync {
    async fn find(&self, id: CatalogId) -> CatalogResult<Option<Category>>;
}

/// Read access to tags
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TagReadRepository: Send + Sync {
    async fn find(&self, id: CatalogId) -> CatalogResult<Option<Tag>>;
}
