//! Catalog Service - lookup orchestration over the read repositories

use std::sync::Arc;
use tracing::instrument;

use crate::error::{CatalogError, CatalogResult};
use crate::models::{CatalogId, Product};
use crate::pagination::{Page, PageRequest};
use crate::repository::{CategoryReadRepository, ProductReadRepository, TagReadRepository};

/// Read-only catalog operations
///
/// Category and tag listings resolve the referenced entity first and fail
/// with a not-found error before any product is read.
pub struct CatalogService<P, C, T>
where
    P: ProductReadRepository,
    C: CategoryReadRepository,
    T: TagReadRepository,
{
    products: Arc<P>,
    categories: Arc<C>,
    tags: Arc<T>,
}

impl<P, C, T> CatalogService<P, C, T>
where
    P: ProductReadRepository,
    C: CategoryReadRepository,
    T: TagReadRepository,
{
    pub fn new(products: P, categories: C, tags: T) -> Self {
        Self::from_shared(Arc::new(products), Arc::new(categories), Arc::new(tags))
    }

    /// Builds a service over repositories that are already shared, e.g. one
    /// read model implementing all three traits.
    pub fn from_shared(products: Arc<P>, categories: Arc<C>, tags: Arc<T>) -> Self {
        Self {
            products,
            categories,
            tags,
        }
    }

    #[instrument(skip(self))]
    pub async fn list_products(&self, page: PageRequest) -> CatalogResult<Page<Product>> {
        self.products.list_all(page).await
    }

    #[instrument(skip(self))]
    pub async fn list_products_by_category(
        &self,
        category_id: CatalogId,
        page: PageRequest,
    ) -> CatalogResult<Page<Product>> {
        let category = self
            .categories
            .find(category_id)
            .await?
            .ok_or(CatalogError::CategoryNotFound(category_id))?;
        self.products.list_by_category(&category, page).await
    }

    #[instrument(skip(self))]
    pub async fn list_products_by_tag(
        &self,
        tag_id: CatalogId,
        page: PageRequest,
    ) -> CatalogResult<Page<Product>> {
        let tag = self
            .tags
            .find(tag_id)
            .await?
            .ok_or(CatalogError::TagNotFound(tag_id))?;
        self.products.list_by_tag(&tag, page).await
    }

    #[instrument(skip(self))]
    pub async fn get_product(&self, product_id: CatalogId) -> CatalogResult<Product> {
        self.products
            .find(product_id)
            .await?
            .ok_or(CatalogError::ProductNotFound(product_id))
    }
}

impl<P, C, T> Clone for CatalogService<P, C, T>
where
    P: ProductReadRepository,
    C: CategoryReadRepository,
    T: TagReadRepository,
{
    fn clone(&self) -> Self {
        Self {
            products: Arc::clone(&self.products),
            categories: Arc::clone(&self.categories),
            tags: Arc::clone(&self.tags),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, Price, Tag};
    use crate::pagination::Pagination;
    use crate::repository::{
        MockCategoryReadRepository, MockProductReadRepository, MockTagReadRepository,
    };
    use mockall::predicate::eq;

    type MockService =
        CatalogService<MockProductReadRepository, MockCategoryReadRepository, MockTagReadRepository>;

    fn product(id: CatalogId) -> Product {
        Product {
            id,
            code: format!("P{}", id),
            name: format!("Product {}", id),
            description: String::new(),
            category: Category {
                id: 1,
                name: "Lighting".to_string(),
            },
            categories: vec![],
            tags: vec![],
            price: Price { new: 100, old: None },
            main_photo: None,
        }
    }

    fn page_of(products: Vec<Product>) -> Page<Product> {
        let pagination = Pagination::resolve(products.len() as u64, &PageRequest::default());
        Page::new(products, pagination)
    }

    fn service(
        products: MockProductReadRepository,
        categories: MockCategoryReadRepository,
        tags: MockTagReadRepository,
    ) -> MockService {
        CatalogService::new(products, categories, tags)
    }

    #[tokio::test]
    async fn test_missing_category_fails_before_listing() {
        let mut categories = MockCategoryReadRepository::new();
        categories.expect_find().with(eq(5)).returning(|_| Ok(None));

        let mut products = MockProductReadRepository::new();
        products.expect_list_by_category().never();

        let service = service(products, categories, MockTagReadRepository::new());
        let err = service
            .list_products_by_category(5, PageRequest::default())
            .await
            .unwrap_err();

        assert!(matches!(err, CatalogError::CategoryNotFound(5)));
    }

    #[tokio::test]
    async fn test_category_listing_passes_resolved_category() {
        let mut categories = MockCategoryReadRepository::new();
        categories.expect_find().with(eq(1)).returning(|id| {
            Ok(Some(Category {
                id,
                name: "Lighting".to_string(),
            }))
        });

        let mut products = MockProductReadRepository::new();
        products
            .expect_list_by_category()
            .withf(|category, _| category.id == 1)
            .returning(|_, _| Ok(page_of(vec![product(3), product(2)])));

        let service = service(products, categories, MockTagReadRepository::new());
        let page = service
            .list_products_by_category(1, PageRequest::default())
            .await
            .unwrap();

        assert_eq!(page.items.len(), 2);
        assert_eq!(page.pagination.total_count, 2);
    }

    #[tokio::test]
    async fn test_missing_tag_fails_before_listing() {
        let mut tags = MockTagReadRepository::new();
        tags.expect_find().with(eq(8)).returning(|_| Ok(None));

        let mut products = MockProductReadRepository::new();
        products.expect_list_by_tag().never();

        let service = service(products, MockCategoryReadRepository::new(), tags);
        let err = service
            .list_products_by_tag(8, PageRequest::default())
            .await
            .unwrap_err();

        assert!(matches!(err, CatalogError::TagNotFound(8)));
    }

    #[tokio::test]
    async fn test_tag_listing_passes_resolved_tag() {
        let mut tags = MockTagReadRepository::new();
        tags.expect_find().returning(|id| {
            Ok(Some(Tag {
                id,
                name: "sale".to_string(),
            }))
        });

        let mut products = MockProductReadRepository::new();
        products
            .expect_list_by_tag()
            .withf(|tag, _| tag.id == 3)
            .returning(|_, _| Ok(page_of(vec![product(4)])));

        let service = service(products, MockCategoryReadRepository::new(), tags);
        let page = service
            .list_products_by_tag(3, PageRequest::default())
            .await
            .unwrap();

        assert_eq!(page.items[0].id, 4);
    }

    #[tokio::test]
    async fn test_get_product() {
        let mut products = MockProductReadRepository::new();
        products
            .expect_find()
            .with(eq(42))
            .returning(|id| Ok(Some(product(id))));
        products.expect_find().with(eq(43)).returning(|_| Ok(None));

        let service = service(
            products,
            MockCategoryReadRepository::new(),
            MockTagReadRepository::new(),
        );

        assert_eq!(service.get_product(42).await.unwrap().code, "P42");
        assert!(matches!(
            service.get_product(43).await.unwrap_err(),
            CatalogError::ProductNotFound(43)
        ));
    }

    #[tokio::test]
    async fn test_repository_failure_propagates() {
        let mut products = MockProductReadRepository::new();
        products
            .expect_list_all()
            .returning(|_| Err(CatalogError::Repository("offline".to_string())));

        let service = service(
            products,
            MockCategoryReadRepository::new(),
            MockTagReadRepository::new(),
        );
        let err = service
            .list_products(PageRequest::default())
            .await
            .unwrap_err();

        assert!(matches!(err, CatalogError::Repository(_)));
    }
}
