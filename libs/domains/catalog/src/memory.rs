//! In-memory read model loaded from a JSON catalog snapshot.
//!
//! The snapshot references categories and tags by id:
//!
//! ```json
//! {
//!   "categories": [{"id": 1, "name": "Lighting"}],
//!   "tags": [{"id": 3, "name": "sale"}],
//!   "products": [{
//!     "id": 42, "code": "P42", "name": "Desk lamp",
//!     "category_id": 1, "category_ids": [7], "tag_ids": [3],
//!     "price_new": 1500, "price_old": null,
//!     "main_photo": {"id": 5, "file": "5.jpg"}
//!   }]
//! }
//! ```

use async_trait::async_trait;
use serde::Deserialize;
use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;
use std::sync::Arc;

use crate::error::{CatalogError, CatalogResult};
use crate::models::{CatalogId, Category, Photo, Price, Product, Tag};
use crate::pagination::{Page, PageRequest, Sort, SortField};
use crate::repository::{CategoryReadRepository, ProductReadRepository, TagReadRepository};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CatalogSeed {
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub tags: Vec<Tag>,
    #[serde(default)]
    pub products: Vec<ProductSeed>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProductSeed {
    pub id: CatalogId,
    pub code: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub category_id: CatalogId,
    #[serde(default)]
    pub category_ids: Vec<CatalogId>,
    #[serde(default)]
    pub tag_ids: Vec<CatalogId>,
    pub price_new: i64,
    #[serde(default)]
    pub price_old: Option<i64>,
    #[serde(default)]
    pub main_photo: Option<Photo>,
}

#[derive(Debug, Default)]
struct Snapshot {
    categories: BTreeMap<CatalogId, Category>,
    tags: BTreeMap<CatalogId, Tag>,
    products: BTreeMap<CatalogId, Product>,
}

/// Immutable catalog held in memory and shared across requests.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    snapshot: Arc<Snapshot>,
}

impl InMemoryCatalog {
    /// Reads and validates a snapshot file.
    pub async fn load(path: impl AsRef<Path>) -> CatalogResult<Self> {
        let path = path.as_ref();
        let raw = tokio::fs::read_to_string(path).await.map_err(|e| {
            CatalogError::Repository(format!("cannot read {}: {}", path.display(), e))
        })?;
        let catalog = Self::from_json_str(&raw)?;
        tracing::info!(path = %path.display(), "Catalog snapshot loaded");
        Ok(catalog)
    }

    pub fn from_json_str(raw: &str) -> CatalogResult<Self> {
        let seed: CatalogSeed = serde_json::from_str(raw)?;
        Self::from_seed(seed)
    }

    /// Resolves id references into full products.
    pub fn from_seed(seed: CatalogSeed) -> CatalogResult<Self> {
        let mut snapshot = Snapshot::default();

        for category in seed.categories {
            let id = category.id;
            if snapshot.categories.insert(id, category).is_some() {
                return Err(invalid(format!("duplicate category id {}", id)));
            }
        }
        for tag in seed.tags {
            let id = tag.id;
            if snapshot.tags.insert(id, tag).is_some() {
                return Err(invalid(format!("duplicate tag id {}", id)));
            }
        }
        for product in seed.products {
            let product = resolve_product(&snapshot, product)?;
            let id = product.id;
            if snapshot.products.insert(id, product).is_some() {
                return Err(invalid(format!("duplicate product id {}", id)));
            }
        }

        tracing::debug!(
            categories = snapshot.categories.len(),
            tags = snapshot.tags.len(),
            products = snapshot.products.len(),
            "Catalog snapshot resolved"
        );

        Ok(Self {
            snapshot: Arc::new(snapshot),
        })
    }

    pub fn product_count(&self) -> usize {
        self.snapshot.products.len()
    }

    /// Readiness check reporting how many products the snapshot serves.
    ///
    /// The snapshot is validated when loaded, so a loaded catalog always answers.
    pub async fn ping(&self) -> CatalogResult<usize> {
        let products = self.product_count();
        tracing::trace!(products, "Catalog ping");
        Ok(products)
    }

    fn page_where<F>(&self, request: PageRequest, filter: F) -> Page<Product>
    where
        F: Fn(&Product) -> bool,
    {
        let mut matches: Vec<&Product> = self
            .snapshot
            .products
            .values()
            .filter(|product| filter(product))
            .collect();
        let sort = request.sort();
        matches.sort_by(|a, b| compare(a, b, sort));

        let page = Page::from_ordered(matches, &request);
        Page::new(
            page.items.into_iter().cloned().collect(),
            page.pagination,
        )
    }
}

fn invalid(msg: String) -> CatalogError {
    CatalogError::InvalidSnapshot(msg)
}

fn resolve_product(snapshot: &Snapshot, seed: ProductSeed) -> CatalogResult<Product> {
    let category = snapshot
        .categories
        .get(&seed.category_id)
        .cloned()
        .ok_or_else(|| {
            invalid(format!(
                "product {} references unknown category {}",
                seed.id, seed.category_id
            ))
        })?;

    let mut seen = BTreeSet::from([seed.category_id]);
    let mut categories = Vec::with_capacity(seed.category_ids.len());
    for id in seed.category_ids {
        if !seen.insert(id) {
            continue;
        }
        let additional = snapshot.categories.get(&id).cloned().ok_or_else(|| {
            invalid(format!("product {} references unknown category {}", seed.id, id))
        })?;
        categories.push(additional);
    }

    let mut seen = BTreeSet::new();
    let mut tags = Vec::with_capacity(seed.tag_ids.len());
    for id in seed.tag_ids {
        if !seen.insert(id) {
            continue;
        }
        let tag = snapshot.tags.get(&id).cloned().ok_or_else(|| {
            invalid(format!("product {} references unknown tag {}", seed.id, id))
        })?;
        tags.push(tag);
    }

    if let Some(photo) = &seed.main_photo {
        if photo.file.trim().is_empty() {
            return Err(invalid(format!("product {} has a photo without a file", seed.id)));
        }
    }

    Ok(Product {
        id: seed.id,
        code: seed.code,
        name: seed.name,
        description: seed.description,
        category,
        categories,
        tags,
        price: Price {
            new: seed.price_new,
            old: seed.price_old,
        },
        main_photo: seed.main_photo,
    })
}

/// Orders by the sort field with the id as a tie-breaker.
fn compare(a: &Product, b: &Product, sort: Sort) -> Ordering {
    let ordering = match sort.field {
        SortField::Id => a.id.cmp(&b.id),
        SortField::Name => a.name.cmp(&b.name).then(a.id.cmp(&b.id)),
        SortField::Price => a.price.new.cmp(&b.price.new).then(a.id.cmp(&b.id)),
    };
    if sort.descending {
        ordering.reverse()
    } else {
        ordering
    }
}

#[async_trait]
impl ProductReadRepository for InMemoryCatalog {
    async fn find(&self, id: CatalogId) -> CatalogResult<Option<Product>> {
        Ok(self.snapshot.products.get(&id).cloned())
    }

    async fn list_all(&self, page: PageRequest) -> CatalogResult<Page<Product>> {
        Ok(self.page_where(page, |_| true))
    }

    async fn list_by_category(
        &self,
        category: &Category,
        page: PageRequest,
    ) -> CatalogResult<Page<Product>> {
        Ok(self.page_where(page, |product| product.in_category(category.id)))
    }

    async fn list_by_tag(&self, tag: &Tag, page: PageRequest) -> CatalogResult<Page<Product>> {
        Ok(self.page_where(page, |product| product.has_tag(tag.id)))
    }
}

#[async_trait]
impl CategoryReadRepository for InMemoryCatalog {
    async fn find(&self, id: CatalogId) -> CatalogResult<Option<Category>> {
        Ok(self.snapshot.categories.get(&id).cloned())
    }
}

#[async_trait]
impl TagReadRepository for InMemoryCatalog {
    async fn find(&self, id: CatalogId) -> CatalogResult<Option<Tag>> {
        Ok(self.snapshot.tags.get(&id).cloned())
    }
}
