//! Hypermedia JSON shapes of catalog products.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::links::{LinkBuilder, Route};
use crate::models::{CatalogId, Category, Price, Product, Tag};
use crate::thumbnails::{ThumbnailProfile, ThumbnailResolver};

/// Hypermedia link
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Link {
    /// Absolute URL
    #[schema(example = "https://shop.example.com/api/items/42")]
    pub href: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SelfLinks {
    #[serde(rename = "self")]
    pub self_link: Link,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ProductLinks {
    /// Product detail
    #[serde(rename = "self")]
    pub self_link: Link,
    /// Add-to-cart action
    pub stock: Link,
}

/// Category reference linking to the category listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ProductCategory {
    pub id: CatalogId,
    pub name: String,
    #[serde(rename = "_links")]
    pub links: SelfLinks,
}

/// Tag reference linking to the tag listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ProductTag {
    pub id: CatalogId,
    pub name: String,
    #[serde(rename = "_links")]
    pub links: SelfLinks,
}

/// Price in minor currency units. `old` is always present, `null` when unset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ProductPrice {
    pub new: i64,
    pub old: Option<i64>,
}

impl From<Price> for ProductPrice {
    fn from(price: Price) -> Self {
        Self {
            new: price.new,
            old: price.old,
        }
    }
}

/// Product as shown in listings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ProductItem {
    pub id: CatalogId,
    pub code: String,
    pub name: String,
    pub category: ProductCategory,
    pub price: ProductPrice,
    /// Listing thumbnail, `null` when the product has no main photo
    pub thumbnail: Option<String>,
    #[serde(rename = "_links")]
    pub links: ProductLinks,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ProductCategories {
    /// Primary category
    pub main: ProductCategory,
    /// Additional categories, never repeating the primary one
    pub other: Vec<ProductCategory>,
}

/// Full product detail
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ProductView {
    pub id: CatalogId,
    pub code: String,
    pub name: String,
    pub description: String,
    pub categories: ProductCategories,
    pub tags: Vec<ProductTag>,
    pub price: ProductPrice,
}

/// Turns products into their JSON representations.
///
/// Both shapes are pure functions of the product, the link builder and the
/// thumbnail resolver.
#[derive(Debug, Clone)]
pub struct CatalogSerializer {
    links: LinkBuilder,
    thumbnails: ThumbnailResolver,
}

impl CatalogSerializer {
    pub fn new(links: LinkBuilder, thumbnails: ThumbnailResolver) -> Self {
        Self { links, thumbnails }
    }

    pub fn links(&self) -> &LinkBuilder {
        &self.links
    }

    pub fn list_item(&self, product: &Product) -> ProductItem {
        ProductItem {
            id: product.id,
            code: product.code.clone(),
            name: product.name.clone(),
            category: self.category(&product.category),
            price: product.price.into(),
            thumbnail: product
                .main_photo
                .as_ref()
                .map(|photo| self.thumbnails.profile_url(photo, ThumbnailProfile::CatalogList)),
            links: ProductLinks {
                self_link: self.link(Route::ItemView(product.id)),
                stock: self.link(Route::CartAdd(product.id)),
            },
        }
    }

    pub fn detail_view(&self, product: &Product) -> ProductView {
        ProductView {
            id: product.id,
            code: product.code.clone(),
            name: product.name.clone(),
            description: product.description.clone(),
            categories: ProductCategories {
                main: self.category(&product.category),
                other: product
                    .other_categories()
                    .map(|category| self.category(category))
                    .collect(),
            },
            tags: product.tags.iter().map(|tag| self.tag(tag)).collect(),
            price: product.price.into(),
        }
    }

    fn category(&self, category: &Category) -> ProductCategory {
        ProductCategory {
            id: category.id,
            name: category.name.clone(),
            links: SelfLinks {
                self_link: self.link(Route::CategoryItems(category.id)),
            },
        }
    }

    fn tag(&self, tag: &Tag) -> ProductTag {
        ProductTag {
            id: tag.id,
            name: tag.name.clone(),
            links: SelfLinks {
                self_link: self.link(Route::TagItems(tag.id)),
            },
        }
    }

    fn link(&self, route: Route) -> Link {
        Link {
            href: self.links.absolute_url(route),
        }
    }
}
