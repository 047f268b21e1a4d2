//! Absolute URLs for embedded `_links`.
//!
//! Route templates are shared with the router so a link always resolves to
//! the handler that serves the referenced entity.

use crate::models::CatalogId;

pub const ITEMS_PATH: &str = "/items";
pub const ITEM_PATH: &str = "/items/{productId}";
pub const CATEGORY_ITEMS_PATH: &str = "/items/category/{categoryId}";
pub const TAG_ITEMS_PATH: &str = "/items/tag/{tagId}";
/// Add-to-cart action, served by the shop API rather than this service.
pub const CART_ADD_PATH: &str = "/cart/add/{productId}";

/// Named route with its parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    ItemList,
    ItemView(CatalogId),
    CategoryItems(CatalogId),
    TagItems(CatalogId),
    CartAdd(CatalogId),
}

impl Route {
    /// Path relative to the API root, with the id substituted.
    pub fn path(&self) -> String {
        match *self {
            Route::ItemList => ITEMS_PATH.to_string(),
            Route::ItemView(id) => fill(ITEM_PATH, id),
            Route::CategoryItems(id) => fill(CATEGORY_ITEMS_PATH, id),
            Route::TagItems(id) => fill(TAG_ITEMS_PATH, id),
            Route::CartAdd(id) => fill(CART_ADD_PATH, id),
        }
    }
}

fn fill(template: &str, id: CatalogId) -> String {
    match (template.find('{'), template.find('}')) {
        (Some(start), Some(end)) if start < end => {
            format!("{}{}{}", &template[..start], id, &template[end + 1..])
        }
        _ => template.to_string(),
    }
}

/// Builds absolute URLs under the public API root.
#[derive(Debug, Clone)]
pub struct LinkBuilder {
    api_root: String,
}

impl LinkBuilder {
    /// `public_base_url` is the externally visible origin, e.g. `https://shop.example.com`.
    pub fn new(public_base_url: &str) -> Self {
        Self {
            api_root: format!("{}/api", public_base_url.trim_end_matches('/')),
        }
    }

    pub fn absolute_url(&self, route: Route) -> String {
        format!("{}{}", self.api_root, route.path())
    }

    /// Absolute URL of a request path relative to the API root.
    pub fn absolute_path(&self, path: &str) -> String {
        format!("{}{}", self.api_root, path)
    }
}
