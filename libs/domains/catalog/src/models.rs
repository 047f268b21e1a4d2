use serde::{Deserialize, Serialize};

/// Identifier shared by every catalog entity.
pub type CatalogId = i64;

/// Product category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CatalogId,
    pub name: String,
}

/// Product tag
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub id: CatalogId,
    pub name: String,
}

/// Uploaded product photo
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Photo {
    pub id: CatalogId,
    /// Stored file name, e.g. `"42.jpg"`
    pub file: String,
}

/// Current and previous price, in minor currency units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    pub new: i64,
    pub old: Option<i64>,
}

/// A sellable catalog product.
///
/// Always carries exactly one primary category. `categories` holds the
/// additional categories and never repeats the primary one once loaded
/// through a read model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    pub id: CatalogId,
    pub code: String,
    pub name: String,
    pub description: String,
    /// Primary category
    pub category: Category,
    /// Additional categories
    pub categories: Vec<Category>,
    pub tags: Vec<Tag>,
    pub price: Price,
    pub main_photo: Option<Photo>,
}

impl Product {
    /// Additional categories, skipping any copy of the primary one.
    pub fn other_categories(&self) -> impl Iterator<Item = &Category> {
        let primary = self.category.id;
        self.categories.iter().filter(move |c| c.id != primary)
    }

    /// True when the category is the primary or an additional category.
    pub fn in_category(&self, category_id: CatalogId) -> bool {
        self.category.id == category_id || self.categories.iter().any(|c| c.id == category_id)
    }

    pub fn has_tag(&self, tag_id: CatalogId) -> bool {
        self.tags.iter().any(|t| t.id == tag_id)
    }
}
