use strum::{Display, EnumString};

use crate::models::Photo;

/// Upload attribute holding the photo file.
pub const PHOTO_FILE_ATTRIBUTE: &str = "file";

/// Thumbnail sizes generated for product photos
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum ThumbnailProfile {
    Admin,
    Thumb,
    CatalogList,
    CatalogProductMain,
    CatalogProductAdditional,
    CatalogOrigin,
}

/// Resolves thumbnail URLs under the public assets root.
///
/// Thumbnails live at `{assets}/cache/products/{profile}_{photo_id}.{ext}`.
#[derive(Debug, Clone)]
pub struct ThumbnailResolver {
    assets_url: String,
}

impl ThumbnailResolver {
    pub fn new(assets_url: &str) -> Self {
        Self {
            assets_url: assets_url.trim_end_matches('/').to_string(),
        }
    }

    /// Thumbnail for an attribute and profile given by name.
    ///
    /// `None` when the attribute or profile is unknown.
    pub fn thumbnail_url(&self, photo: &Photo, attribute: &str, profile: &str) -> Option<String> {
        if attribute != PHOTO_FILE_ATTRIBUTE {
            return None;
        }
        let profile = profile.parse::<ThumbnailProfile>().ok()?;
        Some(self.profile_url(photo, profile))
    }

    /// Every photo has a thumbnail. The file name only contributes its
    /// extension, `jpg` when it has none.
    pub fn profile_url(&self, photo: &Photo, profile: ThumbnailProfile) -> String {
        let extension = photo
            .file
            .trim()
            .rsplit_once('.')
            .map(|(_, ext)| ext)
            .filter(|ext| !ext.is_empty())
            .unwrap_or("jpg");
        format!(
            "{}/cache/products/{}_{}.{}",
            self.assets_url, profile, photo.id, extension
        )
    }
}
