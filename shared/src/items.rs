use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use time::OffsetDateTime;

use crate::palette;

/// Where a wheel item came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ItemSource {
    #[serde(alias = "popular")]
    #[strum(to_string = "catalog", serialize = "popular")]
    Catalog,
    Custom,
}

/// A recipe placed on a user's wheel. Immutable once created; `color_index` is fixed at
/// creation so removing other items never changes this item's color.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: i64,
    pub label: String,
    pub color_index: u8,
    pub source: ItemSource,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl Item {
    pub fn color(&self) -> &'static str {
        palette::color_for(self.color_index)
    }

    pub fn matches_label(&self, label: &str) -> bool {
        self.label.to_lowercase() == label.to_lowercase()
    }
}

/// Read-only reference recipe offered for one-click adding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogRecipe {
    pub id: i64,
    pub label: String,
}

/// Recipes the catalog is seeded with when no database provides one.
pub const DEFAULT_CATALOG: [&str; 16] = [
    "火锅", "烧烤", "沙拉", "麻辣烫", "饺子", "拉面", "寿司", "披萨",
    "汉堡", "炒饭", "麻婆豆腐", "宫保鸡丁", "煎饼果子", "螺蛳粉", "黄焖鸡", "酸菜鱼",
];

#[derive(Debug, Deserialize)]
pub struct AddItemRequest {
    pub label: String,
    #[serde(default = "default_source")]
    pub source: ItemSource,
}

fn default_source() -> ItemSource {
    ItemSource::Custom
}
