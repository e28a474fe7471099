//! The product document model.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Fixed category set for the synthetic catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProductCategory {
    Accessories,
    Apparel,
    Bags,
    Climbing,
    Cycling,
    Electronics,
    Footwear,
    Home,
    Jackets,
    Navigation,
    #[serde(rename = "Ski/boarding")]
    SkiBoarding,
    Trekking,
}

impl ProductCategory {
    /// Every category, in catalog order.
    pub const ALL: [ProductCategory; 12] = [
        ProductCategory::Accessories,
        ProductCategory::Apparel,
        ProductCategory::Bags,
        ProductCategory::Climbing,
        ProductCategory::Cycling,
        ProductCategory::Electronics,
        ProductCategory::Footwear,
        ProductCategory::Home,
        ProductCategory::Jackets,
        ProductCategory::Navigation,
        ProductCategory::SkiBoarding,
        ProductCategory::Trekking,
    ];
}

impl fmt::Display for ProductCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ProductCategory::Accessories => "Accessories",
            ProductCategory::Apparel => "Apparel",
            ProductCategory::Bags => "Bags",
            ProductCategory::Climbing => "Climbing",
            ProductCategory::Cycling => "Cycling",
            ProductCategory::Electronics => "Electronics",
            ProductCategory::Footwear => "Footwear",
            ProductCategory::Home => "Home",
            ProductCategory::Jackets => "Jackets",
            ProductCategory::Navigation => "Navigation",
            ProductCategory::SkiBoarding => "Ski/boarding",
            ProductCategory::Trekking => "Trekking",
        };
        f.write_str(name)
    }
}

/// A synthetic retail product document.
///
/// `id` is the string form of `numeric_id`; bulk-insert workloads assign
/// numeric ids as a contiguous ascending sequence continuing from the
/// store's current maximum.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub numeric_id: i64,
    pub category: ProductCategory,
    pub brand: String,
    pub name: String,
    pub description: String,
    pub price: f64,
}
