//! Seeded product factory.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::product::{Product, ProductCategory};

const BRAND_STEMS: &[&str] = &[
    "Summit", "Northwind", "Basecamp", "Cascadia", "Traverse", "Alpenglow", "Ridgeline",
    "Stonepath", "Meridian", "Outpost",
];

const BRAND_SUFFIXES: &[&str] = &["Gear", "Supply Co.", "Outfitters", "Works", "Collective"];

const NAME_ADJECTIVES: &[&str] = &[
    "Rugged",
    "Lightweight",
    "Insulated",
    "Compact",
    "Waterproof",
    "Ergonomic",
    "All-Season",
    "Packable",
    "Reinforced",
    "Ultralight",
];

const NAME_NOUNS: &[&str] = &[
    "Jacket",
    "Backpack",
    "Headlamp",
    "Carabiner",
    "Trekking Pole",
    "Base Layer",
    "Tent",
    "Stove",
    "Altimeter",
    "Gaiter",
];

const DESCRIPTION_OPENERS: &[&str] = &[
    "Built for long days on the trail",
    "Designed around a reinforced frame",
    "Cut from abrasion-resistant fabric",
    "Tuned for alpine starts",
    "Made for shoulder-season conditions",
];

const DESCRIPTION_CLOSERS: &[&str] = &[
    "with storm-sealed seams.",
    "and packs down to nothing.",
    "without the usual weight penalty.",
    "with glove-friendly hardware.",
    "and shrugs off rough handling.",
];

/// Inclusive price bounds for generated products.
const PRICE_MIN: u64 = 50;
const PRICE_MAX: u64 = 500;

/// Generates synthetic products, continuing a numeric id sequence.
///
/// The id fields derive from the numeric id alone; every other field is
/// drawn from the factory's RNG. Seeding the factory makes the random
/// fields reproducible across runs (same seed, same products).
pub struct ProductFactory {
    rng: StdRng,
}

impl ProductFactory {
    /// Factory with a fixed seed.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Factory seeded from OS entropy.
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Generate one product with the given numeric id.
    pub fn generate(&mut self, numeric_id: i64) -> Product {
        let rng = &mut self.rng;
        let category = ProductCategory::ALL[rng.gen_range(0..ProductCategory::ALL.len())];
        let brand = format!("{} {}", pick(rng, BRAND_STEMS), pick(rng, BRAND_SUFFIXES));
        let name = format!("{} {}", pick(rng, NAME_ADJECTIVES), pick(rng, NAME_NOUNS));
        let description = format!(
            "{} {}",
            pick(rng, DESCRIPTION_OPENERS),
            pick(rng, DESCRIPTION_CLOSERS)
        );
        let price = rng.gen_range(PRICE_MIN..=PRICE_MAX) as f64;

        Product {
            id: numeric_id.to_string(),
            numeric_id,
            category,
            brand,
            name,
            description,
            price,
        }
    }

    /// Generate `count` products with ids `start ..= start + count - 1`,
    /// strictly increasing and contiguous.
    pub fn generate_range(&mut self, start: i64, count: u64) -> Vec<Product> {
        (0..count)
            .map(|offset| self.generate(start + offset as i64))
            .collect()
    }
}

fn pick<'a>(rng: &mut StdRng, pool: &[&'a str]) -> &'a str {
    pool[rng.gen_range(0..pool.len())]
}
