use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A slot in the product catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: u8,
    pub name: String,
    pub price: i64,
    pub stock: u32,
}

impl Product {
    pub fn new(id: u8, name: impl Into<String>, price: i64, stock: u32) -> Self {
        Self {
            id,
            name: name.into(),
            price,
            stock,
        }
    }

    /// Identity of this product, with the mutable stock stripped off.
    pub fn key(&self) -> ProductKey {
        ProductKey {
            id: self.id,
            name: self.name.clone(),
            price: self.price,
        }
    }
}

/// Identity-only key for a product. `id` leads the derived ordering so
/// tallies iterate in slot order.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ProductKey {
    pub id: u8,
    pub name: String,
    pub price: i64,
}

/// Per-session accumulation of selected products: product identity to unit
/// count. Built during selection, consumed once at commit time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionTally(BTreeMap<ProductKey, u32>);

impl SelectionTally {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one selected unit of `key`.
    pub fn insert(&mut self, key: ProductKey) {
        *self.0.entry(key).or_insert(0) += 1;
    }

    pub fn count(&self, key: &ProductKey) -> u32 {
        self.0.get(key).copied().unwrap_or(0)
    }

    /// Total price of everything selected.
    pub fn total(&self) -> i64 {
        self.0
            .iter()
            .map(|(key, n)| key.price * i64::from(*n))
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ProductKey, u32)> {
        self.0.iter().map(|(key, n)| (key, *n))
    }
}
