use super::money::{DenomId, Denomination, PaymentTally};
use super::product::{Product, SelectionTally};
use crate::error::Result;
use async_trait::async_trait;

/// Authoritative product inventory.
#[async_trait]
pub trait Catalog: Send + Sync {
    /// All products in slot order.
    async fn all(&self) -> Result<Vec<Product>>;
    async fn find(&self, id: u8) -> Result<Option<Product>>;
    /// Decrements each tallied product's stock by its count. Stops at the
    /// first entry that would underflow, leaving earlier entries applied.
    async fn commit_decrease(&self, tally: &SelectionTally) -> Result<()>;
}

/// Authoritative money inventory.
#[async_trait]
pub trait Ledger: Send + Sync {
    /// All denominations, descending by face value.
    async fn all(&self) -> Result<Vec<Denomination>>;
    async fn find(&self, label: &str) -> Result<Option<Denomination>>;
    /// Adds each tallied count to the matching label's stock. Unmatched
    /// labels are ignored; validation happened when the money came in.
    async fn increase_stock(&self, tally: &PaymentTally) -> Result<()>;
    /// Removes one unit per change-list entry. Stops at the first entry
    /// that would underflow, leaving earlier entries applied.
    async fn decrease_stock(&self, change: &[DenomId]) -> Result<()>;
}

pub type CatalogBox = Box<dyn Catalog>;
pub type LedgerBox = Box<dyn Ledger>;
