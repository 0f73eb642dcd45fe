use crate::domain::money::{DenomId, Denomination, PaymentTally};
use crate::domain::ports::{Catalog, Ledger};
use crate::domain::product::{Product, SelectionTally};
use crate::error::{Result, VendingError};
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

/// In-memory product inventory behind a shared lock.
///
/// The machine runs a single session at a time, but every mutation still
/// goes through the lock so the port stays safe to share.
#[derive(Default, Clone)]
pub struct InMemoryCatalog {
    products: Arc<RwLock<Vec<Product>>>,
}

impl InMemoryCatalog {
    /// Creates a catalog seeded with `products`, kept in slot order.
    pub fn new(mut products: Vec<Product>) -> Self {
        products.sort_by_key(|p| p.id);
        Self {
            products: Arc::new(RwLock::new(products)),
        }
    }
}

#[async_trait]
impl Catalog for InMemoryCatalog {
    async fn all(&self) -> Result<Vec<Product>> {
        let products = self.products.read().await;
        Ok(products.clone())
    }

    async fn find(&self, id: u8) -> Result<Option<Product>> {
        let products = self.products.read().await;
        Ok(products.iter().find(|p| p.id == id).cloned())
    }

    async fn commit_decrease(&self, tally: &SelectionTally) -> Result<()> {
        let mut products = self.products.write().await;
        for (key, count) in tally.iter() {
            let Some(product) = products.iter_mut().find(|p| p.id == key.id) else {
                continue;
            };
            if product.stock < count {
                tracing::warn!(product = %product.name, "stock underflow on commit");
                return Err(VendingError::StockUnderflow(product.name.clone()));
            }
            product.stock -= count;
            tracing::debug!(product = %product.name, count, left = product.stock, "stock committed");
        }
        Ok(())
    }
}

/// In-memory money inventory behind a shared lock.
///
/// Denominations are held descending by face value from construction on,
/// so change-making and display always see highest-value-first order.
#[derive(Default, Clone)]
pub struct InMemoryLedger {
    denominations: Arc<RwLock<Vec<Denomination>>>,
}

impl InMemoryLedger {
    /// Creates a ledger seeded with `denominations`, sorted descending by
    /// face value.
    pub fn new(mut denominations: Vec<Denomination>) -> Self {
        denominations.sort_by(|a, b| b.value.cmp(&a.value));
        Self {
            denominations: Arc::new(RwLock::new(denominations)),
        }
    }
}

#[async_trait]
impl Ledger for InMemoryLedger {
    async fn all(&self) -> Result<Vec<Denomination>> {
        let denominations = self.denominations.read().await;
        Ok(denominations.clone())
    }

    async fn find(&self, label: &str) -> Result<Option<Denomination>> {
        let denominations = self.denominations.read().await;
        Ok(denominations.iter().find(|d| d.label == label).cloned())
    }

    async fn increase_stock(&self, tally: &PaymentTally) -> Result<()> {
        let mut denominations = self.denominations.write().await;
        for (id, count) in tally.iter() {
            if let Some(denom) = denominations.iter_mut().find(|d| d.label == id.label) {
                denom.stock += count;
                tracing::debug!(label = %denom.label, count, stock = denom.stock, "stock received");
            }
        }
        Ok(())
    }

    async fn decrease_stock(&self, change: &[DenomId]) -> Result<()> {
        let mut denominations = self.denominations.write().await;
        for id in change {
            if let Some(denom) = denominations.iter_mut().find(|d| d.label == id.label) {
                if denom.stock == 0 {
                    tracing::warn!(label = %denom.label, "stock underflow on change payout");
                    return Err(VendingError::StockUnderflow(denom.label.clone()));
                }
                denom.stock -= 1;
            }
        }
        Ok(())
    }
}
