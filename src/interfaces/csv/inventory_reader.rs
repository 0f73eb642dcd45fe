use crate::error::{Result, VendingError};
use serde::de::DeserializeOwned;
use std::io::Read;

/// Reads inventory seed records from a CSV source.
///
/// This reader wraps `csv::Reader` and provides an iterator over
/// `Result<T>` for any deserializable record type, so the same wrapper
/// seeds both the product catalog and the denomination ledger. Whitespace
/// is trimmed and ragged rows are tolerated.
pub struct InventoryReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> InventoryReader<R> {
    /// Creates a new `InventoryReader` from any `Read` source.
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    /// Returns an iterator that lazily reads and deserializes records.
    pub fn records<T: DeserializeOwned>(self) -> impl Iterator<Item = Result<T>> {
        self.reader
            .into_deserialize()
            .map(|result| result.map_err(VendingError::from))
    }
}
