use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Physical form of a denomination. Coins and notes share all behavior;
/// the kind only matters for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DenomKind {
    Coin,
    Note,
}

impl fmt::Display for DenomKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DenomKind::Coin => write!(f, "coin"),
            DenomKind::Note => write!(f, "note"),
        }
    }
}

/// A unit of money the machine accepts and dispenses.
///
/// Labels are unique; face values are not required to be. All monetary
/// values are plain integers in the machine's smallest unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Denomination {
    pub kind: DenomKind,
    pub label: String,
    pub value: i64,
    pub stock: u32,
}

impl Denomination {
    pub fn new(kind: DenomKind, label: impl Into<String>, value: i64, stock: u32) -> Self {
        Self {
            kind,
            label: label.into(),
            value,
            stock,
        }
    }

    /// Identity of this denomination, with the mutable stock stripped off.
    pub fn id(&self) -> DenomId {
        DenomId {
            value: self.value,
            kind: self.kind,
            label: self.label.clone(),
        }
    }
}

/// Identity-only key for a denomination: what it is, never how many are
/// left. Used as a tally key and as a change-list element so that stock
/// movements cannot fragment a tally.
///
/// `value` leads the derived ordering so tallies iterate value-ascending.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DenomId {
    pub value: i64,
    pub kind: DenomKind,
    pub label: String,
}

/// Per-attempt accumulation of inserted money: denomination identity to
/// unit count. Created fresh for each payment attempt and kept across
/// insufficient-change retries within one session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaymentTally(BTreeMap<DenomId, u32>);

impl PaymentTally {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one inserted unit of `denom`.
    pub fn insert(&mut self, denom: &Denomination) {
        *self.0.entry(denom.id()).or_insert(0) += 1;
    }

    pub fn count(&self, id: &DenomId) -> u32 {
        self.0.get(id).copied().unwrap_or(0)
    }

    /// Total value inserted so far.
    pub fn total(&self) -> i64 {
        self.0.iter().map(|(id, n)| id.value * i64::from(*n)).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (&DenomId, u32)> {
        self.0.iter().map(|(id, n)| (id, *n))
    }
}
