//! Order record and id assignment types.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Status given to every freshly created order.
pub const INITIAL_STATUS: &str = "Preparing";

/// A single order.
///
/// The id is not part of the record; it is the key the store files it under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    /// Category chosen by the client at creation. Never changes.
    pub category: String,
    /// Free-form status, replaced verbatim on update.
    pub status: String,
}

impl Order {
    /// Create an order in its initial status.
    pub fn new(category: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            status: INITIAL_STATUS.to_string(),
        }
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{'category': '{}', 'status': '{}'}}",
            self.category, self.status
        )
    }
}

/// Log-friendly view of a set of orders keyed by id.
pub struct OrderListing<'a>(pub &'a BTreeMap<u64, Order>);

impl fmt::Display for OrderListing<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (id, order)) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}: {}", id, order)?;
        }
        f.write_str("}")
    }
}

/// How the store picks the id of a new order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, Default,
)]
#[serde(rename_all = "snake_case")]
pub enum IdStrategy {
    /// `len + 1` at insertion time. After deletions this can land on a live
    /// id, in which case the existing order is replaced.
    #[default]
    #[strum(serialize = "count_plus_one", serialize = "COUNT_PLUS_ONE")]
    CountPlusOne,
    /// Strictly increasing counter; ids are never reused.
    #[strum(serialize = "monotonic", serialize = "MONOTONIC")]
    Monotonic,
}
