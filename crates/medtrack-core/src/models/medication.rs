//! Medication stock models.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::date::DateBound;

/// Stock count at or above which a medication is considered well stocked.
pub const LOW_STOCK_THRESHOLD: u32 = 20;

/// Stock-based availability, always derived from the count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Availability {
    InStock,
    LowStock,
    Unavailable,
}

impl Availability {
    pub fn from_stock(stock_count: u32) -> Self {
        match stock_count {
            0 => Availability::Unavailable,
            n if n < LOW_STOCK_THRESHOLD => Availability::LowStock,
            _ => Availability::InStock,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Availability::InStock => "In Stock",
            Availability::LowStock => "Low Stock",
            Availability::Unavailable => "Unavailable",
        }
    }
}

impl fmt::Display for Availability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A medication tracked in the pharmacy stock.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MedicationRecord {
    /// Unique record ID
    pub id: String,
    /// Medication name
    pub name: String,
    /// Dosage (e.g., "500mg", "1g")
    pub dosage: String,
    /// Main use
    pub description: String,
    /// Units on hand
    pub stock_count: u32,
    /// Expected restock day, if one is scheduled
    pub expected_arrival: Option<DateBound>,
}

impl MedicationRecord {
    /// Create a new medication with required fields.
    pub fn new(name: String, dosage: String, stock_count: u32) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name,
            dosage,
            description: String::new(),
            stock_count,
            expected_arrival: None,
        }
    }

    /// Availability for the current stock count.
    pub fn availability(&self) -> Availability {
        Availability::from_stock(self.stock_count)
    }

    /// Expected arrival as `DD/MM/YYYY`, or "Undefined".
    pub fn arrival_label(&self) -> String {
        self.expected_arrival
            .map(|date| date.to_display())
            .unwrap_or_else(|| "Undefined".to_string())
    }
}
