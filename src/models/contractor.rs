//! Contractor, access-pass and contract document models.
//!
//! These are the inputs the assistant builds its risk, pass-audit and
//! document prompts from.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Advance payment state of a contract.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Advance {
    /// Whether the advance has been paid.
    pub paid: bool,
    /// The advance amount, if one was agreed.
    #[serde(default)]
    pub amount: Option<Decimal>,
}

/// A contractor's worker holding a site access pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Worker {
    /// The worker's full name.
    pub full_name: String,
    /// The access pass number.
    pub pass_number: String,
    /// The date the pass expires.
    pub expiry_date: NaiveDate,
}

/// A contractor vehicle holding a site access pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vehicle {
    /// The vehicle model.
    pub model: String,
    /// The licence plate.
    pub plate: String,
    /// The date the vehicle pass expires.
    pub pass_expiry: NaiveDate,
}

/// A document filed against a contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractDocument {
    /// Unique identifier for the document.
    pub id: String,
    /// The document's file or display name.
    pub name: String,
    /// The document type (e.g., "Акт", "Счет").
    #[serde(rename = "type")]
    pub doc_type: String,
    /// The document date.
    pub date: NaiveDate,
}

/// A contractor working on a plant project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contractor {
    /// Unique identifier for the contractor.
    pub id: String,
    /// The contractor's company name.
    pub name: String,
    /// The project or plant object the contractor works on.
    pub object: String,
    /// Completion progress in percent (0-100).
    pub progress: u8,
    /// Advance payment state.
    #[serde(default)]
    pub advance: Advance,
    /// Documents filed against the contract.
    #[serde(default)]
    pub documents: Vec<ContractDocument>,
    /// Workers with access passes.
    #[serde(default)]
    pub workers: Vec<Worker>,
    /// Vehicles with access passes.
    #[serde(default)]
    pub transport: Vec<Vehicle>,
}
