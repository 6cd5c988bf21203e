use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::{AggregateId, AggregateRoot, EntityMetadata};

// ============================================================================
// ID Type
// ============================================================================

/// Unique identifier of a bank slip
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BankSlipId(pub Uuid);

impl BankSlipId {
    pub fn new(value: Uuid) -> Self {
        Self(value)
    }

    pub fn new_v4() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn value(&self) -> Uuid {
        self.0
    }
}

impl AggregateId for BankSlipId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }

    fn from_string(s: &str) -> Result<Self, String> {
        Uuid::parse_str(s)
            .map(BankSlipId::new)
            .map_err(|e| format!("Invalid UUID: {}", e))
    }
}

impl std::fmt::Display for BankSlipId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// Due date format
// ============================================================================

/// Wire and storage format of `due_date`
pub const DUE_DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a due date in `YYYY-MM-DD` form
pub fn parse_due_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, DUE_DATE_FORMAT).ok()
}

pub fn format_due_date(date: NaiveDate) -> String {
    date.format(DUE_DATE_FORMAT).to_string()
}

// ============================================================================
// Status
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BankSlipStatus {
    #[default]
    Pending,
    Paid,
    Canceled,
}

impl BankSlipStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BankSlipStatus::Pending => "PENDING",
            BankSlipStatus::Paid => "PAID",
            BankSlipStatus::Canceled => "CANCELED",
        }
    }

    /// Lenient parse for stored values; anything unknown reads as `PENDING`
    pub fn from_db(value: &str) -> Self {
        match value {
            "PAID" => BankSlipStatus::Paid,
            "CANCELED" => BankSlipStatus::Canceled,
            _ => BankSlipStatus::Pending,
        }
    }

    /// Transition policy for the explicit pay/cancel actions.
    ///
    /// Terminal states are not guarded: paying a PAID slip or canceling a PAID one
    /// re-saves it with the requested status. Only a move back to `PENDING` is refused.
    pub fn can_transition_to(&self, target: BankSlipStatus) -> bool {
        matches!(target, BankSlipStatus::Paid | BankSlipStatus::Canceled)
    }
}

impl std::fmt::Display for BankSlipStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// Aggregate Root
// ============================================================================

/// Bank slip: a payable document with a due date, an amount and a customer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BankSlip {
    pub id: BankSlipId,
    /// Kept in its `YYYY-MM-DD` text form, validated at creation
    pub due_date: String,
    pub total_in_cents: i64,
    pub customer: String,
    #[serde(default)]
    pub status: BankSlipStatus,
    pub metadata: EntityMetadata,
}

impl BankSlip {
    /// New slip for insertion; the id is generated here and never taken from a client
    pub fn new_for_insert(
        due_date: String,
        total_in_cents: i64,
        customer: String,
        status: BankSlipStatus,
    ) -> Self {
        Self {
            id: BankSlipId::new_v4(),
            due_date,
            total_in_cents,
            customer,
            status,
            metadata: EntityMetadata::new(),
        }
    }

    pub fn due_date_parsed(&self) -> Option<NaiveDate> {
        parse_due_date(&self.due_date)
    }

    /// Apply a pay/cancel action. Returns `Err` with the refused target when the
    /// transition policy rejects it.
    pub fn transition_to(&mut self, target: BankSlipStatus) -> Result<(), String> {
        if !self.status.can_transition_to(target) {
            return Err(format!(
                "Transition from {} to {} is not allowed",
                self.status, target
            ));
        }
        self.status = target;
        Ok(())
    }

    /// Hook before an update is written
    pub fn before_write(&mut self) {
        self.metadata.touch();
        self.metadata.increment_version();
    }

    pub fn to_response(&self, fine: Option<i64>) -> BankSlipResponse {
        BankSlipResponse {
            id: self.id.value(),
            due_date: self.due_date.clone(),
            total_in_cents: self.total_in_cents,
            customer: self.customer.clone(),
            status: self.status,
            fine,
        }
    }
}

impl AggregateRoot for BankSlip {
    fn aggregate_index() -> &'static str {
        "a001"
    }

    fn collection_name() -> &'static str {
        "bank_slip"
    }
}

// ============================================================================
// Forms / DTOs
// ============================================================================

/// Creation payload as received. Every field is optional so that missing values reach
/// validation instead of failing deserialization.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct BankSlipDto {
    /// Accepted for compatibility and ignored
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub due_date: Option<String>,
    #[serde(default)]
    pub total_in_cents: Option<i64>,
    #[serde(default)]
    pub customer: Option<String>,
    #[serde(default)]
    pub status: Option<BankSlipStatus>,
}

/// Bank slip as returned by the API. `fine` is omitted entirely when absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BankSlipResponse {
    pub id: Uuid,
    pub due_date: String,
    pub total_in_cents: i64,
    pub customer: String,
    #[serde(default)]
    pub status: BankSlipStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fine: Option<i64>,
}
