//! Late payment fine.
//!
//! Simple (non-compounding) rate applied once to the slip total:
//! - up to 10 days overdue: 0.5%
//! - more than 10 days overdue: 1%

use chrono::NaiveDate;
use contracts::domain::a001_bank_slip::aggregate::{parse_due_date, BankSlipStatus};

/// Overdue days above which the higher rate applies
const LIMIT_TO_INCREASE_FINE: i64 = 10;

/// Rates in basis points (1/10000)
const SHORT_DELAY_RATE_BP: i128 = 50;
const LONG_DELAY_RATE_BP: i128 = 100;

/// Whole calendar days between the due date and today; negative when not yet due
pub fn overdue_days(due_date: NaiveDate, today: NaiveDate) -> i64 {
    (today - due_date).num_days()
}

/// Fine owed on a slip read on `today`.
///
/// `None` for non-pending slips, slips not yet overdue, and stored due dates that do
/// not parse. The last case is deliberately silent.
pub fn fine(
    due_date: &str,
    total_in_cents: i64,
    status: BankSlipStatus,
    today: NaiveDate,
) -> Option<i64> {
    if status != BankSlipStatus::Pending {
        return None;
    }

    let Some(due) = parse_due_date(due_date) else {
        tracing::debug!("Fine not computed, unparseable due date '{}'", due_date);
        return None;
    };

    let days = overdue_days(due, today);
    if days <= 0 {
        return None;
    }

    let rate = if days > LIMIT_TO_INCREASE_FINE {
        LONG_DELAY_RATE_BP
    } else {
        SHORT_DELAY_RATE_BP
    };

    // integer division truncates toward zero
    let amount = i128::from(total_in_cents) * rate / 10_000;
    i64::try_from(amount).ok()
}
