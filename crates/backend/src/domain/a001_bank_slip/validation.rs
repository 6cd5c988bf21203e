use contracts::domain::a001_bank_slip::aggregate::{parse_due_date, BankSlipDto};

use super::error::BankSlipError;

type Rule = fn(&BankSlipDto) -> Result<(), BankSlipError>;

/// Creation rules, evaluated in this order. The first failure wins, so a missing
/// amount reports `NotProvided` before the positivity check can report `Invalid`.
const RULES: &[(&str, Rule)] = &[
    ("due_date provided", due_date_provided),
    ("total_in_cents provided", total_provided),
    ("total_in_cents positive", total_positive),
    ("customer provided", customer_provided),
    ("due_date format", due_date_parses),
];

/// Validate a creation payload against the ordered rule list
pub fn validate(dto: &BankSlipDto) -> Result<(), BankSlipError> {
    for (name, rule) in RULES {
        if let Err(e) = rule(dto) {
            tracing::debug!("Bank slip rejected by rule '{}': {}", name, e);
            return Err(e);
        }
    }
    Ok(())
}

fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().map_or(true, str::is_empty)
}

fn due_date_provided(dto: &BankSlipDto) -> Result<(), BankSlipError> {
    if is_blank(&dto.due_date) {
        return Err(BankSlipError::NotProvided);
    }
    Ok(())
}

fn total_provided(dto: &BankSlipDto) -> Result<(), BankSlipError> {
    if dto.total_in_cents.is_none() {
        return Err(BankSlipError::NotProvided);
    }
    Ok(())
}

fn total_positive(dto: &BankSlipDto) -> Result<(), BankSlipError> {
    match dto.total_in_cents {
        Some(total) if total > 0 => Ok(()),
        _ => Err(BankSlipError::Invalid),
    }
}

fn customer_provided(dto: &BankSlipDto) -> Result<(), BankSlipError> {
    if is_blank(&dto.customer) {
        return Err(BankSlipError::NotProvided);
    }
    Ok(())
}

fn due_date_parses(dto: &BankSlipDto) -> Result<(), BankSlipError> {
    dto.due_date
        .as_deref()
        .and_then(parse_due_date)
        .map(|_| ())
        .ok_or(BankSlipError::Invalid)
}
