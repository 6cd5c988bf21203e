pub mod a001_bank_slip;
pub mod common;
