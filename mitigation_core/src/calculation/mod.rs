//! Mitigation calculation - apply a party's statuses to incoming damage

mod calculator;
mod result;

pub use calculator::{round_half_up, MitigationCalculator};
pub use result::CalculationResult;
