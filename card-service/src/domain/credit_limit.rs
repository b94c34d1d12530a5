//! Score-to-limit policy.
//!
//! | score    | limit                          |
//! |----------|--------------------------------|
//! | 1–299    | declined                       |
//! | 300–599  | [`MINIMUM_LIMIT`]              |
//! | 600–799  | `max(MINIMUM_LIMIT, income/2)` |
//! | 800–950  | `2 * income`                   |
//! | 951–999  | [`MAXIMUM_LIMIT`]              |

use std::fmt;
use thiserror::Error;

pub const MINIMUM_LIMIT: f64 = 1_000.0;
pub const MAXIMUM_LIMIT: f64 = 1_000_000.0;

pub const DECLINED_MARKER: &str = "Declined";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScoreBand {
    Declined,
    Minimum,
    HalfIncome,
    DoubleIncome,
    Maximum,
}

impl ScoreBand {
    /// Returns `None` for scores outside 1–999.
    pub fn for_score(score: u16) -> Option<Self> {
        match score {
            1..=299 => Some(ScoreBand::Declined),
            300..=599 => Some(ScoreBand::Minimum),
            600..=799 => Some(ScoreBand::HalfIncome),
            800..=950 => Some(ScoreBand::DoubleIncome),
            951..=999 => Some(ScoreBand::Maximum),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ScoreBand::Declined => "declined",
            ScoreBand::Minimum => "minimum",
            ScoreBand::HalfIncome => "half_income",
            ScoreBand::DoubleIncome => "double_income",
            ScoreBand::Maximum => "maximum",
        }
    }
}

impl fmt::Display for ScoreBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CreditLimit {
    Declined,
    Approved(f64),
}

impl CreditLimit {
    /// The descriptor stored on the record and shown to the caller.
    pub fn descriptor(&self) -> String {
        self.to_string()
    }

}

impl fmt::Display for CreditLimit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CreditLimit::Declined => f.write_str(DECLINED_MARKER),
            CreditLimit::Approved(amount) => write!(f, "{:.2}", amount),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum CreditLimitError {
    #[error("score {0} is outside the supported range 1-999")]
    InvalidScore(u16),

    #[error("income must be a finite non-negative number, got {0}")]
    InvalidIncome(f64),
}

pub fn credit_limit(score: u16, income: f64) -> Result<CreditLimit, CreditLimitError> {
    if !income.is_finite() || income < 0.0 {
        return Err(CreditLimitError::InvalidIncome(income));
    }

    let band = ScoreBand::for_score(score).ok_or(CreditLimitError::InvalidScore(score))?;

    let amount = match band {
        ScoreBand::Declined => return Ok(CreditLimit::Declined),
        ScoreBand::Minimum => MINIMUM_LIMIT,
        ScoreBand::HalfIncome => MINIMUM_LIMIT.max(0.5 * income),
        ScoreBand::DoubleIncome => 2.0 * income,
        ScoreBand::Maximum => MAXIMUM_LIMIT,
    };

    // Incomes near f64::MAX overflow when doubled.
    if !amount.is_finite() {
        return Err(CreditLimitError::InvalidIncome(income));
    }

    Ok(CreditLimit::Approved(amount))
}
