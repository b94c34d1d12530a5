pub mod credit_limit;

pub use credit_limit::{
    credit_limit, CreditLimit, CreditLimitError, ScoreBand, DECLINED_MARKER, MAXIMUM_LIMIT,
    MINIMUM_LIMIT,
};
