pub mod payment;

pub use payment::{quote, unquote, GroupKey, Payment, FIELD_COUNT};
