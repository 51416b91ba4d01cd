mod fleet;
mod machine;

pub use fleet::Fleet;
pub use machine::{Machine, DEFAULT_STOCK_LEVEL, LOW_STOCK_THRESHOLD};
