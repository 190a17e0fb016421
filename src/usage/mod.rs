//! Usage accounting: token counts, price estimates and running totals.

mod ledger;
mod pricing;
mod tokens;

pub use ledger::{RunUsage, UsageLedger};
pub use pricing::{ModelPrice, estimate_price_cents, model_price};
pub use tokens::count_tokens;
