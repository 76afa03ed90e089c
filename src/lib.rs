pub mod edgar;
pub mod utils;

// Re-exports
pub use edgar::error::ExtractError;
pub use edgar::parsing::{HoldingRecord, SectionSpan};
