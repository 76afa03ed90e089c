pub mod container;
pub mod form10k;
pub mod form13f;
pub mod section;
pub mod text;
pub mod types;
pub mod xml;

pub use types::{HoldingRecord, ManagerInfo, SectionSpan, TenKSections};
