pub mod aggregate;
pub mod batch;
pub mod error;
pub mod filing;
pub mod index;
pub mod parsing;
pub mod report;
