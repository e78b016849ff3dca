//! Order export to the ERP: a JSON file the ERP picks up.

pub mod exporter;
pub mod order;

pub use exporter::*;
pub use order::*;
