//! Pure data structures: feed records, catalog and inventory state, and run outcomes.

pub mod catalog;
pub mod inventory;
pub mod outcome;
pub mod record;

pub use catalog::*;
pub use inventory::*;
pub use outcome::*;
pub use record::*;
