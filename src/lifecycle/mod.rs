//! System lifecycle: spawning and stopping the collaborator actors, and logging setup.

pub mod sync_system;
pub mod tracing;

pub use self::tracing::*;
pub use sync_system::*;
