pub mod destination;
pub mod error;
pub mod loader;
pub mod types;

pub use destination::Destination;
pub use error::{DispatchError, DispatchResult};
pub use loader::{noop_loader, recording_loader, ScriptLoader};
pub use types::{TraitMap, TraitValue};
