//! Client-Side Mirror
//!
//! In-memory sorted copy of the store, updated optimistically by a
//! reducer over typed actions. Unidirectional flow: action in, state
//! mutation plus store writes out.

mod actions;
mod reducer;
mod state;

pub use actions::{Action, StoreWrite, TaskUpdate};
pub use reducer::reduce;
pub use state::{BoardState, DragSource};
