//! Ordering Layer
//!
//! Fractional-key computations for list reordering, plus the clock
//! behind timestamp-scale keys.

mod clock;
mod engine;

pub use clock::{FixedClock, OrderClock, SystemClock};
pub use engine::{
    append_to_end, insert_between, neighbor_keys, sort_by_order, swap_keys, LARGE_GAP,
};
