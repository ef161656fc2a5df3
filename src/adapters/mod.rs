//! Port implementations.
//!
//! - `live` talks to the real system.
//! - `recording` wraps another adapter and captures every call to a cassette.
//! - `replaying` answers calls from a cassette.

pub mod live;
pub mod recording;
pub mod replaying;
