//! Time subsystem.
//!
//! Frame timing without coupling to the runtime:
//! - one `FrameClock` per render loop
//! - call `tick()` once per presented frame to obtain `FrameTime`
//! - drain `FrameStats` periodically to observe present pacing

mod frame_clock;

pub use frame_clock::{FrameClock, FrameStats, FrameTime};
