//! Client-side time clock: clock-in/out, breaks and live counters.
//!
//! ```text
//! ClockedOut --clock_in--> ClockedIn --take_break--> OnBreak
//!     ^                      |   ^                      |
//!     +------clock_out-------+   +-------end_break------+
//! ```
//!
//! The server is the source of truth. Local state is a cache rebuilt by
//! [`TimeTracker::reconcile`] and mirrored into the local store after every
//! transition so a restart can resume.

mod machine;
pub mod notify;
mod persist;
pub mod state;
mod ticker;

pub use machine::TimeTracker;
pub use notify::{ConsoleNotifier, MemoryNotifier, Notice, Notifier};
pub use state::{ActiveBreak, BreakPolicy, Snapshot, TrackerState};
