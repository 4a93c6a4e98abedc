//! Fermentation batch timers: the batch model, the controller that keeps
//! their countdowns current, and the seams it talks to (clock, ready cue,
//! persistence).

mod batch;
mod clock;
mod controller;
pub mod format;
mod notify;
mod store;

pub use batch::*;
pub use clock::*;
pub use controller::*;
pub use notify::*;
pub use store::*;
