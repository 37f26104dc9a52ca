pub mod clock;
pub mod controller;
pub mod input;
pub mod result;
pub mod typing;

pub use controller::{
    CommandOutcome, KeyInput, KeyOutcome, SessionController, SessionStatus, TickOutcome,
};
