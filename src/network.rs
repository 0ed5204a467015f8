//! Representation and handling of logic circuits

mod circuit;
mod gates;
pub mod generators;
mod signal;
mod source;
pub mod stats;

pub use circuit::Circuit;
pub use gates::{Gate, GateType};
pub use signal::Signal;
pub use source::Source;
