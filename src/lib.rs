//! Three-valued simulation of combinational logic circuits
//!
//! This crate evaluates logic circuits made of Not, And, Nand, Or, Nor, Xor and Xnor gates,
//! where each wire carries true, false or undefined. Circuits may contain feedback loops:
//! the simulation computes every value that can be deduced from the inputs, and reports
//! when some gates in a loop could not be resolved.
//!
//! # Usage
//!
//! ```bash
//! # Show statistics about a circuit
//! trilogic show mycircuit.circ
//! # Simulate a circuit on patterns from a file
//! trilogic sim mycircuit.circ -i patterns.txt -o results.txt
//! # Simulate all possible input combinations, including undefined inputs
//! trilogic sim mycircuit.circ --exhaustive --undef -o results.txt
//! # Check that two files describe the same circuit
//! trilogic check first.circ second.circ
//! ```
//!
//! # Datastructures
//!
//! [`Circuit`] holds the inputs, the gates and the outputs. Gates are identified by their
//! 1-based position, and each gate input or circuit output refers to a [`Source`]: the
//! output of a gate, a circuit input, or nothing yet.
//! Unlike most logic networks, there is no ordering constraint: a gate may read from any
//! other gate, including itself.
//!
//! For example, here is a latch made of two Nor gates:
//! ```
//! # use trilogic::{Circuit, Gate, GateType, Signal, Source};
//! # use trilogic::sim::Convergence;
//! let mut c = Circuit::new();
//! let s = c.add_input();
//! let r = c.add_input();
//! let qn = c.add(Gate::binary(GateType::Nor, s, Source::Gate(2)));
//! let q = c.add(Gate::binary(GateType::Nor, r, qn));
//! c.add_output(q);
//!
//! // Set: the loop is broken by the controlling input
//! assert_eq!(c.simulate(&[Signal::True, Signal::False]).unwrap(), Convergence::Converged);
//! assert_eq!(c.output_values(), &[Signal::True]);
//!
//! // Hold: there is no way to know the state
//! assert_eq!(c.simulate(&[Signal::False, Signal::False]).unwrap(), Convergence::Stalled);
//! assert_eq!(c.output_values(), &[Signal::Undef]);
//! ```
//!
//! A circuit may also be built slot by slot, as when reading a file, with
//! [`Circuit::resize`], [`Circuit::set_gate`], [`Circuit::set_gate_input`] and
//! [`Circuit::set_output`].

#![warn(missing_docs)]

mod error;
pub mod io;
pub mod network;
pub mod sim;

pub use error::{Error, Result};
pub use network::{stats, Circuit, Gate, GateType, Signal, Source};
