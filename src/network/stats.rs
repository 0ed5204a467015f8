//! Compute gate statistics
//!
//! ```
//! # use trilogic::network::generators::adder;
//! # let circuit = adder::ripple_carry(4);
//! use trilogic::network::stats::stats;
//! let stats = stats(&circuit);
//!
//! // Check that there is no Not gate
//! assert_eq!(stats.nb_not(), 0);
//!
//! // Show the statistics
//! println!("{}", stats);
//! ```

use std::fmt;

use fxhash::FxHashMap;
use itertools::Itertools;

use crate::{Circuit, GateType};

/// Number of inputs, outputs and gates in a circuit
#[derive(Clone, Debug)]
pub struct CircuitStats {
    /// Number of inputs
    pub nb_inputs: usize,
    /// Number of outputs
    pub nb_outputs: usize,
    /// Number of gate slots
    pub nb_slots: usize,
    /// Number of slots without a configured gate
    pub nb_undefined: usize,
    /// Number of gates by kind and arity
    pub by_kind: FxHashMap<(GateType, usize), usize>,
    /// Number of gates involved in combinational loops
    pub nb_feedback: usize,
    /// Number of gates whose output is used neither by a gate nor by a circuit output
    pub nb_dangling: usize,
    /// Whether the circuit can be simulated
    pub valid: bool,
}

impl CircuitStats {
    /// Total number of configured gates
    pub fn nb_gates(&self) -> usize {
        self.by_kind.values().sum()
    }

    /// Number of gates of a given kind, any arity
    pub fn nb_of_kind(&self, kind: GateType) -> usize {
        self.by_kind
            .iter()
            .filter(|((k, _), _)| *k == kind)
            .map(|(_, nb)| nb)
            .sum()
    }

    /// Number of Not gates
    pub fn nb_not(&self) -> usize {
        self.nb_of_kind(GateType::Not)
    }

    /// Number of And and Nand gates
    pub fn nb_and(&self) -> usize {
        self.nb_of_kind(GateType::And) + self.nb_of_kind(GateType::Nand)
    }

    /// Number of Or and Nor gates
    pub fn nb_or(&self) -> usize {
        self.nb_of_kind(GateType::Or) + self.nb_of_kind(GateType::Nor)
    }

    /// Number of Xor and Xnor gates
    pub fn nb_xor(&self) -> usize {
        self.nb_of_kind(GateType::Xor) + self.nb_of_kind(GateType::Xnor)
    }
}

impl fmt::Display for CircuitStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Stats:")?;
        writeln!(f, "  Inputs: {}", self.nb_inputs)?;
        writeln!(f, "  Outputs: {}", self.nb_outputs)?;
        writeln!(f, "  Gates: {}", self.nb_gates())?;
        if self.nb_undefined != 0 {
            writeln!(f, "  Undefined slots: {}", self.nb_undefined)?;
        }
        for kind in GateType::ALL {
            let nb = self.nb_of_kind(kind);
            if nb == 0 {
                continue;
            }
            writeln!(f, "  {:?}: {}", kind, nb)?;
            if kind == GateType::Not {
                continue;
            }
            for ((_, arity), nb) in self
                .by_kind
                .iter()
                .filter(|((k, _), _)| *k == kind)
                .sorted()
            {
                writeln!(f, "      {}: {}", arity, nb)?;
            }
        }
        if self.nb_feedback != 0 {
            writeln!(f, "  In loops: {}", self.nb_feedback)?;
        }
        if self.nb_dangling != 0 {
            writeln!(f, "  Unused: {}", self.nb_dangling)?;
        }
        writeln!(f, "  Valid: {}", if self.valid { "yes" } else { "no" })?;
        fmt::Result::Ok(())
    }
}

/// Compute the statistics of the circuit
pub fn stats(c: &Circuit) -> CircuitStats {
    let mut by_kind = FxHashMap::default();
    for (_, g) in c.gates() {
        *by_kind.entry((g.kind(), g.arity())).or_insert(0) += 1;
    }
    let nb_defined: usize = by_kind.values().sum();
    let nb_dangling = count_gate_usage(c)
        .iter()
        .enumerate()
        .filter(|(i, nb)| **nb == 0 && c.is_gate_defined(i + 1))
        .count();
    CircuitStats {
        nb_inputs: c.nb_inputs(),
        nb_outputs: c.nb_outputs(),
        nb_slots: c.nb_gates(),
        nb_undefined: c.nb_gates() - nb_defined,
        by_kind,
        nb_feedback: c.feedback_gates().len(),
        nb_dangling,
        valid: c.is_valid(),
    }
}

/// Count the number of times each gate output is used, by gate inputs and circuit outputs
pub fn count_gate_usage(c: &Circuit) -> Vec<usize> {
    let mut ret = vec![0; c.nb_gates()];
    for (_, g) in c.gates() {
        for id in g.gate_sources() {
            if c.is_valid_gate_id(id) {
                ret[id - 1] += 1;
            }
        }
    }
    for id in 1..=c.nb_outputs() {
        if let Some(crate::Source::Gate(g)) = c.output(id) {
            if c.is_valid_gate_id(g) {
                ret[g - 1] += 1;
            }
        }
    }
    ret
}

#[cfg(test)]
mod tests {
    use super::{count_gate_usage, stats};
    use crate::network::generators::{adder, testcases};
    use crate::{Circuit, Gate, GateType};

    #[test]
    fn test_adder_stats() {
        let c = adder::ripple_carry(4);
        let s = stats(&c);
        assert_eq!(s.nb_inputs, 9);
        assert_eq!(s.nb_outputs, 5);
        assert_eq!(s.nb_gates(), 20);
        assert_eq!(s.nb_xor(), 8);
        assert_eq!(s.nb_and(), 8);
        assert_eq!(s.nb_or(), 4);
        assert_eq!(s.nb_not(), 0);
        assert_eq!(s.by_kind[&(GateType::Xor, 2)], 8);
        assert_eq!(s.nb_feedback, 0);
        assert_eq!(s.nb_dangling, 0);
        assert!(s.valid);
        let txt = format!("{s}");
        assert!(txt.contains("Xor: 8"));
        assert!(txt.contains("Valid: yes"));
    }

    #[test]
    fn test_partial_stats() {
        let mut c = Circuit::with_size(1, 1, 3).unwrap();
        c.set_gate(2, GateType::Not, 1).unwrap();
        let s = stats(&c);
        assert_eq!(s.nb_slots, 3);
        assert_eq!(s.nb_undefined, 2);
        assert_eq!(s.nb_gates(), 1);
        assert!(!s.valid);
        assert!(format!("{s}").contains("Undefined slots: 2"));
    }

    #[test]
    fn test_usage() {
        let c = testcases::sr_latch();
        assert_eq!(count_gate_usage(&c), vec![2, 2]);
        let c = adder::ripple_carry(1);
        // Xor, Xor, And, And, Or
        assert_eq!(count_gate_usage(&c), vec![2, 1, 1, 1, 1]);
        assert_eq!(stats(&testcases::ring_oscillator(3)).nb_feedback, 3);
    }

    #[test]
    fn test_dangling() {
        let mut c = Circuit::new();
        let i = c.add_input();
        let g1 = c.add(Gate::not(i));
        let _ = c.add(Gate::not(g1));
        let g3 = c.add(Gate::binary(GateType::Xor, i, g1));
        c.add_output(g3);
        assert_eq!(count_gate_usage(&c), vec![2, 0, 1]);
        let s = stats(&c);
        assert_eq!(s.nb_dangling, 1);
        assert!(format!("{s}").contains("Unused: 1"));
    }
}
