//! Circuit generators and templates

/// Adder generators
pub mod adder {
    use crate::{Circuit, Gate, GateType};

    /// A simple ripple-carry adder
    ///
    /// The first input is the carry-in, followed by the two operand bits for each position,
    /// least significant first. Outputs are the sum bits followed by the carry-out.
    pub fn ripple_carry(len: usize) -> Circuit {
        let mut ret = Circuit::new();
        let mut c = ret.add_input();
        for _ in 0..len {
            let a = ret.add_input();
            let b = ret.add_input();
            let p = ret.add(Gate::binary(GateType::Xor, a, b));
            let s = ret.add(Gate::binary(GateType::Xor, p, c));
            let g = ret.add(Gate::binary(GateType::And, a, b));
            let t = ret.add(Gate::binary(GateType::And, p, c));
            c = ret.add(Gate::binary(GateType::Or, g, t));
            ret.add_output(s);
        }
        ret.add_output(c);
        ret
    }
}

/// Parity generators
pub mod parity {
    use crate::{Circuit, Gate, GateType, Source};

    /// A balanced tree of 2-input Xor gates computing the parity of all inputs
    pub fn xor_tree(len: usize) -> Circuit {
        assert!(len >= 2);
        let mut ret = Circuit::new();
        let mut sigs: Vec<Source> = (0..len).map(|_| ret.add_input()).collect();
        while sigs.len() > 1 {
            let mut next_sigs = Vec::new();
            for i in (0..sigs.len()).step_by(2) {
                if i + 1 < sigs.len() {
                    next_sigs.push(ret.add(Gate::binary(GateType::Xor, sigs[i], sigs[i + 1])));
                } else {
                    next_sigs.push(sigs[i]);
                }
            }
            sigs = next_sigs;
        }
        ret.add_output(sigs[0]);
        ret
    }
}

/// Random circuits, with arbitrary feedback
pub mod random {
    use rand::rngs::SmallRng;
    use rand::{Rng, SeedableRng};

    use crate::{Circuit, Gate, GateType, Source};

    fn random_source(rng: &mut SmallRng, nb_inputs: usize, nb_gates: usize) -> Source {
        let ind = rng.gen_range(0..nb_inputs + nb_gates);
        if ind < nb_inputs {
            Source::Input(ind + 1)
        } else {
            Source::Gate(ind - nb_inputs + 1)
        }
    }

    /// A random valid circuit
    ///
    /// Gates may read from any gate, including later ones, so the circuit usually has loops
    /// unless `acyclic` is set.
    pub fn circuit(
        nb_inputs: usize,
        nb_outputs: usize,
        nb_gates: usize,
        acyclic: bool,
        seed: u64,
    ) -> Circuit {
        assert!(nb_inputs > 0 && nb_outputs > 0 && nb_gates > 0);
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut ret = Circuit::new();
        ret.add_inputs(nb_inputs);
        for i in 0..nb_gates {
            let kind = GateType::ALL[rng.gen_range(0..GateType::ALL.len())];
            let arity = if kind == GateType::Not {
                1
            } else {
                rng.gen_range(2..=4)
            };
            let visible_gates = if acyclic { i } else { nb_gates };
            let sources: Vec<Source> = (0..arity)
                .map(|_| random_source(&mut rng, nb_inputs, visible_gates))
                .collect();
            let g = Gate::with_sources(kind, &sources).expect("arity is legal for the kind");
            ret.add(g);
        }
        for _ in 0..nb_outputs {
            let s = random_source(&mut rng, nb_inputs, nb_gates);
            ret.add_output(s);
        }
        ret
    }
}

/// Simple generators to test functionality
pub mod testcases {
    use crate::{Circuit, Gate, GateType, Source};

    /// A set-reset latch made of two cross-coupled Nor gates
    ///
    /// Inputs are S and R; outputs are Q and !Q.
    pub fn sr_latch() -> Circuit {
        let mut ret = Circuit::new();
        let s = ret.add_input();
        let r = ret.add_input();
        let qn = ret.add(Gate::binary(GateType::Nor, s, Source::Gate(2)));
        let q = ret.add(Gate::binary(GateType::Nor, r, qn));
        ret.add_output(q);
        ret.add_output(qn);
        ret
    }

    /// A loop of inverters; it has no stable state when the length is odd
    pub fn ring_oscillator(len: usize) -> Circuit {
        assert!(len > 0);
        let mut ret = Circuit::new();
        ret.add_input();
        let mut x = Source::Gate(len);
        for _ in 0..len {
            x = ret.add(Gate::not(x));
        }
        ret.add_output(x);
        ret
    }

    /// A chain of inverters declared in reverse order, so that each sweep of the
    /// simulation only resolves one more gate
    pub fn reverse_chain(len: usize) -> Circuit {
        assert!(len > 0);
        let mut ret = Circuit::new();
        let i = ret.add_input();
        for id in 1..=len {
            let src = if id == len { i } else { Source::Gate(id + 1) };
            ret.add(Gate::not(src));
        }
        ret.add_output(Source::Gate(1));
        ret
    }
}

#[cfg(test)]
mod tests {
    use super::{adder, parity, random, testcases};

    #[test]
    fn test_adder() {
        for i in [1, 2, 4, 8, 16, 32, 64] {
            let c = adder::ripple_carry(i);
            assert!(c.is_valid());
            assert_eq!(c.nb_inputs(), 2 * i + 1);
            assert_eq!(c.nb_outputs(), i + 1);
            assert_eq!(c.nb_gates(), 5 * i);
            assert!(!c.has_feedback());
        }
    }

    #[test]
    fn test_parity() {
        for i in [2, 3, 4, 7, 16] {
            let c = parity::xor_tree(i);
            assert!(c.is_valid());
            assert_eq!(c.nb_gates(), i - 1);
            assert!(!c.has_feedback());
        }
    }

    #[test]
    fn test_random() {
        for seed in 0..20 {
            let c = random::circuit(3, 2, 10, false, seed);
            assert!(c.is_valid());
            assert_eq!(c, random::circuit(3, 2, 10, false, seed));
            let c = random::circuit(3, 2, 10, true, seed);
            assert!(c.is_valid());
            assert!(!c.has_feedback());
        }
    }

    #[test]
    fn test_testcases() {
        assert!(testcases::sr_latch().is_valid());
        for i in [1, 2, 3, 8] {
            assert!(testcases::ring_oscillator(i).is_valid());
            let c = testcases::reverse_chain(i);
            assert!(c.is_valid());
            assert!(!c.has_feedback());
        }
    }
}
