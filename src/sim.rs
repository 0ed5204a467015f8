//! Three-valued simulation of a circuit, with support for combinational loops

mod fixpoint;

use itertools::Itertools;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::{Circuit, Error, Result, Signal};

use fixpoint::FixpointSimulator;

/// Outcome of a simulation that could run
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Convergence {
    /// Every gate reached its final value
    Converged,
    /// Some gates in a loop could not be resolved; their outputs are left undefined
    Stalled,
}

impl Convergence {
    /// Returns true if every gate reached its final value
    pub fn is_converged(&self) -> bool {
        matches!(self, Convergence::Converged)
    }
}

/// Simulate a circuit for one input pattern
///
/// The outputs of all gates and circuit outputs are updated in place, and can be read with
/// [`Circuit::gate_output`] and [`Circuit::output_values`].
/// Results are available even if the simulation stalls on a loop: they are the best values
/// that can be deduced, with undefined values where nothing could be deduced.
///
/// The circuit must be valid and the number of input values must match its number of
/// inputs; otherwise an error is returned and the circuit is left untouched.
///
/// ```
/// # use trilogic::{Circuit, Gate, GateType, Signal};
/// # use trilogic::sim::{simulate, Convergence};
/// let mut c = Circuit::new();
/// let a = c.add_input();
/// let b = c.add_input();
/// let x = c.add(Gate::binary(GateType::Nand, a, b));
/// c.add_output(x);
/// let res = simulate(&mut c, &[Signal::False, Signal::Undef]).unwrap();
/// assert_eq!(res, Convergence::Converged);
/// assert_eq!(c.output_values(), &[Signal::True]);
/// ```
pub fn simulate(c: &mut Circuit, input_values: &[Signal]) -> Result<Convergence> {
    c.check().map_err(|e| Error::InvalidCircuit(Box::new(e)))?;
    if input_values.len() != c.nb_inputs() {
        return Err(Error::InputCountMismatch {
            expected: c.nb_inputs(),
            given: input_values.len(),
        });
    }
    let ret = FixpointSimulator::new(c, input_values).run()?;
    if !ret.is_converged() {
        debug!("Simulation stalled on a combinational loop");
    }
    Ok(ret)
}

/// Simulate a circuit for several input patterns; return the convergence and output values of each
pub fn simulate_patterns(
    c: &mut Circuit,
    patterns: &[Vec<Signal>],
) -> Result<Vec<(Convergence, Vec<Signal>)>> {
    let mut ret = Vec::new();
    for p in patterns {
        let conv = simulate(c, p)?;
        ret.push((conv, c.output_values().to_vec()));
    }
    Ok(ret)
}

/// Simulate a circuit with boolean inputs; undefined outputs are returned as None
pub fn simulate_bool(c: &mut Circuit, input_values: &[bool]) -> Result<Vec<Option<bool>>> {
    let sigs: Vec<Signal> = input_values.iter().map(|b| Signal::from(*b)).collect();
    simulate(c, &sigs)?;
    Ok(c.output_values().iter().map(|s| s.to_bool()).collect())
}

/// Generate random input patterns
///
/// With `with_undef`, undefined values are generated as well as true and false.
pub fn generate_random_patterns(
    nb_inputs: usize,
    nb_patterns: usize,
    with_undef: bool,
    seed: u64,
) -> Vec<Vec<Signal>> {
    let mut rng = SmallRng::seed_from_u64(seed);
    let nb_values = if with_undef { 3 } else { 2 };
    let mut ret = Vec::new();
    for _ in 0..nb_patterns {
        let mut p = Vec::new();
        for _ in 0..nb_inputs {
            p.push(match rng.gen_range(0..nb_values) {
                0 => Signal::False,
                1 => Signal::True,
                _ => Signal::Undef,
            });
        }
        ret.push(p);
    }
    ret
}

/// Generate all possible input patterns, in lexicographic order
///
/// With `with_undef`, undefined values are enumerated as well as true and false.
pub fn generate_exhaustive_patterns(nb_inputs: usize, with_undef: bool) -> Vec<Vec<Signal>> {
    if nb_inputs == 0 {
        return vec![Vec::new()];
    }
    let values: &[Signal] = if with_undef {
        &[Signal::False, Signal::True, Signal::Undef]
    } else {
        &[Signal::False, Signal::True]
    };
    (0..nb_inputs)
        .map(|_| values.iter().copied())
        .multi_cartesian_product()
        .collect()
}
