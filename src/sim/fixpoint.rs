use tracing::{debug, trace};

use crate::sim::Convergence;
use crate::{Circuit, Result, Signal, Source};

/// Iterative simulation of a circuit with feedback, directly on the circuit representation
///
/// Gates are swept in identifier order until none is left to resolve, or until a sweep
/// makes no progress. A gate is resolved once its value can no longer change: either its
/// output is defined, or all gates it reads from are resolved. Gates caught in a loop
/// that stays undefined are never resolved.
pub(crate) struct FixpointSimulator<'a> {
    circuit: &'a mut Circuit,
    input_values: &'a [Signal],
    resolved: Vec<bool>,
}

impl<'a> FixpointSimulator<'a> {
    pub fn new(circuit: &'a mut Circuit, input_values: &'a [Signal]) -> FixpointSimulator<'a> {
        debug_assert_eq!(input_values.len(), circuit.nb_inputs());
        let resolved = vec![false; circuit.nb_gates()];
        FixpointSimulator {
            circuit,
            input_values,
            resolved,
        }
    }

    pub fn run(&mut self) -> Result<Convergence> {
        self.reset();
        let mut nb_sweeps = 0;
        let convergence = loop {
            let progress = self.sweep()?;
            nb_sweeps += 1;
            let nb_resolved = self.resolved.iter().filter(|r| **r).count();
            debug!(
                "Sweep {}: {}/{} gates resolved",
                nb_sweeps,
                nb_resolved,
                self.resolved.len()
            );
            if nb_resolved == self.resolved.len() {
                break Convergence::Converged;
            }
            if !progress {
                break Convergence::Stalled;
            }
        };
        self.compute_outputs();
        Ok(convergence)
    }

    fn reset(&mut self) {
        for id in 1..=self.circuit.nb_gates() {
            if let Some(g) = self.circuit.gate_mut(id) {
                g.set_output(Signal::Undef);
            }
        }
        self.resolved = vec![false; self.circuit.nb_gates()];
    }

    fn value(&self, s: Source) -> Signal {
        match s {
            Source::Gate(id) => self.circuit.gate_output(id),
            Source::Input(i) => self.input_values[i - 1],
            Source::Unconnected => Signal::Undef,
        }
    }

    fn is_final(&self, s: Source) -> bool {
        match s {
            Source::Gate(id) => self.resolved[id - 1],
            _ => true,
        }
    }

    /// Evaluate all unresolved gates once; return whether a new gate was resolved
    fn sweep(&mut self) -> Result<bool> {
        let mut progress = false;
        for id in 1..=self.circuit.nb_gates() {
            if self.resolved[id - 1] {
                continue;
            }
            let Some(g) = self.circuit.gate(id) else {
                continue;
            };
            let values: Vec<Signal> = g.sources().iter().map(|s| self.value(*s)).collect();
            let inputs_final = g.sources().iter().all(|s| self.is_final(*s));
            let Some(g) = self.circuit.gate_mut(id) else {
                continue;
            };
            let out = g.evaluate(&values)?;
            trace!("Gate {} = {} on {:?}", id, out, values);
            if out.is_defined() || inputs_final {
                self.resolved[id - 1] = true;
                progress = true;
            }
        }
        Ok(progress)
    }

    fn compute_outputs(&mut self) {
        let values: Vec<Signal> = (1..=self.circuit.nb_outputs())
            .map(|id| match self.circuit.output(id) {
                Some(s) => self.value(s),
                None => Signal::Undef,
            })
            .collect();
        self.circuit.set_output_values(values);
    }
}
