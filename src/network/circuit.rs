use core::fmt;

use crate::network::gates::{Gate, GateType};
use crate::network::signal::Signal;
use crate::network::source::Source;
use crate::sim::Convergence;
use crate::{Error, Result};

/// A combinational logic circuit, possibly with feedback loops
///
/// Gates are identified by their 1-based position and are never renumbered.
/// A gate slot may be left unconfigured while the circuit is being built; such a circuit
/// is not valid and cannot be simulated or written.
/// Circuit inputs and outputs are 1-based as well, while the inputs of a gate are
/// addressed by their 0-based position.
#[derive(Debug, Clone, Default)]
pub struct Circuit {
    nb_inputs: usize,
    gates: Vec<Option<Gate>>,
    outputs: Vec<Source>,
    output_values: Vec<Signal>,
}

impl Circuit {
    /// Create a new empty circuit
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a circuit with the given dimensions and no gate configured
    pub fn with_size(nb_inputs: usize, nb_outputs: usize, nb_gates: usize) -> Result<Self> {
        let mut ret = Circuit::new();
        ret.resize(nb_inputs, nb_outputs, nb_gates)?;
        Ok(ret)
    }

    /// Clear the circuit and allocate the given number of inputs, outputs and gate slots
    ///
    /// All dimensions must be non-zero; on error the circuit is left unchanged.
    pub fn resize(&mut self, nb_inputs: usize, nb_outputs: usize, nb_gates: usize) -> Result<()> {
        if nb_inputs == 0 || nb_outputs == 0 || nb_gates == 0 {
            return Err(Error::InvalidDimensions {
                nb_inputs,
                nb_outputs,
                nb_gates,
            });
        }
        self.clear();
        self.nb_inputs = nb_inputs;
        self.gates = vec![None; nb_gates];
        self.outputs = vec![Source::Unconnected; nb_outputs];
        self.output_values = vec![Signal::Undef; nb_outputs];
        Ok(())
    }

    /// Remove everything from the circuit
    pub fn clear(&mut self) {
        self.nb_inputs = 0;
        self.gates.clear();
        self.outputs.clear();
        self.output_values.clear();
    }

    /// Return the number of circuit inputs
    pub fn nb_inputs(&self) -> usize {
        self.nb_inputs
    }

    /// Return the number of circuit outputs
    pub fn nb_outputs(&self) -> usize {
        self.outputs.len()
    }

    /// Return the number of gate slots, configured or not
    pub fn nb_gates(&self) -> usize {
        self.gates.len()
    }

    /// Get the input with 1-based index i
    pub fn input(&self, i: usize) -> Source {
        assert!(i >= 1 && i <= self.nb_inputs());
        Source::Input(i)
    }

    /// Add a new circuit input
    pub fn add_input(&mut self) -> Source {
        self.nb_inputs += 1;
        self.input(self.nb_inputs)
    }

    /// Add multiple circuit inputs
    pub fn add_inputs(&mut self, nb: usize) {
        self.nb_inputs += nb;
    }

    /// Add a new gate in the next slot and return its output
    pub fn add(&mut self, gate: Gate) -> Source {
        self.gates.push(Some(gate));
        Source::Gate(self.gates.len())
    }

    /// Add a new circuit output
    pub fn add_output(&mut self, s: Source) {
        self.outputs.push(s);
        self.output_values.push(Signal::Undef);
    }

    /// Returns whether the identifier designates a gate slot
    pub fn is_valid_gate_id(&self, id: usize) -> bool {
        id >= 1 && id <= self.nb_gates()
    }

    /// Returns whether the identifier designates a circuit output
    pub fn is_valid_output_id(&self, id: usize) -> bool {
        id >= 1 && id <= self.nb_outputs()
    }

    /// Returns whether the gate slot exists and is configured
    pub fn is_gate_defined(&self, id: usize) -> bool {
        self.gate(id).is_some()
    }

    /// Returns whether a source refers to an existing gate slot or circuit input
    ///
    /// Unconnected sources are not valid.
    pub fn is_valid_source(&self, s: Source) -> bool {
        match s {
            Source::Gate(id) => self.is_valid_gate_id(id),
            Source::Input(i) => i >= 1 && i <= self.nb_inputs(),
            Source::Unconnected => false,
        }
    }

    /// Get the gate with the given identifier, if it exists and is configured
    pub fn gate(&self, id: usize) -> Option<&Gate> {
        if self.is_valid_gate_id(id) {
            self.gates[id - 1].as_ref()
        } else {
            None
        }
    }

    pub(crate) fn gate_mut(&mut self, id: usize) -> Option<&mut Gate> {
        if self.is_valid_gate_id(id) {
            self.gates[id - 1].as_mut()
        } else {
            None
        }
    }

    /// Iterate over the configured gates with their identifiers
    pub fn gates(&self) -> impl Iterator<Item = (usize, &Gate)> + '_ {
        self.gates
            .iter()
            .enumerate()
            .filter_map(|(i, g)| g.as_ref().map(|g| (i + 1, g)))
    }

    /// Output value of a gate after the last simulation; undefined if the gate is not configured
    pub fn gate_output(&self, id: usize) -> Signal {
        self.gate(id).map_or(Signal::Undef, |g| g.output())
    }

    /// Source of the circuit output with the given identifier
    pub fn output(&self, id: usize) -> Option<Source> {
        if self.is_valid_output_id(id) {
            Some(self.outputs[id - 1])
        } else {
            None
        }
    }

    /// Value of the circuit output with the given identifier after the last simulation
    pub fn output_value(&self, id: usize) -> Option<Signal> {
        if self.is_valid_output_id(id) {
            Some(self.output_values[id - 1])
        } else {
            None
        }
    }

    /// Values of all circuit outputs after the last simulation
    pub fn output_values(&self) -> &[Signal] {
        &self.output_values
    }

    pub(crate) fn set_output_values(&mut self, values: Vec<Signal>) {
        debug_assert_eq!(values.len(), self.nb_outputs());
        self.output_values = values;
    }

    /// Configure a gate slot with a kind and a number of inputs
    ///
    /// Any previous gate in this slot is replaced, and all of its inputs become unconnected.
    pub fn set_gate(&mut self, id: usize, kind: GateType, arity: usize) -> Result<()> {
        if !self.is_valid_gate_id(id) {
            return Err(Error::InvalidGateId(id));
        }
        let g = Gate::new(kind, arity)?;
        self.gates[id - 1] = Some(g);
        Ok(())
    }

    /// Connect the input of a gate (0-based index) to a source
    pub fn set_gate_input(&mut self, id: usize, index: usize, source: Source) -> Result<()> {
        if !self.is_valid_gate_id(id) {
            return Err(Error::InvalidGateId(id));
        }
        if !self.is_valid_source(source) {
            return Err(Error::InvalidSource(source.raw()));
        }
        let g = self.gate_mut(id).ok_or(Error::UndefinedGate(id))?;
        if !g.is_valid_index(index) {
            return Err(Error::InvalidInputIndex { gate: id, index });
        }
        g.set_source(index, source);
        Ok(())
    }

    /// Connect a circuit output to a source
    pub fn set_output(&mut self, id: usize, source: Source) -> Result<()> {
        if !self.is_valid_output_id(id) {
            return Err(Error::InvalidOutputId(id));
        }
        if !self.is_valid_source(source) {
            return Err(Error::InvalidSource(source.raw()));
        }
        self.outputs[id - 1] = source;
        Ok(())
    }

    /// Check that the circuit may be simulated, returning the first problem found
    ///
    /// A valid circuit has at least one input, output and gate, all gates configured,
    /// and all gate inputs and circuit outputs connected to an existing gate or input.
    pub fn check(&self) -> Result<()> {
        if self.nb_inputs() == 0 || self.nb_outputs() == 0 || self.nb_gates() == 0 {
            return Err(Error::InvalidDimensions {
                nb_inputs: self.nb_inputs(),
                nb_outputs: self.nb_outputs(),
                nb_gates: self.nb_gates(),
            });
        }
        for id in 1..=self.nb_gates() {
            let g = self.gate(id).ok_or(Error::UndefinedGate(id))?;
            for s in g.sources() {
                if !self.is_valid_source(*s) {
                    return Err(Error::InvalidSource(s.raw()));
                }
            }
        }
        for s in &self.outputs {
            if !self.is_valid_source(*s) {
                return Err(Error::InvalidSource(s.raw()));
            }
        }
        Ok(())
    }

    /// Returns whether the circuit may be simulated
    pub fn is_valid(&self) -> bool {
        self.check().is_ok()
    }

    /// Simulate the circuit for the given input values
    ///
    /// See [`crate::sim::simulate`].
    pub fn simulate(&mut self, inputs: &[Signal]) -> Result<Convergence> {
        crate::sim::simulate(self, inputs)
    }

    /// Gates involved in combinational loops
    ///
    /// These are the gates that lie on a cycle: their strongly connected component has
    /// more than one gate, or they read their own output. They are returned in
    /// increasing order.
    pub fn feedback_gates(&self) -> Vec<usize> {
        let n = self.nb_gates();
        let mut fanins = vec![Vec::<usize>::new(); n];
        for (id, g) in self.gates() {
            for d in g.gate_sources() {
                if self.is_gate_defined(d) {
                    fanins[id - 1].push(d - 1);
                }
            }
        }
        let comp = strongly_connected_components(&fanins);
        let mut comp_size = vec![0usize; n];
        for c in &comp {
            comp_size[*c] += 1;
        }
        (0..n)
            .filter(|v| self.is_gate_defined(v + 1))
            .filter(|v| comp_size[comp[*v]] > 1 || fanins[*v].contains(v))
            .map(|v| v + 1)
            .collect()
    }

    /// Returns whether the circuit contains combinational loops
    pub fn has_feedback(&self) -> bool {
        !self.feedback_gates().is_empty()
    }
}

/// Tarjan's algorithm without recursion: return the component index of each node
fn strongly_connected_components(deps: &[Vec<usize>]) -> Vec<usize> {
    const UNVISITED: usize = usize::MAX;
    let n = deps.len();
    let mut index = vec![UNVISITED; n];
    let mut low = vec![0; n];
    let mut on_stack = vec![false; n];
    let mut stack = Vec::new();
    let mut comp = vec![0; n];
    let mut next_index = 0;
    let mut nb_comps = 0;
    for root in 0..n {
        if index[root] != UNVISITED {
            continue;
        }
        index[root] = next_index;
        low[root] = next_index;
        next_index += 1;
        stack.push(root);
        on_stack[root] = true;
        // Node and position of the next dependency to visit
        let mut calls = vec![(root, 0)];
        while let Some((v, pos)) = calls.pop() {
            if pos < deps[v].len() {
                calls.push((v, pos + 1));
                let w = deps[v][pos];
                if index[w] == UNVISITED {
                    index[w] = next_index;
                    low[w] = next_index;
                    next_index += 1;
                    stack.push(w);
                    on_stack[w] = true;
                    calls.push((w, 0));
                } else if on_stack[w] {
                    low[v] = low[v].min(index[w]);
                }
                continue;
            }
            if low[v] == index[v] {
                while let Some(w) = stack.pop() {
                    on_stack[w] = false;
                    comp[w] = nb_comps;
                    if w == v {
                        break;
                    }
                }
                nb_comps += 1;
            }
            if let Some((u, _)) = calls.last() {
                low[*u] = low[*u].min(low[v]);
            }
        }
    }
    comp
}

/// Structural equality: dimensions, gate kinds, arities and connections
///
/// Simulation results are ignored.
impl PartialEq for Circuit {
    fn eq(&self, other: &Self) -> bool {
        if self.nb_inputs() != other.nb_inputs()
            || self.nb_outputs() != other.nb_outputs()
            || self.nb_gates() != other.nb_gates()
        {
            return false;
        }
        let same_gates = self.gates.iter().zip(other.gates.iter()).all(|(a, b)| match (a, b) {
            (Some(a), Some(b)) => a.kind() == b.kind() && a.sources() == b.sources(),
            (None, None) => true,
            _ => false,
        });
        same_gates && self.outputs == other.outputs
    }
}

impl Eq for Circuit {}

impl fmt::Display for Circuit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Circuit with {} inputs, {} outputs, {} gates:",
            self.nb_inputs(),
            self.nb_outputs(),
            self.nb_gates()
        )?;
        for id in 1..=self.nb_gates() {
            match self.gate(id) {
                Some(g) => writeln!(f, "\tg{} = {} -> {}", id, g, g.output())?,
                None => writeln!(f, "\tg{} = ??", id)?,
            }
        }
        for id in 1..=self.nb_outputs() {
            writeln!(
                f,
                "\to{} = {} -> {}",
                id,
                self.outputs[id - 1],
                self.output_values[id - 1]
            )?;
        }
        Ok(())
    }
}
