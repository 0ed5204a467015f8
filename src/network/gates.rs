use std::fmt;
use std::str::FromStr;

use crate::network::signal::Signal;
use crate::network::source::Source;
use crate::{Error, Result};

/// Kinds of logic gates
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy)]
pub enum GateType {
    /// Inverter, with exactly one input
    Not,
    /// N-input And gate
    And,
    /// N-input Nand gate
    Nand,
    /// N-input Or gate
    Or,
    /// N-input Nor gate
    Nor,
    /// N-input Xor gate
    Xor,
    /// N-input Xnor gate
    Xnor,
}

impl GateType {
    /// All gate kinds, in file order
    pub const ALL: [GateType; 7] = [
        GateType::Not,
        GateType::And,
        GateType::Nand,
        GateType::Or,
        GateType::Nor,
        GateType::Xor,
        GateType::Xnor,
    ];

    /// Two-letter code used in circuit files
    pub fn code(&self) -> &'static str {
        use GateType::*;
        match self {
            Not => "NT",
            And => "AN",
            Nand => "NA",
            Or => "OR",
            Nor => "NO",
            Xor => "XO",
            Xnor => "NX",
        }
    }

    /// Parse a two-letter code, ignoring case
    pub fn from_code(s: &str) -> Option<GateType> {
        GateType::ALL
            .into_iter()
            .find(|t| t.code().eq_ignore_ascii_case(s))
    }

    /// Returns whether a gate of this kind may have this many inputs
    pub fn allows_arity(&self, arity: usize) -> bool {
        match self {
            GateType::Not => arity == 1,
            _ => arity >= 2,
        }
    }

    /// Returns whether the output is inverted with respect to the base function
    pub fn is_inverted(&self) -> bool {
        matches!(
            self,
            GateType::Not | GateType::Nand | GateType::Nor | GateType::Xnor
        )
    }

    /// Gate with the same function and the opposite output polarity, if any
    ///
    /// Not has no counterpart, since there is no buffer gate.
    pub fn negated(&self) -> Option<GateType> {
        use GateType::*;
        match self {
            Not => None,
            And => Some(Nand),
            Nand => Some(And),
            Or => Some(Nor),
            Nor => Some(Or),
            Xor => Some(Xnor),
            Xnor => Some(Xor),
        }
    }

    /// Apply the logic function to a list of input values, without arity checks
    pub fn apply(&self, inputs: &[Signal]) -> Signal {
        use GateType::*;
        let base = match self {
            Not | And | Nand => Signal::and_all(inputs.iter().copied()),
            Or | Nor => Signal::or_all(inputs.iter().copied()),
            Xor | Xnor => Signal::xor_all(inputs.iter().copied()),
        };
        base ^ self.is_inverted()
    }
}

impl FromStr for GateType {
    type Err = Error;

    fn from_str(s: &str) -> Result<GateType> {
        GateType::from_code(s).ok_or_else(|| Error::UnknownGateType(s.to_string()))
    }
}

impl fmt::Display for GateType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A configured logic gate
///
/// The gate owns the list of its input sources, whose length is the arity, and the
/// output value computed by the last simulation.
#[derive(Debug, PartialEq, Eq, Hash, Clone)]
pub struct Gate {
    kind: GateType,
    sources: Box<[Source]>,
    output: Signal,
}

impl Gate {
    /// Create a gate with all inputs unconnected
    pub fn new(kind: GateType, arity: usize) -> Result<Gate> {
        if !kind.allows_arity(arity) {
            return Err(Error::InvalidArity { kind, arity });
        }
        Ok(Gate {
            kind,
            sources: vec![Source::Unconnected; arity].into(),
            output: Signal::Undef,
        })
    }

    /// Create a gate with the given input sources
    pub fn with_sources(kind: GateType, sources: &[Source]) -> Result<Gate> {
        let mut ret = Gate::new(kind, sources.len())?;
        ret.sources.copy_from_slice(sources);
        Ok(ret)
    }

    /// Create an inverter
    pub fn not(a: Source) -> Gate {
        Gate {
            kind: GateType::Not,
            sources: Box::new([a]),
            output: Signal::Undef,
        }
    }

    /// Create a 2-input gate of any kind other than Not
    ///
    /// # Panics
    ///
    /// Panics if `kind` is [`GateType::Not`]; use [`Gate::not`] or [`Gate::with_sources`].
    pub fn binary(kind: GateType, a: Source, b: Source) -> Gate {
        assert_ne!(kind, GateType::Not, "Not gates have a single input");
        Gate {
            kind,
            sources: Box::new([a, b]),
            output: Signal::Undef,
        }
    }

    /// Kind of the gate
    pub fn kind(&self) -> GateType {
        self.kind
    }

    /// Number of inputs of the gate
    pub fn arity(&self) -> usize {
        self.sources.len()
    }

    /// Returns whether the index is a valid input index for this gate (0-based)
    pub fn is_valid_index(&self, index: usize) -> bool {
        index < self.arity()
    }

    /// Sources of all gate inputs, in order
    pub fn sources(&self) -> &[Source] {
        &self.sources
    }

    /// Source of the input at the given 0-based index
    pub fn source(&self, index: usize) -> Source {
        self.sources[index]
    }

    pub(crate) fn set_source(&mut self, index: usize, source: Source) {
        self.sources[index] = source;
    }

    /// Output computed by the last evaluation
    pub fn output(&self) -> Signal {
        self.output
    }

    pub(crate) fn set_output(&mut self, value: Signal) {
        self.output = value;
    }

    /// Identifiers of the gates feeding this gate
    pub fn gate_sources(&self) -> impl Iterator<Item = usize> + '_ {
        self.sources.iter().filter_map(|s| match s {
            Source::Gate(id) => Some(*id),
            _ => None,
        })
    }

    /// Compute the output for the given input values and store it
    ///
    /// The number of values must match the arity of the gate. On error, the output is
    /// left undefined.
    pub fn evaluate(&mut self, inputs: &[Signal]) -> Result<Signal> {
        if inputs.len() != self.arity() || inputs.is_empty() {
            self.output = Signal::Undef;
            return Err(Error::ArityMismatch {
                kind: self.kind,
                arity: self.arity(),
                given: inputs.len(),
            });
        }
        self.output = self.kind.apply(inputs);
        Ok(self.output)
    }
}

impl fmt::Display for Gate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.kind)?;
        for (i, s) in self.sources.iter().enumerate() {
            if i != 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", s)?;
        }
        write!(f, ")")
    }
}

#[cfg(test)]
mod tests {
    use itertools::Itertools;

    use super::*;

    const ALL: [Signal; 3] = [Signal::False, Signal::True, Signal::Undef];

    fn all_vectors(arity: usize) -> impl Iterator<Item = Vec<Signal>> {
        (0..arity).map(|_| ALL).multi_cartesian_product()
    }

    #[test]
    fn test_codes() {
        for t in GateType::ALL {
            assert_eq!(GateType::from_code(t.code()), Some(t));
            assert_eq!(GateType::from_code(&t.code().to_lowercase()), Some(t));
            assert_eq!(t.code().parse::<GateType>().unwrap(), t);
        }
        assert_eq!(GateType::from_code("nA"), Some(GateType::Nand));
        assert_eq!(GateType::from_code("AND"), None);
        assert_eq!(GateType::from_code("XX"), None);
        assert!(matches!(
            "ZZ".parse::<GateType>(),
            Err(Error::UnknownGateType(_))
        ));
        assert_eq!(format!("{}", GateType::Xnor), "NX");
    }

    #[test]
    fn test_arity_rules() {
        assert!(GateType::Not.allows_arity(1));
        assert!(!GateType::Not.allows_arity(0));
        assert!(!GateType::Not.allows_arity(2));
        for t in GateType::ALL.into_iter().skip(1) {
            assert!(!t.allows_arity(0));
            assert!(!t.allows_arity(1));
            assert!(t.allows_arity(2));
            assert!(t.allows_arity(7));
        }
        assert!(Gate::new(GateType::Not, 2).is_err());
        assert!(Gate::new(GateType::And, 1).is_err());
        let g = Gate::new(GateType::Or, 3).unwrap();
        assert_eq!(g.arity(), 3);
        assert!(g.sources().iter().all(|s| s.is_unconnected()));
        assert_eq!(g.output(), Signal::Undef);
        assert!(g.is_valid_index(2));
        assert!(!g.is_valid_index(3));
    }

    #[test]
    fn test_not() {
        let mut g = Gate::not(Source::Input(1));
        assert_eq!(g.evaluate(&[Signal::True]).unwrap(), Signal::False);
        assert_eq!(g.evaluate(&[Signal::False]).unwrap(), Signal::True);
        assert_eq!(g.evaluate(&[Signal::Undef]).unwrap(), Signal::Undef);
        assert!(g.evaluate(&[]).is_err());
        assert_eq!(g.output(), Signal::Undef);
        g.evaluate(&[Signal::True]).unwrap();
        assert!(g.evaluate(&[Signal::True, Signal::True]).is_err());
        assert_eq!(g.output(), Signal::Undef);
    }

    #[test]
    fn test_basic_functions() {
        use Signal::*;
        let mut and = Gate::new(GateType::And, 3).unwrap();
        assert_eq!(and.evaluate(&[True, True, True]).unwrap(), True);
        assert_eq!(and.evaluate(&[True, Undef, True]).unwrap(), Undef);
        assert_eq!(and.evaluate(&[Undef, Undef, False]).unwrap(), False);
        let mut or = Gate::new(GateType::Or, 2).unwrap();
        assert_eq!(or.evaluate(&[False, False]).unwrap(), False);
        assert_eq!(or.evaluate(&[Undef, False]).unwrap(), Undef);
        assert_eq!(or.evaluate(&[Undef, True]).unwrap(), True);
        let mut xor = Gate::new(GateType::Xor, 3).unwrap();
        assert_eq!(xor.evaluate(&[True, True, True]).unwrap(), True);
        assert_eq!(xor.evaluate(&[True, True, False]).unwrap(), False);
        assert_eq!(xor.evaluate(&[True, Undef, False]).unwrap(), Undef);
        let mut nand = Gate::new(GateType::Nand, 2).unwrap();
        assert_eq!(nand.evaluate(&[True, True]).unwrap(), False);
        assert_eq!(nand.evaluate(&[False, Undef]).unwrap(), True);
    }

    #[test]
    fn test_negated_pairs() {
        for t in [GateType::And, GateType::Or, GateType::Xor] {
            let n = t.negated().unwrap();
            assert_eq!(n.negated(), Some(t));
            for arity in 2..=4 {
                let mut g = Gate::new(t, arity).unwrap();
                let mut ng = Gate::new(n, arity).unwrap();
                for v in all_vectors(arity) {
                    assert_eq!(ng.evaluate(&v).unwrap(), !g.evaluate(&v).unwrap());
                }
            }
        }
        assert_eq!(GateType::Not.negated(), None);
    }

    #[test]
    fn test_order_independence() {
        for t in GateType::ALL.into_iter().skip(1) {
            let mut g = Gate::new(t, 3).unwrap();
            for v in all_vectors(3) {
                let expected = g.evaluate(&v).unwrap();
                for p in v.iter().copied().permutations(3) {
                    assert_eq!(g.evaluate(&p).unwrap(), expected);
                }
            }
        }
    }

    #[test]
    fn test_arity_mismatch() {
        for t in GateType::ALL.into_iter().skip(1) {
            let mut g = Gate::new(t, 3).unwrap();
            g.evaluate(&[Signal::False; 3]).unwrap();
            let err = g.evaluate(&[Signal::False; 2]).unwrap_err();
            assert!(matches!(
                err,
                Error::ArityMismatch {
                    arity: 3,
                    given: 2,
                    ..
                }
            ));
            assert_eq!(g.output(), Signal::Undef);
            assert!(g.evaluate(&[Signal::False; 4]).is_err());
        }
    }

    #[test]
    #[should_panic]
    fn test_binary_not() {
        let _ = Gate::binary(GateType::Not, Source::Input(1), Source::Input(2));
    }

    #[test]
    fn test_display() {
        let g = Gate::binary(GateType::Nand, Source::Input(1), Source::Gate(3));
        assert_eq!(format!("{g}"), "NA(-1, 3)");
        let sources = [Source::Input(2), Source::Unconnected, Source::Gate(1)];
        let g = Gate::with_sources(GateType::Or, &sources).unwrap();
        assert_eq!(format!("{g}"), "OR(-2, 0, 1)");
        assert_eq!(g.gate_sources().collect::<Vec<_>>(), vec![1]);
    }
}
