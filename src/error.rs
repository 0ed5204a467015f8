//! Error type shared by the whole crate

use thiserror::Error;

use crate::network::GateType;

/// Errors reported when building, loading, saving or simulating a circuit
#[derive(Error, Debug)]
pub enum Error {
    /// Dimensions of a circuit must all be strictly positive
    #[error("invalid circuit dimensions: {nb_inputs} inputs, {nb_outputs} outputs, {nb_gates} gates")]
    InvalidDimensions {
        /// Requested number of inputs
        nb_inputs: usize,
        /// Requested number of outputs
        nb_outputs: usize,
        /// Requested number of gates
        nb_gates: usize,
    },

    /// Gate identifier out of range
    #[error("gate {0} does not exist")]
    InvalidGateId(usize),

    /// Gate slot exists but has not been configured yet
    #[error("gate {0} is not configured")]
    UndefinedGate(usize),

    /// Output identifier out of range
    #[error("output {0} does not exist")]
    InvalidOutputId(usize),

    /// Index of a gate input out of range
    #[error("gate {gate} has no input {index}")]
    InvalidInputIndex {
        /// Gate identifier
        gate: usize,
        /// Offending input index
        index: usize,
    },

    /// Source reference pointing to nothing
    #[error("invalid signal source {0}")]
    InvalidSource(i64),

    /// Unknown two-letter gate code
    #[error("unknown gate type {0:?}")]
    UnknownGateType(String),

    /// Arity not allowed for this kind of gate
    #[error("{kind} gate cannot have {arity} inputs")]
    InvalidArity {
        /// Kind of gate
        kind: GateType,
        /// Requested arity
        arity: usize,
    },

    /// Number of signals given to a gate does not match its arity
    #[error("{kind} gate with {arity} inputs evaluated on {given} signals")]
    ArityMismatch {
        /// Kind of gate
        kind: GateType,
        /// Declared arity
        arity: usize,
        /// Number of signals supplied
        given: usize,
    },

    /// Circuit is not structurally valid
    #[error("circuit is not valid: {0}")]
    InvalidCircuit(Box<Error>),

    /// Input vector length does not match the number of circuit inputs
    #[error("expected {expected} input values, got {given}")]
    InputCountMismatch {
        /// Number of circuit inputs
        expected: usize,
        /// Number of values given
        given: usize,
    },

    /// Malformed circuit or pattern file
    #[error("line {line}: {msg}")]
    Parse {
        /// Line where the error was found (1-based)
        line: usize,
        /// Description of the problem
        msg: String,
    },

    /// Underlying IO failure
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Result type used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;
