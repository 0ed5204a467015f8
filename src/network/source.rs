use std::fmt;

/// Where a gate input or a circuit output takes its value from
///
/// Files use a signed integer encoding: a positive value is the output of the gate with
/// that identifier, a negative value `-i` is circuit input `i`, and zero is unconnected.
/// Identifiers and indices are 1-based in both representations.
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy, Default)]
pub enum Source {
    /// Not connected to anything yet
    #[default]
    Unconnected,
    /// Output of a gate, by 1-based identifier
    Gate(usize),
    /// Primary input of the circuit, by 1-based index
    Input(usize),
}

impl Source {
    /// Decode the signed integer encoding
    pub fn from_raw(v: i64) -> Source {
        if v > 0 {
            Source::Gate(v as usize)
        } else if v < 0 {
            Source::Input(v.unsigned_abs() as usize)
        } else {
            Source::Unconnected
        }
    }

    /// Encode as a signed integer
    pub fn raw(&self) -> i64 {
        match self {
            Source::Unconnected => 0,
            Source::Gate(id) => *id as i64,
            Source::Input(i) => -(*i as i64),
        }
    }

    /// Returns true if the source is the output of a gate
    pub fn is_gate(&self) -> bool {
        matches!(self, Source::Gate(_))
    }

    /// Returns true if the source is a circuit input
    pub fn is_input(&self) -> bool {
        matches!(self, Source::Input(_))
    }

    /// Returns true if the source is not connected
    pub fn is_unconnected(&self) -> bool {
        matches!(self, Source::Unconnected)
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.raw())
    }
}

impl fmt::Debug for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Unconnected => write!(f, "nc"),
            Source::Gate(id) => write!(f, "g{id}"),
            Source::Input(i) => write!(f, "i{i}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encoding() {
        assert_eq!(Source::from_raw(0), Source::Unconnected);
        assert_eq!(Source::from_raw(3), Source::Gate(3));
        assert_eq!(Source::from_raw(-2), Source::Input(2));
        for v in -10i64..=10 {
            assert_eq!(Source::from_raw(v).raw(), v);
        }
    }

    #[test]
    fn test_kind() {
        let g = Source::Gate(1);
        let i = Source::Input(1);
        let n = Source::Unconnected;
        assert!(g.is_gate() && !g.is_input() && !g.is_unconnected());
        assert!(!i.is_gate() && i.is_input() && !i.is_unconnected());
        assert!(!n.is_gate() && !n.is_input() && n.is_unconnected());
        assert_eq!(Source::default(), n);
    }

    #[test]
    fn test_format() {
        assert_eq!(format!("{}", Source::Gate(4)), "4");
        assert_eq!(format!("{}", Source::Input(4)), "-4");
        assert_eq!(format!("{}", Source::Unconnected), "0");
        assert_eq!(format!("{:?}", Source::Gate(4)), "g4");
        assert_eq!(format!("{:?}", Source::Input(2)), "i2");
    }
}
