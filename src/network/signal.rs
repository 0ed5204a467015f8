use std::fmt;
use std::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, Not};

/// Value carried by a wire: true, false or undefined
///
/// Operators follow Kleene's three-valued logic: a controlling value
/// (false for And, true for Or) decides the result even if the other
/// operand is undefined. Xor has no controlling value, so any undefined
/// operand makes the result undefined.
#[derive(PartialEq, Eq, Hash, Clone, Copy, Default)]
pub enum Signal {
    /// Logic 0
    False,
    /// Logic 1
    True,
    /// Unknown or not yet computed
    #[default]
    Undef,
}

impl Signal {
    /// Returns true if the signal is true or false
    pub fn is_defined(&self) -> bool {
        !matches!(self, Signal::Undef)
    }

    /// Returns true if the signal is undefined
    pub fn is_undef(&self) -> bool {
        matches!(self, Signal::Undef)
    }

    /// Obtain the boolean value, if defined
    pub fn to_bool(&self) -> Option<bool> {
        match self {
            Signal::False => Some(false),
            Signal::True => Some(true),
            Signal::Undef => None,
        }
    }

    /// Character used in pattern files
    pub fn to_char(&self) -> char {
        match self {
            Signal::False => '0',
            Signal::True => '1',
            Signal::Undef => 'X',
        }
    }

    /// Parse a character from a pattern file
    pub fn from_char(c: char) -> Option<Signal> {
        match c {
            '0' => Some(Signal::False),
            '1' => Some(Signal::True),
            'x' | 'X' | '-' => Some(Signal::Undef),
            _ => None,
        }
    }

    /// And of all the signals; true for an empty sequence
    pub fn and_all<I: IntoIterator<Item = Signal>>(sigs: I) -> Signal {
        sigs.into_iter().fold(Signal::True, |a, b| a & b)
    }

    /// Or of all the signals; false for an empty sequence
    pub fn or_all<I: IntoIterator<Item = Signal>>(sigs: I) -> Signal {
        sigs.into_iter().fold(Signal::False, |a, b| a | b)
    }

    /// Xor of all the signals; false for an empty sequence
    pub fn xor_all<I: IntoIterator<Item = Signal>>(sigs: I) -> Signal {
        sigs.into_iter().fold(Signal::False, |a, b| a ^ b)
    }
}

impl From<bool> for Signal {
    fn from(b: bool) -> Signal {
        if b {
            Signal::True
        } else {
            Signal::False
        }
    }
}

impl From<Option<bool>> for Signal {
    fn from(b: Option<bool>) -> Signal {
        match b {
            Some(b) => Signal::from(b),
            None => Signal::Undef,
        }
    }
}

impl Not for Signal {
    type Output = Signal;
    fn not(self) -> Signal {
        match self {
            Signal::False => Signal::True,
            Signal::True => Signal::False,
            Signal::Undef => Signal::Undef,
        }
    }
}

impl Not for &'_ Signal {
    type Output = Signal;
    fn not(self) -> Signal {
        !*self
    }
}

impl BitAnd for Signal {
    type Output = Signal;
    fn bitand(self, rhs: Signal) -> Signal {
        use Signal::*;
        match (self, rhs) {
            (False, _) | (_, False) => False,
            (Undef, _) | (_, Undef) => Undef,
            (True, True) => True,
        }
    }
}

impl BitOr for Signal {
    type Output = Signal;
    fn bitor(self, rhs: Signal) -> Signal {
        use Signal::*;
        match (self, rhs) {
            (True, _) | (_, True) => True,
            (Undef, _) | (_, Undef) => Undef,
            (False, False) => False,
        }
    }
}

impl BitXor for Signal {
    type Output = Signal;
    fn bitxor(self, rhs: Signal) -> Signal {
        match (self.to_bool(), rhs.to_bool()) {
            (Some(a), Some(b)) => Signal::from(a ^ b),
            _ => Signal::Undef,
        }
    }
}

impl BitXor<bool> for Signal {
    type Output = Signal;
    fn bitxor(self, rhs: bool) -> Signal {
        if rhs {
            !self
        } else {
            self
        }
    }
}

impl BitAndAssign for Signal {
    fn bitand_assign(&mut self, rhs: Signal) {
        *self = *self & rhs;
    }
}

impl BitOrAssign for Signal {
    fn bitor_assign(&mut self, rhs: Signal) {
        *self = *self | rhs;
    }
}

impl BitXorAssign for Signal {
    fn bitxor_assign(&mut self, rhs: Signal) {
        *self = *self ^ rhs;
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

impl fmt::Debug for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use itertools::iproduct;

    const ALL: [Signal; 3] = [Signal::False, Signal::True, Signal::Undef];

    #[test]
    fn test_not() {
        assert_eq!(!Signal::False, Signal::True);
        assert_eq!(!Signal::True, Signal::False);
        assert_eq!(!Signal::Undef, Signal::Undef);
        for a in ALL {
            assert_eq!(!!a, a);
            assert_eq!(!&a, !a);
        }
    }

    #[test]
    fn test_and_or_tables() {
        use Signal::*;
        assert_eq!(False & Undef, False);
        assert_eq!(Undef & False, False);
        assert_eq!(True & Undef, Undef);
        assert_eq!(True & True, True);
        assert_eq!(True | Undef, True);
        assert_eq!(Undef | True, True);
        assert_eq!(False | Undef, Undef);
        assert_eq!(False | False, False);
        assert_eq!(Undef & Undef, Undef);
        assert_eq!(Undef | Undef, Undef);
    }

    #[test]
    fn test_xor_table() {
        use Signal::*;
        assert_eq!(False ^ False, False);
        assert_eq!(False ^ True, True);
        assert_eq!(True ^ True, False);
        for a in ALL {
            assert_eq!(a ^ Undef, Undef);
            assert_eq!(Undef ^ a, Undef);
        }
        assert_eq!(True ^ true, False);
        assert_eq!(Undef ^ true, Undef);
        assert_eq!(False ^ false, False);
    }

    #[test]
    fn test_algebra() {
        for (a, b) in iproduct!(ALL, ALL) {
            assert_eq!(a & b, b & a);
            assert_eq!(a | b, b | a);
            assert_eq!(a ^ b, b ^ a);
            // De Morgan holds in Kleene logic
            assert_eq!(!(a & b), !a | !b);
            assert_eq!(!(a | b), !a & !b);
        }
        for (a, b, c) in iproduct!(ALL, ALL, ALL) {
            assert_eq!((a & b) & c, a & (b & c));
            assert_eq!((a | b) | c, a | (b | c));
            assert_eq!((a ^ b) ^ c, a ^ (b ^ c));
        }
        for a in ALL {
            assert_eq!(a & a, a);
            assert_eq!(a | a, a);
        }
    }

    #[test]
    fn test_folds() {
        use Signal::*;
        assert_eq!(Signal::and_all([]), True);
        assert_eq!(Signal::or_all([]), False);
        assert_eq!(Signal::xor_all([]), False);
        assert_eq!(Signal::and_all([True, Undef, False]), False);
        assert_eq!(Signal::and_all([True, Undef, True]), Undef);
        assert_eq!(Signal::or_all([False, Undef, True]), True);
        assert_eq!(Signal::or_all([False, Undef]), Undef);
        assert_eq!(Signal::xor_all([True, True, True]), True);
        assert_eq!(Signal::xor_all([True, Undef, True]), Undef);
    }

    #[test]
    fn test_assign() {
        let mut s = Signal::True;
        s &= Signal::Undef;
        assert_eq!(s, Signal::Undef);
        s |= Signal::True;
        assert_eq!(s, Signal::True);
        s ^= Signal::True;
        assert_eq!(s, Signal::False);
    }

    #[test]
    fn test_conversion() {
        assert_eq!(Signal::from(false), Signal::False);
        assert_eq!(Signal::from(true), Signal::True);
        assert_eq!(Signal::from(None), Signal::Undef);
        assert_eq!(Signal::default(), Signal::Undef);
        for a in ALL {
            assert_eq!(Signal::from(a.to_bool()), a);
            assert_eq!(Signal::from_char(a.to_char()), Some(a));
            assert_eq!(a.is_defined(), !a.is_undef());
        }
        assert_eq!(Signal::from_char('x'), Some(Signal::Undef));
        assert_eq!(Signal::from_char('-'), Some(Signal::Undef));
        assert_eq!(Signal::from_char('2'), None);
        assert_eq!(format!("{}", Signal::True), "1");
        assert_eq!(format!("{:?}", Signal::Undef), "X");
    }
}
