//! IO for simulation pattern files

use std::io::{BufRead, BufReader, Read, Write};

use crate::{Error, Result, Signal};

/// Read patterns from a file
///
/// Each line holds one pattern, with one character per value, optionally prefixed
/// with a pattern number:
/// ```text
///     # Three patterns for a 4-input circuit
///     1: 0011
///     2: 1X01
///     0110
/// ```
/// `0` and `1` are logic values; `X`, `x` and `-` are undefined.
/// Whitespace is ignored and `#` starts a comment.
pub fn read_patterns<R: Read>(r: R) -> Result<Vec<Vec<Signal>>> {
    let mut ret = Vec::new();
    for (i, l) in BufReader::new(r).lines().enumerate() {
        let l = l?;
        let content = match l.split_once('#') {
            Some((c, _)) => c,
            None => l.as_str(),
        };
        let values = match content.split_once(':') {
            Some((_, v)) => v,
            None => content,
        };
        let values = values.trim();
        if values.is_empty() {
            continue;
        }
        let mut pattern = Vec::new();
        for c in values.chars().filter(|c| !c.is_whitespace()) {
            let s = Signal::from_char(c).ok_or_else(|| Error::Parse {
                line: i + 1,
                msg: format!("invalid value {c:?} in pattern"),
            })?;
            pattern.push(s);
        }
        ret.push(pattern);
    }
    Ok(ret)
}

/// Write patterns to a file, using the format of [`read_patterns`]
///
/// An optional comment is added at the end of each line.
pub fn write_patterns<W: Write>(
    w: &mut W,
    patterns: &[Vec<Signal>],
    comments: &[Option<String>],
) -> Result<()> {
    for (i, p) in patterns.iter().enumerate() {
        write!(w, "{}: ", i + 1)?;
        for s in p {
            write!(w, "{}", s)?;
        }
        if let Some(Some(c)) = comments.get(i) {
            write!(w, " # {}", c)?;
        }
        writeln!(w)?;
    }
    Ok(())
}
