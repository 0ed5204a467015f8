//! Read and write circuits and patterns to files

mod circ;
mod patterns;

use std::fs::File;
use std::path::Path;

use tracing::info;

pub use circ::{read_circ, write_circ};
pub use patterns::{read_patterns, write_patterns};

use crate::{Circuit, Result, Signal};

/// Read a circuit from a file
pub fn read_circuit_file(path: &Path) -> Result<Circuit> {
    let f = File::open(path)?;
    let ret = read_circ(f)?;
    info!("Loaded circuit from {}", path.display());
    Ok(ret)
}

/// Load a circuit from a file into an existing circuit
///
/// The existing circuit is only replaced if the whole file could be read.
pub fn load_circuit_file(c: &mut Circuit, path: &Path) -> Result<()> {
    *c = read_circuit_file(path)?;
    Ok(())
}

/// Write a circuit to a file
///
/// The circuit must be valid; otherwise nothing is written and the file is not created.
pub fn write_circuit_file(path: &Path, c: &Circuit) -> Result<()> {
    let mut buf = Vec::new();
    write_circ(&mut buf, c)?;
    std::fs::write(path, buf)?;
    info!("Saved circuit to {}", path.display());
    Ok(())
}

/// Read patterns from a file
pub fn read_pattern_file(path: &Path) -> Result<Vec<Vec<Signal>>> {
    let f = File::open(path)?;
    read_patterns(f)
}

/// Write patterns to a file
pub fn write_pattern_file(
    path: &Path,
    patterns: &[Vec<Signal>],
    comments: &[Option<String>],
) -> Result<()> {
    let mut f = File::create(path)?;
    write_patterns(&mut f, patterns, comments)
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::network::generators::{adder, testcases};
    use crate::{Error, GateType};

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("trilogic_{}_{}", std::process::id(), name))
    }

    #[test]
    fn test_file_roundtrip() {
        let path = temp_path("roundtrip.circ");
        let c = adder::ripple_carry(2);
        write_circuit_file(&path, &c).unwrap();
        let d = read_circuit_file(&path).unwrap();
        assert_eq!(c, d);
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_load_keeps_previous() {
        let good = temp_path("good.circ");
        let bad = temp_path("bad.circ");
        write_circuit_file(&good, &testcases::sr_latch()).unwrap();
        std::fs::write(&bad, "CIRCUITO 2 1 1\nPORTAS\n1) AN 2\nCONEXOES\n1) -1 -5\n").unwrap();

        let mut c = Circuit::new();
        load_circuit_file(&mut c, &good).unwrap();
        assert_eq!(c, testcases::sr_latch());
        assert!(load_circuit_file(&mut c, &bad).is_err());
        assert_eq!(c, testcases::sr_latch());
        assert!(matches!(
            load_circuit_file(&mut c, &temp_path("missing.circ")),
            Err(Error::Io(_))
        ));
        assert_eq!(c, testcases::sr_latch());
        std::fs::remove_file(&good).unwrap();
        std::fs::remove_file(&bad).unwrap();
    }

    #[test]
    fn test_write_invalid_file() {
        let path = temp_path("invalid.circ");
        let mut c = Circuit::with_size(1, 1, 1).unwrap();
        c.set_gate(1, GateType::Not, 1).unwrap();
        assert!(write_circuit_file(&path, &c).is_err());
        assert!(!path.exists());
    }

    #[test]
    fn test_pattern_file() {
        let path = temp_path("patterns.txt");
        let p = vec![vec![Signal::True, Signal::Undef], vec![Signal::False, Signal::False]];
        write_pattern_file(&path, &p, &[]).unwrap();
        assert_eq!(read_pattern_file(&path).unwrap(), p);
        std::fs::remove_file(&path).unwrap();
    }
}
