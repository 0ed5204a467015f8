//! IO for .circ files

use std::io::{BufRead, BufReader, Read, Write};
use std::str::FromStr;

use tracing::debug;

use crate::{Circuit, Error, GateType, Result, Source};

/// Whitespace-separated tokens with their line number; `)` is always a token of its own
struct Tokens {
    tokens: Vec<(usize, String)>,
    pos: usize,
}

impl Tokens {
    fn from_reader<R: Read>(r: R) -> Result<Tokens> {
        let mut tokens = Vec::new();
        for (i, l) in BufReader::new(r).lines().enumerate() {
            let l = l?;
            let spaced = l.replace(')', " ) ");
            for t in spaced.split_whitespace() {
                tokens.push((i + 1, t.to_string()));
            }
        }
        Ok(Tokens { tokens, pos: 0 })
    }

    /// Line of the next token, or of the last one at the end of the file
    fn line(&self) -> usize {
        self.tokens
            .get(self.pos)
            .or(self.tokens.last())
            .map_or(1, |(l, _)| *l)
    }

    fn error(&self, msg: String) -> Error {
        Error::Parse {
            line: self.line(),
            msg,
        }
    }

    fn next(&mut self, what: &str) -> Result<&str> {
        if self.pos >= self.tokens.len() {
            return Err(self.error(format!("unexpected end of file, expected {what}")));
        }
        self.pos += 1;
        Ok(self.tokens[self.pos - 1].1.as_str())
    }

    fn keyword(&mut self, kw: &str) -> Result<()> {
        let t = self.next(kw)?;
        if t != kw {
            let t = t.to_string();
            self.pos -= 1;
            return Err(self.error(format!("expected {kw}, got {t}")));
        }
        Ok(())
    }

    fn number<T: FromStr>(&mut self, what: &str) -> Result<T> {
        let t = self.next(what)?;
        match t.parse::<T>() {
            Ok(v) => Ok(v),
            Err(_) => {
                let t = t.to_string();
                self.pos -= 1;
                Err(self.error(format!("expected {what}, got {t}")))
            }
        }
    }

    /// Read an identifier followed by `)`, which must match the expected position
    fn id(&mut self, expected: usize) -> Result<()> {
        let id: usize = self.number("identifier")?;
        if id != expected {
            self.pos -= 1;
            return Err(self.error(format!("expected identifier {expected}, got {id}")));
        }
        self.keyword(")")
    }

    /// Fail if the rest of the file is too short for nb entries of at least tokens_per_entry
    fn check_room(&self, nb: usize, tokens_per_entry: usize, what: &str) -> Result<()> {
        let remaining = self.tokens.len() - self.pos;
        if nb.checked_mul(tokens_per_entry).map_or(true, |n| n > remaining) {
            return Err(Error::Parse {
                line: self.prev_line(),
                msg: format!("file is too short for {nb} {what}"),
            });
        }
        Ok(())
    }

    /// Attach the current line to a structural error
    fn locate(&self, e: Error) -> Error {
        Error::Parse {
            line: self.prev_line(),
            msg: e.to_string(),
        }
    }

    /// Line of the last token read
    fn prev_line(&self) -> usize {
        self.tokens
            .get(self.pos.saturating_sub(1))
            .map_or(1, |(l, _)| *l)
    }
}

/// Read a circuit in .circ format
///
/// These files describe the dimensions of the circuit, then each gate, then the
/// connections of each gate and finally the connections of each output:
/// ```text
///     CIRCUITO 2 1 2
///     PORTAS
///     1) NA 2
///     2) NT 1
///     CONEXOES
///     1) -1 -2
///     2) 1
///     SAIDAS
///     1) 2
/// ```
/// Gate types are NT, AN, NA, OR, NO, XO and NX, in any case. Connections are gate
/// identifiers when positive and circuit inputs when negative. Identifiers must appear
/// in order. Any deviation makes the whole read fail.
pub fn read_circ<R: Read>(r: R) -> Result<Circuit> {
    let mut t = Tokens::from_reader(r)?;

    t.keyword("CIRCUITO")?;
    let nb_inputs: usize = t.number("number of inputs")?;
    let nb_outputs: usize = t.number("number of outputs")?;
    let nb_gates: usize = t.number("number of gates")?;
    t.check_room(nb_gates, 4, "gates")?;
    t.check_room(nb_outputs, 3, "outputs")?;
    let mut ret =
        Circuit::with_size(nb_inputs, nb_outputs, nb_gates).map_err(|e| t.locate(e))?;

    t.keyword("PORTAS")?;
    for id in 1..=nb_gates {
        t.id(id)?;
        let code = t.next("gate type")?.to_string();
        let kind: GateType = code.parse().map_err(|e| t.locate(e))?;
        let arity: usize = t.number("number of gate inputs")?;
        ret.set_gate(id, kind, arity).map_err(|e| t.locate(e))?;
    }

    t.keyword("CONEXOES")?;
    for id in 1..=nb_gates {
        t.id(id)?;
        let arity = ret.gate(id).map_or(0, |g| g.arity());
        for index in 0..arity {
            let s: i64 = t.number("gate input")?;
            ret.set_gate_input(id, index, Source::from_raw(s))
                .map_err(|e| t.locate(e))?;
        }
    }

    t.keyword("SAIDAS")?;
    for id in 1..=nb_outputs {
        t.id(id)?;
        let s: i64 = t.number("output")?;
        ret.set_output(id, Source::from_raw(s))
            .map_err(|e| t.locate(e))?;
    }

    debug!(
        "Read circuit with {} inputs, {} outputs, {} gates",
        nb_inputs, nb_outputs, nb_gates
    );
    Ok(ret)
}

/// Write a circuit in .circ format
///
/// Only valid circuits can be written; see [`read_circ`] for the format.
pub fn write_circ<W: Write>(w: &mut W, c: &Circuit) -> Result<()> {
    c.check().map_err(|e| Error::InvalidCircuit(Box::new(e)))?;
    writeln!(
        w,
        "CIRCUITO {} {} {}",
        c.nb_inputs(),
        c.nb_outputs(),
        c.nb_gates()
    )?;
    writeln!(w, "PORTAS")?;
    for (id, g) in c.gates() {
        writeln!(w, "{}) {} {}", id, g.kind(), g.arity())?;
    }
    writeln!(w, "CONEXOES")?;
    for (id, g) in c.gates() {
        write!(w, "{})", id)?;
        for s in g.sources() {
            write!(w, " {}", s)?;
        }
        writeln!(w)?;
    }
    writeln!(w, "SAIDAS")?;
    for id in 1..=c.nb_outputs() {
        let s = c.output(id).unwrap_or_default();
        writeln!(w, "{}) {}", id, s)?;
    }
    Ok(())
}
