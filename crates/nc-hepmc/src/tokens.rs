//! Whitespace-token cursor over one record line.

use crate::error::{HepmcError, Result};

/// A cursor over the whitespace-separated fields of a record line, with
/// typed reads that carry the line number into parse errors.
pub struct Tokens<'a> {
    iter: std::str::SplitWhitespace<'a>,
    line_no: u64,
}

impl<'a> Tokens<'a> {
    /// Tokenize `line`, reporting errors against `line_no`.
    pub fn new(line: &'a str, line_no: u64) -> Self {
        Self { iter: line.split_whitespace(), line_no }
    }

    /// Next raw field, or a parse error naming what was expected.
    pub fn next_str(&mut self, what: &str) -> Result<&'a str> {
        self.iter.next().ok_or_else(|| HepmcError::Parse {
            line_no: self.line_no,
            msg: format!("expected {what}, found end of line"),
        })
    }

    /// Next field parsed as `i32`.
    pub fn next_i32(&mut self, what: &str) -> Result<i32> {
        let tok = self.next_str(what)?;
        tok.parse().map_err(|_| HepmcError::Parse {
            line_no: self.line_no,
            msg: format!("expected integer {what}, found '{tok}'"),
        })
    }

    /// Next field parsed as `i64`.
    pub fn next_i64(&mut self, what: &str) -> Result<i64> {
        let tok = self.next_str(what)?;
        tok.parse().map_err(|_| HepmcError::Parse {
            line_no: self.line_no,
            msg: format!("expected integer {what}, found '{tok}'"),
        })
    }

    /// Next field parsed as `usize`.
    pub fn next_usize(&mut self, what: &str) -> Result<usize> {
        let tok = self.next_str(what)?;
        tok.parse().map_err(|_| HepmcError::Parse {
            line_no: self.line_no,
            msg: format!("expected count {what}, found '{tok}'"),
        })
    }

    /// Next field parsed as `f64`.
    pub fn next_f64(&mut self, what: &str) -> Result<f64> {
        let tok = self.next_str(what)?;
        tok.parse().map_err(|_| HepmcError::Parse {
            line_no: self.line_no,
            msg: format!("expected number {what}, found '{tok}'"),
        })
    }

    /// All remaining fields parsed as `f64`, stopping at the first field
    /// that is not a number.
    pub fn remaining_f64(&mut self) -> Vec<f64> {
        let mut out = Vec::new();
        for tok in self.iter.by_ref() {
            match tok.parse() {
                Ok(v) => out.push(v),
                Err(_) => break,
            }
        }
        out
    }

    /// Remaining fields rejoined with single spaces (attribute payloads).
    pub fn rest(&mut self) -> String {
        self.iter.by_ref().collect::<Vec<_>>().join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typed_reads() {
        let mut t = Tokens::new("P 1 0 14 0.0 0.0 1000.0 1000.0 0.0 4", 7);
        assert_eq!(t.next_str("tag").unwrap(), "P");
        assert_eq!(t.next_i32("id").unwrap(), 1);
        assert_eq!(t.next_i32("parent").unwrap(), 0);
        assert_eq!(t.next_i32("pid").unwrap(), 14);
        assert_eq!(t.next_f64("px").unwrap(), 0.0);
    }

    #[test]
    fn error_carries_line_number() {
        let mut t = Tokens::new("E x", 42);
        t.next_str("tag").unwrap();
        let err = t.next_i64("event number").unwrap_err();
        match err {
            HepmcError::Parse { line_no, .. } => assert_eq!(line_no, 42),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn rest_rejoins_payload() {
        let mut t = Tokens::new("A NuHepMC.Conventions G.C.2 G.C.4 E.C.5", 3);
        t.next_str("tag").unwrap();
        t.next_str("name").unwrap();
        assert_eq!(t.rest(), "G.C.2 G.C.4 E.C.5");
    }
}
