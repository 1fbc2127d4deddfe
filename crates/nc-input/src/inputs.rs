//! Input-list parsing.

use nc_core::{Error, Result};

/// Parse a configuration input string into individual file paths.
///
/// The syntax is a comma-separated list, optionally wrapped in parentheses:
/// `(a.hepmc3,b.hepmc3)` and `a.hepmc3,b.hepmc3` are equivalent.
pub fn parse_input_list(raw: &str) -> Result<Vec<String>> {
    let mut s = raw.trim();
    if let Some(stripped) = s.strip_prefix('(') {
        s = stripped;
    }
    if let Some(stripped) = s.strip_suffix(')') {
        s = stripped;
    }

    let paths: Vec<String> = s.split(',').map(|p| p.trim().to_string()).collect();
    if paths.iter().any(String::is_empty) {
        return Err(Error::Config(format!("malformed input list '{raw}'")));
    }
    Ok(paths)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_path() {
        assert_eq!(parse_input_list("events.hepmc3").unwrap(), vec!["events.hepmc3"]);
    }

    #[test]
    fn wrapped_list() {
        assert_eq!(
            parse_input_list("(a.hepmc3, b.hepmc3,c.hepmc3)").unwrap(),
            vec!["a.hepmc3", "b.hepmc3", "c.hepmc3"]
        );
    }

    #[test]
    fn empty_segment_rejected() {
        assert!(parse_input_list("a.hepmc3,,b.hepmc3").is_err());
        assert!(parse_input_list("").is_err());
    }
}
