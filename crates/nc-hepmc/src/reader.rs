//! Forward-only reader for HepMC3 Asciiv3 event listings.

use std::fs::File;
use std::io::{BufRead, BufReader, Cursor, Read};
use std::path::{Path, PathBuf};

use crate::error::{HepmcError, Result};
use crate::event::{CrossSection, FourVector, GenEvent, Particle, Vertex};
use crate::run_info::RunInfo;
use crate::tokens::Tokens;

const START_LISTING: &str = "HepMC::Asciiv3-START_EVENT_LISTING";
const END_LISTING: &str = "HepMC::Asciiv3-END_EVENT_LISTING";

/// Backing input for a reader.
///
/// `File` is the production path; `Bytes` backs `from_bytes()` and tests.
#[derive(Debug)]
enum Source {
    File(File),
    Bytes(Cursor<Vec<u8>>),
}

impl Read for Source {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        match self {
            Source::File(f) => f.read(buf),
            Source::Bytes(c) => c.read(buf),
        }
    }
}

/// A forward-only cursor over one HepMC3 ASCII file.
///
/// There is no random-access seek: the only motions are "decode the next
/// event" and "skip forward N events". Backward access requires opening a
/// fresh reader.
#[derive(Debug)]
pub struct AsciiReader {
    input: BufReader<Source>,
    path: PathBuf,
    line_no: u64,
    version: String,
    run_info: Option<RunInfo>,
    /// Run-info fields under construction while scanning the header block.
    header: RunInfo,
    in_listing: bool,
    finished: bool,
    /// An `E` record consumed by lookahead, starting the next event.
    pending: Option<String>,
}

impl AsciiReader {
    /// Open a file, validating the format banner.
    ///
    /// Fails when the file is unreadable or the first line is not a
    /// `HepMC::Version` banner (the format cannot be deduced).
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = File::open(&path).map_err(|e| HepmcError::Open {
            path: path.clone(),
            reason: e.to_string(),
        })?;
        Self::with_source(Source::File(file), path)
    }

    /// Read from an in-memory buffer (tests, generated inputs).
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self> {
        Self::with_source(Source::Bytes(Cursor::new(bytes)), PathBuf::from("<memory>"))
    }

    fn with_source(source: Source, path: PathBuf) -> Result<Self> {
        let mut reader = Self {
            input: BufReader::new(source),
            path,
            line_no: 0,
            version: String::new(),
            run_info: None,
            header: RunInfo::default(),
            in_listing: false,
            finished: false,
            pending: None,
        };

        let banner = reader.read_line()?.unwrap_or_default();
        let mut toks = Tokens::new(&banner, reader.line_no);
        match toks.next_str("banner") {
            Ok("HepMC::Version") => {
                reader.version = toks.next_str("version").unwrap_or_default().to_string();
            }
            _ => {
                return Err(HepmcError::Open {
                    path: reader.path,
                    reason: "not a HepMC3 ASCII file (missing HepMC::Version banner)".into(),
                });
            }
        }
        Ok(reader)
    }

    /// Path this reader was opened on.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Format version from the banner line.
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Run-level metadata.
    ///
    /// The header block is consumed on the way to the first event, so this
    /// is `None` until at least one event has been read (or skipped).
    pub fn run_info(&self) -> Option<&RunInfo> {
        self.run_info.as_ref()
    }

    /// Decode the next event.
    ///
    /// `Ok(None)` signals a cleanly exhausted stream; it is not an error.
    pub fn read_event(&mut self) -> Result<Option<GenEvent>> {
        self.next_event(true)
    }

    /// Skip forward past up to `n` events without decoding particle records.
    ///
    /// Returns the number of events actually skipped, which is less than `n`
    /// only when the stream ends first.
    pub fn skip(&mut self, n: u64) -> Result<u64> {
        let mut skipped = 0;
        while skipped < n {
            if self.next_event(false)?.is_none() {
                break;
            }
            skipped += 1;
        }
        Ok(skipped)
    }

    fn read_line(&mut self) -> Result<Option<String>> {
        let mut buf = String::new();
        let n = self.input.read_line(&mut buf)?;
        if n == 0 {
            return Ok(None);
        }
        self.line_no += 1;
        while buf.ends_with('\n') || buf.ends_with('\r') {
            buf.pop();
        }
        Ok(Some(buf))
    }

    /// Advance to and through the next event. With `decode` false only the
    /// event boundary is honored, nothing is materialized.
    fn next_event(&mut self, decode: bool) -> Result<Option<GenEvent>> {
        if self.finished {
            return Ok(None);
        }

        let e_line = match self.pending.take() {
            Some(line) => line,
            None => match self.scan_header()? {
                Some(line) => line,
                None => return Ok(None),
            },
        };

        // Run info becomes available once the header block has been fully
        // consumed, which is guaranteed by reaching the first E record.
        if self.run_info.is_none() {
            self.run_info = Some(std::mem::take(&mut self.header));
        }

        let mut event = GenEvent::default();
        if decode {
            let mut toks = Tokens::new(&e_line, self.line_no);
            toks.next_str("tag")?;
            event.event_number = toks.next_i64("event number")?;
        }

        loop {
            let line = match self.read_line()? {
                Some(l) => l,
                None => {
                    self.finished = true;
                    break;
                }
            };
            let trimmed = line.trim_start();
            if trimmed.starts_with("E ") {
                self.pending = Some(line);
                break;
            }
            if trimmed.starts_with(END_LISTING) {
                self.finished = true;
                break;
            }
            if decode {
                self.parse_event_record(trimmed, &mut event)?;
            }
        }

        Ok(Some(event))
    }

    /// Consume header lines up to the first `E` record, building run info.
    fn scan_header(&mut self) -> Result<Option<String>> {
        loop {
            let line = match self.read_line()? {
                Some(l) => l,
                None => {
                    self.finished = true;
                    return Ok(None);
                }
            };
            let trimmed = line.trim_start();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            if trimmed.starts_with("E ") {
                if !self.in_listing {
                    log::warn!(
                        "{}: event record before {START_LISTING}",
                        self.path.display()
                    );
                }
                return Ok(Some(line));
            }
            if trimmed.starts_with(START_LISTING) {
                self.in_listing = true;
            } else if trimmed.starts_with(END_LISTING) {
                self.finished = true;
                return Ok(None);
            } else if trimmed.starts_with("HepMC::") {
                // Other banners (e.g. a repeated version line) carry nothing.
            } else if let Some(rest) = trimmed.strip_prefix("W ") {
                self.header.weight_names =
                    rest.split_whitespace().map(str::to_string).collect();
            } else if let Some(rest) = trimmed.strip_prefix("T ") {
                self.header.tools.push(rest.to_string());
            } else if trimmed.starts_with("A ") {
                let mut toks = Tokens::new(trimmed, self.line_no);
                toks.next_str("tag")?;
                let name = toks.next_str("attribute name")?.to_string();
                self.header.attributes.insert(name, toks.rest());
            }
            // Anything else in the header is tolerated and dropped.
        }
    }

    /// Parse one record line inside an event body.
    fn parse_event_record(&mut self, line: &str, event: &mut GenEvent) -> Result<()> {
        let mut toks = Tokens::new(line, self.line_no);
        let tag = match toks.next_str("tag") {
            Ok(t) => t,
            Err(_) => return Ok(()),
        };
        match tag {
            "U" => {
                event.momentum_unit = toks.next_str("momentum unit")?.to_string();
                event.length_unit = toks.next_str("length unit").unwrap_or("MM").to_string();
            }
            "W" => {
                event.weights = toks.remaining_f64();
            }
            "A" => {
                let id = toks.next_i32("attribute owner id")?;
                let name = toks.next_str("attribute name")?.to_string();
                let value = toks.rest();
                if id != 0 {
                    // Particle/vertex attributes are not consumed downstream.
                    return Ok(());
                }
                if name == "GenCrossSection" {
                    event.cross_section = Some(parse_cross_section(&value, self.line_no)?);
                } else {
                    event.attributes.insert(name, value);
                }
            }
            "P" => {
                let id = toks.next_i32("particle id")?;
                let production_vertex = toks.next_i32("parent id")?;
                let pid = toks.next_i32("pdg code")?;
                let px = toks.next_f64("px")?;
                let py = toks.next_f64("py")?;
                let pz = toks.next_f64("pz")?;
                let e = toks.next_f64("energy")?;
                let _mass = toks.next_f64("mass")?;
                let status = toks.next_i32("status")?;
                event.particles.push(Particle {
                    id,
                    pid,
                    status,
                    momentum: FourVector { px, py, pz, e },
                    production_vertex,
                });
            }
            "V" => {
                let id = toks.next_i32("vertex id")?;
                let status = toks.next_i32("vertex status")?;
                event.vertices.push(Vertex { id, status });
            }
            _ => {
                // Unknown record tags inside an event are ignored.
            }
        }
        Ok(())
    }
}

/// Parse a `GenCrossSection` payload: cross-section / uncertainty pairs
/// followed by accepted/attempted counters.
fn parse_cross_section(value: &str, line_no: u64) -> Result<CrossSection> {
    let floats: Vec<f64> = value
        .split_whitespace()
        .map_while(|t| t.parse().ok())
        .collect();
    if floats.is_empty() {
        return Err(HepmcError::Parse {
            line_no,
            msg: format!("empty GenCrossSection payload '{value}'"),
        });
    }
    let error = floats.get(1).copied().unwrap_or(0.0);
    Ok(CrossSection { values: vec![floats[0]], errors: vec![error] })
}
