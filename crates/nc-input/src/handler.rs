//! The HepMC input handler: pre-scan, reopen/skip cursor management, and
//! entry serving.

use std::path::PathBuf;

use nc_core::{Error, FitEvent, Hist1D, InputConfig, InputHandler, Result};
use nc_hepmc::AsciiReader;

use crate::inputs::parse_input_list;
use crate::joint::JointIndexTable;
use crate::norm::{RunMetadata, prescan, resolve_fatx};
use crate::stack::fill_fit_event;

/// One declared input file with its pre-scan results.
#[derive(Debug, Clone)]
pub struct SubInput {
    /// File path.
    pub path: PathBuf,
    /// Decodable events found by the pre-scan.
    pub n_events: u64,
    /// Resolved flux-averaged cross section for this file, 10⁻³⁸ cm².
    pub fatx: f64,
}

/// Input handler for HepMC3/NuHepMC event files.
///
/// Construction runs the full pre-scan over every declared file and then
/// reopens at position 0, so the first `event()` call starts fresh. The
/// underlying reader is forward-only: serving entries in increasing order
/// never reopens, while a backward request costs a reopen plus skip.
#[derive(Debug)]
pub struct HepmcInputHandler {
    name: String,
    inputs: Vec<SubInput>,
    joint: Option<JointIndexTable>,
    metadata: RunMetadata,
    reader: AsciiReader,
    active_file: usize,
    /// Local index the cursor of the active file will serve next.
    next_local: u64,
    n_events: u64,
    event_rate: Hist1D,
    flux: Hist1D,
    event: FitEvent,
    n_reopens: u64,
}

impl HepmcInputHandler {
    /// Build a handler from a raw input string (`path` or `(a,b,c)`).
    ///
    /// Fails with a config error when any file cannot be deduced as HepMC3
    /// ASCII or its pre-scan finds no usable run metadata.
    pub fn new(name: impl Into<String>, raw_inputs: &str, config: &InputConfig) -> Result<Self> {
        let name = name.into();
        log::info!("creating HepMC input handler '{name}'");

        let paths = parse_input_list(raw_inputs)?;
        for (i, p) in paths.iter().enumerate() {
            log::debug!("  input file {i}: {p}");
        }

        let mut inputs = Vec::with_capacity(paths.len());
        let mut metadata: Option<RunMetadata> = None;
        for path in &paths {
            // Scoped scan reader: dropped (and the handle released) at the
            // end of each iteration, before the serving reopen below.
            let mut reader =
                AsciiReader::open(path).map_err(|e| Error::Config(e.to_string()))?;
            let scan = prescan(&mut reader)?;
            let fatx = resolve_fatx(&scan);
            if metadata.is_none() {
                metadata = Some(scan.metadata.clone());
            }
            inputs.push(SubInput { path: PathBuf::from(path), n_events: scan.n_events, fatx });
        }
        let metadata = metadata.expect("parse_input_list returns at least one path");

        let (joint, combined_fatx) = if inputs.len() > 1 {
            let table = JointIndexTable::build(
                &inputs.iter().map(|s| (s.n_events, s.fatx)).collect::<Vec<_>>(),
            )?;
            let fatx = table.combined_fatx();
            (Some(table), fatx)
        } else {
            (None, inputs[0].fatx)
        };

        let total: u64 = inputs.iter().map(|s| s.n_events).sum();
        let mut n_events = total;
        if let Some(cap) = config.max_events {
            if cap < total {
                log::info!("'{name}': capping served events at {cap} of {total}");
                n_events = cap;
            }
        }

        // The single normalization scalar, stored so downstream code can
        // keep querying it as an integral over a histogram axis.
        let mut event_rate = Hist1D::new("eventhist", 10, 0.0, 10.0);
        event_rate.set_bin_content(5, combined_fatx);
        let mut flux = Hist1D::new("fluxhist", 10, 0.0, 10.0);
        flux.set_bin_content(5, 1.0);

        // Reopen the first file at position 0: the pre-scan consumed its
        // cursor entirely and must not leak into serving.
        let reader =
            AsciiReader::open(&inputs[0].path).map_err(|e| Error::Config(e.to_string()))?;

        Ok(Self {
            name,
            inputs,
            joint,
            metadata,
            reader,
            active_file: 0,
            next_local: 0,
            n_events,
            event_rate,
            flux,
            event: FitEvent::new(),
            n_reopens: 0,
        })
    }

    /// Declared inputs with their pre-scan results.
    pub fn inputs(&self) -> &[SubInput] {
        &self.inputs
    }

    /// Run metadata of the first input file.
    pub fn metadata(&self) -> &RunMetadata {
        &self.metadata
    }

    /// Unit flux placeholder paired with the event-rate histogram.
    pub fn flux(&self) -> &Hist1D {
        &self.flux
    }

    /// Number of backward-triggered stream reopens since construction.
    pub fn n_reopens(&self) -> u64 {
        self.n_reopens
    }

    /// Open `file` with a fresh cursor; the prior handle is dropped on
    /// assignment.
    fn open_file(&mut self, file: usize) -> Result<()> {
        let path = &self.inputs[file].path;
        self.reader = AsciiReader::open(path)
            .map_err(|e| Error::Input(format!("reopening {}: {e}", path.display())))?;
        self.active_file = file;
        self.next_local = 0;
        Ok(())
    }

    fn serve(&mut self, entry: u64) -> Result<Option<&FitEvent>> {
        if entry >= self.n_events {
            return Ok(None);
        }

        let (file, local) = match self.joint.as_mut() {
            Some(table) => table.locate(entry)?,
            None => (0, entry),
        };

        if file != self.active_file {
            self.open_file(file)?;
        }

        // Forward skip is cheap; a request behind the cursor costs a full
        // reopen before skipping up to the target.
        let to_skip = if self.next_local > local {
            self.open_file(self.active_file)?;
            self.n_reopens += 1;
            local
        } else {
            local - self.next_local
        };
        let path = self.path_display();
        if to_skip > 0 {
            let skipped = self
                .reader
                .skip(to_skip)
                .map_err(|e| Error::Input(format!("{path}: {e}")))?;
            self.next_local += skipped;
            if skipped < to_skip {
                return Ok(None);
            }
        }

        self.next_local = local + 1;

        let raw = self
            .reader
            .read_event()
            .map_err(|e| Error::Input(format!("{path}: {e}")))?;
        let raw = match raw {
            Some(r) => r,
            // The stream ended under a supposedly valid entry; treat it as
            // past-the-end rather than failing.
            None => return Ok(None),
        };

        let input_weight = match self.joint.as_mut() {
            Some(table) => table.resolve_weight(entry)?,
            None => 1.0,
        };

        fill_fit_event(&mut self.event, &raw, input_weight)?;
        Ok(Some(&self.event))
    }

    fn path_display(&self) -> String {
        self.inputs[self.active_file].path.display().to_string()
    }
}

impl InputHandler for HepmcInputHandler {
    fn event(&mut self, entry: u64) -> Result<Option<&FitEvent>> {
        self.serve(entry)
    }

    fn n_events(&self) -> u64 {
        self.n_events
    }

    fn event_rate(&self) -> &Hist1D {
        &self.event_rate
    }

    fn name(&self) -> &str {
        &self.name
    }
}
