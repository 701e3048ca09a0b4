//! Capture: build a preset from every parameter and input of a live asset

use std::collections::BTreeSet;

use crate::adapter::AssetAdapter;
use crate::ingest::{ingest_input, ingest_parameter, input_label, IngestOutcome};
use crate::preset::Preset;

/// Which parts of an asset to capture
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureOptions {
    /// Capture only these parameter names (`None` captures all)
    pub parameters: Option<BTreeSet<String>>,
    pub include_inputs: bool,
}

impl Default for CaptureOptions {
    fn default() -> Self {
        Self {
            parameters: None,
            include_inputs: true,
        }
    }
}

impl CaptureOptions {
    /// Capture only the named parameters
    pub fn only<S: Into<String>>(names: impl IntoIterator<Item = S>) -> Self {
        Self {
            parameters: Some(names.into_iter().map(Into::into).collect()),
            ..Default::default()
        }
    }

    pub fn without_inputs(mut self) -> Self {
        self.include_inputs = false;
        self
    }

    fn wants(&self, name: &str) -> bool {
        self.parameters
            .as_ref()
            .map_or(true, |names| names.contains(name))
    }
}

/// What a capture stored and what it skipped
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CaptureReport {
    /// Names (or input labels) stored, with their value strings
    pub captured: Vec<(String, String)>,
    /// Names (or input labels) skipped, with the reason
    pub skipped: Vec<(String, String)>,
}

impl CaptureReport {
    fn record(&mut self, name: String, outcome: IngestOutcome) {
        match outcome {
            IngestOutcome::Stored { value_string } => self.captured.push((name, value_string)),
            IngestOutcome::Skipped { reason } => self.skipped.push((name, reason)),
        }
    }
}

/// Capture a live asset into a new preset whose source is the asset
pub fn capture_preset<A>(
    asset: &A,
    name: &str,
    options: &CaptureOptions,
) -> (Preset, CaptureReport)
where
    A: AssetAdapter + ?Sized,
{
    let mut preset = Preset::new(name).with_source(asset.identity());
    let mut report = CaptureReport::default();

    for param in asset.parameters() {
        if !options.wants(param.name()) {
            continue;
        }
        let outcome = ingest_parameter(param, &mut preset);
        report.record(param.name().to_string(), outcome);
    }

    if options.include_inputs {
        for input in asset.inputs() {
            let outcome = ingest_input(input, &mut preset.input_parameters);
            report.record(input_label(input), outcome);
        }
    }

    log::info!(
        "[PRESET] Captured '{}' from '{}': {} stored, {} skipped",
        preset.name,
        asset.identity(),
        report.captured.len(),
        report.skipped.len()
    );
    (preset, report)
}
