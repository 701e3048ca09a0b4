//! Ingest: copy live parameter values into preset payloads
//!
//! Ingest works one parameter at a time. Each `ingest_*` function reads an
//! adapter, builds the payload for its target mapping and inserts it under
//! the parameter's name, overwriting any earlier capture of the same name.
//!
//! | Source kind           | Mapping                 |
//! |-----------------------|-------------------------|
//! | Int, Toggle           | `int_parameters`        |
//! | Choice (index)        | `int_parameters`        |
//! | Float, Color          | `float_parameters`      |
//! | String, File          | `string_parameters`     |
//! | Choice (label)        | `string_parameters`     |
//! | FloatRamp / ColorRamp | `ramp_*_parameters`     |
//! | Input binding         | `input_parameters` (appended) |
//!
//! Ingest never fails fatally. A parameter that cannot be read is reported
//! as [`IngestOutcome::Skipped`] and nothing is stored.

use crate::adapter::{InputAdapter, ParameterAdapter, ParameterKind};
use crate::input::{is_supported_input_type, InputValues};
use crate::preset::{ParameterMap, ParameterMapping, Preset};
use crate::value::{
    ColorRampValues, FloatRampValues, FloatValues, IntValues, PresetPayload, StringValues,
};

/// Result of ingesting one parameter or input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IngestOutcome {
    /// A payload was stored; `value_string` is its short rendering
    Stored { value_string: String },
    /// Nothing was stored
    Skipped { reason: String },
}

impl IngestOutcome {
    pub fn is_stored(&self) -> bool {
        matches!(self, IngestOutcome::Stored { .. })
    }

    /// Value rendering for stored entries, skip reason otherwise
    pub fn value_string(&self) -> &str {
        match self {
            IngestOutcome::Stored { value_string } => value_string,
            IngestOutcome::Skipped { reason } => reason,
        }
    }
}

fn skipped(name: &str, reason: String) -> IngestOutcome {
    log::warn!("[PRESET_INGEST] Skipping '{}': {}", name, reason);
    IngestOutcome::Skipped { reason }
}

fn store<T: PresetPayload>(name: &str, payload: T, out: &mut ParameterMap<T>) -> IngestOutcome {
    let value_string = payload.describe();
    log::debug!("[PRESET_INGEST] {} = {}", name, value_string);
    out.insert(name.to_string(), payload);
    IngestOutcome::Stored { value_string }
}

/// Read every component of a parameter, or `None` if any component is unreadable
fn read_components<T>(
    param: &dyn ParameterAdapter,
    read: impl Fn(&dyn ParameterAdapter, usize) -> Option<T>,
) -> Option<Vec<T>> {
    (0..param.component_count()).map(|i| read(param, i)).collect()
}

// ─────────────────────────────────────────────────────────────────────────────
// Int-category parameters
// ─────────────────────────────────────────────────────────────────────────────

/// Ingest an int, choice (as its selected index) or toggle parameter
pub fn ingest_int_parameter(
    param: &dyn ParameterAdapter,
    out: &mut ParameterMap<IntValues>,
) -> IngestOutcome {
    let values = match param.kind() {
        ParameterKind::Int => read_components(param, |p, i| p.int_value(i)),
        ParameterKind::Choice => param
            .selected_index()
            .and_then(|index| i32::try_from(index).ok())
            .map(|index| vec![index]),
        ParameterKind::Toggle => param.is_checked().map(|checked| vec![i32::from(checked)]),
        kind => {
            return skipped(
                param.name(),
                format!("{} parameters are not stored as ints", kind),
            )
        }
    };

    match values {
        Some(values) => store(param.name(), IntValues { values }, out),
        None => skipped(param.name(), "could not read int value".to_string()),
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Float-category parameters
// ─────────────────────────────────────────────────────────────────────────────

/// Ingest a float or color parameter
///
/// Colors are stored as their 3 or 4 channels in R, G, B[, A] order.
pub fn ingest_float_parameter(
    param: &dyn ParameterAdapter,
    out: &mut ParameterMap<FloatValues>,
) -> IngestOutcome {
    match param.kind() {
        ParameterKind::Float | ParameterKind::Color => {}
        kind => {
            return skipped(
                param.name(),
                format!("{} parameters are not stored as floats", kind),
            )
        }
    }

    match read_components(param, |p, i| p.float_value(i)) {
        Some(values) => store(param.name(), FloatValues { values }, out),
        None => skipped(param.name(), "could not read float value".to_string()),
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// String-category parameters
// ─────────────────────────────────────────────────────────────────────────────

/// Ingest a string, file or choice (as its selected label) parameter
///
/// File paths are stored unmodified.
pub fn ingest_string_parameter(
    param: &dyn ParameterAdapter,
    out: &mut ParameterMap<StringValues>,
) -> IngestOutcome {
    let values = match param.kind() {
        ParameterKind::String | ParameterKind::File => {
            read_components(param, |p, i| p.string_value(i))
        }
        ParameterKind::Choice => param.selected_label().map(|label| vec![label]),
        kind => {
            return skipped(
                param.name(),
                format!("{} parameters are not stored as strings", kind),
            )
        }
    };

    match values {
        Some(values) => store(param.name(), StringValues { values }, out),
        None => skipped(param.name(), "could not read string value".to_string()),
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Ramps
// ─────────────────────────────────────────────────────────────────────────────

/// Ingest a float ramp, keeping its points in source order
pub fn ingest_float_ramp_parameter(
    param: &dyn ParameterAdapter,
    out: &mut ParameterMap<FloatRampValues>,
) -> IngestOutcome {
    match param.float_ramp_points() {
        Some(points) => store(param.name(), FloatRampValues { points }, out),
        None => skipped(
            param.name(),
            format!("{} parameter has no float ramp points", param.kind()),
        ),
    }
}

/// Ingest a color ramp, keeping its points in source order
pub fn ingest_color_ramp_parameter(
    param: &dyn ParameterAdapter,
    out: &mut ParameterMap<ColorRampValues>,
) -> IngestOutcome {
    match param.color_ramp_points() {
        Some(points) => store(param.name(), ColorRampValues { points }, out),
        None => skipped(
            param.name(),
            format!("{} parameter has no color ramp points", param.kind()),
        ),
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Dispatch
// ─────────────────────────────────────────────────────────────────────────────

/// Mapping a parameter is captured into, given how it currently presents itself
pub fn mapping_for(param: &dyn ParameterAdapter) -> ParameterMapping {
    match param.kind() {
        ParameterKind::Int | ParameterKind::Toggle => ParameterMapping::Int,
        ParameterKind::Choice if param.is_string_choice() => ParameterMapping::String,
        ParameterKind::Choice => ParameterMapping::Int,
        ParameterKind::Float | ParameterKind::Color => ParameterMapping::Float,
        ParameterKind::String | ParameterKind::File => ParameterMapping::String,
        ParameterKind::FloatRamp => ParameterMapping::FloatRamp,
        ParameterKind::ColorRamp => ParameterMapping::ColorRamp,
    }
}

/// Ingest any parameter into the mapping that matches its kind.
///
/// A successful capture also drops entries of the same name from the other
/// mappings, so a choice that switched between index and label presentation
/// never ends up stored twice.
pub fn ingest_parameter(param: &dyn ParameterAdapter, preset: &mut Preset) -> IngestOutcome {
    let mapping = mapping_for(param);
    let outcome = match mapping {
        ParameterMapping::Int => ingest_int_parameter(param, &mut preset.int_parameters),
        ParameterMapping::Float => ingest_float_parameter(param, &mut preset.float_parameters),
        ParameterMapping::String => ingest_string_parameter(param, &mut preset.string_parameters),
        ParameterMapping::FloatRamp => {
            ingest_float_ramp_parameter(param, &mut preset.ramp_float_parameters)
        }
        ParameterMapping::ColorRamp => {
            ingest_color_ramp_parameter(param, &mut preset.ramp_color_parameters)
        }
    };

    if outcome.is_stored() {
        preset.remove_parameter_except(param.name(), mapping);
    }
    outcome
}

// ─────────────────────────────────────────────────────────────────────────────
// Inputs
// ─────────────────────────────────────────────────────────────────────────────

/// Log label for an input binding
fn binding_label(is_parameter_input: bool, parameter_name: &str, index: Option<usize>) -> String {
    match (is_parameter_input, index) {
        (true, _) => parameter_name.to_string(),
        (false, Some(index)) => format!("input #{}", index),
        (false, None) => "positional input".to_string(),
    }
}

/// Log label for a live input, as used in capture reports
pub(crate) fn input_label(input: &dyn InputAdapter) -> String {
    binding_label(
        input.is_parameter_input(),
        input.parameter_name().unwrap_or_default(),
        input.input_index(),
    )
}

/// Append a record for an input binding.
///
/// Always appends: a parameter input and a positional input may share a
/// name, so records are never deduplicated. A binding that cannot be
/// identified (no parameter name, or no index for a positional input) is
/// skipped rather than guessed.
pub fn ingest_generic_input(
    input: &dyn InputAdapter,
    is_parameter_input: bool,
    parameter_name: &str,
    out: &mut Vec<InputValues>,
) -> IngestOutcome {
    let input_type = input.input_type();
    let index = input.input_index();
    let label = binding_label(is_parameter_input, parameter_name, index);

    if !is_supported_input_type(input_type) {
        return skipped(
            &label,
            format!("unsupported input type {}", input_type.name()),
        );
    }

    let mut record = if is_parameter_input {
        if parameter_name.is_empty() {
            return skipped(&label, "parameter input without a parameter name".to_string());
        }
        InputValues::for_parameter(parameter_name, input_type)
    } else {
        let Some(index) = index else {
            return skipped(&label, "positional input without an index".to_string());
        };
        InputValues::for_index(index, input_type)
    };
    record.update_from_input(input);

    let value_string = record.describe();
    log::debug!("[PRESET_INGEST] {} = {}", label, value_string);
    out.push(record);
    IngestOutcome::Stored { value_string }
}

/// Append a record for an input, taking its binding identity from the adapter
pub fn ingest_input(input: &dyn InputAdapter, out: &mut Vec<InputValues>) -> IngestOutcome {
    let name = input.parameter_name().unwrap_or_default();
    ingest_generic_input(input, input.is_parameter_input(), name, out)
}
