//! Apply: write stored payloads back onto live parameters and inputs
//!
//! Storage kinds are coarser than live kinds (an int payload may have come
//! from an int, a choice or a toggle), so every writer branches on the live
//! parameter's actual [`ParameterKind`] and coerces the payload to fit.
//!
//! Visitation order is fixed: optional revert, then ints, floats, strings,
//! float ramps, color ramps and finally inputs. Nothing is rolled back when
//! an entry fails. Every non-fatal condition lands in the [`ApplyReport`].

use crate::adapter::{AssetAdapter, AssetFactory, InputAdapter, ParameterAdapter, ParameterKind};
use crate::diagnostics::{ApplyReport, DiagnosticKind};
use crate::error::{AdapterError, PresetError, PresetResult};
use crate::input::{is_supported_input_type, InputBinding, InputValues};
use crate::preset::Preset;
use crate::value::{ColorRampValues, FloatRampValues, FloatValues, IntValues, StringValues};

// ─────────────────────────────────────────────────────────────────────────────
// Shared helpers
// ─────────────────────────────────────────────────────────────────────────────

fn kind_mismatch(name: &str, payload: &str, kind: ParameterKind, report: &mut ApplyReport) -> bool {
    report.warn(
        name,
        DiagnosticKind::KindMismatch,
        format!("cannot apply {} values to a {} parameter", payload, kind),
    );
    false
}

fn adapter_failure(name: &str, err: AdapterError, report: &mut ApplyReport) -> bool {
    report.warn(name, DiagnosticKind::KindMismatch, err.to_string());
    false
}

fn empty_payload(name: &str, report: &mut ApplyReport) -> bool {
    report.warn(name, DiagnosticKind::ResolutionMiss, "stored payload is empty");
    false
}

/// Number of components to write, reporting payload values past the
/// parameter's component count
fn writable_count(
    name: &str,
    stored: usize,
    count: usize,
    unit: &str,
    report: &mut ApplyReport,
) -> usize {
    if stored > count {
        let extra = stored - count;
        let plural = if extra == 1 { "" } else { "s" };
        report.warn(
            name,
            DiagnosticKind::CoercionLoss,
            format!("{} extra {}{} ignored", extra, unit, plural),
        );
    }
    stored.min(count)
}

// ─────────────────────────────────────────────────────────────────────────────
// Parameters
// ─────────────────────────────────────────────────────────────────────────────

/// Write an int payload onto an int, choice or toggle parameter.
///
/// Returns `true` when the value was written, possibly with coercion loss.
pub fn apply_int_parameter(
    values: &IntValues,
    param: &mut dyn ParameterAdapter,
    report: &mut ApplyReport,
) -> bool {
    let name = param.name().to_string();
    match param.kind() {
        ParameterKind::Int => {
            let stored = values.values.len();
            let count = writable_count(&name, stored, param.component_count(), "value", report);
            for (index, value) in values.values.iter().take(count).enumerate() {
                if let Err(err) = param.set_int_value(index, *value) {
                    return adapter_failure(&name, err, report);
                }
            }
            true
        }
        ParameterKind::Choice => {
            let Some(&stored) = values.values.first() else {
                return empty_payload(&name, report);
            };
            let options = param.choice_options().len();
            if options == 0 {
                report.warn(&name, DiagnosticKind::ResolutionMiss, "choice has no options");
                return false;
            }
            let last = options - 1;
            let index = usize::try_from(stored).unwrap_or(0).min(last);
            if i64::from(stored) != index as i64 {
                report.warn(
                    &name,
                    DiagnosticKind::CoercionLoss,
                    format!("choice index {} clamped to {}", stored, index),
                );
            }
            match param.set_selected_index(index) {
                Ok(()) => true,
                Err(err) => adapter_failure(&name, err, report),
            }
        }
        ParameterKind::Toggle => {
            let Some(&stored) = values.values.first() else {
                return empty_payload(&name, report);
            };
            match param.set_checked(stored != 0) {
                Ok(()) => true,
                Err(err) => adapter_failure(&name, err, report),
            }
        }
        kind => kind_mismatch(&name, "int", kind, report),
    }
}

/// Write a float payload onto a float or color parameter.
///
/// Color channels the payload does not cover keep their current value.
pub fn apply_float_parameter(
    values: &FloatValues,
    param: &mut dyn ParameterAdapter,
    report: &mut ApplyReport,
) -> bool {
    let name = param.name().to_string();
    let unit = match param.kind() {
        ParameterKind::Float => "component",
        ParameterKind::Color => "channel",
        kind => return kind_mismatch(&name, "float", kind, report),
    };

    let count = writable_count(&name, values.values.len(), param.component_count(), unit, report);
    for (index, value) in values.values.iter().take(count).enumerate() {
        if let Err(err) = param.set_float_value(index, *value) {
            return adapter_failure(&name, err, report);
        }
    }
    true
}

/// Write a string payload onto a string, file or choice parameter.
///
/// Choices are matched by exact option label.
pub fn apply_string_parameter(
    values: &StringValues,
    param: &mut dyn ParameterAdapter,
    report: &mut ApplyReport,
) -> bool {
    let name = param.name().to_string();
    match param.kind() {
        ParameterKind::String | ParameterKind::File => {
            let stored = values.values.len();
            let count = writable_count(&name, stored, param.component_count(), "value", report);
            for (index, value) in values.values.iter().take(count).enumerate() {
                if let Err(err) = param.set_string_value(index, value) {
                    return adapter_failure(&name, err, report);
                }
            }
            true
        }
        ParameterKind::Choice => {
            let Some(label) = values.values.first() else {
                return empty_payload(&name, report);
            };
            let options = param.choice_options();
            let Some(index) = options.iter().position(|option| option == label) else {
                report.warn(
                    &name,
                    DiagnosticKind::ResolutionMiss,
                    format!("no matching option for '{}'", label),
                );
                return false;
            };
            match param.set_selected_index(index) {
                Ok(()) => true,
                Err(err) => adapter_failure(&name, err, report),
            }
        }
        kind => kind_mismatch(&name, "string", kind, report),
    }
}

/// Replace every point of a float ramp
pub fn apply_float_ramp_parameter(
    values: &FloatRampValues,
    param: &mut dyn ParameterAdapter,
    report: &mut ApplyReport,
) -> bool {
    let name = param.name().to_string();
    match param.kind() {
        ParameterKind::FloatRamp => match param.set_float_ramp_points(&values.points) {
            Ok(()) => true,
            Err(err) => adapter_failure(&name, err, report),
        },
        kind => kind_mismatch(&name, "float ramp", kind, report),
    }
}

/// Replace every point of a color ramp
pub fn apply_color_ramp_parameter(
    values: &ColorRampValues,
    param: &mut dyn ParameterAdapter,
    report: &mut ApplyReport,
) -> bool {
    let name = param.name().to_string();
    match param.kind() {
        ParameterKind::ColorRamp => match param.set_color_ramp_points(&values.points) {
            Ok(()) => true,
            Err(err) => adapter_failure(&name, err, report),
        },
        kind => kind_mismatch(&name, "color ramp", kind, report),
    }
}

/// Resolve a parameter by name and hand it to a writer, counting the outcome
fn apply_named<A, F>(asset: &mut A, name: &str, report: &mut ApplyReport, write: F)
where
    A: AssetAdapter + ?Sized,
    F: FnOnce(&mut dyn ParameterAdapter, &mut ApplyReport) -> bool,
{
    let written = match asset.parameter_by_name(name) {
        Some(param) => write(param, report),
        None => {
            report.warn(name, DiagnosticKind::ResolutionMiss, "no such parameter on target");
            false
        }
    };

    if written {
        report.written += 1;
    } else {
        report.skipped += 1;
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Inputs
// ─────────────────────────────────────────────────────────────────────────────

/// Write an input record onto a live input binding.
///
/// Type and export options are copied, then the bound objects are replaced
/// in recorded order. References that no longer resolve leave an empty slot
/// and a [`DiagnosticKind::BrokenReference`] entry.
pub fn apply_input(
    record: &InputValues,
    input: &mut dyn InputAdapter,
    report: &mut ApplyReport,
) -> bool {
    let label = record.binding().to_string();
    if !is_supported_input_type(record.input_type) {
        report.warn(
            &label,
            DiagnosticKind::SkippedUnsupported,
            format!("unsupported input type {}", record.input_type.name()),
        );
        return false;
    }

    input.set_input_type(record.input_type);
    input.set_export_options(record.export_options);
    input.clear_objects();

    for (slot, bound) in record.input_objects.iter().enumerate() {
        if input.append_object(bound.object.as_ref(), bound.transform) {
            continue;
        }
        let message = match &bound.object {
            Some(object) => format!("object '{}' in slot {} did not resolve", object, slot),
            None => format!("slot {} has no object", slot),
        };
        report.warn(&label, DiagnosticKind::BrokenReference, message);
    }
    true
}

fn apply_input_record<A>(asset: &mut A, record: &InputValues, report: &mut ApplyReport)
where
    A: AssetAdapter + ?Sized,
{
    let binding = record.binding();
    let input = match binding {
        InputBinding::Parameter(name) => asset.input_by_parameter_name(name),
        InputBinding::Index(index) => asset.input_by_index(index),
    };

    let written = match input {
        Some(input) => apply_input(record, input, report),
        None => {
            report.warn(
                &binding.to_string(),
                DiagnosticKind::ResolutionMiss,
                "no such input on target",
            );
            false
        }
    };

    if written {
        report.written += 1;
    } else {
        report.skipped += 1;
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Presets
// ─────────────────────────────────────────────────────────────────────────────

/// Apply a whole preset to a live asset.
///
/// Fails with [`PresetError::RestrictedTarget`] before touching the asset
/// when the preset is restricted to a different source. Every other
/// condition is recorded in the returned report.
pub fn apply_preset<A>(preset: &Preset, asset: &mut A) -> PresetResult<ApplyReport>
where
    A: AssetAdapter + ?Sized,
{
    let target = asset.identity();
    if !preset.allows_target(&target) {
        let expected = preset.source_asset.clone().unwrap_or_else(|| target.clone());
        log::error!(
            "[PRESET_APPLY] Refusing '{}': restricted to '{}', target is '{}'",
            preset.name,
            expected,
            target
        );
        return Err(PresetError::RestrictedTarget {
            expected,
            actual: target,
        });
    }

    log::info!(
        "[PRESET_APPLY] Applying '{}' to '{}' ({} parameters, {} inputs)",
        preset.name,
        target,
        preset.parameter_count(),
        preset.input_parameters.len()
    );

    let mut report = ApplyReport::default();

    if preset.revert_before_apply {
        log::debug!("[PRESET_APPLY] Reverting '{}' to defaults", target);
        asset.reset_all_parameters_to_defaults();
        report.reverted = true;
    }

    for (name, values) in &preset.int_parameters {
        apply_named(asset, name, &mut report, |param, report| {
            apply_int_parameter(values, param, report)
        });
    }
    for (name, values) in &preset.float_parameters {
        apply_named(asset, name, &mut report, |param, report| {
            apply_float_parameter(values, param, report)
        });
    }
    for (name, values) in &preset.string_parameters {
        apply_named(asset, name, &mut report, |param, report| {
            apply_string_parameter(values, param, report)
        });
    }
    for (name, values) in &preset.ramp_float_parameters {
        apply_named(asset, name, &mut report, |param, report| {
            apply_float_ramp_parameter(values, param, report)
        });
    }
    for (name, values) in &preset.ramp_color_parameters {
        apply_named(asset, name, &mut report, |param, report| {
            apply_color_ramp_parameter(values, param, report)
        });
    }
    for record in &preset.input_parameters {
        apply_input_record(asset, record, &mut report);
    }

    log::info!(
        "[PRESET_APPLY] Applied '{}': {} written, {} skipped, {} diagnostics",
        preset.name,
        report.written,
        report.skipped,
        report.diagnostics.len()
    );
    Ok(report)
}

/// Create a new instance of the preset's source asset and apply the preset
/// to it.
pub fn instantiate_preset<F: AssetFactory>(
    preset: &Preset,
    factory: &mut F,
) -> PresetResult<(F::Asset, ApplyReport)> {
    let source = preset
        .instantiation_source()
        .ok_or_else(|| PresetError::InstantiationUnavailable(preset.name.clone()))?;

    let mut asset = factory
        .instantiate(source)
        .ok_or_else(|| PresetError::InstantiationFailed {
            source_asset: source.clone(),
        })?;

    log::info!("[PRESET] Instantiated '{}' from preset '{}'", source, preset.name);
    let report = apply_preset(preset, &mut asset)?;
    Ok((asset, report))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::AssetId;
    use crate::host::{MemoryAsset, MemoryFactory, MemoryInput, MemoryParameter, MemoryValue};
    use crate::ingest::{ingest_generic_input, ingest_input, ingest_parameter};
    use crate::input::{InputObject, InputType};
    use crate::value::{RampInterpolation, RampPoint, Rgba};
    use glam::{Mat4, Vec3};

    fn init_logging() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn value_of<'a>(asset: &'a MemoryAsset, name: &str) -> &'a MemoryValue {
        asset
            .parameter(name)
            .map(MemoryParameter::value)
            .unwrap_or_else(|| panic!("missing parameter {}", name))
    }

    fn selected(asset: &MemoryAsset, name: &str) -> Option<usize> {
        asset.parameter(name).and_then(|p| p.selected_index())
    }

    #[test]
    fn test_scalar_float_round_trip() {
        init_logging();
        let source = MemoryParameter::float("tx", vec![0.25]);
        let mut preset = Preset::new("Scalar");
        ingest_parameter(&source, &mut preset);
        assert_eq!(preset.float_parameters["tx"].values, vec![0.25]);

        let mut target = MemoryAsset::new("/Game/HDA/Box")
            .with_parameter(MemoryParameter::float("tx", vec![0.0]));
        let report = apply_preset(&preset, &mut target).unwrap();

        assert!(report.is_clean());
        assert_eq!(report.written, 1);
        assert_eq!(value_of(&target, "tx"), &MemoryValue::Float(vec![0.25]));
    }

    #[test]
    fn test_color_truncation() {
        let mut preset = Preset::new("Tint");
        preset
            .float_parameters
            .insert("tint".to_string(), FloatValues::new(vec![0.1, 0.2, 0.3, 0.4]));

        let mut target = MemoryAsset::new("/Game/HDA/Box")
            .with_parameter(MemoryParameter::color("tint", vec![0.0, 0.0, 0.0]));
        let report = apply_preset(&preset, &mut target).unwrap();

        assert_eq!(report.written, 1);
        assert_eq!(value_of(&target, "tint"), &MemoryValue::Color(vec![0.1, 0.2, 0.3]));
        let losses: Vec<_> = report.of_kind(DiagnosticKind::CoercionLoss).collect();
        assert_eq!(losses.len(), 1);
        assert!(losses[0].message.contains("extra channel ignored"));
    }

    #[test]
    fn test_short_color_payload_keeps_remaining_channels() {
        let mut preset = Preset::new("Tint");
        preset
            .float_parameters
            .insert("tint".to_string(), FloatValues::new(vec![0.5, 0.5, 0.5]));

        let mut target = MemoryAsset::new("/Game/HDA/Box")
            .with_parameter(MemoryParameter::color("tint", vec![0.0, 0.0, 0.0, 0.75]));
        let report = apply_preset(&preset, &mut target).unwrap();

        assert!(report.is_clean());
        assert_eq!(
            value_of(&target, "tint"),
            &MemoryValue::Color(vec![0.5, 0.5, 0.5, 0.75])
        );
    }

    #[test]
    fn test_choice_by_label() {
        let mut preset = Preset::new("Material");
        preset
            .string_parameters
            .insert("material".to_string(), StringValues::new(["Stone"]));

        let mut target = MemoryAsset::new("/Game/HDA/Wall").with_parameter(MemoryParameter::choice(
            "material",
            ["Wood", "Stone", "Metal"],
            0,
        ));
        let report = apply_preset(&preset, &mut target).unwrap();

        assert!(report.is_clean());
        assert_eq!(selected(&target, "material"), Some(1));
    }

    #[test]
    fn test_choice_missing_label() {
        let mut preset = Preset::new("Material");
        preset
            .string_parameters
            .insert("material".to_string(), StringValues::new(["Stone"]));

        let mut target = MemoryAsset::new("/Game/HDA/Wall").with_parameter(MemoryParameter::choice(
            "material",
            ["Wood", "Metal"],
            1,
        ));
        let report = apply_preset(&preset, &mut target).unwrap();

        assert_eq!(report.written, 0);
        assert_eq!(report.skipped, 1);
        assert_eq!(selected(&target, "material"), Some(1));
        let misses: Vec<_> = report.of_kind(DiagnosticKind::ResolutionMiss).collect();
        assert_eq!(misses.len(), 1);
        assert_eq!(misses[0].message, "no matching option for 'Stone'");
    }

    #[test]
    fn test_ramp_replace() {
        let points = vec![
            RampPoint::new(0.0, 0.0, RampInterpolation::Linear),
            RampPoint::new(0.5, 1.0, RampInterpolation::Constant),
            RampPoint::new(1.0, 0.0, RampInterpolation::Linear),
        ];
        let mut preset = Preset::new("Ramp");
        ingest_parameter(&MemoryParameter::float_ramp("falloff", points.clone()), &mut preset);

        let previous: Vec<_> = (0..5)
            .map(|i| RampPoint::new(i as f32 / 4.0, 0.5, RampInterpolation::BSpline))
            .collect();
        let mut target = MemoryAsset::new("/Game/HDA/Rock")
            .with_parameter(MemoryParameter::float_ramp("falloff", previous));
        let report = apply_preset(&preset, &mut target).unwrap();

        assert!(report.is_clean());
        assert_eq!(value_of(&target, "falloff"), &MemoryValue::FloatRamp(points));
    }

    #[test]
    fn test_color_ramp_replace() {
        let points = vec![
            RampPoint::new(0.0, Rgba::rgb(0.0, 0.0, 0.0), RampInterpolation::Linear),
            RampPoint::new(1.0, Rgba::new(1.0, 0.5, 0.25, 0.5), RampInterpolation::Hermite),
        ];
        let mut preset = Preset::new("Gradient");
        preset
            .ramp_color_parameters
            .insert("gradient".to_string(), ColorRampValues::new(points.clone()));

        let mut target = MemoryAsset::new("/Game/HDA/Rock")
            .with_parameter(MemoryParameter::color_ramp("gradient", Vec::new()));
        apply_preset(&preset, &mut target).unwrap();

        assert_eq!(value_of(&target, "gradient"), &MemoryValue::ColorRamp(points));
    }

    #[test]
    fn test_restricted_apply_refuses_other_target() {
        let mut preset = Preset::new("Locked").with_source("/Game/HDA/A1");
        preset.restricted_to_source = true;
        preset.revert_before_apply = true;
        preset
            .float_parameters
            .insert("tx".to_string(), FloatValues::new(vec![1.0]));

        let mut target = MemoryAsset::new("/Game/HDA/A2")
            .with_parameter(MemoryParameter::float("tx", vec![0.0]));
        let untouched = target.clone();

        let err = apply_preset(&preset, &mut target).unwrap_err();
        assert!(matches!(err, PresetError::RestrictedTarget { .. }));
        assert_eq!(target, untouched);
        assert_eq!(target.reset_count(), 0);
    }

    #[test]
    fn test_restricted_apply_accepts_source() {
        let mut preset = Preset::new("Locked").with_source("/Game/HDA/A1");
        preset.restricted_to_source = true;
        preset
            .float_parameters
            .insert("tx".to_string(), FloatValues::new(vec![1.0]));

        let mut target = MemoryAsset::new("/Game/HDA/A1")
            .with_parameter(MemoryParameter::float("tx", vec![0.0]));
        assert_eq!(apply_preset(&preset, &mut target).unwrap().written, 1);
    }

    #[test]
    fn test_restricted_without_source_applies_anywhere() {
        let mut preset = Preset::new("Loose");
        preset.restricted_to_source = true;

        let mut target = MemoryAsset::new("/Game/HDA/Any");
        assert!(apply_preset(&preset, &mut target).is_ok());
    }

    #[test]
    fn test_int_payload_coercions() {
        let mut preset = Preset::new("Ints");
        preset
            .int_parameters
            .insert("divs".to_string(), IntValues::new(vec![7, 8, 9]));
        preset
            .int_parameters
            .insert("mode".to_string(), IntValues::new(vec![5]));
        preset
            .int_parameters
            .insert("enable".to_string(), IntValues::new(vec![2]));

        let mut target = MemoryAsset::new("/Game/HDA/Grid")
            .with_parameter(MemoryParameter::int("divs", vec![1, 1]))
            .with_parameter(MemoryParameter::choice("mode", ["A", "B", "C"], 0))
            .with_parameter(MemoryParameter::toggle("enable", false));
        let report = apply_preset(&preset, &mut target).unwrap();

        assert_eq!(report.written, 3);
        assert_eq!(value_of(&target, "divs"), &MemoryValue::Int(vec![7, 8]));
        assert_eq!(selected(&target, "mode"), Some(2));
        assert_eq!(value_of(&target, "enable"), &MemoryValue::Toggle(true));
        assert_eq!(report.of_kind(DiagnosticKind::CoercionLoss).count(), 2);
    }

    #[test]
    fn test_negative_choice_index_clamps_to_first() {
        let mut preset = Preset::new("Ints");
        preset
            .int_parameters
            .insert("mode".to_string(), IntValues::new(vec![-3]));

        let mut target = MemoryAsset::new("/Game/HDA/Grid")
            .with_parameter(MemoryParameter::choice("mode", ["A", "B"], 1));
        let report = apply_preset(&preset, &mut target).unwrap();

        assert_eq!(selected(&target, "mode"), Some(0));
        assert_eq!(report.of_kind(DiagnosticKind::CoercionLoss).count(), 1);
    }

    #[test]
    fn test_missing_and_mismatched_parameters_are_skipped() {
        let mut preset = Preset::new("Mixed");
        preset
            .float_parameters
            .insert("gone".to_string(), FloatValues::new(vec![1.0]));
        preset
            .float_parameters
            .insert("label".to_string(), FloatValues::new(vec![1.0]));
        preset
            .float_parameters
            .insert("tx".to_string(), FloatValues::new(vec![3.0]));

        let mut target = MemoryAsset::new("/Game/HDA/Box")
            .with_parameter(MemoryParameter::string("label", ["keep"]))
            .with_parameter(MemoryParameter::float("tx", vec![0.0]));
        let report = apply_preset(&preset, &mut target).unwrap();

        assert_eq!(report.written, 1);
        assert_eq!(report.skipped, 2);
        assert_eq!(report.of_kind(DiagnosticKind::ResolutionMiss).count(), 1);
        assert_eq!(report.of_kind(DiagnosticKind::KindMismatch).count(), 1);
        assert_eq!(value_of(&target, "label"), &MemoryValue::String(vec!["keep".to_string()]));
        assert_eq!(value_of(&target, "tx"), &MemoryValue::Float(vec![3.0]));
    }

    #[test]
    fn test_revert_before_apply() {
        let mut preset = Preset::new("Revert");
        preset.revert_before_apply = true;
        preset
            .float_parameters
            .insert("tx".to_string(), FloatValues::new(vec![2.0]));

        let mut target = MemoryAsset::new("/Game/HDA/Box")
            .with_parameter(MemoryParameter::float("tx", vec![9.0]))
            .with_parameter(
                MemoryParameter::float("ty", vec![9.0]).with_default(MemoryValue::Float(vec![0.0])),
            );
        let report = apply_preset(&preset, &mut target).unwrap();

        assert!(report.reverted);
        assert_eq!(target.reset_count(), 1);
        assert_eq!(value_of(&target, "tx"), &MemoryValue::Float(vec![2.0]));
        assert_eq!(value_of(&target, "ty"), &MemoryValue::Float(vec![0.0]));
    }

    #[test]
    fn test_string_and_file_parameters() {
        let mut preset = Preset::new("Strings");
        preset
            .string_parameters
            .insert("texture".to_string(), StringValues::new(["C:\\tex\\rock albedo.png"]));
        preset
            .string_parameters
            .insert("tags".to_string(), StringValues::new(["a", "b", "c"]));

        let mut target = MemoryAsset::new("/Game/HDA/Rock")
            .with_parameter(MemoryParameter::file("texture", [""]))
            .with_parameter(MemoryParameter::string("tags", ["", ""]));
        let report = apply_preset(&preset, &mut target).unwrap();

        assert_eq!(report.written, 2);
        assert_eq!(
            value_of(&target, "texture"),
            &MemoryValue::File(vec!["C:\\tex\\rock albedo.png".to_string()])
        );
        assert_eq!(
            value_of(&target, "tags"),
            &MemoryValue::String(vec!["a".to_string(), "b".to_string()])
        );
    }

    fn scattered_asset(id: &str) -> MemoryAsset {
        MemoryAsset::new(id)
            .with_parameter(MemoryParameter::float("scale", vec![1.0, 1.0, 1.0]))
            .with_parameter(MemoryParameter::int("seed", vec![0]))
            .with_parameter(MemoryParameter::toggle("enable", false))
            .with_parameter(MemoryParameter::string_choice("style", ["Low", "High"], 0))
            .with_parameter(MemoryParameter::color("tint", vec![1.0, 1.0, 1.0, 1.0]))
            .with_input(MemoryInput::parameter("guide", InputType::Curve))
            .with_input(MemoryInput::positional(0, InputType::Geometry))
    }

    #[test]
    fn test_capture_then_apply_round_trip() {
        let mut source = scattered_asset("/Game/HDA/Scatter");
        source
            .parameter_mut("scale")
            .unwrap()
            .set_float_value(1, 4.0)
            .unwrap();
        source.parameter_mut("seed").unwrap().set_int_value(0, 42).unwrap();
        source.parameter_mut("enable").unwrap().set_checked(true).unwrap();
        source
            .parameter_mut("style")
            .unwrap()
            .set_selected_label("High")
            .unwrap();

        let mut preset = Preset::new("Scatter").with_source("/Game/HDA/Scatter");
        for param in source.parameters() {
            ingest_parameter(param, &mut preset);
        }

        let mut target = scattered_asset("/Game/HDA/Scatter");
        let report = apply_preset(&preset, &mut target).unwrap();

        assert!(report.is_clean());
        for name in ["scale", "seed", "enable", "style", "tint"] {
            assert_eq!(value_of(&target, name), value_of(&source, name), "{}", name);
        }
    }

    #[test]
    fn test_apply_is_idempotent() {
        let mut preset = Preset::new("Twice");
        preset
            .float_parameters
            .insert("scale".to_string(), FloatValues::new(vec![2.0, 3.0, 4.0, 5.0]));
        preset
            .int_parameters
            .insert("seed".to_string(), IntValues::new(vec![7]));
        let mut record = InputValues::for_parameter("guide", InputType::Curve);
        record
            .input_objects
            .push(InputObject::new("/Game/Splines/Path.Path", Mat4::IDENTITY));
        preset.input_parameters.push(record);

        let mut target = scattered_asset("/Game/HDA/Scatter");
        apply_preset(&preset, &mut target).unwrap();
        let once = target.clone();
        apply_preset(&preset, &mut target).unwrap();

        assert_eq!(target, once);
    }

    #[test]
    fn test_input_apply_preserves_order() {
        let transforms = [
            Mat4::from_translation(Vec3::new(1.0, 0.0, 0.0)),
            Mat4::from_scale(Vec3::splat(2.0)),
            Mat4::from_rotation_z(0.5),
        ];
        let mut record = InputValues::for_index(0, InputType::World);
        record.export_options.export_lods = true;
        record.export_options.prefer_nanite_fallback_mesh = true;
        for (i, transform) in transforms.iter().enumerate() {
            record
                .input_objects
                .push(InputObject::new(format!("/Game/Props/P{}.P{}", i, i).as_str(), *transform));
        }
        let mut preset = Preset::new("Inputs");
        preset.input_parameters.push(record.clone());

        let mut target = scattered_asset("/Game/HDA/Scatter");
        let report = apply_preset(&preset, &mut target).unwrap();

        assert!(report.is_clean());
        let input = target.positional_input(0).unwrap();
        assert_eq!(input.input_type, InputType::World);
        assert_eq!(input.export_options, record.export_options);
        assert_eq!(input.bound_objects(), record.input_objects.as_slice());
    }

    #[test]
    fn test_input_broken_reference_leaves_empty_slot() {
        let mut record = InputValues::for_parameter("guide", InputType::Curve);
        record
            .input_objects
            .push(InputObject::new("/Game/Deleted.Deleted", Mat4::IDENTITY));
        record
            .input_objects
            .push(InputObject::new("/Game/Path.Path", Mat4::IDENTITY));
        let mut preset = Preset::new("Broken");
        preset.input_parameters.push(record);

        let mut target = MemoryAsset::new("/Game/HDA/Fence").with_input(
            MemoryInput::parameter("guide", InputType::Curve)
                .with_object("/Game/Old.Old", Mat4::IDENTITY)
                .with_missing_object("/Game/Deleted.Deleted"),
        );
        let report = apply_preset(&preset, &mut target).unwrap();

        assert_eq!(report.written, 1);
        assert_eq!(report.of_kind(DiagnosticKind::BrokenReference).count(), 1);
        let objects = target.parameter_input("guide").unwrap().bound_objects();
        assert_eq!(objects.len(), 2);
        assert!(objects[0].object.is_none());
        assert_eq!(objects[1].object.as_ref().map(|o| o.path()), Some("/Game/Path.Path"));
    }

    #[test]
    fn test_input_without_live_binding_is_skipped() {
        let mut preset = Preset::new("Inputs");
        preset
            .input_parameters
            .push(InputValues::for_parameter("missing", InputType::Geometry));
        preset
            .input_parameters
            .push(InputValues::for_index(3, InputType::Geometry));

        let mut target = scattered_asset("/Game/HDA/Scatter");
        let report = apply_preset(&preset, &mut target).unwrap();

        assert_eq!(report.skipped, 2);
        assert_eq!(report.of_kind(DiagnosticKind::ResolutionMiss).count(), 2);
    }

    #[test]
    fn test_unsupported_input_record_is_skipped() {
        let mut preset = Preset::new("Inputs");
        preset
            .input_parameters
            .push(InputValues::for_index(0, InputType::Landscape));

        let mut target = scattered_asset("/Game/HDA/Scatter");
        let report = apply_preset(&preset, &mut target).unwrap();

        assert_eq!(report.of_kind(DiagnosticKind::SkippedUnsupported).count(), 1);
        assert_eq!(
            target.positional_input(0).map(|i| i.input_type),
            Some(InputType::Geometry)
        );
    }

    #[test]
    fn test_input_round_trip_through_ingest() {
        let source = MemoryAsset::new("/Game/HDA/Fence").with_input(
            MemoryInput::parameter("guide", InputType::Curve)
                .with_object("/Game/Splines/A.A", Mat4::from_translation(Vec3::Y))
                .with_object("/Game/Splines/B.B", Mat4::IDENTITY),
        );
        let mut preset = Preset::new("Fence");
        for input in source.inputs() {
            ingest_input(input, &mut preset.input_parameters);
        }

        let mut target = MemoryAsset::new("/Game/HDA/Fence")
            .with_input(MemoryInput::parameter("guide", InputType::Geometry));
        apply_preset(&preset, &mut target).unwrap();

        assert_eq!(target.parameter_input("guide"), source.parameter_input("guide"));
    }

    /// Asset that records the order in which apply touches it
    struct RecordingAsset {
        inner: MemoryAsset,
        calls: Vec<String>,
    }

    impl AssetAdapter for RecordingAsset {
        fn identity(&self) -> AssetId {
            self.inner.identity()
        }

        fn parameters(&self) -> Vec<&dyn ParameterAdapter> {
            self.inner.parameters()
        }

        fn inputs(&self) -> Vec<&dyn InputAdapter> {
            self.inner.inputs()
        }

        fn parameter_by_name(&mut self, name: &str) -> Option<&mut dyn ParameterAdapter> {
            self.calls.push(name.to_string());
            self.inner.parameter_by_name(name)
        }

        fn input_by_parameter_name(&mut self, name: &str) -> Option<&mut dyn InputAdapter> {
            self.calls.push(format!("input:{}", name));
            self.inner.input_by_parameter_name(name)
        }

        fn input_by_index(&mut self, index: usize) -> Option<&mut dyn InputAdapter> {
            self.calls.push(format!("input#{}", index));
            self.inner.input_by_index(index)
        }

        fn reset_all_parameters_to_defaults(&mut self) {
            self.calls.push("reset".to_string());
            self.inner.reset_all_parameters_to_defaults();
        }
    }

    #[test]
    fn test_visitation_order_is_fixed() {
        // Names sort opposite to the category order
        let ramp = vec![RampPoint::new(0.0, 1.0, RampInterpolation::Linear)];
        let white = Rgba::rgb(1.0, 1.0, 1.0);
        let gradient = vec![RampPoint::new(0.0, white, RampInterpolation::Linear)];

        let mut preset = Preset::new("Ordered");
        preset.revert_before_apply = true;
        preset
            .int_parameters
            .insert("z_int".to_string(), IntValues::new(vec![1]));
        preset
            .float_parameters
            .insert("y_float".to_string(), FloatValues::new(vec![1.0]));
        preset
            .string_parameters
            .insert("x_string".to_string(), StringValues::new(["s"]));
        preset
            .ramp_float_parameters
            .insert("w_ramp".to_string(), FloatRampValues::new(ramp));
        preset
            .ramp_color_parameters
            .insert("v_gradient".to_string(), ColorRampValues::new(gradient));
        preset
            .input_parameters
            .push(InputValues::for_index(0, InputType::Geometry));
        preset
            .input_parameters
            .push(InputValues::for_parameter("guide", InputType::Curve));

        let mut asset = RecordingAsset {
            inner: MemoryAsset::new("/Game/HDA/Ordered")
                .with_parameter(MemoryParameter::color_ramp("v_gradient", Vec::new()))
                .with_parameter(MemoryParameter::float_ramp("w_ramp", Vec::new()))
                .with_parameter(MemoryParameter::string("x_string", [""]))
                .with_parameter(MemoryParameter::float("y_float", vec![0.0]))
                .with_parameter(MemoryParameter::int("z_int", vec![0]))
                .with_input(MemoryInput::parameter("guide", InputType::Curve))
                .with_input(MemoryInput::positional(0, InputType::Geometry)),
            calls: Vec::new(),
        };
        let report = apply_preset(&preset, &mut asset).unwrap();

        assert_eq!(report.written, 7);
        assert_eq!(
            asset.calls,
            vec![
                "reset",
                "z_int",
                "y_float",
                "x_string",
                "w_ramp",
                "v_gradient",
                "input#0",
                "input:guide",
            ]
        );
    }

    #[test]
    fn test_unindexed_positional_input_never_touches_input_zero() {
        let stray = MemoryInput::parameter("guide", InputType::Curve)
            .with_object("/Game/Path.Path", Mat4::IDENTITY);
        let mut preset = Preset::new("Stray");
        ingest_generic_input(&stray, false, "", &mut preset.input_parameters);
        assert!(preset.input_parameters.is_empty());

        let mut target = MemoryAsset::new("/Game/HDA/Fence").with_input(
            MemoryInput::positional(0, InputType::Geometry)
                .with_object("/Game/Keep.Keep", Mat4::IDENTITY),
        );
        let untouched = target.clone();
        let report = apply_preset(&preset, &mut target).unwrap();

        assert_eq!(report.written, 0);
        assert_eq!(target, untouched);
    }

    #[test]
    fn test_instantiate_preset() {
        let mut factory = MemoryFactory::new();
        factory.register(scattered_asset("/Game/HDA/Scatter"));

        let mut preset = Preset::new("Spawn").with_source("/Game/HDA/Scatter");
        preset.can_instantiate = true;
        preset
            .int_parameters
            .insert("seed".to_string(), IntValues::new(vec![99]));

        let (asset, report) = instantiate_preset(&preset, &mut factory).unwrap();
        assert_eq!(report.written, 1);
        assert_eq!(value_of(&asset, "seed"), &MemoryValue::Int(vec![99]));
        assert_eq!(factory.instantiated(), 1);
    }

    #[test]
    fn test_instantiate_requires_flag_and_known_source() {
        let mut factory = MemoryFactory::new();
        let preset = Preset::new("NoSpawn").with_source("/Game/HDA/Scatter");
        assert!(matches!(
            instantiate_preset(&preset, &mut factory),
            Err(PresetError::InstantiationUnavailable(_))
        ));

        let mut preset = preset;
        preset.can_instantiate = true;
        assert!(matches!(
            instantiate_preset(&preset, &mut factory),
            Err(PresetError::InstantiationFailed { .. })
        ));
    }
}
