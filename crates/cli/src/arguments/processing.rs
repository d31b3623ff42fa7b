use script_fu_core::error::Error::{
    ParameterCountMismatch, ParameterFormat, UnknownParameter, ValueFormat,
};
use script_fu_core::error::Result;
use script_fu_core::invocation::{Invocation, InvocationValue, ObjectKind, ObjectRef, RunMode};
use script_fu_core::procedure::ProcedureMetadata;
use script_fu_core::script::{Argument, Script};
use script_fu_core::value::{ArgType, ArgValue, Rgb};

use crate::arguments::style::Style;

/// Builds the invocation of `script` from command-line values.
///
/// Arguments without a value keep the script's current value. With no values
/// at all the invocation runs with the last values.
///
/// # Errors
///
/// Returns an error if:
/// - A named value is not written as `name=value`
/// - A name matches no parameter of the procedure
/// - The number of positional values differs from the declared arguments
/// - A value cannot be read as its argument's type
pub fn process_command_line(
    style: Style,
    script: &Script,
    procedure: &ProcedureMetadata,
) -> Result<Invocation> {
    let mut invocation = script.to_invocation(RunMode::NonInteractive);

    match style {
        Style::None => invocation.run_mode = RunMode::WithLastVals,

        Style::Named(named_values) => {
            for named_value in &named_values {
                let (name, text) = named_value
                    .split_once('=')
                    .ok_or_else(|| ParameterFormat(named_value.clone()))?;

                let index = procedure
                    .declared_params()
                    .iter()
                    .position(|param| param.name == name)
                    .ok_or_else(|| UnknownParameter(name.to_string()))?;

                invocation.values[index] = parse_value(&script.args()[index], text)?;
            }
        }

        Style::Positional(positional_values) => {
            if positional_values.len() != script.n_args() {
                return Err(ParameterCountMismatch(
                    script.n_args(),
                    positional_values.len(),
                ));
            }

            for (index, (arg, text)) in script.args().iter().zip(&positional_values).enumerate() {
                invocation.values[index] = parse_value(arg, text)?;
            }
        }
    }

    Ok(invocation)
}

/// Reads `text` as a value for `arg`.
///
/// Object ids are integers, `-1` or `none` for no object. Colours are
/// `r,g,b` bytes or `#rrggbb`. Options accept an index or a choice label.
///
/// # Errors
///
/// Returns [`ValueFormat`] if `text` cannot be read as the argument's type.
pub fn parse_value(arg: &Argument, text: &str) -> Result<InvocationValue> {
    let arg_type = arg.arg_type();
    let format_error = || ValueFormat(arg_type, text.to_string());

    if let Some(kind) = ObjectKind::for_arg_type(arg_type) {
        let trimmed = text.trim();
        if trimmed.eq_ignore_ascii_case("none") || trimmed == "-1" {
            return Ok(InvocationValue::Object(ObjectRef::none(kind)));
        }

        let id = trimmed.parse::<i32>().map_err(|_| format_error())?;
        return Ok(InvocationValue::Object(ObjectRef::new(kind, id)));
    }

    let value = match arg_type {
        ArgType::Color => InvocationValue::Color(parse_color(text).ok_or_else(format_error)?),
        ArgType::Toggle => InvocationValue::Boolean(parse_toggle(text).ok_or_else(format_error)?),
        ArgType::Adjustment => InvocationValue::Double(
            text.trim()
                .parse::<f64>()
                .ok()
                .filter(|number| number.is_finite())
                .ok_or_else(format_error)?,
        ),
        ArgType::Option => {
            let ArgValue::Option(option) = arg.default_value() else {
                return Err(format_error());
            };

            let index = match text.trim().parse::<i32>() {
                Ok(index) => index,
                Err(_) => option
                    .choices
                    .iter()
                    .position(|choice| choice == text)
                    .and_then(|index| i32::try_from(index).ok())
                    .ok_or_else(format_error)?,
            };
            InvocationValue::Int(index)
        }
        ArgType::Enum => InvocationValue::Int(text.trim().parse::<i32>().map_err(|_| format_error())?),
        _ => InvocationValue::String(Some(text.to_string())),
    };

    Ok(value)
}

fn parse_toggle(text: &str) -> Option<bool> {
    match text.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Some(true),
        "false" | "no" | "off" | "0" => Some(false),
        _ => None,
    }
}

fn parse_color(text: &str) -> Option<Rgb> {
    let text = text.trim();

    if let Some(hex) = text.strip_prefix('#') {
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }

        let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).ok();
        return Some(Rgb::from_u8(channel(0..2)?, channel(2..4)?, channel(4..6)?));
    }

    let channels: Vec<u8> = text
        .split(',')
        .map(|channel| channel.trim().parse::<u8>().ok())
        .collect::<Option<Vec<_>>>()?;

    match channels.as_slice() {
        [r, g, b] => Some(Rgb::from_u8(*r, *g, *b)),
        _ => None,
    }
}
