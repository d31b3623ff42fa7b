//! Rendering of a script call as a re-evaluable interpreter expression.
//!
//! The text is what lands in the history log, `(name tok_0 ... tok_n-1)`
//! with exactly one token per declared argument.

use crate::error::{Error, Result};
use crate::invocation::{Invocation, InvocationValue};
use crate::script::Script;
use crate::value::{self, ArgType};

impl Script {
    /// Renders the current argument values.
    ///
    /// # Examples
    ///
    /// ```
    /// use script_fu_core::script::{Argument, Script};
    /// use script_fu_core::value::ArgValue;
    ///
    /// let script = Script::new(
    ///     "test-toggle",
    ///     "<None>",
    ///     vec![Argument::new("Flatten", ArgValue::Toggle(true))],
    /// );
    /// assert_eq!(script.command(), "(test-toggle TRUE)");
    /// ```
    pub fn command(&self) -> String {
        let mut command = format!("({}", self.name);

        for arg in self.args() {
            command.push(' ');
            arg.value().write_token(&mut command);
        }

        command.push(')');
        command
    }

    /// Renders the raw values of `invocation` instead of the stored current
    /// values, for logging a call before it is committed into the schema.
    ///
    /// Brushes only carry their name in an invocation and render as a quoted
    /// name.
    ///
    /// # Errors
    ///
    /// Returns an error if the invocation is shorter than the schema or a
    /// value does not have the runtime type of its argument.
    pub fn command_from_invocation(&self, invocation: &Invocation) -> Result<String> {
        if invocation.len() < self.n_args() + 1 {
            return Err(Error::InvocationTooShort {
                script: self.name.clone(),
                expected: self.n_args() + 1,
                found: invocation.len(),
            });
        }

        let mut command = format!("({}", self.name);

        for (index, arg) in self.args().iter().enumerate() {
            let position = index + 1;
            let arg_type = arg.arg_type();
            let mismatch = || Error::InvocationTypeMismatch {
                script: self.name.clone(),
                position,
                expected: arg_type,
            };
            let incoming = invocation.value(position).ok_or_else(mismatch)?;

            command.push(' ');

            if arg_type.is_identity() {
                let object = incoming.object_for(arg_type).ok_or_else(mismatch)?;
                value::write_object_id(&mut command, object.id);
                continue;
            }

            match (arg_type, incoming) {
                (ArgType::Color, InvocationValue::Color(color)) => {
                    value::write_color(&mut command, *color);
                }
                (ArgType::Toggle, InvocationValue::Boolean(toggle)) => {
                    value::write_toggle(&mut command, *toggle);
                }
                (ArgType::Value, InvocationValue::String(text)) => {
                    value::write_literal(&mut command, text.as_deref());
                }
                (
                    ArgType::String
                    | ArgType::Text
                    | ArgType::Filename
                    | ArgType::Dirname
                    | ArgType::Font
                    | ArgType::Palette
                    | ArgType::Pattern
                    | ArgType::Gradient
                    | ArgType::Brush,
                    InvocationValue::String(text),
                ) => value::write_quoted(&mut command, text.as_deref().unwrap_or_default()),
                (ArgType::Adjustment, InvocationValue::Double(number)) => {
                    command.push_str(&value::format_float(*number));
                }
                (ArgType::Option | ArgType::Enum, InvocationValue::Int(index)) => {
                    command.push_str(&index.to_string());
                }
                _ => return Err(mismatch()),
            }
        }

        command.push(')');
        Ok(command)
    }
}

/// Renders the current values of `script`.
pub fn render(script: &Script) -> String {
    script.command()
}

/// Renders the raw values of `invocation` against the schema of `script`.
///
/// # Errors
///
/// See [`Script::command_from_invocation`].
pub fn render_from_invocation(script: &Script, invocation: &Invocation) -> Result<String> {
    script.command_from_invocation(invocation)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::invocation::{ObjectKind, ObjectRef, RunMode};
    use crate::script::Argument;
    use crate::value::{Adjustment, AdjustmentKind, ArgValue, Brush, OptionChoice, Rgb};

    fn adjustment(value: f64) -> ArgValue {
        ArgValue::Adjustment(Adjustment {
            value,
            lower: 0.0,
            upper: 10.0,
            step: 0.5,
            page: 1.0,
            digits: 1,
            kind: AdjustmentKind::Slider,
        })
    }

    #[test]
    fn test_render_defaults() {
        let script = Script::new(
            "test-blur",
            "<None>",
            vec![
                Argument::new("Radius", adjustment(3.5)),
                Argument::new("Flatten", ArgValue::Toggle(true)),
                Argument::new("Greeting", ArgValue::String(Some("hello".into()))),
            ],
        );

        assert_eq!(render(&script), "(test-blur 3.500000 TRUE \"hello\")");
    }

    #[test]
    fn test_render_empty_schema() {
        let script = Script::new("test-nothing", "<None>", vec![]);
        assert_eq!(render(&script), "(test-nothing)");
    }

    #[test]
    fn test_render_every_family() {
        let script = Script::new(
            "script-fu-all",
            "<None>",
            vec![
                Argument::new("Image", ArgValue::Image(Some(1))),
                Argument::new("Layer", ArgValue::Layer(None)),
                Argument::new("Color", ArgValue::Color(Rgb::from_u8(10, 20, 30))),
                Argument::new("Raw", ArgValue::Value(Some("'(1 2)".into()))),
                Argument::new("Dir", ArgValue::Dirname(Some("/tmp/\"x\"".into()))),
                Argument::new("Font", ArgValue::Font("Sans Bold".into())),
                Argument::new(
                    "Brush",
                    ArgValue::Brush(Brush {
                        name: "Circle (11)".into(),
                        opacity: 50.0,
                        spacing: 20,
                        paint_mode: 0,
                    }),
                ),
                Argument::new(
                    "Mode",
                    ArgValue::Option(OptionChoice {
                        history: 1,
                        choices: vec!["A".into(), "B".into()],
                    }),
                ),
            ],
        );

        assert_eq!(
            script.command(),
            "(script-fu-all 1 -1 '(10 20 30) '(1 2) \"/tmp/\\\"x\\\"\" \"Sans Bold\" \
             '(\"Circle (11)\" 50.000000 20 0) 1)"
        );
    }

    #[test]
    fn test_render_from_invocation() {
        let script = Script::new(
            "script-fu-raw",
            "<None>",
            vec![
                Argument::new("Image", ArgValue::Image(None)),
                Argument::new("Drawable", ArgValue::Drawable(None)),
                Argument::new("Radius", adjustment(1.0)),
                Argument::new(
                    "Brush",
                    ArgValue::Brush(Brush {
                        name: "Circle".into(),
                        opacity: 100.0,
                        spacing: 10,
                        paint_mode: 0,
                    }),
                ),
                Argument::new("Level", ArgValue::Enum(crate::value::EnumChoice {
                    type_name: "GimpHistogramChannel".into(),
                    history: 0,
                })),
            ],
        );
        let invocation = Invocation::new(
            RunMode::NonInteractive,
            vec![
                InvocationValue::Object(ObjectRef::new(ObjectKind::Image, 7)),
                InvocationValue::Object(ObjectRef::none(ObjectKind::Layer)),
                InvocationValue::Double(0.25),
                InvocationValue::String(Some("Star".into())),
                InvocationValue::Int(2),
            ],
        );

        assert_eq!(
            render_from_invocation(&script, &invocation).unwrap(),
            "(script-fu-raw 7 -1 0.250000 \"Star\" 2)"
        );
        // Stored values are untouched.
        assert_eq!(script.command(), "(script-fu-raw -1 -1 1.000000 '(\"Circle\" 100.000000 10 0) 0)");
    }

    #[test]
    fn test_render_from_invocation_rejects_mismatch() {
        let script = Script::new(
            "script-fu-raw",
            "<None>",
            vec![Argument::new("Flatten", ArgValue::Toggle(false))],
        );

        let wrong = Invocation::new(RunMode::NonInteractive, vec![InvocationValue::Int(1)]);
        assert!(matches!(
            script.command_from_invocation(&wrong),
            Err(Error::InvocationTypeMismatch { position: 1, .. })
        ));

        let short = Invocation::new(RunMode::NonInteractive, vec![]);
        assert!(matches!(
            script.command_from_invocation(&short),
            Err(Error::InvocationTooShort { .. })
        ));
    }

    #[test]
    fn test_empty_value_literal_keeps_token_count() {
        let script = Script::new(
            "script-fu-literal",
            "<None>",
            vec![
                Argument::new("Raw", ArgValue::Value(Some(String::new()))),
                Argument::new("Flatten", ArgValue::Toggle(true)),
            ],
        );
        assert_eq!(script.command(), "(script-fu-literal \"\" TRUE)");

        let invocation = Invocation::new(
            RunMode::NonInteractive,
            vec![
                InvocationValue::String(Some(String::new())),
                InvocationValue::Boolean(false),
            ],
        );
        assert_eq!(
            script.command_from_invocation(&invocation).unwrap(),
            "(script-fu-literal \"\" FALSE)"
        );
    }

    #[test]
    fn test_token_count_matches_schema() {
        let script = Script::new(
            "script-fu-count",
            "<None>",
            vec![
                Argument::new("A", ArgValue::Toggle(true)),
                Argument::new("B", adjustment(2.0)),
                Argument::new("C", ArgValue::Image(None)),
            ],
        );

        let command = script.command();
        let inner = command
            .strip_prefix('(')
            .and_then(|c| c.strip_suffix(')'))
            .unwrap();
        assert_eq!(inner.split(' ').count(), 1 + script.n_args());
    }
}
