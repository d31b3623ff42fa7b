use script_fu_core::procedure::{ParamSpec, ProcedureMetadata};

use crate::arguments::Style;

/// The declared parameters that receive no value from the command line and
/// keep the script's current value.
///
/// Positional values always cover every parameter; a malformed named value
/// covers nothing and is reported when the values are processed.
#[must_use]
pub fn unset_parameters<'a>(style: &Style, procedure: &'a ProcedureMetadata) -> Vec<&'a ParamSpec> {
    let declared = procedure.declared_params();

    match style {
        Style::None => declared.iter().collect(),
        Style::Positional(_) => Vec::new(),
        Style::Named(named_values) => declared
            .iter()
            .filter(|param| {
                !named_values.iter().any(|named_value| {
                    named_value
                        .split_once('=')
                        .is_some_and(|(name, _)| name == param.name)
                })
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use script_fu_core::procedure::ProcedureKind;
    use script_fu_core::script::{Argument, Script};
    use script_fu_core::value::ArgValue;

    fn procedure() -> ProcedureMetadata {
        Script::new(
            "script-fu-sample",
            "<None>",
            vec![
                Argument::new("Image", ArgValue::Image(None)),
                Argument::new("Flatten", ArgValue::Toggle(false)),
                Argument::new("Keep", ArgValue::Toggle(true)),
            ],
        )
        .procedure(ProcedureKind::Temporary)
    }

    fn names(params: &[&ParamSpec]) -> Vec<String> {
        params.iter().map(|param| param.name.clone()).collect()
    }

    #[test]
    fn test_no_values_leaves_everything_unset() {
        let procedure = procedure();
        assert_eq!(
            names(&unset_parameters(&Style::None, &procedure)),
            vec!["image", "toggle", "toggle-2"]
        );
    }

    #[test]
    fn test_positional_sets_everything() {
        let procedure = procedure();
        let style = Style::Positional(vec!["1".into(), "true".into(), "false".into()]);
        assert!(unset_parameters(&style, &procedure).is_empty());
    }

    #[test]
    fn test_named_sets_listed_parameters() {
        let procedure = procedure();
        let style = Style::Named(vec!["toggle-2=false".into(), "image".into()]);
        assert_eq!(
            names(&unset_parameters(&style, &procedure)),
            vec!["image", "toggle"]
        );
    }
}
