//! Recognition of the implicit display/image/item prefix of an invocation.
//!
//! Callers reach the same script with different conventions: some pass the
//! active display, some only an image, some an image plus one of its items.
//! The leading values are bound into the matching schema slots so the rest of
//! the invocation holds only user parameters.

use log::debug;

use crate::invocation::Invocation;
use crate::script::Script;
use crate::value::ArgType;

/// Item kinds tried after an image, in order.
const ITEM_TYPES: [ArgType; 4] = [
    ArgType::Drawable,
    ArgType::Layer,
    ArgType::Channel,
    ArgType::Vectors,
];

impl Script {
    /// Binds the leading standard arguments of `invocation` and returns how
    /// many schema slots were consumed (0 to 3).
    ///
    /// A display may come first, an image may follow it (or come first), and
    /// only after an image one drawable, layer, channel or vectors item.
    /// Each step needs a schema slot of exactly that type at the current
    /// position and an invocation value holding that runtime type.
    pub fn extract_leading(&mut self, invocation: &Invocation) -> usize {
        let mut consumed = 0;

        if self.bind_standard_arg(invocation, ArgType::Display, consumed) {
            consumed += 1;
        }

        if self.bind_standard_arg(invocation, ArgType::Image, consumed) {
            consumed += 1;

            if ITEM_TYPES
                .iter()
                .any(|item_type| self.bind_standard_arg(invocation, *item_type, consumed))
            {
                consumed += 1;
            }
        }

        debug!("Script {} consumed {consumed} standard arguments", self.name);

        consumed
    }

    fn bind_standard_arg(&mut self, invocation: &Invocation, arg_type: ArgType, n: usize) -> bool {
        let Some(arg) = self.args_mut().get_mut(n) else {
            return false;
        };

        if arg.arg_type() != arg_type {
            return false;
        }

        let Some(object) = invocation
            .value(n + 1)
            .and_then(|value| value.object_for(arg_type))
        else {
            return false;
        };

        arg.value_mut().set_object_id(object.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::invocation::{InvocationValue, ObjectKind, ObjectRef, RunMode};
    use crate::script::Argument;
    use crate::value::{Adjustment, AdjustmentKind, ArgValue};

    fn object(kind: ObjectKind, id: i32) -> InvocationValue {
        InvocationValue::Object(ObjectRef::new(kind, id))
    }

    fn adjustment() -> ArgValue {
        ArgValue::Adjustment(Adjustment {
            value: 0.0,
            lower: 0.0,
            upper: 10.0,
            step: 0.1,
            page: 1.0,
            digits: 1,
            kind: AdjustmentKind::Slider,
        })
    }

    fn script(args: Vec<ArgValue>) -> Script {
        Script::new(
            "script-fu-extract",
            "<None>",
            args.into_iter()
                .map(|value| Argument::new("arg", value))
                .collect(),
        )
    }

    fn ids(script: &Script) -> Vec<Option<Option<i32>>> {
        script.args().iter().map(|arg| arg.value().object_id()).collect()
    }

    #[test]
    fn test_display_image_drawable() {
        let mut script = script(vec![
            ArgValue::Display(None),
            ArgValue::Image(None),
            ArgValue::Drawable(None),
            adjustment(),
        ]);
        let invocation = Invocation::new(
            RunMode::Interactive,
            vec![
                object(ObjectKind::Display, 42),
                object(ObjectKind::Image, 7),
                object(ObjectKind::Drawable, 3),
                InvocationValue::Double(1.5),
            ],
        );

        assert_eq!(script.extract_leading(&invocation), 3);
        assert_eq!(
            ids(&script),
            vec![Some(Some(42)), Some(Some(7)), Some(Some(3)), None]
        );
    }

    #[test]
    fn test_missing_display_value_consumes_nothing() {
        let mut script = script(vec![
            ArgValue::Display(None),
            ArgValue::Image(None),
            ArgValue::Drawable(None),
            adjustment(),
        ]);
        let invocation = Invocation::new(
            RunMode::Interactive,
            vec![
                object(ObjectKind::Image, 7),
                object(ObjectKind::Drawable, 3),
                InvocationValue::Double(1.5),
            ],
        );

        assert_eq!(script.extract_leading(&invocation), 0);
        assert_eq!(ids(&script), vec![Some(None), Some(None), Some(None), None]);
    }

    #[test]
    fn test_image_first_then_layer() {
        let mut script = script(vec![ArgValue::Image(None), ArgValue::Layer(None), adjustment()]);
        let invocation = Invocation::new(
            RunMode::NonInteractive,
            vec![
                object(ObjectKind::Image, 1),
                object(ObjectKind::Layer, 5),
                InvocationValue::Double(0.0),
            ],
        );

        assert_eq!(script.extract_leading(&invocation), 2);
        assert_eq!(ids(&script), vec![Some(Some(1)), Some(Some(5)), None]);
    }

    #[test]
    fn test_layer_value_fills_drawable_slot() {
        let mut script = script(vec![ArgValue::Image(None), ArgValue::Drawable(None)]);
        let invocation = Invocation::new(
            RunMode::NonInteractive,
            vec![object(ObjectKind::Image, 1), object(ObjectKind::Layer, 9)],
        );

        assert_eq!(script.extract_leading(&invocation), 2);
        assert_eq!(ids(&script), vec![Some(Some(1)), Some(Some(9))]);
    }

    #[test]
    fn test_item_requires_image() {
        let mut script = script(vec![ArgValue::Drawable(None), adjustment()]);
        let invocation = Invocation::new(
            RunMode::NonInteractive,
            vec![object(ObjectKind::Drawable, 3), InvocationValue::Double(1.0)],
        );

        assert_eq!(script.extract_leading(&invocation), 0);
    }

    #[test]
    fn test_display_only() {
        let mut script = script(vec![ArgValue::Display(None), adjustment()]);
        let invocation = Invocation::new(
            RunMode::Interactive,
            vec![object(ObjectKind::Display, 2), InvocationValue::Double(1.0)],
        );

        assert_eq!(script.extract_leading(&invocation), 1);
    }

    #[test]
    fn test_never_looks_past_third_slot() {
        let mut script = script(vec![
            ArgValue::Image(None),
            ArgValue::Drawable(None),
            ArgValue::Layer(None),
        ]);
        let invocation = Invocation::new(
            RunMode::Interactive,
            vec![
                object(ObjectKind::Image, 1),
                object(ObjectKind::Drawable, 2),
                object(ObjectKind::Layer, 3),
            ],
        );

        assert_eq!(script.extract_leading(&invocation), 2);
        assert_eq!(ids(&script)[2], Some(None));
    }

    #[test]
    fn test_short_invocation_and_empty_schema() {
        let mut empty = script(vec![]);
        let invocation = Invocation::new(RunMode::Interactive, vec![object(ObjectKind::Image, 1)]);
        assert_eq!(empty.extract_leading(&invocation), 0);

        let mut image_only = script(vec![ArgValue::Image(None)]);
        let bare = Invocation::new(RunMode::Interactive, vec![]);
        assert_eq!(image_only.extract_leading(&bare), 0);
    }

    #[test]
    fn test_absent_object_is_still_bound() {
        let mut script = script(vec![ArgValue::Image(Some(4))]);
        let invocation = Invocation::new(
            RunMode::Interactive,
            vec![InvocationValue::Object(ObjectRef::none(ObjectKind::Image))],
        );

        assert_eq!(script.extract_leading(&invocation), 1);
        assert_eq!(ids(&script), vec![Some(None)]);
    }
}
