//! Scripts and their ordered argument lists.

use std::fmt::{Display, Formatter};

use crate::value::{ArgType, ArgValue};

/// Menu label prefix that registers a script without any menu entry.
pub const NO_MENU: &str = "<None>";

/// One declared script argument.
///
/// The default and the current value are created from the same payload, so
/// they always hold the same [`ArgValue`] variant. The current value changes on
/// every invocation and on reset, the default never does.
#[derive(Debug, Clone, PartialEq)]
pub struct Argument {
    label: String,
    default_value: ArgValue,
    value: ArgValue,
}

impl Argument {
    pub fn new(label: impl Into<String>, default_value: ArgValue) -> Self {
        Self {
            label: label.into(),
            value: default_value.clone(),
            default_value,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn arg_type(&self) -> ArgType {
        self.default_value.arg_type()
    }

    pub fn default_value(&self) -> &ArgValue {
        &self.default_value
    }

    pub fn value(&self) -> &ArgValue {
        &self.value
    }

    pub(crate) fn value_mut(&mut self) -> &mut ArgValue {
        &mut self.value
    }

    /// Restores the current value from the default, see [`ArgValue::reset_to`].
    pub fn reset(&mut self, reset_ids: bool) {
        self.value.reset_to(&self.default_value, reset_ids);
    }
}

impl Display for Argument {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{} ({})", self.label, self.arg_type())
    }
}

/// A registered script: documentation plus its fixed, ordered argument list.
#[derive(Debug, Clone, PartialEq)]
pub struct Script {
    pub name: String,
    pub menu_label: String,
    pub blurb: String,
    pub author: String,
    pub copyright: String,
    pub date: String,
    pub image_types: String,
    args: Vec<Argument>,
}

impl Script {
    pub fn new(name: impl Into<String>, menu_label: impl Into<String>, args: Vec<Argument>) -> Self {
        Self {
            name: name.into(),
            menu_label: menu_label.into(),
            blurb: String::new(),
            author: String::new(),
            copyright: String::new(),
            date: String::new(),
            image_types: String::new(),
            args,
        }
    }

    pub fn with_documentation(
        mut self,
        blurb: impl Into<String>,
        author: impl Into<String>,
        copyright: impl Into<String>,
        date: impl Into<String>,
    ) -> Self {
        self.blurb = blurb.into();
        self.author = author.into();
        self.copyright = copyright.into();
        self.date = date.into();
        self
    }

    pub fn with_image_types(mut self, image_types: impl Into<String>) -> Self {
        self.image_types = image_types.into();
        self
    }

    pub fn args(&self) -> &[Argument] {
        &self.args
    }

    pub fn n_args(&self) -> usize {
        self.args.len()
    }

    pub(crate) fn args_mut(&mut self) -> &mut [Argument] {
        &mut self.args
    }

    /// The menu label to register, or `None` for scripts without a menu entry.
    pub fn menu_label(&self) -> Option<&str> {
        if self.menu_label.starts_with(NO_MENU) || self.menu_label.is_empty() {
            None
        } else {
            Some(&self.menu_label)
        }
    }

    /// Human readable title derived from the menu label.
    ///
    /// Mnemonics are stripped, a full menu path is reduced to its last
    /// component and a trailing ellipsis is cut off.
    ///
    /// # Examples
    ///
    /// ```
    /// use script_fu_core::script::Script;
    ///
    /// let script = Script::new("script-fu-blur", "<Image>/Filters/Blur/_Gaussian Blur...", vec![]);
    /// assert_eq!(script.title(), "Gaussian Blur");
    /// ```
    pub fn title(&self) -> String {
        let mut title = strip_mnemonics(&self.menu_label);

        if title.starts_with('<') {
            if let Some(slash) = title.rfind('/') {
                if slash + 1 < title.len() {
                    title = title[slash + 1..].to_string();
                }
            }
        }

        for ellipsis in ["...", "\u{2026}"] {
            if let Some(stripped) = title.strip_suffix(ellipsis) {
                title.truncate(stripped.len());
                break;
            }
        }

        title
    }

    /// Restores declared defaults. Identity arguments are only restored when
    /// `reset_ids` is set, everything else always is.
    pub fn reset(&mut self, reset_ids: bool) {
        for arg in &mut self.args {
            arg.reset(reset_ids);
        }
    }
}

impl Display for Script {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        if self.blurb.is_empty() {
            formatter.write_str(&self.name)
        } else {
            write!(formatter, "{} ({})", self.name, self.blurb)
        }
    }
}

/// Removes `_` mnemonic markers. `__` stands for a literal underscore and
/// `(_X)` suffixes are dropped entirely.
fn strip_mnemonics(label: &str) -> String {
    let chars: Vec<char> = label.chars().collect();
    let mut stripped = String::with_capacity(label.len());
    let mut i = 0;

    while i < chars.len() {
        match chars[i] {
            '_' => {
                if chars.get(i + 1) == Some(&'_') {
                    stripped.push('_');
                    i += 1;
                }
            }
            '(' if chars.get(i + 1) == Some(&'_') && chars.get(i + 3) == Some(&')') => {
                i += 3;
            }
            c => stripped.push(c),
        }
        i += 1;
    }

    stripped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::{Adjustment, AdjustmentKind, OptionChoice, Rgb};

    fn script_with_label(menu_label: &str) -> Script {
        Script::new("script-fu-test", menu_label, vec![])
    }

    fn adjustment(value: f64) -> ArgValue {
        ArgValue::Adjustment(Adjustment {
            value,
            lower: 0.0,
            upper: 100.0,
            step: 1.0,
            page: 10.0,
            digits: 0,
            kind: AdjustmentKind::Spinner,
        })
    }

    #[test]
    fn test_title_from_menu_path() {
        let script = script_with_label("<Image>/Filters/Blur/Gaussian Blur...");
        assert_eq!(script.title(), "Gaussian Blur");
    }

    #[test]
    fn test_title_strips_unicode_ellipsis() {
        let script = script_with_label("<Image>/Filters/Render/_Plasma\u{2026}");
        assert_eq!(script.title(), "Plasma");
    }

    #[test]
    fn test_title_keeps_plain_label() {
        let script = script_with_label("Drop _Shadow");
        assert_eq!(script.title(), "Drop Shadow");
    }

    #[test]
    fn test_title_keeps_label_without_path_prefix() {
        let script = script_with_label("Filters/Blur");
        assert_eq!(script.title(), "Filters/Blur");
    }

    #[test]
    fn test_title_ignores_trailing_slash() {
        let script = script_with_label("<Image>/Filters/");
        assert_eq!(script.title(), "<Image>/Filters/");
    }

    #[test]
    fn test_strip_mnemonics() {
        assert_eq!(strip_mnemonics("_File"), "File");
        assert_eq!(strip_mnemonics("snake__case"), "snake_case");
        assert_eq!(strip_mnemonics("ファイル(_F)"), "ファイル");
    }

    #[test]
    fn test_menu_label_suppression() {
        assert_eq!(script_with_label("<None>").menu_label(), None);
        assert_eq!(script_with_label("<None>/Hidden").menu_label(), None);
        assert_eq!(script_with_label("").menu_label(), None);
        assert_eq!(
            script_with_label("<Image>/Filters/Foo").menu_label(),
            Some("<Image>/Filters/Foo")
        );
    }

    #[test]
    fn test_new_argument_starts_at_default() {
        let arg = Argument::new("Radius", adjustment(5.0));
        assert_eq!(arg.value(), arg.default_value());
        assert_eq!(arg.arg_type(), ArgType::Adjustment);
        assert_eq!(arg.to_string(), "Radius (adjustment)");
    }

    #[test]
    fn test_reset_keeps_identity_values_without_flag() {
        let mut script = Script::new(
            "script-fu-test",
            "<None>",
            vec![
                Argument::new("Image", ArgValue::Image(None)),
                Argument::new("Layer", ArgValue::Layer(None)),
                Argument::new("Flatten", ArgValue::Toggle(true)),
                Argument::new("Text", ArgValue::String(Some("hello".into()))),
                Argument::new("Radius", adjustment(5.0)),
                Argument::new("Color", ArgValue::Color(Rgb::from_u8(0, 0, 0))),
                Argument::new(
                    "Mode",
                    ArgValue::Option(OptionChoice {
                        history: 0,
                        choices: vec!["Fast".into(), "Slow".into()],
                    }),
                ),
            ],
        );

        let args = script.args_mut();
        args[0].value_mut().set_object_id(Some(7));
        args[1].value_mut().set_object_id(Some(3));
        *args[2].value_mut() = ArgValue::Toggle(false);
        *args[3].value_mut() = ArgValue::String(Some("changed".into()));
        *args[4].value_mut() = adjustment(42.0);
        *args[5].value_mut() = ArgValue::Color(Rgb::from_u8(9, 9, 9));
        if let ArgValue::Option(option) = args[6].value_mut() {
            option.history = 1;
        }

        script.reset(false);

        assert_eq!(script.args()[0].value(), &ArgValue::Image(Some(7)));
        assert_eq!(script.args()[1].value(), &ArgValue::Layer(Some(3)));
        for arg in &script.args()[2..] {
            assert_eq!(arg.value(), arg.default_value());
        }

        script.reset(true);
        for arg in script.args() {
            assert_eq!(arg.value(), arg.default_value());
        }
    }
}
