//! Script registration records as read from declaration files.
//!
//! A declaration lists the script documentation and one entry per argument,
//! tagged by `type`:
//!
//! ```yaml
//! - name: "script-fu-drop-shadow"
//!   menu_label: "<Image>/Filters/Light and Shadow/_Drop Shadow..."
//!   blurb: "Add a drop shadow to the selected region"
//!   image_types: "RGB*"
//!   args:
//!     - type: image
//!       label: "Image"
//!     - type: adjustment
//!       label: "Offset X"
//!       default: 4
//!       lower: -4096
//!       upper: 4096
//!       step: 1
//!     - type: color
//!       label: "Color"
//!       default: [0, 0, 0]
//! ```

use serde::{Deserialize, Serialize};

use crate::error::Error::{
    EmptyName, EmptyOptionChoices, NameWithDelimiter, NameWithWhitespace, NonFiniteDefault,
    NumericName,
};
use crate::error::{Error, Result};
use crate::script::{Argument, Script};
use crate::value::{
    Adjustment, AdjustmentKind, ArgValue, Brush, EnumChoice, ObjectId, OptionChoice, Rgb,
};

fn default_page() -> f64 {
    10.0
}

fn default_step() -> f64 {
    1.0
}

fn default_opacity() -> f64 {
    100.0
}

fn default_spacing() -> i32 {
    10
}

/// Characters that would end or split the call expression a name heads.
const NAME_DELIMITERS: [char; 6] = ['(', ')', '"', '\'', ';', '`'];

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ArgumentDeclaration {
    Image {
        label: String,
        #[serde(default)]
        default: Option<ObjectId>,
    },
    Drawable {
        label: String,
        #[serde(default)]
        default: Option<ObjectId>,
    },
    Layer {
        label: String,
        #[serde(default)]
        default: Option<ObjectId>,
    },
    Channel {
        label: String,
        #[serde(default)]
        default: Option<ObjectId>,
    },
    Vectors {
        label: String,
        #[serde(default)]
        default: Option<ObjectId>,
    },
    Display {
        label: String,
        #[serde(default)]
        default: Option<ObjectId>,
    },
    Color {
        label: String,
        default: (u8, u8, u8),
    },
    Toggle {
        label: String,
        #[serde(default)]
        default: bool,
    },
    Value {
        label: String,
        #[serde(default)]
        default: Option<String>,
    },
    String {
        label: String,
        #[serde(default)]
        default: Option<String>,
    },
    Text {
        label: String,
        #[serde(default)]
        default: Option<String>,
    },
    Adjustment {
        label: String,
        default: f64,
        lower: f64,
        upper: f64,
        #[serde(default = "default_step")]
        step: f64,
        #[serde(default = "default_page")]
        page: f64,
        #[serde(default)]
        digits: u32,
        #[serde(default)]
        slider: bool,
    },
    Filename {
        label: String,
        #[serde(default)]
        default: Option<String>,
    },
    Dirname {
        label: String,
        #[serde(default)]
        default: Option<String>,
    },
    Font {
        label: String,
        default: String,
    },
    Palette {
        label: String,
        default: String,
    },
    Pattern {
        label: String,
        default: String,
    },
    Brush {
        label: String,
        name: String,
        #[serde(default = "default_opacity")]
        opacity: f64,
        #[serde(default = "default_spacing")]
        spacing: i32,
        #[serde(default)]
        paint_mode: i32,
    },
    Gradient {
        label: String,
        default: String,
    },
    Option {
        label: String,
        choices: Vec<String>,
        #[serde(default)]
        default: usize,
    },
    Enum {
        label: String,
        type_name: String,
        #[serde(default)]
        default: i32,
    },
}

impl ArgumentDeclaration {
    pub fn label(&self) -> &str {
        match self {
            ArgumentDeclaration::Image { label, .. }
            | ArgumentDeclaration::Drawable { label, .. }
            | ArgumentDeclaration::Layer { label, .. }
            | ArgumentDeclaration::Channel { label, .. }
            | ArgumentDeclaration::Vectors { label, .. }
            | ArgumentDeclaration::Display { label, .. }
            | ArgumentDeclaration::Color { label, .. }
            | ArgumentDeclaration::Toggle { label, .. }
            | ArgumentDeclaration::Value { label, .. }
            | ArgumentDeclaration::String { label, .. }
            | ArgumentDeclaration::Text { label, .. }
            | ArgumentDeclaration::Adjustment { label, .. }
            | ArgumentDeclaration::Filename { label, .. }
            | ArgumentDeclaration::Dirname { label, .. }
            | ArgumentDeclaration::Font { label, .. }
            | ArgumentDeclaration::Palette { label, .. }
            | ArgumentDeclaration::Pattern { label, .. }
            | ArgumentDeclaration::Brush { label, .. }
            | ArgumentDeclaration::Gradient { label, .. }
            | ArgumentDeclaration::Option { label, .. }
            | ArgumentDeclaration::Enum { label, .. } => label,
        }
    }

    fn default_value(&self, script: &str) -> Result<ArgValue> {
        let value = match self {
            ArgumentDeclaration::Image { default, .. } => ArgValue::Image(*default),
            ArgumentDeclaration::Drawable { default, .. } => ArgValue::Drawable(*default),
            ArgumentDeclaration::Layer { default, .. } => ArgValue::Layer(*default),
            ArgumentDeclaration::Channel { default, .. } => ArgValue::Channel(*default),
            ArgumentDeclaration::Vectors { default, .. } => ArgValue::Vectors(*default),
            ArgumentDeclaration::Display { default, .. } => ArgValue::Display(*default),
            ArgumentDeclaration::Color {
                default: (r, g, b), ..
            } => ArgValue::Color(Rgb::from_u8(*r, *g, *b)),
            ArgumentDeclaration::Toggle { default, .. } => ArgValue::Toggle(*default),
            ArgumentDeclaration::Value { default, .. } => ArgValue::Value(default.clone()),
            ArgumentDeclaration::String { default, .. } => ArgValue::String(default.clone()),
            ArgumentDeclaration::Text { default, .. } => ArgValue::Text(default.clone()),
            ArgumentDeclaration::Adjustment {
                label,
                default,
                lower,
                upper,
                step,
                page,
                digits,
                slider,
            } => {
                if !default.is_finite() {
                    return Err(NonFiniteDefault(script.to_string(), label.clone()));
                }

                ArgValue::Adjustment(Adjustment {
                    value: *default,
                    lower: *lower,
                    upper: *upper,
                    step: *step,
                    page: *page,
                    digits: *digits,
                    kind: if *slider {
                        AdjustmentKind::Slider
                    } else {
                        AdjustmentKind::Spinner
                    },
                })
            }
            ArgumentDeclaration::Filename { default, .. } => ArgValue::Filename(default.clone()),
            ArgumentDeclaration::Dirname { default, .. } => ArgValue::Dirname(default.clone()),
            ArgumentDeclaration::Font { default, .. } => ArgValue::Font(default.clone()),
            ArgumentDeclaration::Palette { default, .. } => ArgValue::Palette(default.clone()),
            ArgumentDeclaration::Pattern { default, .. } => ArgValue::Pattern(default.clone()),
            ArgumentDeclaration::Brush {
                label,
                name,
                opacity,
                spacing,
                paint_mode,
            } => {
                if !opacity.is_finite() {
                    return Err(NonFiniteDefault(script.to_string(), label.clone()));
                }

                ArgValue::Brush(Brush {
                    name: name.clone(),
                    opacity: *opacity,
                    spacing: *spacing,
                    paint_mode: *paint_mode,
                })
            }
            ArgumentDeclaration::Gradient { default, .. } => ArgValue::Gradient(default.clone()),
            ArgumentDeclaration::Option {
                label,
                choices,
                default,
            } => {
                if choices.is_empty() {
                    return Err(EmptyOptionChoices(script.to_string(), label.clone()));
                }

                if *default >= choices.len() {
                    return Err(Error::OptionOutOfRange {
                        label: label.clone(),
                        index: i32::try_from(*default).unwrap_or(i32::MAX),
                        choices: choices.len(),
                    });
                }

                ArgValue::Option(OptionChoice {
                    history: *default,
                    choices: choices.clone(),
                })
            }
            ArgumentDeclaration::Enum {
                type_name, default, ..
            } => ArgValue::Enum(EnumChoice {
                type_name: type_name.clone(),
                history: *default,
            }),
        };

        Ok(value)
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct ScriptDeclaration {
    pub name: String,
    pub menu_label: String,
    #[serde(default)]
    pub blurb: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub copyright: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub image_types: String,
    #[serde(default)]
    pub args: Vec<ArgumentDeclaration>,
}

impl ScriptDeclaration {
    /// Builds the script, with every current value equal to its default.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is invalid or an option declaration has no
    /// choices or a default outside them.
    pub fn into_script(self) -> Result<Script> {
        validate_name(&self.name)?;

        let args = self
            .args
            .iter()
            .map(|declaration| {
                Ok(Argument::new(
                    declaration.label(),
                    declaration.default_value(&self.name)?,
                ))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Script::new(self.name, self.menu_label, args)
            .with_documentation(self.blurb, self.author, self.copyright, self.date)
            .with_image_types(self.image_types))
    }
}

/// Script names become procedure names and the head of history commands.
///
/// # Errors
///
/// Returns an error if the name is empty, purely numeric, or contains
/// whitespace or an expression delimiter.
pub fn validate_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(EmptyName);
    }

    if name.chars().any(char::is_whitespace) {
        return Err(NameWithWhitespace(name.to_string()));
    }

    if let Some(delimiter) = name.chars().find(|c| NAME_DELIMITERS.contains(c)) {
        return Err(NameWithDelimiter(name.to_string(), delimiter));
    }

    if name.chars().all(|c| c.is_numeric()) {
        return Err(NumericName(name.to_string()));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::ArgType;

    #[test]
    fn test_validate_name() {
        assert!(validate_name("script-fu-blur").is_ok());
        assert!(matches!(validate_name(""), Err(EmptyName)));
        assert!(matches!(validate_name("has space"), Err(NameWithWhitespace(_))));
        assert!(matches!(validate_name("tab\tname"), Err(NameWithWhitespace(_))));
        assert!(matches!(validate_name("123"), Err(NumericName(_))));
        assert!(matches!(validate_name("a)b"), Err(NameWithDelimiter(_, ')'))));
        assert!(matches!(validate_name("(a"), Err(NameWithDelimiter(_, '('))));
        assert!(matches!(validate_name("x\""), Err(NameWithDelimiter(_, '"'))));
        assert!(matches!(validate_name("it's"), Err(NameWithDelimiter(_, '\''))));
        assert!(matches!(validate_name("a;b"), Err(NameWithDelimiter(_, ';'))));
        assert!(validate_name("script-fu-drop_shadow-2.10").is_ok());
    }

    #[test]
    fn test_parse_declaration_yaml() {
        let yaml = r#"
name: "script-fu-shadow"
menu_label: "<Image>/Filters/Light and Shadow/_Drop Shadow..."
blurb: "Add a drop shadow"
image_types: "RGB*"
args:
  - type: image
    label: "Image"
  - type: drawable
    label: "Drawable"
  - type: adjustment
    label: "Offset X"
    default: 4
    lower: -4096
    upper: 4096
  - type: color
    label: "Color"
    default: [0, 0, 0]
  - type: option
    label: "Mode"
    choices: ["Soft", "Hard"]
    default: 1
  - type: brush
    label: "Brush"
    name: "Circle (11)"
  - type: enum
    label: "Interpolation"
    type_name: "GimpInterpolationType"
    default: 2
  - type: string
    label: "Name"
"#;

        let declaration: ScriptDeclaration = serde_yaml::from_str(yaml).unwrap();
        let script = declaration.into_script().unwrap();

        assert_eq!(script.name, "script-fu-shadow");
        assert_eq!(script.image_types, "RGB*");
        assert_eq!(script.n_args(), 8);

        let types: Vec<ArgType> = script.args().iter().map(|arg| arg.arg_type()).collect();
        assert_eq!(
            types,
            vec![
                ArgType::Image,
                ArgType::Drawable,
                ArgType::Adjustment,
                ArgType::Color,
                ArgType::Option,
                ArgType::Brush,
                ArgType::Enum,
                ArgType::String,
            ]
        );

        assert!(matches!(
            script.args()[2].value(),
            ArgValue::Adjustment(Adjustment {
                value,
                step,
                kind: AdjustmentKind::Spinner,
                ..
            }) if *value == 4.0 && *step == 1.0
        ));
        assert!(matches!(
            script.args()[5].value(),
            ArgValue::Brush(Brush { opacity, spacing: 10, paint_mode: 0, .. }) if *opacity == 100.0
        ));
        assert_eq!(script.args()[7].value(), &ArgValue::String(None));
        assert_eq!(
            script.command(),
            "(script-fu-shadow -1 -1 4.000000 '(0 0 0) 1 '(\"Circle (11)\" 100.000000 10 0) 2 \"\")"
        );
    }

    #[test]
    fn test_option_default_out_of_range() {
        let declaration = ScriptDeclaration {
            name: "script-fu-opt".into(),
            menu_label: "<None>".into(),
            blurb: String::new(),
            author: String::new(),
            copyright: String::new(),
            date: String::new(),
            image_types: String::new(),
            args: vec![ArgumentDeclaration::Option {
                label: "Mode".into(),
                choices: vec!["Only".into()],
                default: 1,
            }],
        };

        assert!(matches!(
            declaration.into_script(),
            Err(Error::OptionOutOfRange {
                index: 1,
                choices: 1,
                ..
            })
        ));
    }

    #[test]
    fn test_non_finite_adjustment_default() {
        for default in [".nan", ".inf", "-.inf"] {
            let yaml = format!(
                r#"
name: "script-fu-adjust"
menu_label: "<None>"
args:
  - type: adjustment
    label: "Radius"
    default: {default}
    lower: 0
    upper: 10
"#
            );

            let declaration: ScriptDeclaration = serde_yaml::from_str(&yaml).unwrap();
            assert!(matches!(
                declaration.into_script(),
                Err(NonFiniteDefault(_, label)) if label == "Radius"
            ));
        }
    }

    #[test]
    fn test_option_without_choices() {
        let declaration = ScriptDeclaration {
            name: "script-fu-opt".into(),
            menu_label: "<None>".into(),
            blurb: String::new(),
            author: String::new(),
            copyright: String::new(),
            date: String::new(),
            image_types: String::new(),
            args: vec![ArgumentDeclaration::Option {
                label: "Mode".into(),
                choices: vec![],
                default: 0,
            }],
        };

        assert!(matches!(
            declaration.into_script(),
            Err(EmptyOptionChoices(_, _))
        ));
    }

    #[test]
    fn test_unknown_type_is_rejected() {
        let yaml = r#"
name: "script-fu-bad"
menu_label: "<None>"
args:
  - type: spline
    label: "Curve"
"#;
        let result: serde_yaml::Result<ScriptDeclaration> = serde_yaml::from_str(yaml);
        assert!(result.is_err());
    }
}
