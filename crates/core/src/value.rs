//! Argument value model.
//!
//! Every declared script argument carries an [`ArgValue`], a tagged sum over the
//! argument kinds. Token rendering and default restoring are exhaustive matches
//! over the variants.

use std::fmt::{Display, Formatter, Write};

/// Session-scoped identifier of a host object (image, layer, display, ...).
///
/// Only meaningful while the host session that issued it is alive.
pub type ObjectId = i32;

/// Token written for an identity argument that references no object.
pub const NO_OBJECT: ObjectId = -1;

/// Closed set of argument kinds, without payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArgType {
    Image,
    Drawable,
    Layer,
    Channel,
    Vectors,
    Display,
    Color,
    Toggle,
    Value,
    String,
    Text,
    Adjustment,
    Filename,
    Dirname,
    Font,
    Palette,
    Pattern,
    Brush,
    Gradient,
    Option,
    Enum,
}

impl ArgType {
    /// Base machine name and nickname used for generated procedure parameters.
    pub fn param_name(self) -> (&'static str, &'static str) {
        match self {
            ArgType::Image => ("image", "Image"),
            ArgType::Drawable => ("drawable", "Drawable"),
            ArgType::Layer => ("layer", "Layer"),
            ArgType::Channel => ("channel", "Channel"),
            ArgType::Vectors => ("vectors", "Vectors"),
            ArgType::Display => ("display", "Display"),
            ArgType::Color => ("color", "Color"),
            ArgType::Toggle => ("toggle", "Toggle"),
            ArgType::Value => ("value", "Value"),
            ArgType::String => ("string", "String"),
            ArgType::Text => ("text", "Text"),
            ArgType::Adjustment => ("adjustment", "Adjustment"),
            ArgType::Filename => ("filename", "Filename"),
            ArgType::Dirname => ("dirname", "Dirname"),
            ArgType::Font => ("font", "Font"),
            ArgType::Palette => ("palette", "Palette"),
            ArgType::Pattern => ("pattern", "Pattern"),
            ArgType::Brush => ("brush", "Brush"),
            ArgType::Gradient => ("gradient", "Gradient"),
            ArgType::Option => ("option", "Option"),
            ArgType::Enum => ("enum", "Enum"),
        }
    }

    /// Whether values of this kind are host session identifiers.
    pub fn is_identity(self) -> bool {
        matches!(
            self,
            ArgType::Image
                | ArgType::Drawable
                | ArgType::Layer
                | ArgType::Channel
                | ArgType::Vectors
                | ArgType::Display
        )
    }
}

impl Display for ArgType {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.param_name().0)
    }
}

/// RGB colour with components in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Rgb {
    pub fn from_u8(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: f64::from(r) / 255.0,
            g: f64::from(g) / 255.0,
            b: f64::from(b) / 255.0,
        }
    }

    /// Components as bytes, clamped and rounded to the nearest step.
    pub fn to_u8(self) -> (u8, u8, u8) {
        fn channel(component: f64) -> u8 {
            // Clamped to 0..=255 before the cast.
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let byte = (component.clamp(0.0, 1.0) * 255.0).round() as u8;
            byte
        }

        (channel(self.r), channel(self.g), channel(self.b))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdjustmentKind {
    Slider,
    Spinner,
}

/// Numeric argument. Only `value` takes part in serialization; the bounds are
/// for whoever builds a widget for it.
#[derive(Debug, Clone, PartialEq)]
pub struct Adjustment {
    pub value: f64,
    pub lower: f64,
    pub upper: f64,
    pub step: f64,
    pub page: f64,
    pub digits: u32,
    pub kind: AdjustmentKind,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Brush {
    pub name: String,
    pub opacity: f64,
    pub spacing: i32,
    pub paint_mode: i32,
}

/// Selected position ("history") within a fixed list of labels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionChoice {
    pub history: usize,
    pub choices: Vec<String>,
}

impl OptionChoice {
    pub fn contains(&self, index: i32) -> bool {
        usize::try_from(index).is_ok_and(|index| index < self.choices.len())
    }

    pub fn selected_label(&self) -> Option<&str> {
        self.choices.get(self.history).map(String::as_str)
    }
}

/// Selected value of a named host enumeration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumChoice {
    pub type_name: String,
    pub history: i32,
}

/// Payload of one script argument. Default and current value of an argument
/// always hold the same variant.
#[derive(Debug, Clone, PartialEq)]
pub enum ArgValue {
    Image(Option<ObjectId>),
    Drawable(Option<ObjectId>),
    Layer(Option<ObjectId>),
    Channel(Option<ObjectId>),
    Vectors(Option<ObjectId>),
    Display(Option<ObjectId>),
    Color(Rgb),
    Toggle(bool),
    /// Literal inserted into the command unescaped.
    Value(Option<String>),
    String(Option<String>),
    /// Multi-line string, identical to `String` for the model.
    Text(Option<String>),
    Adjustment(Adjustment),
    Filename(Option<String>),
    Dirname(Option<String>),
    Font(String),
    Palette(String),
    Pattern(String),
    Brush(Brush),
    Gradient(String),
    Option(OptionChoice),
    Enum(EnumChoice),
}

impl ArgValue {
    pub fn arg_type(&self) -> ArgType {
        match self {
            ArgValue::Image(_) => ArgType::Image,
            ArgValue::Drawable(_) => ArgType::Drawable,
            ArgValue::Layer(_) => ArgType::Layer,
            ArgValue::Channel(_) => ArgType::Channel,
            ArgValue::Vectors(_) => ArgType::Vectors,
            ArgValue::Display(_) => ArgType::Display,
            ArgValue::Color(_) => ArgType::Color,
            ArgValue::Toggle(_) => ArgType::Toggle,
            ArgValue::Value(_) => ArgType::Value,
            ArgValue::String(_) => ArgType::String,
            ArgValue::Text(_) => ArgType::Text,
            ArgValue::Adjustment(_) => ArgType::Adjustment,
            ArgValue::Filename(_) => ArgType::Filename,
            ArgValue::Dirname(_) => ArgType::Dirname,
            ArgValue::Font(_) => ArgType::Font,
            ArgValue::Palette(_) => ArgType::Palette,
            ArgValue::Pattern(_) => ArgType::Pattern,
            ArgValue::Brush(_) => ArgType::Brush,
            ArgValue::Gradient(_) => ArgType::Gradient,
            ArgValue::Option(_) => ArgType::Option,
            ArgValue::Enum(_) => ArgType::Enum,
        }
    }

    /// The object id of an identity value, `None` for every other kind.
    pub fn object_id(&self) -> Option<Option<ObjectId>> {
        match self {
            ArgValue::Image(id)
            | ArgValue::Drawable(id)
            | ArgValue::Layer(id)
            | ArgValue::Channel(id)
            | ArgValue::Vectors(id)
            | ArgValue::Display(id) => Some(*id),
            _ => None,
        }
    }

    /// Stores `id` if this is an identity value. Returns whether it was stored.
    pub fn set_object_id(&mut self, id: Option<ObjectId>) -> bool {
        match self {
            ArgValue::Image(slot)
            | ArgValue::Drawable(slot)
            | ArgValue::Layer(slot)
            | ArgValue::Channel(slot)
            | ArgValue::Vectors(slot)
            | ArgValue::Display(slot) => {
                *slot = id;
                true
            }
            _ => false,
        }
    }

    /// Appends the re-evaluable token for this value to `out`.
    pub fn write_token(&self, out: &mut String) {
        match self {
            ArgValue::Image(id)
            | ArgValue::Drawable(id)
            | ArgValue::Layer(id)
            | ArgValue::Channel(id)
            | ArgValue::Vectors(id)
            | ArgValue::Display(id) => write_object_id(out, *id),
            ArgValue::Color(color) => write_color(out, *color),
            ArgValue::Toggle(toggle) => write_toggle(out, *toggle),
            ArgValue::Value(text) => write_literal(out, text.as_deref()),
            ArgValue::String(text)
            | ArgValue::Text(text)
            | ArgValue::Filename(text)
            | ArgValue::Dirname(text) => write_quoted(out, text.as_deref().unwrap_or_default()),
            ArgValue::Adjustment(adjustment) => out.push_str(&format_float(adjustment.value)),
            ArgValue::Font(name)
            | ArgValue::Palette(name)
            | ArgValue::Pattern(name)
            | ArgValue::Gradient(name) => write_quoted(out, name),
            ArgValue::Brush(brush) => {
                out.push_str("'(");
                write_quoted(out, &brush.name);
                let _ = write!(
                    out,
                    " {} {} {})",
                    format_float(brush.opacity),
                    brush.spacing,
                    brush.paint_mode
                );
            }
            ArgValue::Option(option) => {
                let _ = write!(out, "{}", option.history);
            }
            ArgValue::Enum(choice) => {
                let _ = write!(out, "{}", choice.history);
            }
        }
    }

    /// Restores this value from `default`.
    ///
    /// Identity values are only restored when `reset_ids` is set; every other
    /// kind is restored unconditionally.
    pub fn reset_to(&mut self, default: &ArgValue, reset_ids: bool) {
        debug_assert_eq!(self.arg_type(), default.arg_type());

        match self {
            ArgValue::Image(_)
            | ArgValue::Drawable(_)
            | ArgValue::Layer(_)
            | ArgValue::Channel(_)
            | ArgValue::Vectors(_)
            | ArgValue::Display(_) => {
                if reset_ids {
                    self.clone_from(default);
                }
            }
            ArgValue::Color(_)
            | ArgValue::Toggle(_)
            | ArgValue::Value(_)
            | ArgValue::String(_)
            | ArgValue::Text(_)
            | ArgValue::Adjustment(_)
            | ArgValue::Filename(_)
            | ArgValue::Dirname(_)
            | ArgValue::Font(_)
            | ArgValue::Palette(_)
            | ArgValue::Pattern(_)
            | ArgValue::Brush(_)
            | ArgValue::Gradient(_)
            | ArgValue::Option(_)
            | ArgValue::Enum(_) => self.clone_from(default),
        }
    }
}

pub(crate) fn write_object_id(out: &mut String, id: Option<ObjectId>) {
    let _ = write!(out, "{}", id.unwrap_or(NO_OBJECT));
}

pub(crate) fn write_color(out: &mut String, color: Rgb) {
    let (r, g, b) = color.to_u8();
    let _ = write!(out, "'({r} {g} {b})");
}

pub(crate) fn write_toggle(out: &mut String, toggle: bool) {
    out.push_str(if toggle { "TRUE" } else { "FALSE" });
}

/// Raw literal, inserted as is. A missing or blank literal still has to
/// occupy its token, so it renders as the empty string `""`.
pub(crate) fn write_literal(out: &mut String, text: Option<&str>) {
    match text {
        Some(text) if !text.trim().is_empty() => out.push_str(text),
        _ => out.push_str("\"\""),
    }
}

pub(crate) fn write_quoted(out: &mut String, text: &str) {
    out.push('"');
    out.push_str(&escape(text));
    out.push('"');
}

/// Escapes backslashes and double quotes so `text` can sit inside a string
/// literal of the interpreter. Defined for every input.
pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());

    for c in text.chars() {
        if c == '\\' || c == '"' {
            escaped.push('\\');
        }
        escaped.push(c);
    }

    escaped
}

/// Fixed six-digit decimal rendering. Rust formatting never consults the
/// process locale, so the separator is always `.`.
///
/// NaN and infinities are not numeric literals of the interpreter; declarations
/// and the command line reject them before they reach a script.
pub fn format_float(value: f64) -> String {
    format!("{value:.6}")
}
