//! Runtime-typed values passed by the host when a script procedure is called.
//!
//! Position 0 of an [`Invocation`] is always the run mode; positions
//! `1..=n_args` map one to one onto the declared arguments.

use log::debug;

use crate::error::{Error, Result};
use crate::script::Script;
use crate::value::{ArgType, ArgValue, ObjectId, Rgb};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunMode {
    #[default]
    Interactive,
    NonInteractive,
    WithLastVals,
}

/// Runtime class of a host object reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectKind {
    Display,
    Image,
    Drawable,
    Layer,
    Channel,
    Vectors,
}

impl ObjectKind {
    /// Whether an object of this class can fill a slot declared as `arg_type`.
    /// Layers and channels are drawables.
    pub fn satisfies(self, arg_type: ArgType) -> bool {
        matches!(
            (self, arg_type),
            (ObjectKind::Display, ArgType::Display)
                | (ObjectKind::Image, ArgType::Image)
                | (
                    ObjectKind::Drawable | ObjectKind::Layer | ObjectKind::Channel,
                    ArgType::Drawable
                )
                | (ObjectKind::Layer, ArgType::Layer)
                | (ObjectKind::Channel, ArgType::Channel)
                | (ObjectKind::Vectors, ArgType::Vectors)
        )
    }

    pub fn for_arg_type(arg_type: ArgType) -> Option<Self> {
        match arg_type {
            ArgType::Display => Some(ObjectKind::Display),
            ArgType::Image => Some(ObjectKind::Image),
            ArgType::Drawable => Some(ObjectKind::Drawable),
            ArgType::Layer => Some(ObjectKind::Layer),
            ArgType::Channel => Some(ObjectKind::Channel),
            ArgType::Vectors => Some(ObjectKind::Vectors),
            ArgType::Color
            | ArgType::Toggle
            | ArgType::Value
            | ArgType::String
            | ArgType::Text
            | ArgType::Adjustment
            | ArgType::Filename
            | ArgType::Dirname
            | ArgType::Font
            | ArgType::Palette
            | ArgType::Pattern
            | ArgType::Brush
            | ArgType::Gradient
            | ArgType::Option
            | ArgType::Enum => None,
        }
    }
}

/// A reference to a host object. The id is absent when the value holds no
/// object, the runtime class is still known.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObjectRef {
    pub kind: ObjectKind,
    pub id: Option<ObjectId>,
}

impl ObjectRef {
    pub fn new(kind: ObjectKind, id: ObjectId) -> Self {
        Self { kind, id: Some(id) }
    }

    pub fn none(kind: ObjectKind) -> Self {
        Self { kind, id: None }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum InvocationValue {
    Object(ObjectRef),
    Color(Rgb),
    Boolean(bool),
    String(Option<String>),
    Double(f64),
    Int(i32),
}

impl InvocationValue {
    /// The object reference if this value can fill a slot declared as
    /// `arg_type`.
    pub fn object_for(&self, arg_type: ArgType) -> Option<ObjectRef> {
        match self {
            InvocationValue::Object(object) if object.kind.satisfies(arg_type) => Some(*object),
            _ => None,
        }
    }
}

impl From<&ArgValue> for InvocationValue {
    fn from(value: &ArgValue) -> Self {
        let object = |kind, id| InvocationValue::Object(ObjectRef { kind, id });

        match value {
            ArgValue::Image(id) => object(ObjectKind::Image, *id),
            ArgValue::Drawable(id) => object(ObjectKind::Drawable, *id),
            ArgValue::Layer(id) => object(ObjectKind::Layer, *id),
            ArgValue::Channel(id) => object(ObjectKind::Channel, *id),
            ArgValue::Vectors(id) => object(ObjectKind::Vectors, *id),
            ArgValue::Display(id) => object(ObjectKind::Display, *id),
            ArgValue::Color(color) => InvocationValue::Color(*color),
            ArgValue::Toggle(toggle) => InvocationValue::Boolean(*toggle),
            ArgValue::Value(text)
            | ArgValue::String(text)
            | ArgValue::Text(text)
            | ArgValue::Filename(text)
            | ArgValue::Dirname(text) => InvocationValue::String(text.clone()),
            ArgValue::Adjustment(adjustment) => InvocationValue::Double(adjustment.value),
            ArgValue::Font(name)
            | ArgValue::Palette(name)
            | ArgValue::Pattern(name)
            | ArgValue::Gradient(name) => InvocationValue::String(Some(name.clone())),
            ArgValue::Brush(brush) => InvocationValue::String(Some(brush.name.clone())),
            ArgValue::Option(option) => {
                InvocationValue::Int(i32::try_from(option.history).unwrap_or(i32::MAX))
            }
            ArgValue::Enum(choice) => InvocationValue::Int(choice.history),
        }
    }
}

/// Positional values of one procedure call.
#[derive(Debug, Clone, PartialEq)]
pub struct Invocation {
    pub run_mode: RunMode,
    pub values: Vec<InvocationValue>,
}

#[allow(clippy::len_without_is_empty)]
impl Invocation {
    pub fn new(run_mode: RunMode, values: Vec<InvocationValue>) -> Self {
        Self { run_mode, values }
    }

    /// Number of positions including the leading run mode.
    pub fn len(&self) -> usize {
        self.values.len() + 1
    }

    /// The value at `position`, where position 0 is the run mode and thus
    /// never a value.
    pub fn value(&self, position: usize) -> Option<&InvocationValue> {
        position
            .checked_sub(1)
            .and_then(|index| self.values.get(index))
    }
}

impl Script {
    /// Exports the current values as an invocation.
    pub fn to_invocation(&self, run_mode: RunMode) -> Invocation {
        Invocation::new(
            run_mode,
            self.args()
                .iter()
                .map(|arg| InvocationValue::from(arg.value()))
                .collect(),
        )
    }

    /// Commits the invocation values for every argument from index `consumed`
    /// on into the current values. The leading `consumed` arguments are
    /// expected to have been bound by [`Script::extract_leading`].
    ///
    /// Every value is checked before any is committed, so on error the script
    /// keeps the values it had before the call.
    ///
    /// # Errors
    ///
    /// Returns an error if the invocation is shorter than the schema, a value
    /// has the wrong runtime type for its slot, or an option index is out of
    /// range.
    pub fn apply_invocation(&mut self, invocation: &Invocation, consumed: usize) -> Result<()> {
        if invocation.len() < self.n_args() + 1 {
            return Err(Error::InvocationTooShort {
                script: self.name.clone(),
                expected: self.n_args() + 1,
                found: invocation.len(),
            });
        }

        debug!("Applying invocation to {} from argument {consumed}", self.name);

        let mut staged = Vec::with_capacity(self.n_args().saturating_sub(consumed));
        for (index, arg) in self.args().iter().enumerate().skip(consumed) {
            let position = index + 1;
            let mismatch = || Error::InvocationTypeMismatch {
                script: self.name.clone(),
                position,
                expected: arg.arg_type(),
            };
            let incoming = invocation.value(position).ok_or_else(mismatch)?;

            let mut value = arg.value().clone();
            if !bind_value(&mut value, incoming, arg.label())? {
                return Err(mismatch());
            }
            staged.push(value);
        }

        for (arg, value) in self.args_mut().iter_mut().skip(consumed).zip(staged) {
            *arg.value_mut() = value;
        }

        Ok(())
    }
}

/// Stores `incoming` into `value`. Returns `Ok(false)` when the runtime type of
/// `incoming` cannot fill the slot.
fn bind_value(value: &mut ArgValue, incoming: &InvocationValue, label: &str) -> Result<bool> {
    let arg_type = value.arg_type();

    if arg_type.is_identity() {
        return Ok(incoming
            .object_for(arg_type)
            .is_some_and(|object| value.set_object_id(object.id)));
    }

    match (value, incoming) {
        (ArgValue::Color(color), InvocationValue::Color(incoming)) => *color = *incoming,
        (ArgValue::Toggle(toggle), InvocationValue::Boolean(incoming)) => *toggle = *incoming,
        (
            ArgValue::Value(text)
            | ArgValue::String(text)
            | ArgValue::Text(text)
            | ArgValue::Filename(text)
            | ArgValue::Dirname(text),
            InvocationValue::String(incoming),
        ) => text.clone_from(incoming),
        (ArgValue::Adjustment(adjustment), InvocationValue::Double(incoming)) => {
            adjustment.value = *incoming;
        }
        (
            ArgValue::Font(name)
            | ArgValue::Palette(name)
            | ArgValue::Pattern(name)
            | ArgValue::Gradient(name),
            InvocationValue::String(incoming),
        ) => *name = incoming.clone().unwrap_or_default(),
        (ArgValue::Brush(brush), InvocationValue::String(incoming)) => {
            brush.name = incoming.clone().unwrap_or_default();
        }
        (ArgValue::Option(option), InvocationValue::Int(incoming)) => {
            if !option.contains(*incoming) {
                return Err(Error::OptionOutOfRange {
                    label: label.to_string(),
                    index: *incoming,
                    choices: option.choices.len(),
                });
            }
            option.history = usize::try_from(*incoming).unwrap_or_default();
        }
        (ArgValue::Enum(choice), InvocationValue::Int(incoming)) => choice.history = *incoming,
        _ => return Ok(false),
    }

    Ok(true)
}
