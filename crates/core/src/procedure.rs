//! Host-agnostic procedure metadata derived from a script.
//!
//! The host registry installs whatever [`ProcedureMetadata`] describes; this
//! module only decides names, documentation and parameter order.

use std::collections::HashMap;
use std::fmt::{Display, Formatter};

use log::debug;

use crate::invocation::ObjectKind;
use crate::script::Script;
use crate::value::ArgType;

/// How the host should own the installed procedure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProcedureKind {
    /// Owned by the running extension, gone when it quits.
    #[default]
    Temporary,
    /// Returned to the host as a regular plug-in procedure.
    PlugIn,
}

/// Host parameter type of one procedure parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    RunMode,
    /// Object reference; `none_ok` allows passing no object.
    Object { kind: ObjectKind, none_ok: bool },
    Rgb,
    Boolean,
    /// `validate` is off for paths, which may legitimately be any bytes.
    String { validate: bool },
    Double,
    Int,
}

impl ParamKind {
    pub fn for_arg_type(arg_type: ArgType) -> Self {
        let object = |kind| ParamKind::Object {
            kind,
            none_ok: true,
        };

        match arg_type {
            ArgType::Image => object(ObjectKind::Image),
            ArgType::Drawable => object(ObjectKind::Drawable),
            ArgType::Layer => object(ObjectKind::Layer),
            ArgType::Channel => object(ObjectKind::Channel),
            ArgType::Vectors => object(ObjectKind::Vectors),
            ArgType::Display => object(ObjectKind::Display),
            ArgType::Color => ParamKind::Rgb,
            ArgType::Toggle => ParamKind::Boolean,
            ArgType::Value
            | ArgType::String
            | ArgType::Text
            | ArgType::Font
            | ArgType::Palette
            | ArgType::Pattern
            | ArgType::Brush
            | ArgType::Gradient => ParamKind::String { validate: true },
            ArgType::Filename | ArgType::Dirname => ParamKind::String { validate: false },
            ArgType::Adjustment => ParamKind::Double,
            ArgType::Option | ArgType::Enum => ParamKind::Int,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamSpec {
    /// Machine-visible name, unique within the procedure.
    pub name: String,
    pub nick: String,
    /// Documentation, the argument's display label.
    pub blurb: String,
    pub kind: ParamKind,
}

impl Display for ParamSpec {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "`{}` ({})", self.name, self.blurb)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcedureMetadata {
    pub name: String,
    pub kind: ProcedureKind,
    pub image_types: String,
    /// `None` when the script registers no menu entry.
    pub menu_label: Option<String>,
    pub blurb: String,
    pub help: Option<String>,
    pub help_id: String,
    pub author: String,
    pub copyright: String,
    pub date: String,
    /// Run mode first, then one entry per declared argument.
    pub params: Vec<ParamSpec>,
}

impl ProcedureMetadata {
    /// Parameters mapped onto declared arguments, without the run mode.
    pub fn declared_params(&self) -> &[ParamSpec] {
        self.params.get(1..).unwrap_or_default()
    }
}

fn run_mode_param() -> ParamSpec {
    ParamSpec {
        name: "run-mode".to_string(),
        nick: "Run mode".to_string(),
        blurb: "The run mode".to_string(),
        kind: ParamKind::RunMode,
    }
}

impl Script {
    /// Derives the procedure metadata for this script.
    ///
    /// The first argument of each type keeps the bare name; later ones are
    /// numbered from 2 per type, `image-2` / `Image 2`.
    pub fn procedure(&self, kind: ProcedureKind) -> ProcedureMetadata {
        debug!("Building procedure for {} of kind {kind:?}", self.name);

        let mut occurrences: HashMap<ArgType, usize> = HashMap::new();
        let mut params = Vec::with_capacity(self.n_args() + 1);
        params.push(run_mode_param());

        for arg in self.args() {
            let arg_type = arg.arg_type();
            let (name, nick) = arg_type.param_name();
            let seen = occurrences.entry(arg_type).or_insert(0);
            *seen += 1;

            let (name, nick) = if *seen == 1 {
                (name.to_string(), nick.to_string())
            } else {
                (format!("{name}-{seen}"), format!("{nick} {seen}"))
            };

            params.push(ParamSpec {
                name,
                nick,
                blurb: arg.label().to_string(),
                kind: ParamKind::for_arg_type(arg_type),
            });
        }

        ProcedureMetadata {
            name: self.name.clone(),
            kind,
            image_types: self.image_types.clone(),
            menu_label: self.menu_label().map(ToString::to_string),
            blurb: self.blurb.clone(),
            help: None,
            help_id: self.name.clone(),
            author: self.author.clone(),
            copyright: self.copyright.clone(),
            date: self.date.clone(),
            params,
        }
    }
}
