//! Procedure host used by the command line.
//!
//! There is no running image editor to install procedures into, so installed
//! procedures are kept in memory for describing scripts.

use indexmap::IndexMap;
use itertools::Itertools;
use log::debug;
use script_fu_core::procedure::{ParamKind, ProcedureMetadata};
use script_fu_core::registry::ProcedureHost;

#[derive(Debug, Default)]
pub struct ConsoleHost {
    procedures: IndexMap<String, ProcedureMetadata>,
}

impl ConsoleHost {
    #[must_use]
    pub fn procedure(&self, name: &str) -> Option<&ProcedureMetadata> {
        self.procedures.get(name)
    }
}

impl ProcedureHost for ConsoleHost {
    fn install_procedure(&mut self, procedure: ProcedureMetadata) {
        debug!(
            "Installed {}({})",
            procedure.name,
            procedure.params.iter().map(|param| &param.name).join(", ")
        );
        self.procedures.insert(procedure.name.clone(), procedure);
    }

    fn remove_procedure(&mut self, name: &str) {
        self.procedures.shift_remove(name);
    }
}

fn describe_kind(kind: ParamKind) -> String {
    match kind {
        ParamKind::RunMode => "run mode".to_string(),
        ParamKind::Object { kind, .. } => format!("{kind:?}").to_lowercase(),
        ParamKind::Rgb => "color".to_string(),
        ParamKind::Boolean => "boolean".to_string(),
        ParamKind::String { .. } => "string".to_string(),
        ParamKind::Double => "float".to_string(),
        ParamKind::Int => "int".to_string(),
    }
}

/// Multi-line description of a procedure for the terminal.
#[must_use]
pub fn describe_procedure(procedure: &ProcedureMetadata) -> String {
    let mut lines = vec![procedure.name.clone()];

    lines.push(format!(
        "  Menu: {}",
        procedure.menu_label.as_deref().unwrap_or("(none)")
    ));
    if !procedure.blurb.is_empty() {
        lines.push(format!("  {}", procedure.blurb));
    }
    if !procedure.author.is_empty() {
        lines.push(format!(
            "  By {} ({}, {})",
            procedure.author, procedure.copyright, procedure.date
        ));
    }
    if !procedure.image_types.is_empty() {
        lines.push(format!("  Image types: {}", procedure.image_types));
    }

    lines.push("  Parameters:".to_string());
    for param in &procedure.params {
        lines.push(format!(
            "    {:<16} {:<12} {}",
            param.name,
            describe_kind(param.kind),
            param.blurb
        ));
    }

    lines.join("\n")
}
