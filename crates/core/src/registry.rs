//! Registry of defined scripts and their installation with the host.

use indexmap::IndexMap;
use log::{debug, warn};

use crate::error::{Error, Result};
use crate::procedure::{ProcedureKind, ProcedureMetadata};
use crate::script::Script;

/// The host procedure registry. It owns installed procedures by name.
pub trait ProcedureHost {
    fn install_procedure(&mut self, procedure: ProcedureMetadata);

    fn remove_procedure(&mut self, name: &str);
}

/// Scripts in definition order, keyed by name.
#[derive(Debug, Default)]
pub struct ScriptRegistry {
    scripts: IndexMap<String, Script>,
}

impl ScriptRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Installs `script` as a temporary procedure. A script already defined
    /// under the same name is uninstalled and dropped first.
    pub fn define<H: ProcedureHost + ?Sized>(&mut self, script: Script, host: &mut H) {
        if self.scripts.shift_remove(&script.name).is_some() {
            warn!("Redefining script {}", script.name);
            host.remove_procedure(&script.name);
        }

        debug!("Installing procedure {}", script.name);
        host.install_procedure(script.procedure(ProcedureKind::Temporary));
        self.scripts.insert(script.name.clone(), script);
    }

    /// Uninstalls and drops the script called `name`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ScriptNotFound`] if no such script is defined.
    pub fn remove<H: ProcedureHost + ?Sized>(&mut self, name: &str, host: &mut H) -> Result<()> {
        self.scripts
            .shift_remove(name)
            .ok_or_else(|| Error::ScriptNotFound(name.to_string()))?;

        debug!("Uninstalling procedure {name}");
        host.remove_procedure(name);

        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&Script> {
        self.scripts.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Script> {
        self.scripts.get_mut(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Script> {
        self.scripts.values()
    }

    pub fn len(&self) -> usize {
        self.scripts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scripts.is_empty()
    }
}
