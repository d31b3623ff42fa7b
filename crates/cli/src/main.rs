use clap::Parser;
use log::{debug, info, warn};
use script_fu_core::error::{Error, Result};
use script_fu_core::registry::ScriptRegistry;
use script_fu_core::{config, file_handling};
use std::process::ExitCode;

use script_fu_cli::arguments::validation::unset_parameters;
use script_fu_cli::arguments::{process_command_line, Provider};
use script_fu_cli::cli_args::Args;
use script_fu_cli::host::{describe_procedure, ConsoleHost};

fn print_last_command(args: &Args) -> Result<()> {
    if args.script_name.is_some() {
        return Err(Error::RerunWithScript);
    }

    let history_path = config::get_history_path(args.history_path.as_deref());

    match file_handling::get_last_command(&history_path)? {
        Some(command) => println!("{command}"),
        None => warn!("Rerun last command was specified, but there is no previous command!"),
    }

    Ok(())
}

/// Load the declared scripts and install them with the host
fn initialize_registry(args: &Args) -> Result<(ScriptRegistry, ConsoleHost)> {
    let scripts_path = config::get_scripts_path(args.config_path.as_deref());
    debug!("Scripts path: `{scripts_path}`");

    let mut host = ConsoleHost::default();
    let mut registry = ScriptRegistry::new();

    for script in file_handling::load_scripts(&scripts_path)? {
        registry.define(script, &mut host);
    }

    Ok((registry, host))
}

fn print_scripts(registry: &ScriptRegistry) {
    for (index, script) in registry.iter().enumerate() {
        match script.menu_label() {
            Some(_) => println!("{}: {} [{}]", index + 1, script, script.title()),
            None => println!("{}: {}", index + 1, script),
        }
    }
}

fn execute() -> Result<()> {
    let args = Args::parse();

    if args.rerun_last_command {
        return print_last_command(&args);
    }

    let (mut registry, host) = initialize_registry(&args)?;

    let Some(script_name) = args.script_name.as_deref() else {
        print_scripts(&registry);
        return Ok(());
    };

    let script = registry
        .get_mut(script_name)
        .ok_or_else(|| Error::ScriptNotFound(script_name.to_string()))?;
    let procedure = host
        .procedure(script_name)
        .ok_or_else(|| Error::ScriptNotFound(script_name.to_string()))?;

    if args.describe {
        println!("{}", describe_procedure(procedure));
        println!("Default command:\n{}", script.command());
        return Ok(());
    }

    let style = args.get_style()?;
    for param in unset_parameters(&style, procedure) {
        info!("`{}` keeps its current value", param.name);
    }

    let invocation = process_command_line(style, script, procedure)?;

    // History records the invocation as given, before it is committed.
    let command = script.command_from_invocation(&invocation)?;

    let consumed = script.extract_leading(&invocation);
    script.apply_invocation(&invocation, consumed)?;

    println!("{command}");

    if args.dry_run {
        info!("Dry run is specified, not recording the command.");
    } else {
        let history_path = config::get_history_path(args.history_path.as_deref());
        file_handling::append_command(&history_path, &command)?;
    }

    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();

    match execute() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}
