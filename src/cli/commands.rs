//! Command implementations
//!
//! Commands write to the supplied writer so tests can capture output.

use serde::Serialize;
use std::io::Write;

use gateswitch_config::Config;
use gateswitch_flag::GateSwitch;
use gateswitch_registry::{GateError, GateInfo, Registry};
use gateswitch_utils::exit_codes::ExitCode;
use gateswitch_utils::types::ConfigSource;

use super::args::Commands;
use crate::GateSwitchError;

/// Gate row of `list --json`
#[derive(Debug, Serialize)]
struct GateListEntry<'a> {
    #[serde(flatten)]
    gate: &'a GateInfo,
    source: ConfigSource,
}

/// Output of `list --json`
#[derive(Debug, Serialize)]
struct GateListOutput<'a> {
    feature_gates: String,
    gates: Vec<GateListEntry<'a>>,
}

/// Dispatch a parsed command against a registry that already has every
/// configured layer applied.
pub fn execute(
    command: &Commands,
    registry: &Registry,
    config: &Config,
    out: &mut dyn Write,
) -> Result<ExitCode, GateSwitchError> {
    match command {
        Commands::List { json } => execute_list_command(registry, config, *json, out),
        Commands::Render => {
            writeln!(out, "{}", GateSwitch::new(registry))?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Check { id } => execute_check_command(registry, id, out),
        Commands::Config { json } => execute_config_command(config, *json, out),
    }
}

fn execute_list_command(
    registry: &Registry,
    config: &Config,
    json: bool,
    out: &mut dyn Write,
) -> Result<ExitCode, GateSwitchError> {
    let snapshot = registry.snapshot();
    let sources = config.gate_sources();
    let entries: Vec<_> = snapshot
        .iter()
        .map(|gate| GateListEntry {
            gate,
            // Locked gates never change, whatever a layer asked for
            source: if gate.stage.is_mutable() {
                sources.get(&gate.id).copied().unwrap_or(ConfigSource::Default)
            } else {
                ConfigSource::Default
            },
        })
        .collect();

    if json {
        let output = GateListOutput {
            feature_gates: GateSwitch::new(registry).render(),
            gates: entries,
        };
        serde_json::to_writer_pretty(&mut *out, &output)?;
        writeln!(out)?;
        return Ok(ExitCode::SUCCESS);
    }

    let width = snapshot.iter().map(|g| g.id.len()).max().unwrap_or(0).max(4);
    writeln!(
        out,
        "{:<width$}  {:<10}  {:<8}  {:<7}  DESCRIPTION",
        "GATE", "STAGE", "STATE", "SOURCE"
    )?;
    for entry in &entries {
        writeln!(
            out,
            "{:<width$}  {:<10}  {:<8}  {:<7}  {}",
            entry.gate.id,
            entry.gate.stage.to_string(),
            if entry.gate.enabled { "enabled" } else { "disabled" },
            entry.source.as_str(),
            entry.gate.description
        )?;
    }
    Ok(ExitCode::SUCCESS)
}

fn execute_check_command(
    registry: &Registry,
    id: &str,
    out: &mut dyn Write,
) -> Result<ExitCode, GateSwitchError> {
    let gate = registry
        .get(id)
        .ok_or_else(|| GateError::Unknown { id: id.to_string() })?;
    let enabled = gate.is_enabled();
    writeln!(out, "{id}: {}", if enabled { "enabled" } else { "disabled" })?;
    Ok(if enabled {
        ExitCode::SUCCESS
    } else {
        ExitCode::GATE_DISABLED
    })
}

fn execute_config_command(
    config: &Config,
    json: bool,
    out: &mut dyn Write,
) -> Result<ExitCode, GateSwitchError> {
    let effective = config.effective_config();

    if json {
        let settings: serde_json::Map<_, _> = effective
            .iter()
            .map(|(key, (value, source))| {
                (
                    key.clone(),
                    serde_json::json!({ "value": value, "source": source }),
                )
            })
            .collect();
        let layers: Vec<_> = config
            .layers
            .iter()
            .map(|layer| serde_json::json!({ "source": layer.source, "value": layer.value }))
            .collect();
        let output = serde_json::json!({ "settings": settings, "layers": layers });
        serde_json::to_writer_pretty(&mut *out, &output)?;
        writeln!(out)?;
        return Ok(ExitCode::SUCCESS);
    }

    for (key, (value, source)) in &effective {
        writeln!(out, "{key} = {value}  ({source})")?;
    }
    if config.layers.is_empty() {
        writeln!(out, "feature gate layers: none")?;
    } else {
        writeln!(out, "feature gate layers:")?;
        for layer in &config.layers {
            writeln!(out, "  [{}] {}", layer.source, layer.value)?;
        }
    }
    Ok(ExitCode::SUCCESS)
}
