//! JSON document I/O and the per-document preparation pass.

use std::io::Write;
use std::path::Path;

use anyhow::Context;
use serde_json::Value;

use l5r4_domain::{prepare_wound_data, SystemData, WoundSummary};

use crate::config::EngineConfig;

pub fn read_document(path: &Path) -> anyhow::Result<Value> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("parsing {}", path.display()))
}

pub fn render_document(doc: &Value, config: &EngineConfig) -> anyhow::Result<String> {
    let rendered = if config.pretty {
        serde_json::to_string_pretty(doc)
    } else {
        serde_json::to_string(doc)
    };
    rendered.context("serializing document")
}

/// Write `doc` to `path`, or to `fallback` when no path is given.
pub fn write_document(
    doc: &Value,
    path: Option<&Path>,
    config: &EngineConfig,
    fallback: &mut dyn Write,
) -> anyhow::Result<()> {
    let rendered = render_document(doc, config)?;
    match path {
        Some(path) => std::fs::write(path, rendered + "\n")
            .with_context(|| format!("writing {}", path.display())),
        None => writeln!(fallback, "{rendered}").context("writing output"),
    }
}

/// Run the wound preparation pass over one actor.
///
/// Accepts either a full actor (`{"system": {...}}`) or a bare system
/// object, and writes the prepared data back in place.
pub fn prepare_actor(doc: &mut Value) -> anyhow::Result<WoundSummary> {
    let slot = if doc.get("system").is_some() {
        &mut doc["system"]
    } else {
        doc
    };
    if !slot.is_object() {
        anyhow::bail!("character system data must be a JSON object");
    }

    let mut sys: SystemData =
        serde_json::from_value(slot.clone()).context("reading character system data")?;
    let summary = prepare_wound_data(&mut sys);
    *slot = serde_json::to_value(&sys).context("serializing character system data")?;
    Ok(summary)
}

/// Prepare a single actor, or every actor of an exported world.
pub fn prepare_document(doc: &mut Value) -> anyhow::Result<Vec<WoundSummary>> {
    let Some(actors) = doc.get_mut("actors").and_then(Value::as_array_mut) else {
        return Ok(vec![prepare_actor(doc)?]);
    };

    let mut summaries = Vec::with_capacity(actors.len());
    for (index, actor) in actors.iter_mut().enumerate() {
        let summary =
            prepare_actor(actor).with_context(|| format!("preparing actors[{index}]"))?;
        summaries.push(summary);
    }
    Ok(summaries)
}
