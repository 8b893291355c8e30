//! tgym-config
//!
//! Layered YAML configuration for trading sessions.
//! - Each YAML doc is one layer; earlier layers are base, later layers override
//! - Every layer must be a mapping (an empty doc counts as `{}`)
//! - Merged document converted to JSON, canonicalized, and SHA-256 hashed
//! - [`load_session_config`] also checks every layer against the
//!   [`SessionConfig`] schema, so a typo is reported with the file it came from

mod session;

pub use session::{DataColumns, FeeConfig, SessionConfig, SessionSection};

use anyhow::{bail, Context, Result};
use serde_json::{Map, Value};
use sha2::{Digest, Sha256};
use std::fs;

#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config_hash: String,
    pub canonical_json: String,
    pub config_json: Value,
    /// Layer names in merge order (file paths, or `layer[i]` for inline docs).
    pub sources: Vec<String>,
}

impl LoadedConfig {
    /// Typed, validated session view of the merged document.
    pub fn session(&self) -> Result<SessionConfig> {
        SessionConfig::from_json(&self.config_json)
            .with_context(|| format!("merged from [{}]", self.sources.join(", ")))
    }
}

/// Merged config plus its validated session view.
#[derive(Debug, Clone)]
pub struct LoadedSession {
    pub config: LoadedConfig,
    pub session: SessionConfig,
}

struct Layer {
    source: String,
    value: Map<String, Value>,
}

pub fn load_layered_yaml<P: AsRef<str>>(paths: &[P]) -> Result<LoadedConfig> {
    let layers = read_layers(paths)?;
    merge_layers(layers)
}

pub fn load_layered_yaml_from_strings(yaml_docs: &[&str]) -> Result<LoadedConfig> {
    let layers = yaml_docs
        .iter()
        .enumerate()
        .map(|(i, raw)| parse_layer(format!("layer[{i}]"), raw))
        .collect::<Result<Vec<_>>>()?;
    merge_layers(layers)
}

/// Load, merge, and validate a session config from YAML files.
///
/// # Errors
/// Unreadable or non-mapping layers, unknown keys in any layer (named by
/// path), and any [`SessionConfig::validate`] failure on the merged result.
pub fn load_session_config<P: AsRef<str>>(paths: &[P]) -> Result<LoadedSession> {
    let layers = read_layers(paths)?;
    build_session(layers)
}

/// [`load_session_config`] over inline YAML docs.
pub fn load_session_config_from_strings(yaml_docs: &[&str]) -> Result<LoadedSession> {
    let layers = yaml_docs
        .iter()
        .enumerate()
        .map(|(i, raw)| parse_layer(format!("layer[{i}]"), raw))
        .collect::<Result<Vec<_>>>()?;
    build_session(layers)
}

fn build_session(layers: Vec<Layer>) -> Result<LoadedSession> {
    // Shape check per layer; semantic checks only make sense after merging.
    for layer in &layers {
        serde_json::from_value::<SessionConfig>(Value::Object(layer.value.clone()))
            .with_context(|| format!("CONFIG_LAYER_INVALID {}", layer.source))?;
    }
    let config = merge_layers(layers)?;
    let session = config.session()?;
    Ok(LoadedSession { config, session })
}

fn read_layers<P: AsRef<str>>(paths: &[P]) -> Result<Vec<Layer>> {
    paths
        .iter()
        .map(|p| {
            let p = p.as_ref();
            let raw =
                fs::read_to_string(p).with_context(|| format!("failed to read yaml path: {p}"))?;
            parse_layer(p.to_string(), &raw)
        })
        .collect()
}

fn parse_layer(source: String, raw: &str) -> Result<Layer> {
    let v_yaml: serde_yaml::Value =
        serde_yaml::from_str(raw).with_context(|| format!("invalid yaml: {source}"))?;
    let v_json = serde_json::to_value(v_yaml)
        .with_context(|| format!("yaml->json conversion failed: {source}"))?;
    let value = match v_json {
        Value::Object(map) => map,
        Value::Null => Map::new(),
        other => bail!(
            "CONFIG_LAYER_NOT_A_MAP {} (top level is {})",
            source,
            json_kind(&other)
        ),
    };
    Ok(Layer { source, value })
}

fn merge_layers(layers: Vec<Layer>) -> Result<LoadedConfig> {
    let mut merged = Map::new();
    let mut sources = Vec::with_capacity(layers.len());
    for layer in layers {
        overlay_map(&mut merged, layer.value);
        sources.push(layer.source);
    }

    let config_json = Value::Object(merged);
    // serde_json's default Map is key-sorted, so compact output is canonical.
    let canonical_json =
        serde_json::to_string(&config_json).context("canonical json serialize failed")?;
    let config_hash = hex::encode(Sha256::digest(canonical_json.as_bytes()));
    Ok(LoadedConfig {
        config_hash,
        canonical_json,
        config_json,
        sources,
    })
}

/// Nested maps merge key by key; any other overlay value (null included)
/// replaces what was there.
fn overlay_map(base: &mut Map<String, Value>, overlay: Map<String, Value>) {
    for (key, over) in overlay {
        let over_inner = match over {
            Value::Object(m) => m,
            other => {
                base.insert(key, other);
                continue;
            }
        };
        if let Some(Value::Object(inner)) = base.get_mut(&key) {
            overlay_map(inner, over_inner);
            continue;
        }
        base.insert(key, Value::Object(over_inner));
    }
}

fn json_kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "a bool",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "a map",
    }
}
