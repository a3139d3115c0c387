//! Config command - inspect and edit the JSON configuration file.
//!
//! Keys are dotted paths into the serialized [`DocbrConfig`], e.g.
//! `text.backend` or `extraction.chassis_line_limit`.

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Subcommand};
use console::style;
use serde_json::Value;

use docbr_core::DocbrConfig;

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    action: ConfigAction,
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the effective configuration
    Show,

    /// Write a configuration file with default values
    Init {
        /// Write here instead of the active config location
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Replace an existing file
        #[arg(long)]
        force: bool,
    },

    /// Print one value (e.g. "text.backend")
    Get { key: String },

    /// Change one value; non-JSON input is stored as a string
    Set { key: String, value: String },

    /// Print the active config location
    Path,
}

/// Default location: `<config_dir>/docbr/config.json`.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("docbr")
        .join("config.json")
}

/// Run a config action against `config_path` (the global `--config`) or the
/// default location.
pub async fn run(args: ConfigArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let path = config_path.map(PathBuf::from).unwrap_or_else(default_config_path);

    match args.action {
        ConfigAction::Show => {
            if !path.exists() {
                eprintln!("{} {} not found, showing defaults", style("ℹ").blue(), path.display());
            }
            println!("{}", serde_json::to_string_pretty(&effective(&path)?)?);
        }
        ConfigAction::Init { output, force } => {
            let target = output.unwrap_or(path);
            if target.exists() && !force {
                anyhow::bail!(
                    "Config file already exists at {}. Use --force to overwrite.",
                    target.display()
                );
            }
            write_config(&target, &DocbrConfig::default())?;
            println!("{} Created {}", style("✓").green(), target.display());
        }
        ConfigAction::Get { key } => {
            let tree = serde_json::to_value(effective(&path)?)?;
            println!("{}", serde_json::to_string_pretty(lookup(&tree, &key)?)?);
        }
        ConfigAction::Set { key, value } => {
            let value = parse_value(&value);
            let mut tree = serde_json::to_value(effective(&path)?)?;
            assign(&mut tree, &key, value.clone())?;

            let config: DocbrConfig = serde_json::from_value(tree)
                .map_err(|e| anyhow::anyhow!("Invalid value for {}: {}", key, e))?;
            write_config(&path, &config)?;
            println!("{} {} = {}", style("✓").green(), key, value);
        }
        ConfigAction::Path => {
            let status = if path.exists() {
                style("exists").green()
            } else {
                style("not created, run 'docbr config init'").yellow()
            };
            println!("{} ({})", path.display(), status);
        }
    }

    Ok(())
}

fn effective(path: &Path) -> anyhow::Result<DocbrConfig> {
    Ok(DocbrConfig::resolve(None, path)?)
}

fn write_config(path: &Path, config: &DocbrConfig) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    config.save(path)?;
    Ok(())
}

fn parse_value(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}

/// Resolve a dotted key inside a JSON tree.
fn lookup<'a>(tree: &'a Value, key: &str) -> anyhow::Result<&'a Value> {
    key.split('.')
        .try_fold(tree, |node, part| node.get(part))
        .ok_or_else(|| anyhow::anyhow!("Configuration key not found: {}", key))
}

/// Replace the value at an existing dotted key. New keys are not created.
fn assign(tree: &mut Value, key: &str, value: Value) -> anyhow::Result<()> {
    let (parent, leaf) = match key.rsplit_once('.') {
        Some((parent, leaf)) => (Some(parent), leaf),
        None => (None, key),
    };

    let mut node = tree;
    if let Some(parent) = parent {
        for part in parent.split('.') {
            node = node
                .get_mut(part)
                .ok_or_else(|| anyhow::anyhow!("Configuration key not found: {}", key))?;
        }
    }

    match node.get_mut(leaf) {
        Some(slot) if !slot.is_object() => {
            *slot = value;
            Ok(())
        }
        Some(_) => anyhow::bail!("{} is a section, set one of its keys instead", key),
        None => anyhow::bail!("Configuration key not found: {}", key),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_value() {
        assert_eq!(parse_value("12"), json!(12));
        assert_eq!(parse_value("null"), Value::Null);
        assert_eq!(parse_value("fast"), json!("fast"));
    }

    #[test]
    fn test_lookup() {
        let tree = json!({"text": {"backend": "layout"}});
        assert_eq!(lookup(&tree, "text.backend").unwrap(), &json!("layout"));
        assert!(lookup(&tree, "text.missing").is_err());
        assert!(lookup(&tree, "text.backend.deeper").is_err());
    }

    #[test]
    fn test_assign_existing_leaf() {
        let mut tree = json!({"extraction": {"chassis_line_limit": null}});
        assign(&mut tree, "extraction.chassis_line_limit", json!(5)).unwrap();
        assert_eq!(tree, json!({"extraction": {"chassis_line_limit": 5}}));
    }

    #[test]
    fn test_assign_rejects_unknown_and_sections() {
        let mut tree = json!({"text": {"backend": "layout"}});
        assert!(assign(&mut tree, "text.colour", json!("red")).is_err());
        assert!(assign(&mut tree, "nothing.backend", json!("fast")).is_err());
        assert!(assign(&mut tree, "text", json!("fast")).is_err());
        assert_eq!(tree, json!({"text": {"backend": "layout"}}));
    }

    #[test]
    fn test_set_round_trips_through_typed_config() {
        let mut tree = serde_json::to_value(DocbrConfig::default()).unwrap();
        assign(&mut tree, "text.backend", parse_value("ocr")).unwrap();
        assert!(serde_json::from_value::<DocbrConfig>(tree).is_err());
    }
}
