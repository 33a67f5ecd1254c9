//! config command - Get, set, list, or reset configuration variables

use anyhow::{anyhow, bail, Context as _, Result};
use serde_json::Value as Json;

use crate::cli::Context;
use crate::core::store::StoreError;
use crate::core::types::{Document, DottedKey, Value};
use crate::ui::output::{self, format_assignment, format_list};
use crate::ui::prompts::{self, PromptError};
use crate::ui::suggest::suggest;
use crate::ui::tree::render_tree;

/// Title of the tree printed for the whole configuration.
const ROOT_TITLE: &str = "Variable Configuration";

/// How `config list` renders its output.
#[derive(Debug, Clone, Copy, Default)]
pub struct ListOptions {
    /// Print dotted keys instead of a tree.
    pub keys: bool,
    /// With `keys`, omit keys naming sections.
    pub leaves_only: bool,
    /// Print JSON instead of a tree.
    pub json: bool,
}

/// Get a configuration value.
pub fn get(ctx: &Context, key: &str) -> Result<()> {
    let key = parse_key(key)?;
    let value = ctx
        .variables
        .get_variable(&key)
        .map_err(|e| explain(ctx, e, true))?;

    match &value {
        Value::Table(table) => println!("{}", render_tree(key.as_str(), table)),
        leaf => println!("{}", format_assignment(&key, leaf)),
    }
    Ok(())
}

/// Set a configuration value.
///
/// Only existing variables can be changed. The value is parsed with
/// [`parse_value`].
pub fn set(ctx: &Context, key: &str, value: &str, force: bool) -> Result<()> {
    let key = parse_key(key)?;
    let value = parse_value(value);

    let previous = ctx
        .variables
        .get_variable(&key)
        .map_err(|e| explain(ctx, e, true))?;

    if previous == value {
        bail!("The variable '{}' is already set to {}.", key, value);
    }

    if !force {
        let message = format!(
            "Are you sure you want to change the value of the variable '{}'?\nChange: {} -> {}",
            key, previous, value
        );
        if !confirm(ctx, &message)? {
            output::print("Canceled variable change.", ctx.verbosity());
            return Ok(());
        }
    }

    ctx.variables
        .set_variable(&key, Some(value.clone()))
        .map_err(|e| explain(ctx, e, true))?;

    if !ctx.quiet {
        println!("Set {}", format_assignment(&key, &value));
    }
    Ok(())
}

/// List the whole configuration or the subtree under `key`.
pub fn list(ctx: &Context, key: Option<&str>, options: ListOptions) -> Result<()> {
    let key = key.map(parse_key).transpose()?;

    if options.keys {
        let store = ctx.variables.config().map_err(|e| explain(ctx, e, false))?;
        let mut keys = store
            .keys(options.leaves_only)
            .map_err(|e| explain(ctx, e, false))?;
        if let Some(prefix) = &key {
            if !store.contains(prefix).map_err(|e| explain(ctx, e, false))? {
                return Err(explain(
                    ctx,
                    StoreError::KeyNotFound {
                        key: prefix.clone(),
                    },
                    false,
                ));
            }
            keys.retain(|k| is_under(k, prefix));
        }
        if !keys.is_empty() {
            println!("{}", format_list(&keys, ""));
        }
        return Ok(());
    }

    let value = match &key {
        Some(key) => ctx
            .variables
            .get_variable(key)
            .map_err(|e| explain(ctx, e, false))?,
        None => Value::Table(
            ctx.variables
                .config()
                .and_then(|store| store.to_document())
                .map_err(|e| explain(ctx, e, false))?,
        ),
    };

    if options.json {
        let json = serde_json::to_string_pretty(&to_json(&value))
            .context("Failed to serialize configuration as JSON")?;
        println!("{}", json);
        return Ok(());
    }

    match (&key, &value) {
        (Some(key), leaf) if !leaf.is_table() => {
            println!("{}", format_assignment(key, leaf));
        }
        (_, value) => {
            let title = key.as_ref().map_or(ROOT_TITLE, DottedKey::as_str);
            let empty = Document::new();
            println!("{}", render_tree(title, value.as_table().unwrap_or(&empty)));
        }
    }
    Ok(())
}

/// Reset the configuration to its defaults.
pub fn reset(ctx: &Context, force: bool) -> Result<()> {
    if !force {
        let message = "Are you sure you want to reset the entire variable configuration? \
                       This cannot be undone!";
        if !confirm(ctx, message)? {
            output::print("Canceled reset.", ctx.verbosity());
            return Ok(());
        }
    }

    ctx.variables
        .generate(true)
        .context("Failed to regenerate the variable configuration")?;

    output::print(
        format!(
            "Regenerated variable configuration at {}.",
            ctx.variables.path().display()
        ),
        ctx.verbosity(),
    );
    Ok(())
}

/// Print the location of the configuration file.
pub fn path(ctx: &Context) -> Result<()> {
    println!("{}", ctx.variables.path().display());
    Ok(())
}

/// Parse a command-line value as a TOML literal.
///
/// `true`, `3`, `1.5`, `[1, 2]`, `"quoted"` and `{ a = 1 }` keep their TOML
/// types; anything that is not a single valid literal is taken as a plain
/// string.
///
/// ```
/// use nexus::cli::commands::parse_value;
/// use nexus::core::types::Value;
///
/// assert_eq!(parse_value("3"), Value::Integer(3));
/// assert_eq!(parse_value("mocha"), Value::String("mocha".into()));
/// ```
pub fn parse_value(raw: &str) -> Value {
    let wrapped = format!("value = {}", raw);
    match toml::from_str::<Document>(&wrapped) {
        Ok(mut doc) if doc.len() == 1 => doc
            .remove("value")
            .unwrap_or_else(|| Value::String(raw.to_string())),
        _ => Value::String(raw.to_string()),
    }
}

fn parse_key(key: &str) -> Result<DottedKey> {
    DottedKey::new(key).with_context(|| format!("Invalid variable key '{}'", key))
}

fn is_under(key: &DottedKey, prefix: &DottedKey) -> bool {
    key == prefix
        || key
            .as_str()
            .strip_prefix(prefix.as_str())
            .is_some_and(|rest| rest.starts_with(DottedKey::SEPARATOR))
}

fn confirm(ctx: &Context, message: &str) -> Result<bool> {
    match prompts::confirm(message, false, ctx.interactive) {
        Ok(answer) => Ok(answer),
        Err(PromptError::NotInteractive) => {
            bail!("Confirmation required but not running interactively; use --force")
        }
        Err(PromptError::Cancelled) => Ok(false),
        Err(e) => Err(e.into()),
    }
}

/// Turn a store error into a message for the user.
fn explain(ctx: &Context, err: StoreError, leaves_only: bool) -> anyhow::Error {
    match err {
        StoreError::KeyNotFound { key } => {
            let mut message = format!("The variable '{}' could not be found!", key);

            let candidates = ctx
                .variables
                .config()
                .and_then(|store| store.keys(leaves_only));
            match candidates {
                Ok(candidates) => {
                    let matched = suggest(key.as_str(), candidates.iter().map(DottedKey::as_str));
                    if !matched.is_empty() {
                        message.push_str("\nDid you mean one of the following?\n\n");
                        message.push_str(&format_list(&matched, "  "));
                    }
                }
                Err(e) => tracing::debug!(error = %e, "no key suggestions available"),
            }

            anyhow!(message)
        }
        err if err.is_corrupt_file() => anyhow::Error::new(err).context(
            "The variable configuration could not be read. \
             Use 'nexus config reset' to regenerate it.",
        ),
        err => anyhow::Error::new(err),
    }
}

fn to_json(value: &Value) -> Json {
    match value {
        Value::String(s) => Json::String(s.clone()),
        Value::Integer(i) => Json::from(*i),
        Value::Float(f) => serde_json::Number::from_f64(*f)
            .map(Json::Number)
            .unwrap_or(Json::Null),
        Value::Boolean(b) => Json::Bool(*b),
        Value::Datetime(d) => Json::String(d.to_string()),
        Value::Array(items) => Json::Array(items.iter().map(to_json).collect()),
        Value::Table(table) => Json::Object(
            table
                .iter()
                .map(|(k, v)| (k.clone(), to_json(v)))
                .collect(),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_value_keeps_toml_types() {
        assert_eq!(parse_value("true"), Value::Boolean(true));
        assert_eq!(parse_value("42"), Value::Integer(42));
        assert_eq!(parse_value("1.5"), Value::Float(1.5));
        assert_eq!(
            parse_value("[1, 2]"),
            Value::Array(vec![Value::Integer(1), Value::Integer(2)])
        );
        assert_eq!(parse_value("\"quoted\""), Value::String("quoted".into()));
        assert!(parse_value("{ a = 1 }").is_table());
    }

    #[test]
    fn parse_value_falls_back_to_string() {
        assert_eq!(parse_value("latte"), Value::String("latte".into()));
        assert_eq!(parse_value("two words"), Value::String("two words".into()));
        // Extra content is not smuggled into the document.
        assert_eq!(
            parse_value("1\nother = 2"),
            Value::String("1\nother = 2".into())
        );
    }

    #[test]
    fn is_under_matches_whole_segments() {
        let prefix = DottedKey::new("cli.rich").unwrap();
        assert!(is_under(&DottedKey::new("cli.rich").unwrap(), &prefix));
        assert!(is_under(&DottedKey::new("cli.rich.style").unwrap(), &prefix));
        assert!(!is_under(&DottedKey::new("cli.richer").unwrap(), &prefix));
        assert!(!is_under(&DottedKey::new("cli").unwrap(), &prefix));
    }

    #[test]
    fn json_conversion() {
        let doc: Document = toml::from_str("a = 1\nb = [true]\n[c]\nd = \"x\"\n").unwrap();
        let json = to_json(&Value::Table(doc));
        assert_eq!(
            json,
            serde_json::json!({"a": 1, "b": [true], "c": {"d": "x"}})
        );
    }
}
