//! Help registry for centralized keybinding definitions.
//!
//! Bindings live in an embedded TOML file and feed the status bar hints and
//! the help overlay.

use anyhow::{Context as _, Result};
use serde::Deserialize;
use std::collections::HashMap;

/// Embedded help definitions TOML file
const HELP_TOML: &str = include_str!("../data/help.toml");

/// A single keybinding definition
#[derive(Debug, Clone, Deserialize)]
pub struct Binding {
    /// Action id the binding triggers, for bindings handled through shortcuts
    #[serde(default)]
    pub id: Option<String>,
    /// Primary key(s) for this action
    pub keys: Vec<String>,
    /// Alternative keys (optional)
    #[serde(default)]
    pub alt_keys: Vec<String>,
    /// Full description of the action
    pub action: String,
    /// Short hint for status bar (optional)
    pub hint: Option<String>,
    /// Display order, lower first
    #[serde(default = "default_priority")]
    pub priority: u32,
}

const fn default_priority() -> u32 {
    50
}

/// A context with its bindings
#[derive(Debug, Clone, Deserialize)]
pub struct Context {
    /// Human-readable name
    pub name: String,
    /// When this context is active
    pub description: String,
    /// Keybindings for this context
    pub bindings: Vec<Binding>,
}

/// Metadata about the help file
#[derive(Debug, Clone, Deserialize)]
pub struct HelpMeta {
    /// Version of the help file format
    pub version: String,
    /// Name of the application
    pub app_name: String,
}

#[derive(Debug, Clone, Deserialize)]
struct HelpFile {
    meta: HelpMeta,
    contexts: HashMap<String, Context>,
}

/// Keybinding definitions by context.
#[derive(Debug, Clone)]
pub struct HelpRegistry {
    meta: HelpMeta,
    contexts: HashMap<String, Context>,
}

impl HelpRegistry {
    /// Load the help registry from the embedded TOML file
    pub fn load() -> Result<Self> {
        let help_file: HelpFile =
            toml::from_str(HELP_TOML).context("Failed to parse embedded help.toml")?;
        Ok(Self {
            meta: help_file.meta,
            contexts: help_file.contexts,
        })
    }

    /// App name from the metadata
    #[must_use]
    pub fn app_name(&self) -> &str {
        &self.meta.app_name
    }

    /// Get a context by name
    #[must_use]
    pub fn get_context(&self, name: &str) -> Option<&Context> {
        self.contexts.get(name)
    }

    /// All bindings of a context, sorted by priority
    #[must_use]
    pub fn get_bindings(&self, context_name: &str) -> Vec<&Binding> {
        let mut bindings: Vec<&Binding> = self
            .contexts
            .get(context_name)
            .map(|context| context.bindings.iter().collect())
            .unwrap_or_default();
        bindings.sort_by_key(|b| b.priority);
        bindings
    }

    /// Bindings with a status bar hint, sorted by priority
    #[must_use]
    pub fn get_status_bar_hints(&self, context_name: &str) -> Vec<&Binding> {
        self.get_bindings(context_name)
            .into_iter()
            .filter(|b| b.hint.is_some())
            .collect()
    }

    /// Format a binding for the help overlay as (keys, action)
    #[must_use]
    pub fn format_binding_for_help(binding: &Binding) -> (String, String) {
        let keys = if binding.alt_keys.is_empty() {
            binding.keys.join("/")
        } else {
            format!(
                "{} ({})",
                binding.keys.join("/"),
                binding.alt_keys.join("/")
            )
        };
        (keys, binding.action.clone())
    }

    /// Compact (key, hint) pairs for the status bar
    #[must_use]
    pub fn format_status_bar_hints(
        &self,
        context_name: &str,
        max_hints: usize,
    ) -> Vec<(String, String)> {
        self.get_status_bar_hints(context_name)
            .into_iter()
            .take(max_hints)
            .map(|b| {
                let key = b.keys.first().map_or("", String::as_str);
                let hint = b.hint.as_deref().unwrap_or(&b.action);
                (key.to_string(), hint.to_string())
            })
            .collect()
    }
}

/// Known context names
pub mod contexts {
    /// Plate view
    pub const MAIN: &str = "main";
    /// Mouse interaction (informational)
    pub const MOUSE: &str = "mouse";
    /// Plate settings dialog
    pub const SETTINGS: &str = "settings";
    /// Open picklist prompt
    pub const OPEN_PICKLIST: &str = "open_picklist";
    /// Help overlay
    pub const HELP: &str = "help";

    /// Display order in the help overlay
    pub const ORDERED: [&str; 5] = [MAIN, MOUSE, SETTINGS, OPEN_PICKLIST, HELP];
}
