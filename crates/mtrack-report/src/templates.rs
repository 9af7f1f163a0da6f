//! Report template loading
//!
//! Templates live in a YAML file with a version and a map of named
//! Handlebars templates.

use mtrack_core::MtrackError;
use serde::Deserialize;
use std::collections::HashMap;

/// Top-level templates file structure
#[derive(Debug, Clone, Deserialize)]
pub struct TemplatesFile {
    pub version: String,
    pub templates: HashMap<String, Template>,
}

/// A single template definition
#[derive(Debug, Clone, Deserialize)]
pub struct Template {
    pub description: String,
    pub template: String,
    /// Output kind, `html` or `text`
    #[serde(default = "default_format")]
    pub format: String,
}

fn default_format() -> String {
    "text".to_string()
}

impl TemplatesFile {
    pub fn load(path: &str) -> Result<Self, MtrackError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| MtrackError::TemplateError(format!("failed to read {}: {}", path, e)))?;
        Self::from_yaml(&content)
    }

    pub fn from_yaml(yaml: &str) -> Result<Self, MtrackError> {
        serde_yaml::from_str(yaml)
            .map_err(|e| MtrackError::TemplateError(format!("invalid templates YAML: {}", e)))
    }

    pub fn get(&self, name: &str) -> Option<&Template> {
        self.templates.get(name)
    }

    /// Template names, sorted
    pub fn list_templates(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.templates.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}
