use std::fmt;

use crate::Result;
use crate::Status;

static PLUGIN_NAME: once_cell::sync::Lazy<regex::Regex> = once_cell::sync::Lazy::new(|| {
    regex::Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*(\.[A-Za-z_][A-Za-z0-9_]*)*$").unwrap()
});

/// Dotted plugin identifier, e.g. `render_math` or `ipynb.markup`.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PluginName(String);

impl PluginName {
    pub fn new<S: Into<String>>(name: S) -> Result<Self> {
        let name = name.into();
        if !PLUGIN_NAME.is_match(&name) {
            return Err(Status::new("Invalid plugin name")
                .context_with(|c| c.insert("Plugin", name.clone())));
        }
        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The package the plugin is loaded from: `ipynb` for `ipynb.markup`.
    pub fn package(&self) -> &str {
        self.0.split('.').next().unwrap_or(&self.0)
    }
}

impl TryFrom<String> for PluginName {
    type Error = Status;

    fn try_from(name: String) -> Result<Self> {
        Self::new(name)
    }
}

impl From<PluginName> for String {
    fn from(name: PluginName) -> String {
        name.0
    }
}

impl fmt::Display for PluginName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
