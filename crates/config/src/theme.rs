use std::collections::BTreeMap;
use std::path;

use crate::RelPath;

#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "unstable", serde(deny_unknown_fields))]
#[cfg_attr(not(feature = "unstable"), non_exhaustive)]
pub struct Theme {
    /// Theme directory, absolute or relative to the config file. Unset uses the built-in theme.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<path::PathBuf>,
    /// Template engine extensions the theme expects.
    pub extensions: Vec<String>,
    pub display: ThemeDisplay,
    pub assets: ThemeAssets,
    /// Options only the theme understands, passed through untouched.
    pub settings: BTreeMap<String, serde_yaml::Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "unstable", serde(deny_unknown_fields))]
#[cfg_attr(not(feature = "unstable"), non_exhaustive)]
pub struct ThemeDisplay {
    pub article_author: bool,
    pub date_modified: bool,
    pub article_info_on_index: bool,
}

/// Files inside the content directory the theme links to directly.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "unstable", serde(deny_unknown_fields))]
#[cfg_attr(not(feature = "unstable"), non_exhaustive)]
pub struct ThemeAssets {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub favicon: Option<RelPath>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<RelPath>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_css: Option<RelPath>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_js: Option<RelPath>,
}

impl ThemeAssets {
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &RelPath)> + '_ {
        [
            ("favicon", self.favicon.as_ref()),
            ("avatar", self.avatar.as_ref()),
            ("custom_css", self.custom_css.as_ref()),
            ("custom_js", self.custom_js.as_ref()),
        ]
        .into_iter()
        .filter_map(|(name, path)| path.map(|p| (name, p)))
    }
}
