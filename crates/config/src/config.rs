use std::collections::BTreeMap;
use std::fmt;
use std::path;

use itertools::Itertools as _;

use super::*;

/// Name of the settings file looked up by [`Config::from_cwd`].
pub const CONFIG_FILE: &str = "_siteconf.yml";

static LANGUAGE_TAG: once_cell::sync::Lazy<regex::Regex> = once_cell::sync::Lazy::new(|| {
    regex::Regex::new(r"^[A-Za-z]{2,3}([-_][A-Za-z0-9]{2,8})*$").unwrap()
});

static TIMEZONE_NAME: once_cell::sync::Lazy<regex::Regex> = once_cell::sync::Lazy::new(|| {
    regex::Regex::new(r"^[A-Za-z0-9_+\-]+(/[A-Za-z0-9_+\-]+)*$").unwrap()
});

static MARKUP_EXTENSION: once_cell::sync::Lazy<regex::Regex> =
    once_cell::sync::Lazy::new(|| regex::Regex::new(r"^[a-z0-9]+$").unwrap());

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "unstable", serde(deny_unknown_fields))]
#[cfg_attr(not(feature = "unstable"), non_exhaustive)]
pub struct Config {
    #[serde(skip)]
    pub root: path::PathBuf,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    pub site_name: String,
    pub site_url: String,
    pub default_lang: String,
    pub timezone: String,
    pub relative_urls: bool,
    pub path: RelPath,
    pub output_path: RelPath,
    /// Directories under `path` copied verbatim.
    pub static_paths: Vec<RelPath>,
    pub ignore_files: Vec<String>,
    pub markup: Vec<String>,
    pub extra_path_metadata: BTreeMap<RelPath, PathMetadata>,
    pub feeds: Feeds,
    pub pagination: Pagination,
    pub urls: Urls,
    pub plugin_paths: Vec<path::PathBuf>,
    pub plugins: Vec<PluginName>,
    pub theme: Theme,
    pub menu: Menu,
    pub links: Vec<MenuItem>,
    pub social: Vec<MenuItem>,
    pub sidebar: Sidebar,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub license: Option<License>,
}

impl Default for Config {
    fn default() -> Config {
        Config {
            root: Default::default(),
            author: None,
            site_name: "My Site".to_owned(),
            site_url: String::new(),
            default_lang: "en".to_owned(),
            timezone: "UTC".to_owned(),
            relative_urls: false,
            path: RelPath::from_unchecked("content"),
            output_path: RelPath::from_unchecked("output"),
            static_paths: vec![RelPath::from_unchecked("images")],
            ignore_files: vec![".#*".to_owned()],
            markup: vec!["md".to_owned(), "markdown".to_owned(), "html".to_owned()],
            extra_path_metadata: Default::default(),
            feeds: Default::default(),
            pagination: Default::default(),
            urls: Default::default(),
            plugin_paths: Default::default(),
            plugins: Default::default(),
            theme: Default::default(),
            menu: Default::default(),
            links: Default::default(),
            social: Default::default(),
            sidebar: Default::default(),
            license: None,
        }
    }
}

/// Output location override for a static file.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "unstable", serde(deny_unknown_fields))]
pub struct PathMetadata {
    pub path: RelPath,
}

impl Config {
    pub fn from_file<P: Into<path::PathBuf>>(path: P) -> Result<Config> {
        Self::from_file_internal(path.into())
    }

    fn from_file_internal(path: path::PathBuf) -> Result<Config> {
        let content = std::fs::read_to_string(&path).map_err(|e| {
            Status::new("Failed to read config")
                .with_source(e)
                .context_with(|c| c.insert("Path", path.display().to_string()))
        })?;

        let mut config = Self::parse(&content).map_err(|e| {
            Status::new("Failed to parse config")
                .with_source(e)
                .context_with(|c| c.insert("Path", path.display().to_string()))
        })?;

        let mut root = path;
        root.pop(); // Remove filename
        if root == path::Path::new("") {
            root = path::Path::new(".").to_owned();
        }
        config.root = root;

        Ok(config)
    }

    pub fn from_cwd<P: Into<path::PathBuf>>(cwd: P) -> Result<Config> {
        Self::from_cwd_internal(cwd.into())
    }

    fn from_cwd_internal(cwd: path::PathBuf) -> Result<Config> {
        let file_path = find_project_file(&cwd, CONFIG_FILE);
        let config = file_path
            .map(|p| {
                log::debug!("Using config file `{}`", p.display());
                Self::from_file(&p)
            })
            .unwrap_or_else(|| {
                log::warn!("No {CONFIG_FILE} file found in current directory, using default config.");
                let config = Config {
                    root: cwd,
                    ..Default::default()
                };
                Ok(config)
            })?;
        Ok(config)
    }

    fn parse(content: &str) -> std::result::Result<Config, serde_yaml::Error> {
        if content.trim().is_empty() {
            Ok(Config::default())
        } else {
            serde_yaml::from_str(content)
        }
    }

    /// Check the invariants that do not depend on the filesystem.
    pub fn validate(&self) -> Result<()> {
        if self.site_name.trim().is_empty() {
            return Err(invalid("site_name", "must not be empty"));
        }
        self.validate_site_url()?;
        if !LANGUAGE_TAG.is_match(&self.default_lang) {
            return Err(invalid(
                "default_lang",
                format!("`{}` is not a language tag", self.default_lang),
            ));
        }
        if !TIMEZONE_NAME.is_match(&self.timezone) {
            return Err(invalid(
                "timezone",
                format!("`{}` is not a timezone name", self.timezone),
            ));
        }

        self.validate_layout()?;

        self.feeds.validate()?;
        self.pagination.validate()?;
        self.urls.validate()?;
        self.menu.validate()?;
        menu::validate_items("links", &self.links)?;
        menu::validate_items("social", &self.social)?;

        if let Some(plugin) = self.plugins.iter().duplicates().next() {
            return Err(invalid("plugins", format!("`{plugin}` is listed twice")));
        }

        Ok(())
    }

    fn validate_site_url(&self) -> Result<()> {
        if self.site_url.is_empty() {
            return Ok(());
        }
        let url = url::Url::parse(&self.site_url)
            .map_err(|e| invalid("site_url", format!("`{}`: {e}", self.site_url)))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(invalid(
                "site_url",
                format!("`{}` must use http or https", self.site_url),
            ));
        }
        if self.site_url.ends_with('/') {
            return Err(invalid(
                "site_url",
                format!("`{}` must not end with `/`", self.site_url),
            ));
        }
        Ok(())
    }

    fn validate_layout(&self) -> Result<()> {
        if self.output_path == self.path {
            return Err(invalid(
                "output_path",
                format!("`{}` is also the content path", self.output_path),
            ));
        }
        if self.path.starts_with(&self.output_path) {
            log::warn!(
                "Content path `{}` is inside output path `{}`",
                self.path,
                self.output_path
            );
        }

        for ext in &self.markup {
            if !MARKUP_EXTENSION.is_match(ext) {
                return Err(invalid(
                    "markup",
                    format!("`{ext}` must be a lowercase extension without a dot"),
                ));
            }
        }
        for pattern in &self.ignore_files {
            if pattern.trim().is_empty() {
                return Err(invalid("ignore_files", "patterns must not be empty"));
            }
        }

        for source in self.extra_path_metadata.keys() {
            if !self.is_static(source) {
                log::warn!("extra_path_metadata: `{source}` is not under any static path");
            }
        }
        for (name, asset) in self.theme.assets.iter() {
            let remapped = self
                .extra_path_metadata
                .values()
                .any(|meta| meta.path == *asset);
            if !remapped && !self.is_static(asset) {
                log::warn!("theme.assets.{name}: `{asset}` is not under any static path");
            }
        }
        Ok(())
    }

    /// Whether `path`, relative to the content directory, is copied as a static file.
    pub fn is_static(&self, path: &RelPath) -> bool {
        self.static_paths.iter().any(|dir| path.starts_with(dir))
    }
}

impl std::str::FromStr for Config {
    type Err = Status;

    /// Parse an embedded settings literal; blank input gives the defaults.
    fn from_str(content: &str) -> Result<Self> {
        Self::parse(content).map_err(|e| Status::new("Failed to parse config").with_source(e))
    }
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let converted = serde_yaml::to_string(self).map_err(|_| fmt::Error)?;
        write!(f, "{converted}")
    }
}

pub fn find_project_file<P: Into<path::PathBuf>>(dir: P, name: &str) -> Option<path::PathBuf> {
    find_project_file_internal(dir.into(), name)
}

fn find_project_file_internal(dir: path::PathBuf, name: &str) -> Option<path::PathBuf> {
    let mut file_path = dir;
    file_path.push(name);
    while !file_path.exists() {
        file_path.pop(); // filename
        let hit_bottom = !file_path.pop();
        if hit_bottom {
            return None;
        }
        file_path.push(name);
    }
    Some(file_path)
}
