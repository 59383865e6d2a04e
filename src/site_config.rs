use std::collections::BTreeMap;
use std::fmt;
use std::path;

use anyhow::Context as _;
use siteconf_config as cfg;
use siteconf_config::RelPath;

use crate::error::*;
use crate::plugins;

/// Settings record handed to the generator: validated, with every path resolved.
///
/// Only serialized for display; the file-level [`siteconf_config::Config`] is what
/// round-trips through its `Display` and `FromStr`.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[non_exhaustive]
pub struct SiteConfig {
    pub root: path::PathBuf,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    pub site_name: String,
    pub site_url: String,
    pub default_lang: String,
    pub timezone: String,
    pub relative_urls: bool,
    pub content_dir: path::PathBuf,
    pub output_dir: path::PathBuf,
    pub static_paths: Vec<RelPath>,
    pub static_dirs: Vec<path::PathBuf>,
    pub ignore_files: Vec<String>,
    pub markup: Vec<String>,
    pub extra_path_metadata: BTreeMap<RelPath, cfg::PathMetadata>,
    pub feeds: cfg::Feeds,
    pub pagination: cfg::Pagination,
    pub urls: cfg::Urls,
    pub plugins: Vec<plugins::Plugin>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme_dir: Option<path::PathBuf>,
    pub theme: cfg::Theme,
    pub menu: cfg::Menu,
    pub links: Vec<cfg::MenuItem>,
    pub social: Vec<cfg::MenuItem>,
    pub sidebar: cfg::Sidebar,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub license: Option<cfg::License>,
}

impl SiteConfig {
    pub fn from_config(source: cfg::Config) -> Result<Self> {
        source.validate()?;

        let cfg::Config {
            root,
            author,
            site_name,
            site_url,
            default_lang,
            timezone,
            relative_urls,
            path,
            output_path,
            static_paths,
            ignore_files,
            markup,
            extra_path_metadata,
            feeds,
            pagination,
            urls,
            plugin_paths,
            plugins,
            theme,
            menu,
            links,
            social,
            sidebar,
            license,
        } = source;

        let root = dunce::canonicalize(&root)
            .with_context(|| format!("Site root `{}` is not accessible", root.display()))?;

        let content_dir = path.to_path(&root);
        if !content_dir.is_dir() {
            anyhow::bail!(
                "Content path `{}` is not a directory ({})",
                path,
                content_dir.display()
            );
        }
        let output_dir = output_path.to_path(&root);

        let static_dirs = static_paths
            .iter()
            .map(|p| {
                let dir = p.to_path(&content_dir);
                if !dir.exists() {
                    log::warn!("Static path `{p}` does not exist in `{path}`");
                }
                dir
            })
            .collect();
        for source in extra_path_metadata.keys() {
            if !source.to_path(&content_dir).is_file() {
                log::warn!("extra_path_metadata: `{source}` does not exist in `{path}`");
            }
        }

        let theme_dir = theme
            .path
            .as_ref()
            .map(|p| {
                let dir = root.join(p);
                if dir.is_dir() {
                    Ok(dir)
                } else {
                    Err(anyhow::format_err!(
                        "Theme `{}` is not a directory",
                        dir.display()
                    ))
                }
            })
            .transpose()?;

        let plugins = plugins::resolve_plugins(&root, &plugin_paths, &plugins)?;

        let config = Self {
            root,
            author,
            site_name,
            site_url,
            default_lang,
            timezone,
            relative_urls,
            content_dir,
            output_dir,
            static_paths,
            static_dirs,
            ignore_files,
            markup,
            extra_path_metadata,
            feeds,
            pagination,
            urls,
            plugins,
            theme_dir,
            theme,
            menu,
            links,
            social,
            sidebar,
            license,
        };
        Ok(config)
    }

    /// View of the content directory with the ignore, markup and static settings applied.
    pub fn content_source(&self) -> Result<siteconf_core::ContentSource> {
        let source = siteconf_core::ContentSource::new(
            &self.content_dir,
            self.ignore_files.iter().map(|s| s.as_str()),
        )?
        .with_markup(self.markup.iter().map(|s| s.as_str()))
        .with_static_dirs(self.static_paths.iter().map(|p| p.as_str()));
        Ok(source)
    }

    /// Where a link to `url` points once published.
    ///
    /// Stays relative when `relative_urls` is set or no `site_url` is known.
    pub fn public_url(&self, url: &str) -> String {
        if self.relative_urls || self.site_url.is_empty() {
            url.to_owned()
        } else {
            format!("{}/{}", self.site_url, url.trim_start_matches('/'))
        }
    }
}

impl fmt::Display for SiteConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let converted = serde_yaml::to_string(self).map_err(|_| fmt::Error)?;
        write!(f, "{converted}")
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn site_dir() -> tempfile::TempDir {
        let root = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(root.path().join("content/images")).unwrap();
        std::fs::write(root.path().join("content/hello.md"), "# Hello\n").unwrap();
        root
    }

    fn config_at(root: &path::Path, yaml: &str) -> cfg::Config {
        let mut config: cfg::Config = yaml.parse().unwrap();
        config.root = root.to_owned();
        config
    }

    #[test]
    fn resolves_defaults() {
        let root = site_dir();
        let config = SiteConfig::from_config(config_at(root.path(), "")).unwrap();
        let canonical = dunce::canonicalize(root.path()).unwrap();
        assert_eq!(config.content_dir, canonical.join("content"));
        assert_eq!(config.output_dir, canonical.join("output"));
        assert_eq!(config.static_dirs, vec![canonical.join("content/images")]);
        assert_eq!(config.theme_dir, None);
        assert!(config.plugins.is_empty());
    }

    #[test]
    fn missing_content_dir() {
        let root = tempfile::tempdir().unwrap();
        let result = SiteConfig::from_config(config_at(root.path(), ""));
        assert!(result.is_err());
    }

    #[test]
    fn invalid_settings_are_rejected_first() {
        let root = site_dir();
        let result = SiteConfig::from_config(config_at(root.path(), "site_name: ''"));
        assert!(result.is_err());
    }

    #[test]
    fn missing_theme() {
        let root = site_dir();
        let result = SiteConfig::from_config(config_at(root.path(), "theme: {path: themes/none}"));
        assert!(result.is_err());
    }

    #[test]
    fn relative_theme() {
        let root = site_dir();
        std::fs::create_dir_all(root.path().join("themes/bootstrap3")).unwrap();
        let config =
            SiteConfig::from_config(config_at(root.path(), "theme: {path: themes/bootstrap3}"))
                .unwrap();
        let canonical = dunce::canonicalize(root.path()).unwrap();
        assert_eq!(config.theme_dir, Some(canonical.join("themes/bootstrap3")));
    }

    #[test]
    fn missing_plugin() {
        let root = site_dir();
        std::fs::create_dir_all(root.path().join("plugins")).unwrap();
        let result = SiteConfig::from_config(config_at(
            root.path(),
            "plugin_paths: [plugins]\nplugins: [render_math]",
        ));
        assert!(result.is_err());
    }

    #[test]
    fn content_files() {
        let root = site_dir();
        std::fs::write(root.path().join("content/images/me.jpeg"), "").unwrap();
        std::fs::write(root.path().join("content/.#hello.md"), "").unwrap();
        let config = SiteConfig::from_config(config_at(root.path(), "")).unwrap();
        let files: Vec<_> = config
            .content_source()
            .unwrap()
            .files()
            .map(|(path, kind)| (path.rel_path.to_string(), kind))
            .collect();
        assert_eq!(
            files,
            vec![
                ("hello.md".to_owned(), siteconf_core::ContentKind::Markup),
                ("images/me.jpeg".to_owned(), siteconf_core::ContentKind::Static),
            ]
        );
    }

    #[test]
    fn public_url() {
        let root = site_dir();
        let mut config = SiteConfig::from_config(config_at(
            root.path(),
            "site_url: https://vort.org",
        ))
        .unwrap();
        assert_eq!(config.public_url("tags/"), "https://vort.org/tags/");
        config.relative_urls = true;
        assert_eq!(config.public_url("tags/"), "tags/");
    }
}
