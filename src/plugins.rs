use std::ffi::OsStr;
use std::path;

use itertools::Itertools;
use siteconf_config::PluginName;

use crate::error::*;

/// A plugin and where it was found.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Plugin {
    pub name: PluginName,
    pub location: path::PathBuf,
}

/// Locate each plugin in the first entry of `search_paths` that provides its package.
///
/// A package is either a directory named after it or a file whose stem is its name.
/// Relative search paths are taken from `root`.
pub fn resolve_plugins(
    root: &path::Path,
    search_paths: &[path::PathBuf],
    names: &[PluginName],
) -> Result<Vec<Plugin>> {
    let search: Vec<_> = search_paths.iter().map(|p| root.join(p)).collect();
    for dir in &search {
        if !dir.is_dir() {
            log::warn!("Plugin path `{}` does not exist", dir.display());
        }
    }

    names
        .iter()
        .map(|name| {
            find_plugin(&search, name).ok_or_else(|| {
                anyhow::format_err!(
                    "Plugin `{}` not found in plugin_paths [{}]",
                    name,
                    search_paths.iter().map(|p| p.display()).join(", ")
                )
            })
        })
        .collect()
}

fn find_plugin(search: &[path::PathBuf], name: &PluginName) -> Option<Plugin> {
    let package = name.package();
    let location = search.iter().find_map(|dir| {
        let candidate = dir.join(package);
        if candidate.is_dir() {
            return Some(candidate);
        }
        std::fs::read_dir(dir)
            .ok()?
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|p| p.is_file() && p.file_stem() == Some(OsStr::new(package)))
            .sorted()
            .next()
    })?;
    log::trace!("Plugin `{}` found at {}", name, location.display());
    Some(Plugin {
        name: name.clone(),
        location,
    })
}

#[cfg(test)]
mod test {
    use super::*;

    fn names(names: &[&str]) -> Vec<PluginName> {
        names.iter().map(|n| PluginName::new(*n).unwrap()).collect()
    }

    #[test]
    fn resolves_directory_and_file() {
        let root = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(root.path().join("plugins/render_math")).unwrap();
        std::fs::write(root.path().join("plugins/ipynb.toml"), "").unwrap();

        let plugins = resolve_plugins(
            root.path(),
            &["plugins".into()],
            &names(&["render_math", "ipynb.markup"]),
        )
        .unwrap();
        assert_eq!(plugins.len(), 2);
        assert_eq!(plugins[0].location, root.path().join("plugins/render_math"));
        assert_eq!(plugins[1].location, root.path().join("plugins/ipynb.toml"));
        assert_eq!(plugins[1].name.as_str(), "ipynb.markup");
    }

    #[test]
    fn first_search_path_wins() {
        let root = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(root.path().join("local/render_math")).unwrap();
        std::fs::create_dir_all(root.path().join("shared/render_math")).unwrap();

        let plugins = resolve_plugins(
            root.path(),
            &["local".into(), "shared".into()],
            &names(&["render_math"]),
        )
        .unwrap();
        assert_eq!(plugins[0].location, root.path().join("local/render_math"));
    }

    #[test]
    fn missing_plugin() {
        let root = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(root.path().join("plugins")).unwrap();

        let result = resolve_plugins(root.path(), &["plugins".into()], &names(&["i18n_subsites"]));
        assert!(result.is_err());
    }

    #[test]
    fn no_plugins_needs_no_paths() {
        let root = tempfile::tempdir().unwrap();
        let plugins = resolve_plugins(root.path(), &[], &[]).unwrap();
        assert!(plugins.is_empty());
    }
}
