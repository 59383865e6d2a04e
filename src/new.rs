use std::fs;
use std::io::Write;
use std::path;

use crate::error::*;

const SITECONF_YML: &str = "site_name: My Site
site_url: ''
default_lang: en
timezone: UTC
relative_urls: true

path: content
static_paths: [images]

feeds:
  all_atom: feeds/all.atom.xml

pagination:
  default_per_page: 10
  patterns:
    - [1, '{base_name}/', '{base_name}/index.html']
    - [2, '{base_name}/page/{number}/', '{base_name}/page/{number}/index.html']

urls:
  tag: {url: 'tag/{slug}/'}
  tags: {url: tags/}
  category: {url: 'category/{slug}/'}
  categories: {url: categories/}
  author: {url: 'author/{slug}/'}
  authors: {url: authors/}
  archives: {url: archives/}

menu:
  internal_pages:
    - [Tags, tags/, tags/index.html]
    - [Archives, archives/, archives/index.html]

sidebar:
  tags_limit: 0
  links_limit: 0
";

const FIRST_POST_MD: &str = "Title: First Post
Date: 2024-01-01
Tags: welcome

Welcome to your new site!
";

/// Scaffold a site in `dest`: a starter settings file and an empty content tree.
pub fn create_new_project<P: AsRef<path::Path>>(dest: P) -> Result<()> {
    create_new_project_for_path(dest.as_ref())
}

fn create_new_project_for_path(dest: &path::Path) -> Result<()> {
    fs::create_dir_all(dest)?;

    create_file(&dest.join(siteconf_config::CONFIG_FILE), SITECONF_YML)?;

    fs::create_dir_all(dest.join("content/images"))?;
    create_file(&dest.join("content/first-post.md"), FIRST_POST_MD)?;

    Ok(())
}

fn create_file(path: &path::Path, content: &str) -> Result<()> {
    log::trace!("Creating file {}", path.display());

    let mut file = fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .map_err(|e| anyhow::format_err!("Can not create {}: {}", path.display(), e))?;

    file.write_all(content.as_bytes())?;
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn starter_config_is_valid() {
        let config: siteconf_config::Config = SITECONF_YML.parse().unwrap();
        config.validate().unwrap();
        assert!(!config.feeds.is_disabled());
        assert_eq!(config.pagination.default_per_page, Some(10));
    }

    #[test]
    fn creates_resolvable_project() {
        let dir = tempfile::tempdir().unwrap();
        create_new_project(dir.path()).unwrap();

        let config = siteconf_config::Config::from_file(dir.path().join("_siteconf.yml")).unwrap();
        let config = crate::SiteConfig::from_config(config).unwrap();
        let files: Vec<_> = config.content_source().unwrap().files().collect();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].1, siteconf_core::ContentKind::Markup);
    }

    #[test]
    fn refuses_to_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        create_new_project(dir.path()).unwrap();
        assert!(create_new_project(dir.path()).is_err());
    }
}
