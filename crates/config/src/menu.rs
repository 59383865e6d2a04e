use crate::Result;

/// Labelled link shown in a menu, the blogroll or the social widget.
///
/// Written either as `[label, url]`, `[label, url, path]` or as a map.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(from = "MenuItemRepr", into = "MenuItemRepr")]
pub struct MenuItem {
    pub label: String,
    pub url: String,
    /// Output file backing `url`, for pages the generator itself writes.
    pub path: Option<String>,
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
enum MenuItemRepr {
    Triple(String, String, String),
    Pair(String, String),
    Detailed {
        label: String,
        url: String,
        #[serde(default)]
        path: Option<String>,
    },
}

impl From<MenuItemRepr> for MenuItem {
    fn from(repr: MenuItemRepr) -> Self {
        match repr {
            MenuItemRepr::Triple(label, url, path) => Self {
                label,
                url,
                path: Some(path),
            },
            MenuItemRepr::Pair(label, url) => Self {
                label,
                url,
                path: None,
            },
            MenuItemRepr::Detailed { label, url, path } => Self { label, url, path },
        }
    }
}

impl From<MenuItem> for MenuItemRepr {
    fn from(item: MenuItem) -> Self {
        match item.path {
            Some(path) => MenuItemRepr::Triple(item.label, item.url, path),
            None => MenuItemRepr::Pair(item.label, item.url),
        }
    }
}

impl MenuItem {
    pub fn new<L: Into<String>, U: Into<String>>(label: L, url: U) -> Self {
        Self {
            label: label.into(),
            url: url.into(),
            path: None,
        }
    }

    pub fn with_path<P: Into<String>>(mut self, path: P) -> Self {
        self.path = Some(path.into());
        self
    }

    fn validate(&self, field: &str) -> Result<()> {
        if self.label.trim().is_empty() {
            return Err(crate::invalid(field, "label must not be empty"));
        }
        if self.url.trim().is_empty() {
            return Err(crate::invalid(
                field,
                format!("url for `{}` must not be empty", self.label),
            ));
        }
        if let Some(path) = &self.path {
            let expected = crate::path::format_url_as_file(&self.url);
            if *path != expected {
                log::warn!(
                    "{field}: `{}` is saved as `{path}`, which is not where `{}` resolves (`{expected}`)",
                    self.label,
                    self.url
                );
            }
        }
        Ok(())
    }
}

pub(crate) fn validate_items(field: &str, items: &[MenuItem]) -> Result<()> {
    for (i, item) in items.iter().enumerate() {
        item.validate(&format!("{field}[{i}]"))?;
    }
    Ok(())
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "unstable", serde(deny_unknown_fields))]
#[cfg_attr(not(feature = "unstable"), non_exhaustive)]
pub struct Menu {
    pub display_pages: bool,
    pub display_categories: bool,
    /// Generator-owned pages (tags, authors, archives) to list in the menu.
    pub internal_pages: Vec<MenuItem>,
    pub items: Vec<MenuItem>,
}

impl Default for Menu {
    fn default() -> Self {
        Self {
            display_pages: true,
            display_categories: true,
            internal_pages: Default::default(),
            items: Default::default(),
        }
    }
}

impl Menu {
    pub fn validate(&self) -> Result<()> {
        validate_items("menu.internal_pages", &self.internal_pages)?;
        validate_items("menu.items", &self.items)?;
        Ok(())
    }
}
