use std::fmt;

use crate::Link;
use crate::Result;
use crate::Template;

/// Listing pages the generator produces for grouped content.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Taxonomy {
    Tag,
    Tags,
    Author,
    Authors,
    Category,
    Categories,
    Archives,
}

impl Taxonomy {
    pub const ALL: [Taxonomy; 7] = [
        Taxonomy::Tag,
        Taxonomy::Tags,
        Taxonomy::Author,
        Taxonomy::Authors,
        Taxonomy::Category,
        Taxonomy::Categories,
        Taxonomy::Archives,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Taxonomy::Tag => "tag",
            Taxonomy::Tags => "tags",
            Taxonomy::Author => "author",
            Taxonomy::Authors => "authors",
            Taxonomy::Category => "category",
            Taxonomy::Categories => "categories",
            Taxonomy::Archives => "archives",
        }
    }

    /// Whether pages of this kind are generated once per tag/author/category.
    pub fn is_per_item(self) -> bool {
        matches!(self, Taxonomy::Tag | Taxonomy::Author | Taxonomy::Category)
    }
}

impl fmt::Display for Taxonomy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Taxonomy {
    type Err = crate::Status;

    fn from_str(s: &str) -> Result<Self> {
        Taxonomy::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| {
                crate::Status::new("Unknown taxonomy")
                    .context_with(|c| c.insert("Taxonomy", s.to_owned()))
            })
    }
}

/// A URL pattern and the file it is saved to.
///
/// `save_as` is derived from `url` when omitted.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "unstable", serde(deny_unknown_fields))]
pub struct UrlPattern {
    pub url: Template,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub save_as: Option<Template>,
}

impl UrlPattern {
    fn from_unchecked(url: &str) -> Self {
        Self {
            url: Template::from_unchecked(url),
            save_as: None,
        }
    }

    pub fn save_as(&self) -> Template {
        self.save_as
            .clone()
            .unwrap_or_else(|| self.url.as_save_as())
    }

    fn validate(&self, field: &str) -> Result<()> {
        if let Some(save_as) = &self.save_as {
            let expected = self.url.as_save_as();
            if *save_as != expected {
                return Err(crate::invalid(
                    field,
                    format!(
                        "save_as `{save_as}` does not match url `{}`, expected `{expected}`",
                        self.url
                    ),
                ));
            }
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "unstable", serde(deny_unknown_fields))]
#[cfg_attr(not(feature = "unstable"), non_exhaustive)]
pub struct Urls {
    pub tag: UrlPattern,
    pub tags: UrlPattern,
    pub author: UrlPattern,
    pub authors: UrlPattern,
    pub category: UrlPattern,
    pub categories: UrlPattern,
    pub archives: UrlPattern,
}

impl Default for Urls {
    fn default() -> Self {
        Self {
            tag: UrlPattern::from_unchecked("tag/{slug}.html"),
            tags: UrlPattern::from_unchecked("tags.html"),
            author: UrlPattern::from_unchecked("author/{slug}.html"),
            authors: UrlPattern::from_unchecked("authors.html"),
            category: UrlPattern::from_unchecked("category/{slug}.html"),
            categories: UrlPattern::from_unchecked("categories.html"),
            archives: UrlPattern::from_unchecked("archives.html"),
        }
    }
}

impl Urls {
    pub fn get(&self, taxonomy: Taxonomy) -> &UrlPattern {
        match taxonomy {
            Taxonomy::Tag => &self.tag,
            Taxonomy::Tags => &self.tags,
            Taxonomy::Author => &self.author,
            Taxonomy::Authors => &self.authors,
            Taxonomy::Category => &self.category,
            Taxonomy::Categories => &self.categories,
            Taxonomy::Archives => &self.archives,
        }
    }

    pub fn validate(&self) -> Result<()> {
        for taxonomy in Taxonomy::ALL {
            let pattern = self.get(taxonomy);
            let field = format!("urls.{taxonomy}");
            pattern.validate(&field)?;

            let has_slug = pattern.url.placeholders().contains(&"slug");
            if taxonomy.is_per_item() && !has_slug {
                return Err(crate::invalid(&field, "url needs a `{slug}` placeholder"));
            }
        }
        Ok(())
    }

    /// Link for the `taxonomy` page of `name`, e.g. the tag page for "Machine Learning".
    pub fn render(&self, taxonomy: Taxonomy, name: &str) -> Result<Link> {
        let pattern = self.get(taxonomy);
        let slug = crate::path::slugify(name);
        let vars = [("slug", slug.as_str()), ("name", name)];
        Ok(Link {
            url: pattern.url.render(&vars)?,
            save_as: pattern.save_as().render(&vars)?,
        })
    }
}
