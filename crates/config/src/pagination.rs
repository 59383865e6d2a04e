use itertools::Itertools as _;

use crate::Result;
use crate::Template;

/// Where a rendered page lives: the link target and the file written for it.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct Link {
    pub url: String,
    pub save_as: String,
}

/// `(threshold, url, save_as)`: applies from page `threshold` until the next pattern takes over.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(from = "PatternRepr", into = "PatternRepr")]
pub struct PaginationPattern {
    pub threshold: u32,
    pub url: Template,
    pub save_as: Template,
}

type PatternRepr = (u32, Template, Template);

impl From<PatternRepr> for PaginationPattern {
    fn from((threshold, url, save_as): PatternRepr) -> Self {
        Self {
            threshold,
            url,
            save_as,
        }
    }
}

impl From<PaginationPattern> for PatternRepr {
    fn from(pattern: PaginationPattern) -> Self {
        (pattern.threshold, pattern.url, pattern.save_as)
    }
}

impl PaginationPattern {
    pub fn new(threshold: u32, url: &str, save_as: &str) -> Result<Self> {
        Ok(Self {
            threshold,
            url: Template::parse(url)?,
            save_as: Template::parse(save_as)?,
        })
    }

    fn from_unchecked(threshold: u32, url: &str, save_as: &str) -> Self {
        Self {
            threshold,
            url: Template::from_unchecked(url),
            save_as: Template::from_unchecked(save_as),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "unstable", serde(deny_unknown_fields))]
#[cfg_attr(not(feature = "unstable"), non_exhaustive)]
pub struct Pagination {
    /// Items per listing page; listings are not split when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_per_page: Option<u32>,
    pub patterns: Vec<PaginationPattern>,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            default_per_page: None,
            patterns: vec![
                PaginationPattern::from_unchecked(1, "{name}{extension}", "{name}{extension}"),
                PaginationPattern::from_unchecked(
                    2,
                    "{name}{number}{extension}",
                    "{name}{number}{extension}",
                ),
            ],
        }
    }
}

impl Pagination {
    pub fn is_enabled(&self) -> bool {
        self.default_per_page.is_some()
    }

    pub fn validate(&self) -> Result<()> {
        if self.default_per_page == Some(0) {
            return Err(crate::invalid(
                "pagination.default_per_page",
                "must be at least 1",
            ));
        }

        if let Some(first) = self.patterns.first() {
            if first.threshold != 1 {
                return Err(crate::invalid(
                    "pagination.patterns",
                    format!("first threshold must be 1, got {}", first.threshold),
                ));
            }
        }
        for (prev, next) in self.patterns.iter().tuple_windows() {
            if next.threshold <= prev.threshold {
                return Err(crate::invalid(
                    "pagination.patterns",
                    format!(
                        "thresholds must ascend, got {} after {}",
                        next.threshold, prev.threshold
                    ),
                ));
            }
        }
        Ok(())
    }

    /// The last pattern whose threshold is at or below `page`.
    pub fn pattern_for(&self, page: u32) -> Option<&PaginationPattern> {
        self.patterns
            .iter()
            .take_while(|pattern| pattern.threshold <= page)
            .last()
    }

    /// Link for listing page `page` (1-based) of `base_name`.
    ///
    /// `name` and `extension` describe the listing's own output file (`index`, `.html`).
    pub fn render(
        &self,
        page: u32,
        base_name: &str,
        name: &str,
        extension: &str,
    ) -> Result<Option<Link>> {
        let Some(pattern) = self.pattern_for(page) else {
            return Ok(None);
        };
        let number = page.to_string();
        let vars = [
            ("base_name", base_name),
            ("name", name),
            ("extension", extension),
            ("number", number.as_str()),
        ];
        let link = Link {
            url: pattern.url.render(&vars)?,
            save_as: pattern.save_as.render(&vars)?,
        };
        Ok(Some(link))
    }
}
