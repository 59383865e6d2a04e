use crate::Result;
use crate::Template;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedKind {
    AllAtom,
    AllRss,
    CategoryAtom,
    CategoryRss,
    TagAtom,
    TagRss,
    AuthorAtom,
    AuthorRss,
    TranslationAtom,
}

impl FeedKind {
    pub fn as_str(self) -> &'static str {
        match self {
            FeedKind::AllAtom => "all_atom",
            FeedKind::AllRss => "all_rss",
            FeedKind::CategoryAtom => "category_atom",
            FeedKind::CategoryRss => "category_rss",
            FeedKind::TagAtom => "tag_atom",
            FeedKind::TagRss => "tag_rss",
            FeedKind::AuthorAtom => "author_atom",
            FeedKind::AuthorRss => "author_rss",
            FeedKind::TranslationAtom => "translation_atom",
        }
    }

    /// Feeds generated once per category/tag/author/language take a `{slug}` or `{lang}`.
    fn item_placeholder(self) -> Option<&'static str> {
        match self {
            FeedKind::AllAtom | FeedKind::AllRss => None,
            FeedKind::TranslationAtom => Some("lang"),
            _ => Some("slug"),
        }
    }
}

/// Output paths of the syndication feeds; an unset feed is not generated.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "unstable", serde(deny_unknown_fields))]
#[cfg_attr(not(feature = "unstable"), non_exhaustive)]
pub struct Feeds {
    pub all_atom: Option<Template>,
    pub all_rss: Option<Template>,
    pub category_atom: Option<Template>,
    pub category_rss: Option<Template>,
    pub tag_atom: Option<Template>,
    pub tag_rss: Option<Template>,
    pub author_atom: Option<Template>,
    pub author_rss: Option<Template>,
    pub translation_atom: Option<Template>,
}

impl Feeds {
    pub fn get(&self, kind: FeedKind) -> Option<&Template> {
        match kind {
            FeedKind::AllAtom => self.all_atom.as_ref(),
            FeedKind::AllRss => self.all_rss.as_ref(),
            FeedKind::CategoryAtom => self.category_atom.as_ref(),
            FeedKind::CategoryRss => self.category_rss.as_ref(),
            FeedKind::TagAtom => self.tag_atom.as_ref(),
            FeedKind::TagRss => self.tag_rss.as_ref(),
            FeedKind::AuthorAtom => self.author_atom.as_ref(),
            FeedKind::AuthorRss => self.author_rss.as_ref(),
            FeedKind::TranslationAtom => self.translation_atom.as_ref(),
        }
    }

    pub fn enabled(&self) -> impl Iterator<Item = (FeedKind, &Template)> + '_ {
        [
            FeedKind::AllAtom,
            FeedKind::AllRss,
            FeedKind::CategoryAtom,
            FeedKind::CategoryRss,
            FeedKind::TagAtom,
            FeedKind::TagRss,
            FeedKind::AuthorAtom,
            FeedKind::AuthorRss,
            FeedKind::TranslationAtom,
        ]
        .into_iter()
        .filter_map(|kind| self.get(kind).map(|path| (kind, path)))
    }

    pub fn is_disabled(&self) -> bool {
        self.enabled().next().is_none()
    }

    pub fn validate(&self) -> Result<()> {
        for (kind, path) in self.enabled() {
            let placeholders = path.placeholders();
            let field = format!("feeds.{}", kind.as_str());
            match kind.item_placeholder() {
                Some(expected) if !placeholders.contains(&expected) => {
                    return Err(crate::invalid(
                        &field,
                        format!("path needs a `{{{expected}}}` placeholder"),
                    ));
                }
                None if !placeholders.is_empty() => {
                    return Err(crate::invalid(&field, "path takes no placeholders"));
                }
                _ => {}
            }
        }
        Ok(())
    }
}
