use std::fmt;

use crate::Result;
use crate::Status;

static PLACEHOLDER_NAME: once_cell::sync::Lazy<regex::Regex> =
    once_cell::sync::Lazy::new(|| regex::Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").unwrap());

/// URL or output-path pattern with `{name}` placeholders.
///
/// `{{` and `}}` stand for literal braces; any other brace is rejected when the template is
/// parsed, so every template in a loaded config shares the same placeholder syntax.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Template {
    raw: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum Segment<'t> {
    Literal(String),
    Placeholder(&'t str),
}

impl Template {
    pub fn parse<S: Into<String>>(raw: S) -> Result<Self> {
        let raw = raw.into();
        scan(&raw)?;
        Ok(Self { raw })
    }

    /// Wrap a built-in template without scanning it.
    pub(crate) fn from_unchecked<S: Into<String>>(raw: S) -> Self {
        Self { raw: raw.into() }
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Placeholder names in the order they appear.
    pub fn placeholders(&self) -> Vec<&str> {
        scan(&self.raw)
            .unwrap_or_default()
            .into_iter()
            .filter_map(|s| match s {
                Segment::Placeholder(name) => Some(name),
                Segment::Literal(_) => None,
            })
            .collect()
    }

    /// Substitute `vars` and normalize the result into a root-relative path.
    pub fn render(&self, vars: &[(&str, &str)]) -> Result<String> {
        let mut rendered = String::with_capacity(self.raw.len());
        for segment in scan(&self.raw)? {
            match segment {
                Segment::Literal(text) => rendered.push_str(&text),
                Segment::Placeholder(name) => {
                    let value = vars
                        .iter()
                        .find(|(key, _)| *key == name)
                        .map(|(_, value)| *value)
                        .ok_or_else(|| {
                            Status::new("Unknown placeholder").context_with(|c| {
                                c.insert("Placeholder", name.to_owned())
                                    .insert("Template", self.raw.clone())
                            })
                        })?;
                    rendered.push_str(value);
                }
            }
        }

        // Handle the user doing windows-style
        let mut rendered = rendered.replace('\\', "/");

        // Handle cases where substitutions were blank
        while rendered.contains("//") {
            rendered = rendered.replace("//", "/");
        }

        if rendered.starts_with('/') {
            rendered.remove(0);
        }

        Ok(rendered)
    }

    /// Output path for a template that names a URL.
    pub fn as_save_as(&self) -> Template {
        // Appending a plain filename cannot introduce a brace.
        Self {
            raw: crate::path::format_url_as_file(&self.raw),
        }
    }
}

fn scan(raw: &str) -> Result<Vec<Segment<'_>>> {
    let mut segments = Vec::new();
    let mut literal = String::new();
    let mut chars = raw.char_indices().peekable();
    while let Some((i, c)) = chars.next() {
        match c {
            '{' if matches!(chars.peek(), Some((_, '{'))) => {
                chars.next();
                literal.push('{');
            }
            '}' if matches!(chars.peek(), Some((_, '}'))) => {
                chars.next();
                literal.push('}');
            }
            '{' => {
                let rest = &raw[i + 1..];
                let end = rest
                    .find('}')
                    .ok_or_else(|| malformed(raw, "unclosed `{`"))?;
                let name = &rest[..end];
                if !PLACEHOLDER_NAME.is_match(name) {
                    return Err(malformed(raw, "placeholder names must be identifiers"));
                }
                if !literal.is_empty() {
                    segments.push(Segment::Literal(std::mem::take(&mut literal)));
                }
                segments.push(Segment::Placeholder(name));
                // `name` is ASCII, so its byte length is its char count
                for _ in 0..=name.len() {
                    chars.next();
                }
            }
            '}' => return Err(malformed(raw, "unmatched `}`")),
            c => literal.push(c),
        }
    }
    if !literal.is_empty() {
        segments.push(Segment::Literal(literal));
    }
    Ok(segments)
}

fn malformed(raw: &str, reason: &str) -> Status {
    Status::new("Malformed template").context_with(|c| {
        c.insert("Template", raw.to_owned())
            .insert("Reason", reason.to_owned())
    })
}

impl TryFrom<String> for Template {
    type Error = Status;

    fn try_from(raw: String) -> Result<Self> {
        Self::parse(raw)
    }
}

impl TryFrom<&str> for Template {
    type Error = Status;

    fn try_from(raw: &str) -> Result<Self> {
        Self::parse(raw)
    }
}

impl From<Template> for String {
    fn from(template: Template) -> String {
        template.raw
    }
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.raw.fmt(f)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn parse_plain() {
        let template = Template::parse("archives.html").unwrap();
        assert!(template.placeholders().is_empty());
    }

    #[test]
    fn parse_placeholders_in_order() {
        let template = Template::parse("{base_name}/page/{number}/").unwrap();
        assert_eq!(template.placeholders(), vec!["base_name", "number"]);
    }

    #[test]
    fn parse_escaped_braces() {
        let template = Template::parse("{{literal}}/{slug}").unwrap();
        assert_eq!(template.placeholders(), vec!["slug"]);
        assert_eq!(
            template.render(&[("slug", "rust")]).unwrap(),
            "{literal}/rust"
        );
    }

    #[test]
    fn parse_unclosed() {
        assert!(Template::parse("tag/{slug/").is_err());
    }

    #[test]
    fn parse_unmatched_close() {
        assert!(Template::parse("tag/slug}/").is_err());
    }

    #[test]
    fn parse_other_syntax() {
        assert!(Template::parse("tag/{0}/").is_err());
        assert!(Template::parse("tag/{}/").is_err());
        assert!(Template::parse("tag/{slug:>3}/").is_err());
    }

    #[test]
    fn render_substitutes() {
        let template = Template::parse("{base_name}/page/{number}/index.html").unwrap();
        let actual = template
            .render(&[("base_name", "blog"), ("number", "2")])
            .unwrap();
        assert_eq!(actual, "blog/page/2/index.html");
    }

    #[test]
    fn render_blank_substitution() {
        let template = Template::parse("{base_name}/index.html").unwrap();
        let actual = template.render(&[("base_name", "")]).unwrap();
        assert_eq!(actual, "index.html");
    }

    #[test]
    fn render_windows_separators() {
        let template = Template::parse("{base_name}/index.html").unwrap();
        let actual = template.render(&[("base_name", "a\\b")]).unwrap();
        assert_eq!(actual, "a/b/index.html");
    }

    #[test]
    fn render_unknown_placeholder() {
        let template = Template::parse("tag/{slug}/").unwrap();
        assert!(template.render(&[("name", "x")]).is_err());
    }

    #[test]
    fn save_as_from_url() {
        let template = Template::parse("tag/{slug}/").unwrap();
        assert_eq!(template.as_save_as().as_str(), "tag/{slug}/index.html");
    }
}
