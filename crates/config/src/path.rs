use std::fmt;

use crate::Result;
use crate::Status;

/// Normalized path that stays inside the directory it is relative to.
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RelPath(relative_path::RelativePathBuf);

impl RelPath {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn from_unchecked<S: AsRef<str>>(value: S) -> Self {
        Self(relative_path::RelativePath::new(value.as_ref()).normalize())
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    pub fn is_empty(&self) -> bool {
        self.0.as_str().is_empty()
    }

    pub fn as_rel_path(&self) -> &relative_path::RelativePath {
        &self.0
    }

    pub fn starts_with(&self, base: &RelPath) -> bool {
        base.is_empty() || self.0.starts_with(&base.0)
    }

    pub fn join(&self, other: &RelPath) -> RelPath {
        Self(self.0.join(&other.0).normalize())
    }

    pub fn to_path<P: AsRef<std::path::Path>>(&self, base: P) -> std::path::PathBuf {
        self.0.to_path(base)
    }

    fn parse(value: &str) -> Result<Self> {
        let is_absolute = value.starts_with('/')
            || value.starts_with('\\')
            || std::path::Path::new(value).is_absolute();
        if is_absolute {
            return Err(Status::new("Path must be relative")
                .context_with(|c| c.insert("Path", value.to_owned())));
        }

        let path = Self::from_unchecked(value);
        let escapes = matches!(
            path.0.components().next(),
            Some(relative_path::Component::ParentDir)
        );
        if escapes {
            return Err(Status::new("Path must not leave its base directory")
                .context_with(|c| c.insert("Path", value.to_owned())));
        }
        Ok(path)
    }
}

impl TryFrom<&str> for RelPath {
    type Error = Status;

    fn try_from(value: &str) -> Result<Self> {
        Self::parse(value)
    }
}

impl TryFrom<String> for RelPath {
    type Error = Status;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<RelPath> for String {
    fn from(path: RelPath) -> String {
        if path.is_empty() {
            ".".to_owned()
        } else {
            path.0.into_string()
        }
    }
}

impl fmt::Display for RelPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            write!(f, ".")
        } else {
            write!(f, "{}", self.0)
        }
    }
}

static SLUG_INVALID_CHARS: once_cell::sync::Lazy<regex::Regex> =
    once_cell::sync::Lazy::new(|| regex::Regex::new(r"([^a-zA-Z0-9]+)").unwrap());

/// Create a slug for a tag, category or author name.
pub fn slugify<S: AsRef<str>>(name: S) -> String {
    slugify_str(name.as_ref())
}

fn slugify_str(name: &str) -> String {
    let name = deunicode::deunicode_with_tofu(name, "-");
    let slug = SLUG_INVALID_CHARS.replace_all(&name, "-");
    slug.trim_matches('-').to_lowercase()
}

/// Output file a URL is written to: directory-style URLs get `index.html`.
pub fn format_url_as_file<S: AsRef<str>>(url: S) -> String {
    format_url_as_file_str(url.as_ref())
}

fn format_url_as_file_str(url: &str) -> String {
    let url = url.trim_start_matches('/');
    let mut path = relative_path::RelativePathBuf::from(url.to_owned());

    // explode the url if no extension was specified
    if url.is_empty() || url.ends_with('/') || path.extension().is_none() {
        path.push("index.html");
    }

    path.into_string()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn rel_path_normalizes() {
        let actual = RelPath::try_from("./content//figures/").unwrap();
        assert_eq!(actual.as_str(), "content/figures");
    }

    #[test]
    fn rel_path_current_dir_is_empty() {
        let actual = RelPath::try_from("./").unwrap();
        assert!(actual.is_empty());
        assert_eq!(actual.to_string(), ".");
    }

    #[test]
    fn rel_path_rejects_absolute() {
        assert!(RelPath::try_from("/srv/site").is_err());
    }

    #[test]
    fn rel_path_rejects_escape() {
        assert!(RelPath::try_from("../outside").is_err());
        assert!(RelPath::try_from("inside/../../outside").is_err());
    }

    #[test]
    fn rel_path_allows_inner_parent() {
        let actual = RelPath::try_from("a/b/../c").unwrap();
        assert_eq!(actual.as_str(), "a/c");
    }

    #[test]
    fn rel_path_starts_with() {
        let path = RelPath::from_unchecked("assets/css/custom.css");
        assert!(path.starts_with(&RelPath::from_unchecked("assets")));
        assert!(path.starts_with(&RelPath::new()));
        assert!(!path.starts_with(&RelPath::from_unchecked("figures")));
    }

    #[test]
    fn test_slugify() {
        let actual = slugify("___filE-worlD-__09___");
        assert_eq!(actual, "file-world-09");
    }

    #[test]
    fn test_slugify_unicode() {
        let actual = slugify("__Æneid__北亰-worlD-__09___");
        assert_eq!(actual, "aeneid-bei-jing-world-09");
    }

    #[test]
    fn format_url_as_file_directory() {
        assert_eq!(format_url_as_file("tag/{slug}/"), "tag/{slug}/index.html");
    }

    #[test]
    fn format_url_as_file_no_extension() {
        assert_eq!(format_url_as_file("archives"), "archives/index.html");
    }

    #[test]
    fn format_url_as_file_no_explode() {
        assert_eq!(format_url_as_file("tag/{slug}.html"), "tag/{slug}.html");
    }

    #[test]
    fn format_url_as_file_absolute() {
        assert_eq!(format_url_as_file("/tags/"), "tags/index.html");
    }

    #[test]
    fn format_url_as_file_root() {
        assert_eq!(format_url_as_file(""), "index.html");
    }
}
