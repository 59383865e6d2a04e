use relative_path::RelativePathBuf;

#[derive(
    Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[cfg_attr(not(feature = "unstable"), non_exhaustive)]
pub struct SourcePath {
    pub abs_path: std::path::PathBuf,
    pub rel_path: RelativePathBuf,
}

impl SourcePath {
    pub fn from_root(root: &std::path::Path, path: &std::path::Path) -> Option<Self> {
        let abs_path = path.to_owned();
        let rel_path = path.strip_prefix(root).ok()?;
        let rel_path = RelativePathBuf::from_path(rel_path).ok()?;
        Some(Self { abs_path, rel_path })
    }

    /// Lowercased extension, without the dot.
    pub fn extension(&self) -> Option<String> {
        self.rel_path.extension().map(|ext| ext.to_ascii_lowercase())
    }
}

/// What the generator does with a file under the content directory.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentKind {
    /// Converted by a markup reader.
    Markup,
    /// Copied as-is because it lives under a static path.
    Static,
    /// Neither; the generator skips it.
    Other,
}

impl ContentKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ContentKind::Markup => "markup",
            ContentKind::Static => "static",
            ContentKind::Other => "other",
        }
    }
}
