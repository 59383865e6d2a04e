use relative_path::RelativePathBuf;

use crate::ContentKind;
use crate::Result;
use crate::SourcePath;
use crate::Status;

/// The content directory as the generator will read it.
#[derive(Debug, Clone)]
pub struct ContentSource {
    root: std::path::PathBuf,
    ignore: ignore::gitignore::Gitignore,
    markup: Vec<String>,
    static_dirs: Vec<RelativePathBuf>,
}

impl ContentSource {
    pub fn new<'i>(
        root: &std::path::Path,
        ignores: impl IntoIterator<Item = &'i str>,
    ) -> Result<Self> {
        let mut ignore = ignore::gitignore::GitignoreBuilder::new(root);
        for line in ignores.into_iter() {
            ignore.add_line(None, line).map_err(|e| {
                Status::new("Invalid ignore entry")
                    .with_source(e)
                    .context_with(|c| c.insert("Pattern", line.to_owned()))
            })?;
        }
        let ignore = ignore
            .build()
            .map_err(|e| Status::new("Invalid ignore entry").with_source(e))?;

        let source = Self {
            root: root.to_owned(),
            ignore,
            markup: Vec::new(),
            static_dirs: Vec::new(),
        };
        Ok(source)
    }

    /// Extensions (without the dot) handled by a markup reader.
    pub fn with_markup<'m>(mut self, markup: impl IntoIterator<Item = &'m str>) -> Self {
        self.markup = markup.into_iter().map(|m| m.to_ascii_lowercase()).collect();
        self
    }

    /// Directories, relative to the root, copied verbatim.
    pub fn with_static_dirs<'s>(mut self, dirs: impl IntoIterator<Item = &'s str>) -> Self {
        self.static_dirs = dirs.into_iter().map(RelativePathBuf::from).collect();
        self
    }

    pub fn root(&self) -> &std::path::Path {
        &self.root
    }

    pub fn includes_file(&self, file: &std::path::Path) -> bool {
        let is_dir = false;
        self.includes_path(file, is_dir)
    }

    pub fn includes_dir(&self, dir: &std::path::Path) -> bool {
        let is_dir = true;
        self.includes_path(dir, is_dir)
    }

    pub fn iter(&self) -> impl Iterator<Item = std::path::PathBuf> + '_ {
        walkdir::WalkDir::new(&self.root)
            .min_depth(1)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(move |e| self.includes_entry(e))
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .map(move |e| e.path().to_path_buf())
    }

    /// Every included file with what the generator does with it.
    pub fn files(&self) -> impl Iterator<Item = (SourcePath, ContentKind)> + '_ {
        self.iter()
            .filter_map(move |path| SourcePath::from_root(&self.root, &path))
            .map(move |path| {
                let kind = self.classify(&path);
                (path, kind)
            })
    }

    /// Static paths win over markup so notebooks kept as downloads are not converted.
    pub fn classify(&self, path: &SourcePath) -> ContentKind {
        if self
            .static_dirs
            .iter()
            .any(|dir| dir.as_str().is_empty() || path.rel_path.starts_with(dir))
        {
            return ContentKind::Static;
        }
        match path.extension() {
            Some(ext) if self.markup.contains(&ext) => ContentKind::Markup,
            _ => ContentKind::Other,
        }
    }

    fn includes_path(&self, path: &std::path::Path, is_dir: bool) -> bool {
        if path == self.root {
            return true;
        }

        let parent = path.parent();
        if let Some(parent) = parent {
            if parent.starts_with(&self.root) && !self.includes_path(parent, parent.is_dir()) {
                return false;
            }
        }

        self.includes_path_leaf(path, is_dir)
    }

    fn includes_path_leaf(&self, path: &std::path::Path, is_dir: bool) -> bool {
        match self.ignore.matched(path, is_dir) {
            ignore::Match::None => true,
            ignore::Match::Ignore(glob) => {
                log::trace!("{:?}: ignored {:?}", path, glob.original());
                false
            }
            ignore::Match::Whitelist(glob) => {
                log::trace!("{:?}: allowed {:?}", path, glob.original());
                true
            }
        }
    }

    fn includes_entry(&self, entry: &walkdir::DirEntry) -> bool {
        let file = entry.path();

        // Assumption: The parent paths will have been checked before we even get to this point.
        let is_dir = entry.file_type().is_dir();
        self.includes_path_leaf(file, is_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    macro_rules! assert_includes_dir {
        ($root:expr, $ignores:expr, $test:expr, $included:expr) => {
            let root = $root;
            let ignores = $ignores;
            let files = ContentSource::new(std::path::Path::new(root), ignores).unwrap();
            assert_eq!(files.includes_dir(std::path::Path::new($test)), $included);
        };
    }
    macro_rules! assert_includes_file {
        ($root:expr, $ignores:expr, $test:expr, $included:expr) => {
            let root = $root;
            let ignores = $ignores;
            let files = ContentSource::new(std::path::Path::new(root), ignores).unwrap();
            assert_eq!(files.includes_file(std::path::Path::new($test)), $included);
        };
    }

    #[test]
    fn includes_root_dir() {
        assert_includes_dir!("/srv/site/content", [], "/srv/site/content", true);

        assert_includes_dir!("./", [], "./", true);
    }

    #[test]
    fn includes_child_dir() {
        assert_includes_dir!("/srv/site/content", [], "/srv/site/content/child", true);

        assert_includes_dir!("./", [], "./child", true);
    }

    #[test]
    fn ignores_notebook_checkpoints() {
        assert_includes_dir!(
            "/srv/site/content",
            [".ipynb_checkpoints"],
            "/srv/site/content/.ipynb_checkpoints",
            false
        );
        assert_includes_file!(
            "/srv/site/content",
            [".ipynb_checkpoints"],
            "/srv/site/content/.ipynb_checkpoints/post-checkpoint.ipynb",
            false
        );
    }

    #[test]
    fn ignores_editor_lock_files() {
        assert_includes_file!(
            "/srv/site/content",
            [".#*"],
            "/srv/site/content/.#post.md",
            false
        );
        assert_includes_file!("/srv/site/content", [".#*"], "/srv/site/content/post.md", true);
    }

    #[test]
    fn not_ignored_by_parent() {
        assert_includes_file!(
            "/tmp/.foo/site/content",
            [".*"],
            "/tmp/.foo/site/content/child.md",
            true
        );
    }

    #[test]
    fn invalid_pattern() {
        let result = ContentSource::new(std::path::Path::new("/srv/site"), ["a/**b/{"]);
        assert!(result.is_err());
    }

    fn source_path(rel: &str) -> SourcePath {
        let root = std::path::Path::new("/srv/site/content");
        SourcePath::from_root(root, &root.join(rel)).unwrap()
    }

    #[test]
    fn classify_files() {
        let source = ContentSource::new(std::path::Path::new("/srv/site/content"), [])
            .unwrap()
            .with_markup(["md", "ipynb"])
            .with_static_dirs(["figures", "assets"]);
        assert_eq!(
            source.classify(&source_path("posts/hello.md")),
            ContentKind::Markup
        );
        assert_eq!(
            source.classify(&source_path("posts/analysis.ipynb")),
            ContentKind::Markup
        );
        assert_eq!(
            source.classify(&source_path("figures/tree.ipynb")),
            ContentKind::Static
        );
        assert_eq!(
            source.classify(&source_path("assets/me.jpeg")),
            ContentKind::Static
        );
        assert_eq!(
            source.classify(&source_path("notes.txt")),
            ContentKind::Other
        );
    }
}
