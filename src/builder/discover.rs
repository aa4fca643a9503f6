//! Extension source discovery.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

/// File extension of Cython sources.
pub const SOURCE_EXTENSION: &str = "pyx";

/// Produce the ordered set of extension sources to compile.
///
/// An explicit source list fully overrides the search: entries are filtered
/// to the `.pyx` suffix, resolved against `root`, and returned in the given
/// order. Exclusions are not applied to explicit sources.
///
/// Otherwise the package tree under `root` is walked; each name in
/// `exclude_dirs` marks the subtree `root/<name>` and files below it are
/// dropped. The walk is sorted so the result is stable across platforms.
///
/// A root with no matching files yields an empty list, which downstream
/// treats as a valid no-op build.
pub fn discover_sources(
    root: &Path,
    explicit: &[PathBuf],
    exclude_dirs: &[String],
) -> Vec<PathBuf> {
    if !explicit.is_empty() {
        let sources: Vec<PathBuf> = explicit
            .iter()
            .filter(|path| has_source_extension(path))
            .map(|path| {
                if path.is_absolute() {
                    path.clone()
                } else {
                    root.join(path)
                }
            })
            .collect();
        tracing::debug!("using {} explicit source(s)", sources.len());
        return sources;
    }

    let exclude_roots: Vec<PathBuf> = exclude_dirs.iter().map(|name| root.join(name)).collect();

    let sources: Vec<PathBuf> = WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| has_source_extension(path))
        .filter(|path| !exclude_roots.iter().any(|excluded| path.starts_with(excluded)))
        .collect();

    tracing::debug!("discovered {} source(s) under {}", sources.len(), root.display());
    sources
}

fn has_source_extension(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext == SOURCE_EXTENSION)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(path: &Path) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "").unwrap();
    }

    #[test]
    fn test_empty_root_yields_empty_set() {
        let tmp = TempDir::new().unwrap();
        assert!(discover_sources(tmp.path(), &[], &[]).is_empty());
    }

    #[test]
    fn test_missing_root_yields_empty_set() {
        assert!(discover_sources(Path::new("/nonexistent/pkg"), &[], &[]).is_empty());
    }

    #[test]
    fn test_walk_finds_nested_sources_and_skips_other_files() {
        let tmp = TempDir::new().unwrap();
        touch(&tmp.path().join("__init__.pyx"));
        touch(&tmp.path().join("core/base.pyx"));
        touch(&tmp.path().join("core/base.pxd"));
        touch(&tmp.path().join("core/helpers.py"));

        let sources = discover_sources(tmp.path(), &[], &[]);

        assert_eq!(
            sources,
            vec![
                tmp.path().join("__init__.pyx"),
                tmp.path().join("core/base.pyx"),
            ]
        );
    }

    #[test]
    fn test_exclude_dirs_drop_whole_subtrees() {
        let tmp = TempDir::new().unwrap();
        touch(&tmp.path().join("other/y.pyx"));
        touch(&tmp.path().join("vendored/x.pyx"));
        touch(&tmp.path().join("vendored/deep/z.pyx"));

        let sources = discover_sources(tmp.path(), &[], &["vendored".to_string()]);

        assert_eq!(sources, vec![tmp.path().join("other/y.pyx")]);
    }

    #[test]
    fn test_explicit_sources_override_search_and_ignore_excludes() {
        let tmp = TempDir::new().unwrap();
        touch(&tmp.path().join("a.pyx"));
        touch(&tmp.path().join("sub/b.pyx"));
        touch(&tmp.path().join("on_disk_but_unlisted.pyx"));

        let explicit = vec![PathBuf::from("a.pyx"), PathBuf::from("sub/b.pyx")];
        let sources = discover_sources(tmp.path(), &explicit, &["sub".to_string()]);

        assert_eq!(
            sources,
            vec![tmp.path().join("a.pyx"), tmp.path().join("sub/b.pyx")]
        );
    }

    #[test]
    fn test_explicit_sources_filtered_to_suffix() {
        let tmp = TempDir::new().unwrap();
        let explicit = vec![PathBuf::from("a.pyx"), PathBuf::from("notes.txt")];

        let sources = discover_sources(tmp.path(), &explicit, &[]);

        assert_eq!(sources, vec![tmp.path().join("a.pyx")]);
    }
}
