use crate::diagnostics::{Diagnostics, Warning};
use std::path::{Component, Path, PathBuf};

const STYLESHEET_EXTENSION: &str = "css";

/// Where an import directive points once its specifier has been located.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// A file in the source tree. Flattened recursively.
    Local(PathBuf),
    /// A stylesheet under the dependency root. Inlined verbatim.
    Package(PathBuf),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locator {
    dependency_root: PathBuf,
}

impl Locator {
    pub fn new(dependency_root: impl Into<PathBuf>) -> Self {
        Self {
            dependency_root: dependency_root.into(),
        }
    }

    /// Maps an import specifier to a file. Local specifiers are only
    /// normalized; whether they exist is the reader's concern. Bare
    /// specifiers are looked up under the dependency root, and a miss is
    /// reported as [`Warning::UnresolvableImport`].
    pub fn locate(
        &self,
        specifier: &str,
        from_dir: &Path,
        diagnostics: &mut Diagnostics,
    ) -> Option<Target> {
        if !is_bare_specifier(specifier) {
            return Some(Target::Local(normalize(&from_dir.join(specifier))));
        }

        match self
            .package_candidates(specifier)
            .into_iter()
            .enumerate()
            .find(|(index, candidate)| {
                candidate.is_file() && (*index > 0 || has_stylesheet_extension(candidate))
            }) {
            Some((_, found)) => {
                log::debug!("{} -> {}", specifier, found.display());
                Some(Target::Package(found))
            }
            None => {
                diagnostics.warn(Warning::UnresolvableImport {
                    specifier: specifier.to_string(),
                    from: from_dir.to_path_buf(),
                });
                None
            }
        }
    }

    /// Candidate files for a bare specifier, in lookup order. The first one
    /// only counts when it names a stylesheet directly.
    pub fn package_candidates(&self, specifier: &str) -> [PathBuf; 4] {
        let package_dir = normalize(&self.dependency_root.join(specifier));
        let own_name = format!("{}.css", specifier);
        [
            package_dir.clone(),
            package_dir.join("reset.css"),
            package_dir.join("index.css"),
            normalize(&package_dir.join(own_name)),
        ]
    }
}

/// A specifier that is neither relative (`./`, `../`) nor absolute (`/`).
pub fn is_bare_specifier(specifier: &str) -> bool {
    !specifier.starts_with('.') && !specifier.starts_with('/')
}

fn has_stylesheet_extension(path: &Path) -> bool {
    path.extension()
        .is_some_and(|extension| extension == STYLESHEET_EXTENSION)
}

/// Folds `.` and `..` components without touching the filesystem, so the
/// same file reached through different spellings compares equal.
pub fn normalize(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match normalized.components().next_back() {
                Some(Component::Normal(_)) => {
                    normalized.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => normalized.push(".."),
            },
            other => normalized.push(other.as_os_str()),
        }
    }
    normalized
}

#[cfg(test)]
mod tests {
    use super::{Locator, Target, is_bare_specifier, normalize};
    use crate::diagnostics::{Diagnostics, Warning};
    use std::fs;
    use std::path::{Path, PathBuf};

    fn write(path: &Path, contents: &str) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create parent");
        }
        fs::write(path, contents).expect("write fixture");
    }

    #[test]
    fn classifies_specifiers() {
        assert!(is_bare_specifier("reset-css"));
        assert!(is_bare_specifier("modern-normalize/modern-normalize.css"));
        assert!(!is_bare_specifier("./colors.css"));
        assert!(!is_bare_specifier("../base/_index.css"));
        assert!(!is_bare_specifier("/abs/colors.css"));
    }

    #[test]
    fn normalizes_dot_segments() {
        assert_eq!(
            normalize(Path::new("/src/css/tokens/../base/./reset.css")),
            PathBuf::from("/src/css/base/reset.css")
        );
        assert_eq!(normalize(Path::new("/../a.css")), PathBuf::from("/a.css"));
        assert_eq!(normalize(Path::new("../a/../b.css")), PathBuf::from("../b.css"));
    }

    #[test]
    fn relative_specifiers_resolve_against_importing_dir_without_existence_check() {
        let locator = Locator::new("/project/node_modules");
        let mut diagnostics = Diagnostics::new();

        let target = locator.locate(
            "../base/missing.css",
            Path::new("/project/src/css/tokens"),
            &mut diagnostics,
        );

        assert_eq!(
            target,
            Some(Target::Local(PathBuf::from("/project/src/css/base/missing.css")))
        );
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn absolute_specifiers_ignore_importing_dir() {
        let locator = Locator::new("/deps");
        let mut diagnostics = Diagnostics::new();
        let target = locator.locate("/shared/a.css", Path::new("/project/src"), &mut diagnostics);
        assert_eq!(target, Some(Target::Local(PathBuf::from("/shared/a.css"))));
    }

    #[test]
    fn bare_specifier_prefers_direct_stylesheet() {
        let dir = tempfile::tempdir().expect("tempdir");
        let deps = dir.path().join("node_modules");
        write(&deps.join("pkg/dist/pkg.css"), ".direct {}");
        write(&deps.join("pkg/dist/pkg.css.css"), ".own {}");
        let locator = Locator::new(&deps);
        let mut diagnostics = Diagnostics::new();

        let target = locator.locate("pkg/dist/pkg.css", dir.path(), &mut diagnostics);
        assert_eq!(target, Some(Target::Package(deps.join("pkg/dist/pkg.css"))));
    }

    #[test]
    fn bare_specifier_walks_fallbacks_in_order() {
        let dir = tempfile::tempdir().expect("tempdir");
        let deps = dir.path().join("node_modules");
        write(&deps.join("reset-css/reset.css"), "/* reset */");
        write(&deps.join("reset-css/index.css"), "/* index */");
        write(&deps.join("normalize/index.css"), "/* index */");
        write(&deps.join("normalize/normalize.css"), "/* own */");
        write(&deps.join("sanitize/sanitize.css"), "/* own */");
        let locator = Locator::new(&deps);
        let mut diagnostics = Diagnostics::new();

        assert_eq!(
            locator.locate("reset-css", dir.path(), &mut diagnostics),
            Some(Target::Package(deps.join("reset-css/reset.css")))
        );
        assert_eq!(
            locator.locate("normalize", dir.path(), &mut diagnostics),
            Some(Target::Package(deps.join("normalize/index.css")))
        );
        assert_eq!(
            locator.locate("sanitize", dir.path(), &mut diagnostics),
            Some(Target::Package(deps.join("sanitize/sanitize.css")))
        );
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn direct_match_requires_stylesheet_extension() {
        let dir = tempfile::tempdir().expect("tempdir");
        let deps = dir.path().join("node_modules");
        write(&deps.join("pkg/readme.md"), "# pkg");
        let locator = Locator::new(&deps);
        let mut diagnostics = Diagnostics::new();

        assert_eq!(locator.locate("pkg/readme.md", dir.path(), &mut diagnostics), None);
        assert_eq!(diagnostics.len(), 1);
    }

    #[test]
    fn unresolved_bare_specifier_warns() {
        let dir = tempfile::tempdir().expect("tempdir");
        let locator = Locator::new(dir.path().join("node_modules"));
        let mut diagnostics = Diagnostics::new();

        let target = locator.locate("missing-pkg", dir.path(), &mut diagnostics);

        assert_eq!(target, None);
        assert_eq!(
            diagnostics.warnings(),
            &[Warning::UnresolvableImport {
                specifier: "missing-pkg".to_string(),
                from: dir.path().to_path_buf(),
            }]
        );
    }
}
