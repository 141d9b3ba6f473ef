use crate::diagnostics::{Diagnostics, Warning};
use crate::locator::{Locator, Target, normalize};
use regex::Regex;
use std::collections::BTreeSet;
use std::fs;
use std::io;
use std::ops::Range;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

/// Files already entered during one top-level flatten.
pub type Visited = BTreeSet<PathBuf>;

/// One `@import "...";` occurrence in a stylesheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directive<'a> {
    /// Byte range of the whole directive, trailing `;` included.
    pub span: Range<usize>,
    pub text: &'a str,
    pub specifier: &'a str,
}

fn import_pattern() -> &'static Regex {
    static IMPORT: OnceLock<Regex> = OnceLock::new();
    IMPORT.get_or_init(|| {
        Regex::new(r#"@import\s+['"]([^'"]+)['"]\s*;?"#).expect("import pattern is valid")
    })
}

/// Finds every import directive in `css`, in source order.
pub fn scan_directives(css: &str) -> Vec<Directive<'_>> {
    import_pattern()
        .captures_iter(css)
        .filter_map(|captures| {
            let whole = captures.get(0)?;
            let specifier = captures.get(1)?;
            Some(Directive {
                span: whole.range(),
                text: whole.as_str(),
                specifier: specifier.as_str(),
            })
        })
        .collect()
}

/// Depth-first `@import` inliner. Local imports are flattened recursively;
/// package imports are pasted in as they are on disk.
#[derive(Debug, Clone)]
pub struct Resolver {
    locator: Locator,
    max_depth: usize,
}

impl Resolver {
    pub fn new(locator: Locator, max_depth: usize) -> Self {
        Self { locator, max_depth }
    }

    /// Flattens `entry` with a fresh visited set.
    pub fn flatten(&self, entry: &Path, diagnostics: &mut Diagnostics) -> String {
        let mut visited = Visited::new();
        self.resolve(&normalize(entry), &mut visited, diagnostics)
    }

    /// Returns the contents of `file_path` with every directive replaced by
    /// its resolved text. A path already in `visited` yields an empty string.
    pub fn resolve(
        &self,
        file_path: &Path,
        visited: &mut Visited,
        diagnostics: &mut Diagnostics,
    ) -> String {
        self.resolve_at(file_path, visited, 0, diagnostics)
    }

    fn resolve_at(
        &self,
        file_path: &Path,
        visited: &mut Visited,
        depth: usize,
        diagnostics: &mut Diagnostics,
    ) -> String {
        if visited.contains(file_path) {
            log::debug!("skipping already visited {}", file_path.display());
            return String::new();
        }
        if depth > self.max_depth {
            diagnostics.warn(Warning::DepthLimit {
                path: file_path.to_path_buf(),
                depth: self.max_depth,
            });
            return String::new();
        }
        visited.insert(file_path.to_path_buf());

        let Some(css) = read_stylesheet(file_path, diagnostics) else {
            return String::new();
        };
        let base_dir = file_path.parent().unwrap_or(Path::new(""));

        let mut flattened = String::with_capacity(css.len());
        let mut cursor = 0;
        for directive in scan_directives(&css) {
            flattened.push_str(&css[cursor..directive.span.start]);
            let replacement = match self
                .locator
                .locate(directive.specifier, base_dir, diagnostics)
            {
                Some(Target::Local(path)) => {
                    log::debug!("inlining {} into {}", path.display(), file_path.display());
                    self.resolve_at(&path, visited, depth + 1, diagnostics)
                }
                Some(Target::Package(path)) => {
                    log::debug!("inlining package {}", path.display());
                    read_stylesheet(&path, diagnostics).unwrap_or_default()
                }
                None => String::new(),
            };
            flattened.push_str(&replacement);
            cursor = directive.span.end;
        }
        flattened.push_str(&css[cursor..]);
        flattened
    }
}

fn read_stylesheet(path: &Path, diagnostics: &mut Diagnostics) -> Option<String> {
    match fs::read_to_string(path) {
        Ok(css) => Some(css),
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            diagnostics.warn(Warning::MissingFile {
                path: path.to_path_buf(),
            });
            None
        }
        Err(err) => {
            diagnostics.warn(Warning::UnreadableFile {
                path: path.to_path_buf(),
                reason: err.to_string(),
            });
            None
        }
    }
}
