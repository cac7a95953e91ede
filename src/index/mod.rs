/// Definition index.
///
/// Maps every class selector found in the stylesheet (including the
/// leading `.`, e.g. `".pa1"`) to the span of the rule that declares it.
///
/// - [`css`]: rule extraction with `cssparser`.
/// - [`handle`]: the shared, build-once handle the server reads from.
///
/// Selectors are recorded verbatim after whitespace normalisation, so a
/// rule like `.hover-red:hover, .hover-red:focus { … }` produces the keys
/// `.hover-red:hover` and `.hover-red:focus`.  Lookups always use
/// `"." + class name`, which means pseudo-class variants are never hit;
/// the plain `.hover-red` entry only exists when the stylesheet declares
/// one.
mod css;
pub mod handle;

use std::collections::HashMap;
use std::io;
use std::path::PathBuf;

use tower_lsp::lsp_types::{Location, Range, Url};

use crate::bundled::BundleError;
use crate::locator::LocatedStylesheet;

#[derive(Debug, thiserror::Error)]
pub enum IndexError {
    #[error(transparent)]
    Bundle(#[from] BundleError),
    #[error("could not read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("{} cannot be turned into a file URI", .0.display())]
    InvalidPath(PathBuf),
    #[error("no rule in {} could be parsed ({skipped} rejected)", path.display())]
    Parse { path: PathBuf, skipped: usize },
    #[error("index build did not finish: {0}")]
    Interrupted(String),
}

/// Where a class is declared: the stylesheet and the rule's span.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Definition {
    pub uri: Url,
    pub range: Range,
}

impl From<Definition> for Location {
    fn from(definition: Definition) -> Self {
        Location {
            uri: definition.uri,
            range: definition.range,
        }
    }
}

/// A class selector is any selector starting with `.`.
pub fn is_class_selector(selector: &str) -> bool {
    selector.starts_with('.')
}

#[derive(Debug)]
pub struct DefinitionIndex {
    stylesheet: LocatedStylesheet,
    uri: Url,
    entries: HashMap<String, Range>,
}

impl DefinitionIndex {
    /// Read the stylesheet text from disk.
    pub fn read_source(stylesheet: &LocatedStylesheet) -> Result<String, IndexError> {
        std::fs::read_to_string(&stylesheet.path).map_err(|source| IndexError::Read {
            path: stylesheet.path.clone(),
            source,
        })
    }

    /// Build the index from already-read stylesheet text.
    pub fn parse(stylesheet: LocatedStylesheet, css: &str) -> Result<Self, IndexError> {
        let uri = Url::from_file_path(&stylesheet.path)
            .map_err(|()| IndexError::InvalidPath(stylesheet.path.clone()))?;

        let scan = css::scan_rules(css);
        if scan.rules.is_empty() && scan.skipped > 0 {
            return Err(IndexError::Parse {
                path: stylesheet.path,
                skipped: scan.skipped,
            });
        }
        if scan.skipped > 0 {
            tracing::warn!(
                "Skipped {} unparsable rule(s) in {}",
                scan.skipped,
                stylesheet.path.display()
            );
        }

        let mut entries = HashMap::new();
        for rule in scan.rules {
            for selector in rule.selectors {
                if is_class_selector(&selector) {
                    // Later rules overwrite earlier ones.
                    entries.insert(selector, rule.range);
                }
            }
        }

        tracing::debug!(
            "Indexed {} class selector(s) from {}",
            entries.len(),
            stylesheet.path.display()
        );

        Ok(Self {
            stylesheet,
            uri,
            entries,
        })
    }

    /// Read and index a stylesheet in one go.
    pub fn load(stylesheet: LocatedStylesheet) -> Result<Self, IndexError> {
        let css = Self::read_source(&stylesheet)?;
        Self::parse(stylesheet, &css)
    }

    pub fn stylesheet(&self) -> &LocatedStylesheet {
        &self.stylesheet
    }

    pub fn uri(&self) -> &Url {
        &self.uri
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up a full selector, e.g. `".pa1"`.
    pub fn get(&self, selector: &str) -> Option<Definition> {
        self.entries.get(selector).map(|range| Definition {
            uri: self.uri.clone(),
            range: *range,
        })
    }

    /// Look up a bare class name, e.g. `"pa1"`.
    pub fn lookup_class(&self, class_name: &str) -> Option<Definition> {
        self.get(&format!(".{class_name}"))
    }
}
