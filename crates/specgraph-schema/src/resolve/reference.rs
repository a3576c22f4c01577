use crate::{DEFINITION_REF_PREFIX, resolve::ResolveError};
use derive_more::Display;
use std::path::{Path, PathBuf};

///
/// Fragment
///
/// The part of a reference after `#`.
///

#[derive(Clone, Debug, Display, Eq, Hash, PartialEq)]
pub enum Fragment {
    /// No fragment; the whole document is the target.
    #[display("")]
    Document,

    /// A top-level key of the target document (`file.json#Pet`).
    #[display("{_0}")]
    Name(String),

    /// A JSON pointer (`#/components/schemas/Pet`), stored without the `#`.
    #[display("{_0}")]
    Pointer(String),
}

impl Fragment {
    fn parse(raw: &str) -> Self {
        if raw.is_empty() {
            Self::Document
        } else if raw.starts_with('/') {
            Self::Pointer(raw.to_string())
        } else {
            Self::Name(raw.to_string())
        }
    }

    /// Last path segment of the fragment, unescaped.
    #[must_use]
    pub fn last_segment(&self) -> Option<String> {
        match self {
            Self::Document => None,
            Self::Name(name) => Some(name.clone()),
            Self::Pointer(pointer) => pointer
                .rsplit('/')
                .next()
                .filter(|seg| !seg.is_empty())
                .map(unescape_segment),
        }
    }
}

///
/// Reference
///
/// A parsed `$ref` string.
///

#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum Reference {
    Local(Fragment),
    External { path: PathBuf, fragment: Fragment },
}

impl Reference {
    /// Parse a raw `$ref` value. Remote (URL) references are rejected.
    pub fn parse(raw: &str) -> Result<Self, ResolveError> {
        let raw = raw.trim();

        if raw.is_empty() || raw == "#" {
            return Err(ResolveError::MalformedReference {
                reference: raw.to_string(),
                reason: "empty reference".to_string(),
            });
        }
        if raw.contains("://") {
            return Err(ResolveError::MalformedReference {
                reference: raw.to_string(),
                reason: "remote references are not supported".to_string(),
            });
        }

        let (path, fragment) = match raw.split_once('#') {
            Some((path, fragment)) => (path, Fragment::parse(fragment)),
            None => (raw, Fragment::Document),
        };

        if path.is_empty() {
            Ok(Self::Local(fragment))
        } else {
            Ok(Self::External {
                path: PathBuf::from(path),
                fragment,
            })
        }
    }

    #[must_use]
    pub const fn is_local(&self) -> bool {
        matches!(self, Self::Local(_))
    }

    #[must_use]
    pub const fn fragment(&self) -> &Fragment {
        match self {
            Self::Local(fragment) | Self::External { fragment, .. } => fragment,
        }
    }

    /// Rebase a local reference onto `file`, so that `#/a` inside an
    /// external document becomes `file#/a`.
    #[must_use]
    pub fn within(self, file: &Path) -> Self {
        match self {
            Self::Local(fragment) => Self::External {
                path: file.to_path_buf(),
                fragment,
            },
            external @ Self::External { .. } => external,
        }
    }
}

impl std::fmt::Display for Reference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Local(Fragment::Document) => write!(f, "#"),
            Self::Local(fragment) => write!(f, "#{fragment}"),
            Self::External {
                path,
                fragment: Fragment::Document,
            } => write!(f, "{}", path.display()),
            Self::External { path, fragment } => write!(f, "{}#{fragment}", path.display()),
        }
    }
}

/// Name of the definition a local `$ref` points at, if it points into the
/// definition table.
#[must_use]
pub fn definition_name(raw: &str) -> Option<String> {
    raw.strip_prefix(DEFINITION_REF_PREFIX)
        .filter(|rest| !rest.is_empty() && !rest.contains('/'))
        .map(unescape_segment)
}

/// Local `$ref` string for a definition name.
#[must_use]
pub fn definition_ref(name: &str) -> String {
    format!("{DEFINITION_REF_PREFIX}{}", escape_segment(name))
}

// unescape_segment
fn unescape_segment(seg: &str) -> String {
    seg.replace("~1", "/").replace("~0", "~")
}

// escape_segment
fn escape_segment(seg: &str) -> String {
    seg.replace('~', "~0").replace('/', "~1")
}
