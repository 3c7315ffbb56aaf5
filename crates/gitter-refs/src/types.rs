//! HEAD representation and the fixed names used in the metadata directory.

use std::fmt;
use std::str::FromStr;

use gitter_types::ObjectId;

use crate::error::RefError;

/// The only branch a repository has.
pub const MAIN_BRANCH: &str = "main";

/// Canonical ref name of the main branch.
pub const MAIN_BRANCH_REF: &str = "refs/heads/main";

/// File name of HEAD inside the metadata directory.
pub const HEAD_FILE: &str = "HEAD";

/// File name of the commit log inside the metadata directory.
pub const LOG_FILE: &str = "log";

const SYMBOLIC_PREFIX: &str = "ref: ";

/// State of HEAD.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Head {
    /// HEAD names a branch ref, e.g. `refs/heads/main`.
    Symbolic(String),
    /// HEAD holds a commit hash directly.
    Detached(ObjectId),
}

impl Head {
    /// HEAD as written by `init`.
    pub fn main() -> Self {
        Head::Symbolic(MAIN_BRANCH_REF.to_string())
    }

    /// Short branch name when HEAD is symbolic (`main` for `refs/heads/main`).
    pub fn branch_name(&self) -> Option<&str> {
        match self {
            Head::Symbolic(name) => Some(name.strip_prefix("refs/heads/").unwrap_or(name)),
            Head::Detached(_) => None,
        }
    }
}

impl Default for Head {
    fn default() -> Self {
        Self::main()
    }
}

impl fmt::Display for Head {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Head::Symbolic(name) => write!(f, "{SYMBOLIC_PREFIX}{name}"),
            Head::Detached(id) => write!(f, "{id}"),
        }
    }
}

impl FromStr for Head {
    type Err = RefError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let content = s.trim();
        if let Some(name) = content.strip_prefix(SYMBOLIC_PREFIX) {
            let name = name.trim();
            validate_ref_name(name)?;
            return Ok(Head::Symbolic(name.to_string()));
        }
        ObjectId::from_hex(content)
            .map(Head::Detached)
            .map_err(|_| RefError::MalformedHead {
                content: content.to_string(),
            })
    }
}

/// Check that a ref name is a relative path under `refs/` with no `.` or
/// `..` components.
pub fn validate_ref_name(name: &str) -> Result<(), RefError> {
    let invalid = || RefError::InvalidRefName {
        name: name.to_string(),
    };
    let rest = name.strip_prefix("refs/").ok_or_else(invalid)?;
    if rest.is_empty() || name.contains('\\') {
        return Err(invalid());
    }
    if rest
        .split('/')
        .any(|c| c.is_empty() || c == "." || c == "..")
    {
        return Err(invalid());
    }
    Ok(())
}
