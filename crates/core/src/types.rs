//! Small shared enums

use serde::{Deserialize, Serialize};

/// Set-algebra operation over unordered sets
///
/// Applied left to right across the given keys: `Difference` keeps the
/// members of the first set found in none of the others.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SetCombine {
    /// Members of any set
    Union,
    /// Members of every set
    Intersect,
    /// Members of the first set only
    Difference,
}

impl SetCombine {
    /// Protocol command name
    pub fn command(self) -> &'static str {
        match self {
            SetCombine::Union => "SUNION",
            SetCombine::Intersect => "SINTER",
            SetCombine::Difference => "SDIFF",
        }
    }
}
