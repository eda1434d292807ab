use std::fmt;

use serde::{Deserialize, Serialize};

/// Top-level UI mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum View {
    #[default]
    List,
    Detail,
    Compose,
}

/// Views reachable through plain navigation. `Detail` is only entered by
/// selecting a post.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavTarget {
    List,
    Compose,
}

impl From<NavTarget> for View {
    fn from(target: NavTarget) -> Self {
        match target {
            NavTarget::List => View::List,
            NavTarget::Compose => View::Compose,
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            View::List => "list",
            View::Detail => "detail",
            View::Compose => "compose",
        };
        f.write_str(name)
    }
}
