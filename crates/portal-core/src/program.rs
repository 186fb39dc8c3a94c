//! Academic program catalog model.

use serde::{Deserialize, Serialize};

/// An academic program offering, used as the selection key when logging in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Program {
    pub id: i64,
    /// Display name. The backend sends this as `program`.
    #[serde(alias = "program")]
    pub name: String,
    /// Advisory sort key, ascending.
    #[serde(default)]
    pub ordering: i64,
}

impl Program {
    pub fn new(id: i64, name: impl Into<String>, ordering: i64) -> Self {
        Self {
            id,
            name: name.into(),
            ordering,
        }
    }
}

/// Orders a catalog by its `ordering` field. The sort is stable, so programs
/// sharing an ordering keep the order the backend sent them in.
pub fn sort_catalog(programs: &mut [Program]) {
    programs.sort_by_key(|program| program.ordering);
}
