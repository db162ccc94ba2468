//! Genre value object.

use serde::{Deserialize, Serialize};

pub type GenreId = i64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Genre {
    pub id: GenreId,
    pub name: String,
}

impl Genre {
    pub fn new(id: GenreId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}
