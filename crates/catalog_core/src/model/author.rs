//! Author value object.

use serde::{Deserialize, Serialize};

pub type AuthorId = i64;

/// Book author. Embedded by value into every loaded `Book`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub id: AuthorId,
    pub full_name: String,
}

impl Author {
    pub fn new(id: AuthorId, full_name: impl Into<String>) -> Self {
        Self {
            id,
            full_name: full_name.into(),
        }
    }
}
