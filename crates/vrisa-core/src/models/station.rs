//! Directory entities used to populate the console's selection inputs

use serde::{Deserialize, Serialize};

/// A monitoring installation known to the platform
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Station {
    /// Station identifier (the value alert rules reference)
    pub id: String,

    /// Display name
    pub name: String,
}

impl Station {
    /// Create a station entry
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// An institution known to the platform
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Institution {
    /// Institution identifier
    pub id: String,

    /// Display name
    pub name: String,
}

impl Institution {
    /// Create an institution entry
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}
