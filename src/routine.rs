//! Skincare routines, as seen from this crate.
//!
//! Routines are owned and managed by another part of the service. This crate only ever
//! reads them, so that a task can be linked to one of them.

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// Opaque routine identifier, assigned by the remote store
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoutineId(String);

impl RoutineId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}
impl From<String> for RoutineId {
    fn from(id: String) -> Self {
        Self(id)
    }
}
impl From<&str> for RoutineId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}
impl Display for RoutineId {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), std::fmt::Error> {
        write!(f, "{}", self.0)
    }
}

/// A named sequence of skincare steps a task may reference
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Routine {
    #[serde(rename = "_id")]
    id: RoutineId,
    name: String,
}

impl Routine {
    pub fn new<I: Into<RoutineId>, N: ToString>(id: I, name: N) -> Self {
        Self {
            id: id.into(),
            name: name.to_string(),
        }
    }

    pub fn id(&self) -> &RoutineId {
        &self.id
    }
    pub fn name(&self) -> &str {
        &self.name
    }
}
