use std::fmt;

use serde::{Deserialize, Serialize};

/// Numeric identifier of a question.
///
/// Core questions use small integers, the section intro uses a reserved
/// sentinel and generated service questions live in their own offset range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuestionId(pub u32);

impl QuestionId {
    /// Reserved id of the section intro screen.
    pub const SECTION_INTRO: Self = Self(999);

    /// First id of the generated service-importance range.
    pub const SERVICE_BASE: u32 = 1000;

    /// Id of the generated question for the service at `index`.
    pub fn for_service(index: usize) -> Self {
        Self(Self::SERVICE_BASE + index as u32)
    }
}

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
