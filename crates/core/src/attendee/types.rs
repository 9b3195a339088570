use serde::{Deserialize, Serialize};

use crate::record::Record;

/// A conference attendee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attendee {
    /// Primary key assigned by the attendee web API.
    pub attendee_id: Option<u64>,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub checked_in: bool,
}

impl Attendee {
    /// Creates a new attendee that has not been persisted yet.
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            attendee_id: None,
            first_name: first_name.into(),
            last_name: last_name.into(),
            checked_in: false,
        }
    }

    /// Sets a specific ID for this attendee (store and testing use).
    pub fn with_id(mut self, id: u64) -> Self {
        self.attendee_id = Some(id);
        self
    }

    /// Marks the attendee as checked in.
    pub fn check_in(&mut self) {
        self.checked_in = true;
    }

    /// Returns "first last".
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

impl Record for Attendee {
    type Id = u64;

    fn id(&self) -> Option<&u64> {
        self.attendee_id.as_ref()
    }
}
