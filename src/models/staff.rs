//! Staff directory records.
//!
//! The engine only needs enough of a staff record to decide which staff
//! members are visible in a month view.

use serde::{Deserialize, Serialize};

/// A staff member as listed by the staff directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaffMember {
    /// Unique identifier for the staff member.
    pub id: String,
    /// Name shown in the roster view.
    #[serde(default)]
    pub display_name: String,
    /// The department the staff member belongs to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department_id: Option<String>,
    /// Human-readable department name, used for text search.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department_name: Option<String>,
}

/// Criteria for selecting the visible staff set.
///
/// An empty filter matches everyone.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaffFilter {
    /// Case-insensitive text matched against display and department names.
    #[serde(default)]
    pub search: Option<String>,
    /// Exact department id to restrict to.
    #[serde(default)]
    pub department_id: Option<String>,
}

impl StaffFilter {
    /// Returns true if `member` passes both the text search and the department restriction.
    ///
    /// # Example
    ///
    /// ```
    /// use roster_engine::models::{StaffFilter, StaffMember};
    ///
    /// let member = StaffMember {
    ///     id: "dr_001".to_string(),
    ///     display_name: "Amara Okafor".to_string(),
    ///     department_id: Some("cardio".to_string()),
    ///     department_name: Some("Cardiology".to_string()),
    /// };
    /// let filter = StaffFilter {
    ///     search: Some("cardio".to_string()),
    ///     department_id: None,
    /// };
    /// assert!(filter.matches(&member));
    /// ```
    pub fn matches(&self, member: &StaffMember) -> bool {
        let text_match = match self.search.as_deref().map(str::trim) {
            None | Some("") => true,
            Some(term) => {
                let term = term.to_lowercase();
                member.display_name.to_lowercase().contains(&term)
                    || member
                        .department_name
                        .as_deref()
                        .is_some_and(|name| name.to_lowercase().contains(&term))
            }
        };

        let department_match = match &self.department_id {
            None => true,
            Some(id) => member.department_id.as_ref() == Some(id),
        };

        text_match && department_match
    }
}
