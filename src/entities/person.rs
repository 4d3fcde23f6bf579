// 👤 Person Entity - executives and directors
//
// One person may sit on several boards and hold an executive title at the
// same time. Role flags only ever flip false → true.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Person {
    /// Stable identity (slug of full name, or an explicit source id)
    pub person_id: String,

    pub full_name: String,
    pub current_title: String,

    pub is_executive: bool,
    pub is_director: bool,

    pub bio_short: Option<String>,
    pub linkedin_url: Option<String>,
    pub photo_url: Option<String>,
    pub years_experience: Option<i64>,
    pub education: Option<String>,
    /// Free text from the source: "Active", "Retired", ...
    pub status: Option<String>,
}

impl Person {
    pub fn new(person_id: impl Into<String>, full_name: impl Into<String>) -> Self {
        Person {
            person_id: person_id.into(),
            full_name: full_name.into(),
            current_title: String::new(),
            is_executive: false,
            is_director: false,
            bio_short: None,
            linkedin_url: None,
            photo_url: None,
            years_experience: None,
            education: None,
            status: None,
        }
    }

    /// Build a brand-new person straight from incoming attributes
    pub fn from_attributes(
        person_id: impl Into<String>,
        full_name: impl Into<String>,
        attrs: &PersonAttributes,
    ) -> Self {
        let mut person = Person::new(person_id, full_name);
        person.merge(attrs);
        person
    }

    /// Merge-on-conflict
    ///
    /// - title and status: overwritten when the incoming value is non-empty
    /// - bio, links, experience, education: only filled when still empty
    /// - role flags: OR-ed
    pub fn merge(&mut self, attrs: &PersonAttributes) {
        if let Some(title) = non_empty(&attrs.current_title) {
            self.current_title = title;
        }
        if let Some(status) = non_empty(&attrs.status) {
            self.status = Some(status);
        }

        fill(&mut self.bio_short, &attrs.bio_short);
        fill(&mut self.linkedin_url, &attrs.linkedin_url);
        fill(&mut self.photo_url, &attrs.photo_url);
        fill(&mut self.education, &attrs.education);
        if self.years_experience.unwrap_or(0) == 0 {
            if let Some(years) = attrs.years_experience.filter(|y| *y != 0) {
                self.years_experience = Some(years);
            }
        }

        self.is_executive |= attrs.is_executive;
        self.is_director |= attrs.is_director;
    }

    /// Status normalized for comparisons ("  Retired " → "retired")
    pub fn normalized_status(&self) -> Option<String> {
        self.status
            .as_deref()
            .map(|s| s.trim().to_lowercase())
            .filter(|s| !s.is_empty())
    }

    /// Executive or director whose status normalizes to "retired"
    pub fn is_free_agent(&self) -> bool {
        (self.is_executive || self.is_director)
            && self.normalized_status().as_deref() == Some("retired")
    }
}

/// Partial person description carried by one source row
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PersonAttributes {
    pub current_title: Option<String>,
    pub is_executive: bool,
    pub is_director: bool,
    pub bio_short: Option<String>,
    pub linkedin_url: Option<String>,
    pub photo_url: Option<String>,
    pub years_experience: Option<i64>,
    pub education: Option<String>,
    pub status: Option<String>,
}

impl PersonAttributes {
    pub fn executive() -> Self {
        PersonAttributes {
            is_executive: true,
            ..Default::default()
        }
    }

    pub fn director() -> Self {
        PersonAttributes {
            is_director: true,
            ..Default::default()
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.current_title = Some(title.into());
        self
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }
}

fn non_empty(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn fill(slot: &mut Option<String>, incoming: &Option<String>) {
    let empty = slot.as_deref().map_or(true, |s| s.trim().is_empty());
    if empty {
        if let Some(value) = non_empty(incoming) {
            *slot = Some(value);
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
