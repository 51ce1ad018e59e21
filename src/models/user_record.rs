use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    // Upstream values are not validated locally.
    #[serde(other)]
    Unspecified,
}

impl Gender {
    pub fn as_str(self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
            Gender::Unspecified => "unspecified",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PersonName {
    pub first: String,
    pub last: String,
}

impl PersonName {
    pub fn full(&self) -> String {
        format!("{} {}", self.first, self.last)
    }

    pub fn initials(&self) -> String {
        self.first
            .chars()
            .take(1)
            .chain(self.last.chars().take(1))
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Location {
    pub city: String,
    pub country: String,
}

/// One fetched profile. A batch of these replaces the previous batch on every fetch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserRecord {
    pub id: String,
    pub name: PersonName,
    pub gender: Gender,
    pub age: Option<u32>,
    pub email: String,
    pub location: Location,
    pub picture_url: String,
}

impl UserRecord {
    /// Age used by the comparators; a missing age counts as 0.
    pub fn age_or_default(&self) -> u32 {
        self.age.unwrap_or(0)
    }
}
