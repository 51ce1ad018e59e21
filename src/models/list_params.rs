use std::cmp::Ordering;

use serde::Serialize;

use super::user_record::{Gender, UserRecord};

pub const DEFAULT_RESULTS_PER_PAGE: u32 = 27;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Nationality {
    Us,
    De,
    Fr,
    Gb,
    Au,
}

impl Nationality {
    pub const ALL: [Nationality; 5] = [
        Nationality::Us,
        Nationality::De,
        Nationality::Fr,
        Nationality::Gb,
        Nationality::Au,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Nationality::Us => "us",
            Nationality::De => "de",
            Nationality::Fr => "fr",
            Nationality::Gb => "gb",
            Nationality::Au => "au",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Nationality::Us => "United States",
            Nationality::De => "Germany",
            Nationality::Fr => "France",
            Nationality::Gb => "Great Britain",
            Nationality::Au => "Australia",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SortMode {
    #[default]
    Default,
    NameAsc,
    NameDesc,
    AgeAsc,
    AgeDesc,
}

impl SortMode {
    pub const ALL: [SortMode; 5] = [
        SortMode::Default,
        SortMode::NameAsc,
        SortMode::NameDesc,
        SortMode::AgeAsc,
        SortMode::AgeDesc,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SortMode::Default => "default",
            SortMode::NameAsc => "name_asc",
            SortMode::NameDesc => "name_desc",
            SortMode::AgeAsc => "age_asc",
            SortMode::AgeDesc => "age_desc",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SortMode::Default => "Default",
            SortMode::NameAsc => "Name (A-Z)",
            SortMode::NameDesc => "Name (Z-A)",
            SortMode::AgeAsc => "Age (youngest first)",
            SortMode::AgeDesc => "Age (oldest first)",
        }
    }

    /// Comparator for a stable sort. `Default` keeps the upstream order.
    pub fn compare(self, a: &UserRecord, b: &UserRecord) -> Ordering {
        match self {
            SortMode::Default => Ordering::Equal,
            SortMode::NameAsc => a.name.first.cmp(&b.name.first),
            SortMode::NameDesc => b.name.first.cmp(&a.name.first),
            SortMode::AgeAsc => a.age_or_default().cmp(&b.age_or_default()),
            SortMode::AgeDesc => b.age_or_default().cmp(&a.age_or_default()),
        }
    }
}

// "all" and unknown values mean "no filter".
pub fn parse_gender_filter(input: &str) -> Option<Gender> {
    match input.trim().to_lowercase().as_str() {
        "male" => Some(Gender::Male),
        "female" => Some(Gender::Female),
        _ => None,
    }
}

pub fn parse_nationality_filter(input: &str) -> Option<Nationality> {
    let input = input.trim().to_lowercase();
    Nationality::ALL
        .into_iter()
        .find(|nat| nat.as_str() == input)
}

pub fn parse_sort_mode(input: &str) -> SortMode {
    let input = input.trim().to_lowercase();
    SortMode::ALL
        .into_iter()
        .find(|mode| mode.as_str() == input)
        .unwrap_or_default()
}

/// Filter, sort and page state owned by the list controller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListParams {
    pub page: u32,
    pub search: String,
    pub gender: Option<Gender>,
    pub nationality: Option<Nationality>,
    pub sort: SortMode,
}

impl Default for ListParams {
    fn default() -> Self {
        Self {
            page: 1,
            search: String::new(),
            gender: None,
            nationality: None,
            sort: SortMode::Default,
        }
    }
}

impl ListParams {
    pub fn gender_value(&self) -> &'static str {
        self.gender.map(Gender::as_str).unwrap_or("all")
    }

    pub fn nationality_value(&self) -> &'static str {
        self.nationality.map(Nationality::as_str).unwrap_or("all")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filters_parse_all_and_unknown_as_unset() {
        assert_eq!(parse_gender_filter("all"), None);
        assert_eq!(parse_gender_filter("Female"), Some(Gender::Female));
        assert_eq!(parse_gender_filter("robot"), None);
        assert_eq!(parse_nationality_filter("GB"), Some(Nationality::Gb));
        assert_eq!(parse_nationality_filter("all"), None);
        assert_eq!(parse_nationality_filter("br"), None);
    }

    #[test]
    fn sort_mode_round_trips_through_its_query_value() {
        for mode in SortMode::ALL {
            assert_eq!(parse_sort_mode(mode.as_str()), mode);
        }
        assert_eq!(parse_sort_mode("shuffle"), SortMode::Default);
    }

    #[test]
    fn default_params_start_on_first_page_without_filters() {
        let params = ListParams::default();
        assert_eq!(params.page, 1);
        assert_eq!(params.gender_value(), "all");
        assert_eq!(params.nationality_value(), "all");
        assert_eq!(params.sort, SortMode::Default);
    }
}
