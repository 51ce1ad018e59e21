use crate::models::{Nationality, SortMode, UserRecord};
use crate::services::profile_list_service::{ListSnapshot, ListState};

pub const SKELETON_COUNT: usize = 27;

pub struct ProfileCardView {
    pub id: String,
    pub full_name: String,
    pub initials: String,
    pub email: String,
    pub location_label: String,
    pub picture_url: Option<String>,
}

#[derive(Clone)]
pub struct SelectOptionView {
    pub value: &'static str,
    pub label: &'static str,
    pub selected: bool,
}

pub struct PaginationView {
    pub current_page: u32,
    pub prev_page: u32,
    pub next_page: u32,
    pub prev_disabled: bool,
}

pub struct FilterFormView {
    pub search: String,
    pub gender_options: Vec<SelectOptionView>,
    pub nationality_options: Vec<SelectOptionView>,
    pub sort_options: Vec<SelectOptionView>,
}

/// What the grid area shows. Exactly one of skeletons, error, empty panel or
/// cards is populated.
pub struct ProfileGridView {
    pub is_loading: bool,
    pub skeletons: Vec<usize>,
    pub error_message: Option<String>,
    pub show_empty: bool,
    pub cards: Vec<ProfileCardView>,
    pub pagination: Option<PaginationView>,
}

pub struct ProfilePageData {
    pub grid: ProfileGridView,
    pub filters: FilterFormView,
}

pub fn build_profile_page(snapshot: &ListSnapshot) -> ProfilePageData {
    ProfilePageData {
        grid: build_profile_grid(snapshot),
        filters: build_filter_form(snapshot),
    }
}

pub fn build_profile_grid(snapshot: &ListSnapshot) -> ProfileGridView {
    let mut grid = ProfileGridView {
        is_loading: false,
        skeletons: Vec::new(),
        error_message: None,
        show_empty: false,
        cards: Vec::new(),
        pagination: None,
    };

    match &snapshot.state {
        ListState::Loading => {
            grid.is_loading = true;
            grid.skeletons = (0..SKELETON_COUNT).collect();
        }
        ListState::Failed(message) => {
            grid.error_message = Some(message.clone());
        }
        ListState::Ready(users) if users.is_empty() => {
            grid.show_empty = true;
        }
        ListState::Ready(users) => {
            grid.cards = users.iter().map(build_card).collect();
            // Pagination only browses unfiltered pages.
            if snapshot.params.search.is_empty() {
                let page = snapshot.params.page.max(1);
                grid.pagination = Some(PaginationView {
                    current_page: page,
                    prev_page: page.saturating_sub(1).max(1),
                    next_page: page.saturating_add(1),
                    prev_disabled: page == 1,
                });
            }
        }
    }

    grid
}

fn build_card(user: &UserRecord) -> ProfileCardView {
    let picture_url = Some(user.picture_url.trim())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string());

    ProfileCardView {
        id: user.id.clone(),
        full_name: user.name.full().trim().to_string(),
        initials: user.name.initials(),
        email: user.email.clone(),
        location_label: build_location_label(
            user.location.city.trim(),
            user.location.country.trim(),
        ),
        picture_url,
    }
}

fn build_location_label(city: &str, country: &str) -> String {
    match (city.is_empty(), country.is_empty()) {
        (true, true) => String::new(),
        (false, true) => city.to_string(),
        (true, false) => country.to_string(),
        (false, false) => format!("{}, {}", city, country),
    }
}

fn build_filter_form(snapshot: &ListSnapshot) -> FilterFormView {
    let params = &snapshot.params;

    let gender_value = params.gender_value();
    let gender_options = [("all", "All genders"), ("male", "Male"), ("female", "Female")]
        .into_iter()
        .map(|(value, label)| SelectOptionView {
            value,
            label,
            selected: value == gender_value,
        })
        .collect();

    let mut nationality_options = vec![SelectOptionView {
        value: "all",
        label: "All countries",
        selected: params.nationality.is_none(),
    }];
    nationality_options.extend(Nationality::ALL.into_iter().map(|nat| SelectOptionView {
        value: nat.as_str(),
        label: nat.label(),
        selected: params.nationality == Some(nat),
    }));

    let sort_options = SortMode::ALL
        .into_iter()
        .map(|mode| SelectOptionView {
            value: mode.as_str(),
            label: mode.label(),
            selected: mode == params.sort,
        })
        .collect();

    FilterFormView {
        search: params.search.clone(),
        gender_options,
        nationality_options,
        sort_options,
    }
}
