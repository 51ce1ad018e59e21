use askama::Template;
use axum::{
    extract::{Query, State},
    response::Html,
    Json,
};
use serde::Deserialize;
use tracing::{debug, error};

use crate::error::AppError;
use crate::models::list_params::{parse_gender_filter, parse_nationality_filter, parse_sort_mode};
use crate::services::profile_list_service::{ListSnapshot, ParamsUpdate};
use crate::services::profile_view_service::{self, FilterFormView, ProfileGridView};
use crate::web::state::AppState;

/// Query string of `/` and `/api/profiles`. Absent fields keep their current value.
#[derive(Debug, Deserialize, Default)]
pub struct ProfilesQuery {
    pub page: Option<u32>,
    pub q: Option<String>,
    pub gender: Option<String>,
    pub nat: Option<String>,
    pub sort: Option<String>,
}

impl ProfilesQuery {
    pub fn into_update(self) -> ParamsUpdate {
        ParamsUpdate {
            page: self.page,
            search: self.q,
            gender: self.gender.as_deref().map(parse_gender_filter),
            nationality: self.nat.as_deref().map(parse_nationality_filter),
            sort: self.sort.as_deref().map(parse_sort_mode),
        }
    }
}

#[derive(Template)]
#[template(path = "profiles.html")]
pub struct ProfilesTemplate {
    pub grid: ProfileGridView,
    pub filters: FilterFormView,
    pub auto_refresh: bool,
}

pub async fn profiles_handler(
    State(state): State<AppState>,
    Query(query): Query<ProfilesQuery>,
) -> Result<Html<String>, AppError> {
    let snapshot = apply_within_render_wait(&state, query.into_update()).await?;
    let data = profile_view_service::build_profile_page(&snapshot);

    let template = ProfilesTemplate {
        auto_refresh: data.grid.is_loading,
        grid: data.grid,
        filters: data.filters,
    };
    Ok(Html(template.render()?))
}

pub async fn profiles_api_handler(
    State(state): State<AppState>,
    Query(query): Query<ProfilesQuery>,
) -> Json<ListSnapshot> {
    Json(state.controller.apply(query.into_update()).await)
}

// The update keeps running in the background when the wait elapses; the page
// then renders the loading state and refreshes itself.
async fn apply_within_render_wait(
    state: &AppState,
    update: ParamsUpdate,
) -> Result<ListSnapshot, AppError> {
    let controller = state.controller.clone();
    let task = tokio::spawn(async move { controller.apply(update).await });

    match tokio::time::timeout(state.render_wait, task).await {
        Ok(Ok(snapshot)) => Ok(snapshot),
        Ok(Err(e)) => {
            error!("Profile list update task failed: {}", e);
            Err(AppError::Internal(e.to_string()))
        }
        Err(_) => {
            debug!(wait_ms = state.render_wait.as_millis() as u64, "rendering before fetch completed");
            Ok(state.controller.snapshot().await)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Gender, Nationality, SortMode};

    #[test]
    fn absent_query_fields_leave_params_alone() {
        let update = ProfilesQuery::default().into_update();
        assert!(update.is_empty());
    }

    #[test]
    fn all_means_clearing_the_filter() {
        let update = ProfilesQuery {
            gender: Some("all".to_string()),
            nat: Some("de".to_string()),
            sort: Some("name_desc".to_string()),
            q: Some(String::new()),
            page: Some(2),
        }
        .into_update();

        assert_eq!(update.gender, Some(None));
        assert_eq!(update.nationality, Some(Some(Nationality::De)));
        assert_eq!(update.sort, Some(SortMode::NameDesc));
        assert_eq!(update.search.as_deref(), Some(""));
        assert_eq!(update.page, Some(2));
    }

    #[test]
    fn gender_values_map_to_filters() {
        let update = ProfilesQuery {
            gender: Some("female".to_string()),
            ..ProfilesQuery::default()
        }
        .into_update();
        assert_eq!(update.gender, Some(Some(Gender::Female)));
    }
}
