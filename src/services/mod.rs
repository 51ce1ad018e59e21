pub mod profile_list_service;
pub mod profile_view_service;
pub mod random_user_service;
