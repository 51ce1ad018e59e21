pub mod list_params;
pub mod random_user;
pub mod user_record;

pub use list_params::{ListParams, Nationality, SortMode, DEFAULT_RESULTS_PER_PAGE};
pub use random_user::RandomUserResponse;
pub use user_record::{Gender, Location, PersonName, UserRecord};
