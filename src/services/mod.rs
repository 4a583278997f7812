pub mod suggestions;
pub mod users;

pub use suggestions::get_suggest_follow;
pub use users::get_user_data;
