pub mod history;
pub mod user;

pub use history::{HistoryEntry, ANONYMOUS_USER};
pub use user::{NewUser, Pagination, User, UserPage, UserUpdate};
