pub mod error;
pub mod history;
pub mod models;
pub mod users;

pub use error::{PersistError, Result};
pub use history::{HistoryStore, InMemoryHistoryStore};
pub use models::{HistoryEntry, NewUser, Pagination, User, UserPage, UserUpdate, ANONYMOUS_USER};
pub use users::UserStore;
