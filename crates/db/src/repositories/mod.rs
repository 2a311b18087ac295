//! Database repositories.

mod report;
mod user_acc;
mod user_acc_history;
mod user_role;
mod users;

pub use report::ReportRepository;
pub use user_acc::UserAccRepository;
pub use user_acc_history::UserAccHistoryRepository;
pub use user_role::UserRoleRepository;
pub use users::UsersRepository;
