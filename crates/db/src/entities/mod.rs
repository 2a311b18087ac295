//! Database entities.

#![allow(missing_docs)]

pub mod report;
pub mod user_acc;
pub mod user_acc_history;
pub mod user_role;
pub mod users;

pub use report::Entity as Report;
pub use user_acc::Entity as UserAcc;
pub use user_acc_history::Entity as UserAccHistory;
pub use user_role::Entity as UserRole;
pub use users::Entity as Users;
