//! Pages
//!
//! Top-level page components for each route.

pub mod account;
pub mod assistant;
pub mod attendants;
pub mod board;
pub mod dashboard;
pub mod inbox;
pub mod login;

pub use account::Account;
pub use assistant::Assistant;
pub use attendants::Attendants;
pub use board::BoardPage;
pub use dashboard::Dashboard;
pub use inbox::Inbox;
pub use login::Login;
