//! Primary TUI screens.

pub mod dashboard;
pub mod payments;
pub mod students;

pub use dashboard::DashboardScreen;
pub use payments::PaymentsScreen;
pub use students::StudentsScreen;
