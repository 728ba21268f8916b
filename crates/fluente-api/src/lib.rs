//! Async Rust client for the Fluente language-school REST API.
//!
//! The backend is a conventional JSON-over-HTTP CRUD API managing students,
//! consultants, classes ("turmas"), course contents, lessons, enrollments,
//! and payments. This crate provides:
//!
//! - **[`ApiClient`]** — the HTTP client: base-URL construction,
//!   bearer-token injection, error-body decoding, and typed endpoint
//!   methods grouped by resource module.
//! - **[`Session`]** — explicit per-connection authentication state
//!   (token + user), mutated by login/refresh/logout. Passed to the
//!   client rather than hidden in a global, so tests can run isolated
//!   sessions side by side.
//! - **[`TransportConfig`]** — timeout knobs for the underlying
//!   `reqwest::Client`.
//! - **[`Error`]** — unified transport/API error type.

pub mod classes;
pub mod client;
pub mod contents;
pub mod dashboard;
pub mod error;
pub mod lessons;
pub mod payments;
pub mod session;
pub mod transport;
pub mod users;

// ── Primary re-exports ──────────────────────────────────────────────
pub use client::{ApiClient, LoginResponse, MessageResponse};
pub use error::Error;
pub use session::{AuthenticatedUser, Session};
pub use transport::TransportConfig;

// Resource types at the crate root for ergonomics.
pub use classes::{
    ClassGroup, ClassLevel, ClassQuery, ClassType, ClassesPage, ConsultantRef, CreateClassInput,
    Enrollment, StudentRef, UpdateClassInput,
};
pub use contents::{Content, ContentsPage, CreateContentInput, UpdateContentInput};
pub use dashboard::{ActivityEntry, DashboardStats};
pub use lessons::{
    Attendance, AttendanceStatus, CreateLessonInput, Lesson, UpdateLessonInput,
};
pub use payments::{
    BulkCreatePaymentsInput, BulkCreatePaymentsResult, CreatePaymentInput, MarkPaidInput, Payment,
    PaymentQuery, PaymentSortBy, PaymentStats, PaymentStatus, PaymentsPage, UpdatePaymentInput,
};
pub use users::{CreateUserInput, UpdateUserInput, User, UserQuery, UserRole, UsersPage};
