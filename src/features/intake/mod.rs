//! Contact, plan inquiry and newsletter submissions.
//!
//! Submissions are validated, sanitized and stored as JSON in the contacts
//! namespace under `contact:{uuid}`, `inquiry:{uuid}` and `newsletter:{uuid}`.
//! Records never expire.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | POST | `/api/contact` | No | Contact form |
//! | POST | `/api/inquire` | No | Plan inquiry |
//! | POST | `/api/newsletter` | No | Newsletter subscription |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::IntakeService;
