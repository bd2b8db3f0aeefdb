//! Plan catalog and coverage.
//!
//! The catalog is fixed at build time; nothing here touches a store.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | GET | `/api/plans` | No | Full plan list (cached 5 minutes) |
//! | GET | `/api/plans/{id}` | No | Plan summary by id |
//! | GET | `/api/coverage` | No | Regions and the plans that serve them |

pub mod dtos;
pub mod handlers;
pub mod routes;
pub mod services;

pub use services::CatalogService;
