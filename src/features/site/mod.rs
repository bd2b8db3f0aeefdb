//! Public website: landing page, static assets, crawler files and the
//! not-found page.
//!
//! Templates and assets are compiled into the binary.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Cache |
//! |--------|----------|-------|
//! | GET | `/`, `/index.html` | 5 minutes |
//! | GET | `/static/styles.css`, `/static/app.js` | 1 year, immutable |
//! | GET | `/robots.txt`, `/sitemap.xml` | 1 day |

pub mod handlers;
pub mod routes;
pub mod services;

pub use services::SiteService;
