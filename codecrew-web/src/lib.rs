//! Local web page for codecrew reviews.
//!
//! Serves a single page (text area, run button, output region) and a small
//! JSON API:
//! - `GET /` - the review page
//! - `GET /api/health` - status, model and whether a review is running
//! - `POST /api/review` - run the four reviewers over `{ "code": "..." }`
//!
//! One review runs at a time; a second submission gets `409 Conflict`.

pub mod error;
pub mod handlers;
pub mod router;
pub mod state;
pub mod types;

pub use error::{ApiError, Result};
pub use router::{create_router, serve};
pub use state::AppState;
