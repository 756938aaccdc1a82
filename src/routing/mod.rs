//! Request routing.
//!
//! The route table is built once at startup and shared read-only between
//! connections (`Arc<Router>`).

pub mod handlers;
pub mod router;

pub use handlers::Handler;
pub use router::{Router, RouterBuilder};
