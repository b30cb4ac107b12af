pub mod aggregate;
pub mod dashboard;
pub mod error;
pub mod export;
pub mod filter;
pub mod input;
pub mod labels;
pub mod model;
pub mod render;
pub mod schema;
pub mod session;
pub mod worksheet;
#[cfg(feature = "xlsx")]
pub mod xlsx;

pub use dashboard::{render_view, Dashboard, DashboardView};
pub use error::{DashboardError, Result, Warning};
pub use model::*;
pub use session::SessionId;
pub use worksheet::{Edit, Worksheet};
