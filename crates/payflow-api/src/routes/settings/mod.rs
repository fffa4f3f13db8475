//! Settings routes - resolved backend routing and display settings

pub mod api;
pub mod page;

pub use api::{api_routing, RoutingInfo};
pub use page::page_settings;
