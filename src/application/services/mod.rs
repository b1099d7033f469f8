//! Business logic services for the application layer.

pub mod click_recorder;
pub mod link_service;
pub mod rate_limiter;
pub mod redirect_service;

pub use click_recorder::ClickRecorder;
pub use link_service::{CreatedLink, LinkService};
pub use rate_limiter::RateLimiter;
pub use redirect_service::{ClientMeta, RedirectService, RedirectTarget};
