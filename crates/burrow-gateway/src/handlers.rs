mod health;
mod url;

pub use health::health_handler;
pub use url::{
    create_url_handler, fallback_handler, method_not_allowed_handler, preflight_handler,
    resolve_url_handler, welcome_handler,
};
