//! HTTP request handlers.

pub mod callback;
pub mod health;
pub mod login;
pub mod passthrough;

pub use callback::callback;
pub use health::healthz;
pub use login::login;
pub use passthrough::forward_unmatched;
