pub mod client;
pub mod config;
pub mod error;
pub mod response;
pub mod session;
pub mod value;

pub use client::SupabaseClient;
pub use config::SupabaseConfig;
pub use error::{StatusCode, SupabaseError, SupabaseResult};
pub use response::SupabaseResponse;
pub use session::SessionStore;
pub use value::Record;

#[doc(hidden)]
pub mod __private {
    pub use serde_json;
}
