//! Result-returning facade over Supabase auth, profile metadata and table CRUD.
//!
//! Every operation returns an [`Outcome`]: a failure is always a
//! [`ServiceError`] with a message, never a panic.
//!
//! ```ignore
//! use supakit::prelude::*;
//!
//! let kit = Supakit::new(FacadeConfig::new("https://your-project.supabase.co", "anon-key"))?;
//! match kit.read("todos", "42").await {
//!     Ok(Some(row)) => println!("{:?}", row),
//!     Ok(None) => println!("no such todo"),
//!     Err(e) => eprintln!("{}", e.message()),
//! }
//! ```

pub mod auth;
pub mod envelope;
pub mod error;
pub mod facade;
pub mod mapping;
pub mod profile;
pub mod records;
pub mod types;

pub use auth::AuthService;
pub use envelope::{failure, is_failure, is_success, success, Outcome};
pub use error::{ServiceError, FALLBACK_MESSAGE};
pub use facade::Supakit;
pub use mapping::{map_user, AccountRecord};
pub use profile::ProfileService;
pub use records::RecordService;
pub use types::*;

// Backend layers
pub use supakit_auth;
pub use supakit_core;
pub use supakit_rest;

/// Prelude module for convenient imports.
///
/// ```ignore
/// use supakit::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        failure, is_failure, is_success, success, AuthSession, FacadeConfig, Outcome,
        ProfileUpdate, ServiceError, SignInOutcome, SignUpOutcome, Supakit, User,
    };
    pub use supakit_core::{record, Record, SupabaseConfig};
}
