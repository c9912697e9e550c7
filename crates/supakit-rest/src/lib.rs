//! PostgREST query builders for supakit.
//!
//! ```ignore
//! use supakit_rest::{Filterable, Modifiable, SupabaseClientRestExt};
//!
//! let row = client.from("todos").select("*").eq("id", "42").single().execute().await;
//! ```

pub mod parts;
pub mod filter;
pub mod modifier;
pub mod execute;
pub mod builder;
pub mod select;
pub mod insert;
pub mod update;
pub mod delete;

pub use parts::{EqFilter, Operation, RequestParts};
pub use filter::Filterable;
pub use modifier::Modifiable;
pub use builder::QueryBuilder;
pub use select::SelectBuilder;
pub use insert::InsertBuilder;
pub use update::UpdateBuilder;
pub use delete::DeleteBuilder;

use supakit_core::SupabaseClient;

/// PostgREST error code for "JSON object requested, multiple (or no) rows returned".
pub const NO_SINGLE_ROW: &str = "PGRST116";

/// Extension trait adding query builder methods to SupabaseClient.
pub trait SupabaseClientRestExt {
    /// Start a query on a table.
    fn from(&self, table: &str) -> QueryBuilder;
}

impl SupabaseClientRestExt for SupabaseClient {
    fn from(&self, table: &str) -> QueryBuilder {
        QueryBuilder::new(self.clone(), table.to_string())
    }
}
