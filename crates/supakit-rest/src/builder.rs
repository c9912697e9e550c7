use std::marker::PhantomData;

use serde_json::Value as JsonValue;

use supakit_core::{Record, SupabaseClient};

use crate::delete::DeleteBuilder;
use crate::insert::{normalize_columns, InsertBuilder};
use crate::parts::{Operation, RequestParts};
use crate::select::SelectBuilder;
use crate::update::UpdateBuilder;

/// Entry point query builder created by `client.from("table")`.
///
/// Call `.select()`, `.insert()`, `.update()` or `.delete()` to
/// specialize into the appropriate builder type.
pub struct QueryBuilder {
    client: SupabaseClient,
    table: String,
}

impl QueryBuilder {
    pub fn new(client: SupabaseClient, table: String) -> Self {
        Self { client, table }
    }

    /// Start a SELECT query.
    /// Pass a column list like "id, title" or "*".
    pub fn select(self, columns: &str) -> SelectBuilder<Record> {
        let mut parts = RequestParts::new(Operation::Select, self.table);
        parts.select_columns = Some(normalize_columns(columns));
        SelectBuilder {
            client: self.client,
            parts,
            _marker: PhantomData,
        }
    }

    /// Start an INSERT query with a single row.
    pub fn insert(self, row: Record) -> InsertBuilder<Record> {
        let mut parts = RequestParts::new(Operation::Insert, self.table);
        parts.body = Some(JsonValue::Object(row.into_inner().into_iter().collect()));
        InsertBuilder {
            client: self.client,
            parts,
            _marker: PhantomData,
        }
    }

    /// Start an UPDATE query. Only the columns present in `row` change.
    pub fn update(self, row: Record) -> UpdateBuilder<Record> {
        let mut parts = RequestParts::new(Operation::Update, self.table);
        parts.body = Some(JsonValue::Object(row.into_inner().into_iter().collect()));
        UpdateBuilder {
            client: self.client,
            parts,
            _marker: PhantomData,
        }
    }

    /// Start a DELETE query.
    pub fn delete(self) -> DeleteBuilder<Record> {
        DeleteBuilder {
            client: self.client,
            parts: RequestParts::new(Operation::Delete, self.table),
            _marker: PhantomData,
        }
    }
}
