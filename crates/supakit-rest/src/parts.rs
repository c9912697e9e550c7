use serde_json::Value as JsonValue;

use supakit_core::SupabaseError;

/// The kind of PostgREST request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Select,
    Insert,
    Update,
    Delete,
}

impl Operation {
    pub fn method(self) -> reqwest::Method {
        match self {
            Self::Select => reqwest::Method::GET,
            Self::Insert => reqwest::Method::POST,
            Self::Update => reqwest::Method::PATCH,
            Self::Delete => reqwest::Method::DELETE,
        }
    }
}

/// One `column=eq.value` condition.
#[derive(Debug, Clone, PartialEq)]
pub struct EqFilter {
    pub column: String,
    pub value: JsonValue,
}

/// Collects all the components of a request being built.
#[derive(Debug, Clone)]
pub struct RequestParts {
    pub operation: Operation,
    pub table: String,
    /// Columns to select (None = omit the parameter)
    pub select_columns: Option<String>,
    /// Exact-match filters, joined with AND
    pub filters: Vec<EqFilter>,
    /// JSON body for insert/update
    pub body: Option<JsonValue>,
    /// Ask PostgREST for a single object instead of an array
    pub single: bool,
    /// Ask PostgREST to return the written rows
    pub returning: bool,
    /// First validation problem found while building, reported at execution
    pub invalid: Option<String>,
}

impl RequestParts {
    pub fn new(operation: Operation, table: impl Into<String>) -> Self {
        let table = table.into();
        let invalid = validate_identifier(&table, "Table").err().map(builder_message);
        Self {
            operation,
            table,
            select_columns: None,
            filters: Vec::new(),
            body: None,
            single: false,
            returning: false,
            invalid,
        }
    }

    /// Record a validation problem unless one is already recorded.
    pub fn reject(&mut self, err: SupabaseError) {
        if self.invalid.is_none() {
            self.invalid = Some(builder_message(err));
        }
    }
}

fn builder_message(err: SupabaseError) -> String {
    match err {
        SupabaseError::QueryBuilder(msg) => msg,
        other => other.to_string(),
    }
}

/// Validate that a column name is safe to put in a query string.
pub fn validate_column_name(name: &str) -> Result<(), SupabaseError> {
    if name.is_empty() {
        return Err(SupabaseError::query_builder("Column name cannot be empty"));
    }
    if name.contains('"') || name.contains(';') || name.contains("--") {
        return Err(SupabaseError::query_builder(format!(
            "Invalid column name: {name:?} (contains prohibited characters)"
        )));
    }
    Ok(())
}

/// Validate a table or schema name.
pub fn validate_identifier(name: &str, kind: &str) -> Result<(), SupabaseError> {
    if name.is_empty() {
        return Err(SupabaseError::query_builder(format!(
            "{kind} name cannot be empty"
        )));
    }
    if name.contains("--") || name.contains(PATH_BREAKING) {
        return Err(SupabaseError::query_builder(format!(
            "Invalid {kind} name: {name:?} (contains prohibited characters)"
        )));
    }
    // "." and ".." are dot segments and would be resolved away from `/rest/v1/`.
    if name.chars().all(|c| c == '.') {
        return Err(SupabaseError::query_builder(format!(
            "Invalid {kind} name: {name:?}"
        )));
    }
    Ok(())
}

/// Characters that end or reshape the URL path segment a table name lands in.
const PATH_BREAKING: [char; 7] = ['"', ';', '/', '\\', '?', '#', '%'];
