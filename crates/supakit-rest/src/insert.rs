use std::marker::PhantomData;

use serde::de::DeserializeOwned;

use supakit_core::{SupabaseClient, SupabaseResponse};

use crate::execute;
use crate::modifier::Modifiable;
use crate::parts::RequestParts;

/// Builder for INSERT queries. Implements Modifiable.
/// Call `.select()` to get the inserted rows back.
pub struct InsertBuilder<T> {
    pub(crate) client: SupabaseClient,
    pub(crate) parts: RequestParts,
    pub(crate) _marker: PhantomData<T>,
}

impl<T> Modifiable for InsertBuilder<T> {
    fn modifiers_mut(&mut self) -> &mut RequestParts {
        &mut self.parts
    }
}

impl<T> InsertBuilder<T> {
    /// Return the inserted rows (`Prefer: return=representation`).
    pub fn select(self) -> Self {
        self.select_columns("*")
    }

    /// Return the inserted rows, limited to some columns.
    pub fn select_columns(mut self, columns: &str) -> Self {
        self.parts.returning = true;
        self.parts.select_columns = Some(normalize_columns(columns));
        self
    }
}

impl<T: DeserializeOwned> InsertBuilder<T> {
    /// Execute the INSERT query.
    pub async fn execute(self) -> SupabaseResponse<T> {
        execute::execute_rest::<T>(&self.client, &self.parts).await
    }
}

/// Collapse a column list like `"id, title"` to PostgREST's `id,title`.
pub(crate) fn normalize_columns(columns: &str) -> String {
    let trimmed: Vec<&str> = columns
        .split(',')
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .collect();
    if trimmed.is_empty() {
        "*".to_string()
    } else {
        trimmed.join(",")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn column_lists_are_normalized() {
        assert_eq!(normalize_columns("*"), "*");
        assert_eq!(normalize_columns(""), "*");
        assert_eq!(normalize_columns(" id , title "), "id,title");
    }
}
