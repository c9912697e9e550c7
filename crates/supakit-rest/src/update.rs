use std::marker::PhantomData;

use serde::de::DeserializeOwned;

use supakit_core::{SupabaseClient, SupabaseResponse};

use crate::execute;
use crate::filter::Filterable;
use crate::insert::normalize_columns;
use crate::modifier::Modifiable;
use crate::parts::RequestParts;

/// Builder for UPDATE queries. Implements Filterable and Modifiable.
/// Call `.select()` to get the updated rows back.
pub struct UpdateBuilder<T> {
    pub(crate) client: SupabaseClient,
    pub(crate) parts: RequestParts,
    pub(crate) _marker: PhantomData<T>,
}

impl<T> Filterable for UpdateBuilder<T> {
    fn parts_mut(&mut self) -> &mut RequestParts {
        &mut self.parts
    }
}

impl<T> Modifiable for UpdateBuilder<T> {
    fn modifiers_mut(&mut self) -> &mut RequestParts {
        &mut self.parts
    }
}

impl<T> UpdateBuilder<T> {
    /// Return the updated rows.
    pub fn select(self) -> Self {
        self.select_columns("*")
    }

    /// Return the updated rows, limited to some columns.
    pub fn select_columns(mut self, columns: &str) -> Self {
        self.parts.returning = true;
        self.parts.select_columns = Some(normalize_columns(columns));
        self
    }
}

impl<T: DeserializeOwned> UpdateBuilder<T> {
    /// Execute the UPDATE query.
    pub async fn execute(self) -> SupabaseResponse<T> {
        execute::execute_rest::<T>(&self.client, &self.parts).await
    }
}
