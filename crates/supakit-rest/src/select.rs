use std::marker::PhantomData;

use serde::de::DeserializeOwned;

use supakit_core::{SupabaseClient, SupabaseResponse};

use crate::execute;
use crate::filter::Filterable;
use crate::modifier::Modifiable;
use crate::parts::RequestParts;

/// Builder for SELECT queries. Implements both Filterable and Modifiable.
pub struct SelectBuilder<T> {
    pub(crate) client: SupabaseClient,
    pub(crate) parts: RequestParts,
    pub(crate) _marker: PhantomData<T>,
}

impl<T> Filterable for SelectBuilder<T> {
    fn parts_mut(&mut self) -> &mut RequestParts {
        &mut self.parts
    }
}

impl<T> Modifiable for SelectBuilder<T> {
    fn modifiers_mut(&mut self) -> &mut RequestParts {
        &mut self.parts
    }
}

impl<T: DeserializeOwned> SelectBuilder<T> {
    /// Execute the SELECT query and return results.
    pub async fn execute(self) -> SupabaseResponse<T> {
        execute::execute_rest::<T>(&self.client, &self.parts).await
    }
}
