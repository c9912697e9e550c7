use std::marker::PhantomData;

use serde::de::DeserializeOwned;

use supakit_core::{SupabaseClient, SupabaseResponse};

use crate::execute;
use crate::filter::Filterable;
use crate::parts::RequestParts;

/// Builder for DELETE queries. Implements Filterable.
pub struct DeleteBuilder<T> {
    pub(crate) client: SupabaseClient,
    pub(crate) parts: RequestParts,
    pub(crate) _marker: PhantomData<T>,
}

impl<T> Filterable for DeleteBuilder<T> {
    fn parts_mut(&mut self) -> &mut RequestParts {
        &mut self.parts
    }
}

impl<T: DeserializeOwned> DeleteBuilder<T> {
    /// Execute the DELETE query.
    pub async fn execute(self) -> SupabaseResponse<T> {
        execute::execute_rest::<T>(&self.client, &self.parts).await
    }
}
