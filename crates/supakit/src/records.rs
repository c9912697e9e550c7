use tracing::debug;

use supakit_core::{Record, SupabaseClient};
use supakit_rest::{Filterable, Modifiable, SupabaseClientRestExt, NO_SINGLE_ROW};

use crate::envelope::{failure, success, Outcome};
use crate::error::reported;

/// Create, read, update, delete and list rows of any table.
///
/// Rows are addressed by their `id` column. Runs on a handle it is given.
#[derive(Debug, Clone)]
pub struct RecordService {
    client: SupabaseClient,
}

impl RecordService {
    pub fn new(client: &SupabaseClient) -> Self {
        Self {
            client: client.clone(),
        }
    }

    /// Insert one row and return it as stored.
    pub async fn create(&self, table: &str, data: Record) -> Outcome<Record> {
        self.client
            .from(table)
            .insert(data)
            .select()
            .single()
            .execute()
            .await
            .into_single()
            .map_err(|e| reported("create", e))
    }

    /// The row with this id, or `None` when there is none.
    pub async fn read(&self, table: &str, id: &str) -> Outcome<Option<Record>> {
        let resp = self
            .client
            .from(table)
            .select("*")
            .eq("id", id)
            .single()
            .execute()
            .await;
        match resp.into_single() {
            Ok(row) => success(Some(row)),
            Err(e) if e.code() == Some(NO_SINGLE_ROW) => {
                debug!(table, id, "No row with this id");
                success(None)
            }
            Err(e) => failure(reported("read", e)),
        }
    }

    /// Change the given columns of the row with this id and return it.
    pub async fn update(&self, table: &str, id: &str, data: Record) -> Outcome<Record> {
        self.client
            .from(table)
            .update(data)
            .eq("id", id)
            .select()
            .single()
            .execute()
            .await
            .into_single()
            .map_err(|e| reported("update", e))
    }

    pub async fn delete(&self, table: &str, id: &str) -> Outcome<()> {
        self.client
            .from(table)
            .delete()
            .eq("id", id)
            .execute()
            .await
            .into_result()
            .map(|_| ())
            .map_err(|e| reported("delete", e))
    }

    /// All rows matching every `filters` entry exactly.
    pub async fn list(&self, table: &str, filters: Option<&Record>) -> Outcome<Vec<Record>> {
        let mut query = self.client.from(table).select("*");
        if let Some(filters) = filters {
            query = query.match_all(filters);
        }
        query
            .execute()
            .await
            .into_result()
            .map_err(|e| reported("list", e))
    }
}
