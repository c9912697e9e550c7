use serde_json::Value as JsonValue;

use supakit_core::Record;

use crate::parts::{validate_column_name, EqFilter, RequestParts};

/// Trait providing the exact-match filter methods for query builders.
pub trait Filterable: Sized {
    /// Get a mutable reference to the request parts.
    fn parts_mut(&mut self) -> &mut RequestParts;

    /// Filter: column = value
    fn eq(mut self, column: &str, value: impl Into<JsonValue>) -> Self {
        if let Err(e) = validate_column_name(column) {
            tracing::error!("Invalid column name in eq filter: {e}");
            self.parts_mut().reject(e);
            return self;
        }
        self.parts_mut().filters.push(EqFilter {
            column: column.to_string(),
            value: value.into(),
        });
        self
    }

    /// Filter on every column of `query` at once (all must match).
    ///
    /// Mirrors `.match({ ... })` in Supabase JS.
    fn match_all(self, query: &Record) -> Self {
        let mut entries: Vec<_> = query.iter().collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        entries
            .into_iter()
            .fold(self, |builder, (column, value)| builder.eq(column, value.clone()))
    }
}

/// Render one filter as the query-string value PostgREST expects.
///
/// Strings go through verbatim, `null` becomes `is.null`, arrays and
/// objects are JSON-encoded.
pub fn render_filter_value(value: &JsonValue) -> String {
    match value {
        JsonValue::Null => "is.null".to_string(),
        JsonValue::String(s) => format!("eq.{}", s),
        JsonValue::Bool(b) => format!("eq.{}", b),
        JsonValue::Number(n) => format!("eq.{}", n),
        other => format!("eq.{}", other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parts::Operation;
    use serde_json::json;
    use supakit_core::record;

    struct Builder(RequestParts);

    impl Filterable for Builder {
        fn parts_mut(&mut self) -> &mut RequestParts {
            &mut self.0
        }
    }

    fn builder() -> Builder {
        Builder(RequestParts::new(Operation::Select, "todos"))
    }

    #[test]
    fn render_values() {
        assert_eq!(render_filter_value(&json!("abc")), "eq.abc");
        assert_eq!(render_filter_value(&json!(42)), "eq.42");
        assert_eq!(render_filter_value(&json!(1.5)), "eq.1.5");
        assert_eq!(render_filter_value(&json!(true)), "eq.true");
        assert_eq!(render_filter_value(&JsonValue::Null), "is.null");
        assert_eq!(render_filter_value(&json!(["a", 1])), r#"eq.["a",1]"#);
    }

    #[test]
    fn eq_pushes_filter() {
        let p = builder().eq("done", false);
        assert_eq!(p.0.filters.len(), 1);
        assert_eq!(p.0.filters[0].column, "done");
        assert_eq!(p.0.filters[0].value, json!(false));
    }

    #[test]
    fn invalid_column_is_rejected_not_dropped_silently() {
        let p = builder().eq("bad;col", 1);
        assert!(p.0.filters.is_empty());
        assert!(p.0.invalid.is_some());
    }

    #[test]
    fn match_all_adds_every_column_sorted() {
        let p = builder().match_all(&record![("b", 2), ("a", 1)]);
        let cols: Vec<_> = p.0.filters.iter().map(|f| f.column.as_str()).collect();
        assert_eq!(cols, vec!["a", "b"]);
    }
}
