//! Table read descriptions.

/// Sort direction for an ordered read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Order {
    Ascending,
    Descending,
}

/// A read against one table: projection, equality filters, ordering, limit.
///
/// Embedded relations are expressed in the projection the way the hosted
/// backend expects them, e.g. `*, service_categories(name)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    table: String,
    columns: String,
    filters: Vec<(String, String)>,
    order: Option<(String, Order)>,
    limit: Option<usize>,
}

impl Query {
    /// Read every column of `table`.
    pub fn table(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            columns: "*".to_string(),
            filters: Vec::new(),
            order: None,
            limit: None,
        }
    }

    /// Replace the projection.
    pub fn select(mut self, columns: impl Into<String>) -> Self {
        self.columns = columns.into();
        self
    }

    /// Keep rows whose `column` equals `value`.
    pub fn eq(mut self, column: impl Into<String>, value: impl ToString) -> Self {
        self.filters.push((column.into(), value.to_string()));
        self
    }

    /// Sort ascending by `column`.
    pub fn order_by(self, column: impl Into<String>) -> Self {
        self.order_with(column, Order::Ascending)
    }

    /// Sort by `column` in the given direction.
    pub fn order_with(mut self, column: impl Into<String>, direction: Order) -> Self {
        self.order = Some((column.into(), direction));
        self
    }

    /// Return at most `n` rows.
    pub fn limit(mut self, n: usize) -> Self {
        self.limit = Some(n);
        self
    }

    pub fn table_name(&self) -> &str {
        &self.table
    }

    pub fn filters(&self) -> &[(String, String)] {
        &self.filters
    }

    pub fn ordering(&self) -> Option<(&str, Order)> {
        self.order.as_ref().map(|(column, dir)| (column.as_str(), *dir))
    }

    pub fn row_limit(&self) -> Option<usize> {
        self.limit
    }

    /// Query-string parameters for the table endpoint.
    pub fn to_params(&self) -> Vec<(String, String)> {
        let mut params = vec![("select".to_string(), compact(&self.columns))];

        for (column, value) in &self.filters {
            params.push((column.clone(), format!("eq.{value}")));
        }

        if let Some((column, direction)) = &self.order {
            let suffix = match direction {
                Order::Ascending => "asc",
                Order::Descending => "desc",
            };
            params.push(("order".to_string(), format!("{column}.{suffix}")));
        }

        if let Some(limit) = self.limit {
            params.push(("limit".to_string(), limit.to_string()));
        }

        params
    }
}

/// The endpoint rejects whitespace inside projections.
fn compact(columns: &str) -> String {
    columns.split_whitespace().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_query_selects_everything() {
        let query = Query::table("banners");

        assert_eq!(query.table_name(), "banners");
        assert_eq!(query.to_params(), vec![("select".to_string(), "*".to_string())]);
    }

    #[test]
    fn test_services_query_params() {
        let query = Query::table("services")
            .select("*, service_categories(name)")
            .eq("is_active", true)
            .order_by("name");

        let params = query.to_params();

        assert_eq!(
            params,
            vec![
                ("select".to_string(), "*,service_categories(name)".to_string()),
                ("is_active".to_string(), "eq.true".to_string()),
                ("order".to_string(), "name.asc".to_string()),
            ]
        );
    }

    #[test]
    fn test_descending_order_and_limit() {
        let query = Query::table("appointments")
            .order_with("appointment_date", Order::Descending)
            .limit(5);

        let params = query.to_params();

        assert!(params.contains(&("order".to_string(), "appointment_date.desc".to_string())));
        assert!(params.contains(&("limit".to_string(), "5".to_string())));
        assert_eq!(query.row_limit(), Some(5));
    }

    #[test]
    fn test_embedded_projection_is_compacted() {
        let query = Query::table("professionals").select("*,\n  user_profiles(name, phone, avatar_url)");

        assert_eq!(
            query.to_params()[0].1,
            "*,user_profiles(name,phone,avatar_url)"
        );
    }
}
