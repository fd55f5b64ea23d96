/// Tabular output: ordered columns, one JSON object per benchmark row.
///
/// Rows are keyed by the shared `name` column; metric columns carry a
/// caller-chosen solver prefix so tables from different solvers can be
/// merged side by side. Row order follows insertion and carries no
/// contract — consumers join on `name`.
use serde_json::{Map, Value};

/// The join key shared by every table.
pub const NAME_COLUMN: &str = "name";

#[derive(Debug, Clone, Default)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Map<String, Value>>,
}

impl Table {
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Map<String, Value>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn push_row(&mut self, row: Map<String, Value>) {
        self.rows.push(row);
    }

    /// Find a row by its `name` value.
    pub fn row_by_name(&self, name: &str) -> Option<&Map<String, Value>> {
        self.rows
            .iter()
            .find(|row| row.get(NAME_COLUMN).and_then(Value::as_str) == Some(name))
    }

    /// Inner-join another table on the `name` column.
    ///
    /// The result keeps one row per benchmark present in both tables, with
    /// this table's columns followed by the other's metric columns. Names
    /// present in only one table are dropped.
    pub fn merge(&self, other: &Table) -> Table {
        let mut columns = self.columns.clone();
        columns.extend(
            other
                .columns
                .iter()
                .filter(|c| c.as_str() != NAME_COLUMN)
                .cloned(),
        );

        let mut merged = Table::new(columns);
        for row in &self.rows {
            let name = match row.get(NAME_COLUMN).and_then(Value::as_str) {
                Some(name) => name,
                None => continue,
            };
            if let Some(other_row) = other.row_by_name(name) {
                let mut joined = row.clone();
                for (column, value) in other_row {
                    if column != NAME_COLUMN {
                        joined.insert(column.clone(), value.clone());
                    }
                }
                merged.push_row(joined);
            }
        }
        merged
    }

    /// Array-of-objects rendering, one object per row.
    pub fn to_json(&self) -> Value {
        Value::Array(self.rows.iter().cloned().map(Value::Object).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_table(prefix: &str, names: &[&str]) -> Table {
        let result_column = format!("{prefix}_result");
        let runtime_column = format!("{prefix}_runtime");
        let mut table = Table::new(vec![
            NAME_COLUMN.to_string(),
            result_column.clone(),
            runtime_column.clone(),
        ]);
        for name in names {
            let mut row = Map::new();
            row.insert(NAME_COLUMN.to_string(), json!(name));
            row.insert(result_column.clone(), json!(1));
            row.insert(runtime_column.clone(), json!(5.0));
            table.push_row(row);
        }
        table
    }

    #[test]
    fn merge_joins_on_name() {
        let a = sample_table("a", &["x.cnf", "y.cnf"]);
        let b = sample_table("b", &["y.cnf", "x.cnf"]);

        let merged = a.merge(&b);
        assert_eq!(merged.len(), 2);
        let x = merged.row_by_name("x.cnf").unwrap();
        assert_eq!(x["a_result"], 1);
        assert_eq!(x["b_result"], 1);
        assert_eq!(x["b_runtime"], 5.0);
    }

    #[test]
    fn merge_drops_names_missing_from_either_side() {
        let a = sample_table("a", &["x.cnf", "only-a.cnf"]);
        let b = sample_table("b", &["x.cnf", "only-b.cnf"]);

        let merged = a.merge(&b);
        assert_eq!(merged.len(), 1);
        assert!(merged.row_by_name("only-a.cnf").is_none());
        assert!(merged.row_by_name("only-b.cnf").is_none());
    }

    #[test]
    fn merge_keeps_single_name_column() {
        let a = sample_table("a", &["x.cnf"]);
        let b = sample_table("b", &["x.cnf"]);

        let merged = a.merge(&b);
        let name_columns = merged
            .columns()
            .iter()
            .filter(|c| c.as_str() == NAME_COLUMN)
            .count();
        assert_eq!(name_columns, 1);
        assert_eq!(
            merged.columns(),
            &["name", "a_result", "a_runtime", "b_result", "b_runtime"]
        );
    }

    #[test]
    fn to_json_is_array_of_objects() {
        let table = sample_table("a", &["x.cnf"]);
        let json = table.to_json();
        assert_eq!(json[0]["name"], "x.cnf");
        assert_eq!(json[0]["a_result"], 1);
        assert_eq!(json.as_array().unwrap().len(), 1);
    }

    #[test]
    fn empty_table() {
        let table = Table::new(vec![NAME_COLUMN.to_string()]);
        assert!(table.is_empty());
        assert_eq!(table.to_json(), json!([]));
    }
}
