use super::schema::{ColumnValues, Table};

/// Clean one free-text value: keep the first `max_len` characters, drop
/// every `<` and `>`, then trim surrounding whitespace.
pub fn sanitize_text(value: &str, max_len: usize) -> String {
    let cleaned: String = value
        .chars()
        .take(max_len)
        .filter(|c| !matches!(c, '<' | '>'))
        .collect();
    cleaned.trim().to_string()
}

/// Sanitize the named text columns of `table`, returning the cleaned table.
/// Columns that are absent or not text are left as they are.
pub fn sanitize_table(mut table: Table, text_columns: &[&str], max_len: usize) -> Table {
    for column in &mut table.columns {
        if !text_columns.contains(&column.name.as_str()) {
            continue;
        }
        if let ColumnValues::Text(values) = &mut column.values {
            for value in values.iter_mut() {
                *value = sanitize_text(value, max_len);
            }
        }
    }
    table
}
