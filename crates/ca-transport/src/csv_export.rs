//! CSV rendering of the molar-fraction table. Hand-rolled rather than
//! pulling in the `csv` crate: the table is a small fixed-width float grid
//! with no quoting or escaping concerns.

use ca_engine::MolarFractionTable;

/// Render `table` as CSV text, header row first.
pub fn to_csv(table: &MolarFractionTable) -> String {
    let mut out = String::new();
    out.push_str(&table.header.join(","));
    out.push('\n');
    for row in &table.rows {
        let cells: Vec<String> = row.iter().map(|v| v.to_string()).collect();
        out.push_str(&cells.join(","));
        out.push('\n');
    }
    out
}
