//! Category breakdown: assigns palette colours to category aggregates.

use crate::models::dashboard::CategorySlice;
use crate::models::stats::CategoryRow;

/// Slice colours, reused in order once categories outnumber them.
pub const PALETTE: [&str; 5] = ["#0088FE", "#00C49F", "#FFBB28", "#FF8042", "#8884D8"];

/// Map category rows to coloured slices, keeping their order.
///
/// Absent input stays absent: callers render "no data" rather than an
/// empty chart.
pub fn colorize_categories(rows: Option<&[CategoryRow]>) -> Option<Vec<CategorySlice>> {
    rows.map(|rows| {
        rows.iter()
            .enumerate()
            .map(|(i, row)| CategorySlice {
                name: category_name(row, i),
                value: row.count.or(row.total_products).unwrap_or(0.0),
                color: PALETTE[i % PALETTE.len()],
            })
            .collect()
    })
}

fn category_name(row: &CategoryRow, position: usize) -> String {
    non_empty(row.id.as_deref())
        .or_else(|| non_empty(row.category.as_deref()))
        .map_or_else(|| format!("Category {}", position + 1), str::to_string)
}

fn non_empty(name: Option<&str>) -> Option<&str> {
    name.filter(|n| !n.is_empty())
}
