//! Text layout of the picking sheet.
//!
//! Rows are grouped by **adjacency**: a rack header is written whenever the
//! primary rack differs from the previous row's. Rows are never re-sorted, so
//! a rack whose items are not contiguous gets its header more than once.

use core::fmt;

use crate::report::ReportRow;

/// A rendered-on-demand picking sheet for one batch of orders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickingSheet {
    title: String,
    rows: Vec<ReportRow>,
}

impl PickingSheet {
    /// `title` is echoed verbatim in the header (the order list as typed).
    pub fn new(title: impl Into<String>, rows: Vec<ReportRow>) -> Self {
        Self {
            title: title.into(),
            rows,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn rows(&self) -> &[ReportRow] {
        &self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl fmt::Display for PickingSheet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=+=+=+= Страница сборки заказов {}", self.title)?;

        let mut current_rack: Option<Option<&str>> = None;
        for row in &self.rows {
            let rack = row.primary_rack.as_deref();
            if current_rack != Some(rack) {
                writeln!(f, "=====Стеллаж {}:", rack.unwrap_or_default())?;
                current_rack = Some(rack);
            }

            writeln!(f, "{} (id={})", row.name.as_deref().unwrap_or_default(), row.item_id)?;
            writeln!(f, "заказ {}, {} шт ", row.order_id, row.quantity)?;
            if let Some(secondary) = &row.secondary_racks {
                writeln!(f, "доп стеллаж: {secondary}")?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}
