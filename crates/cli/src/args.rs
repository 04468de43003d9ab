//! Command-line arguments.

use std::collections::HashSet;

use thiserror::Error;

use picksheet_core::OrderId;

/// Printed when the order list is missing.
pub const USAGE_HINT: &str = "Перечислите параметры через запятую без пробелов";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ArgsError {
    /// No order list was given at all. Not a failure: the hint is printed and
    /// the process exits successfully.
    #[error("missing order id list")]
    Usage,
}

/// A request for one picking sheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    raw: String,
    order_ids: Vec<OrderId>,
}

impl Invocation {
    /// The order list exactly as typed; echoed in the sheet header.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Distinct order ids, in first-seen order. May be empty; the order
    /// resolver rejects an empty set.
    pub fn order_ids(&self) -> &[OrderId] {
        &self.order_ids
    }
}

/// Parse `std::env::args()`-style input (program name first).
///
/// Only the first positional argument is used, e.g. `101,102,103`. Tokens
/// are order identifiers; an empty token or one that is not an integer can
/// match no `order_items` row and is left out of the set.
pub fn parse_args<I, S>(args: I) -> Result<Invocation, ArgsError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let raw: String = args.into_iter().nth(1).map(Into::into).ok_or(ArgsError::Usage)?;

    let mut seen = HashSet::new();
    let mut order_ids = Vec::new();
    for token in raw.split(',') {
        if token.is_empty() {
            continue;
        }
        match token.parse::<OrderId>() {
            Ok(id) => {
                if seen.insert(id) {
                    order_ids.push(id);
                }
            }
            Err(err) => tracing::warn!(%err, "order id matches no order; skipped"),
        }
    }

    Ok(Invocation { raw, order_ids })
}
