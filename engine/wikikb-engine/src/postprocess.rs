//! Result post-processing: filter, order, project, aggregate
//!
//! The joined binding set is shaped into output rows in a fixed order:
//! substring filters first, then single-best ordering, then projection,
//! then the optional count collapse. Ordering keeps only the top row; it
//! is a best-answer selection, not a general sort. The count aggregate is
//! captured after filtering and before ordering, so the two never
//! silently conflict when both are requested.

use crate::binding::{Binding, BindingSet};
use crate::{EngineError, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Marker prefix identifying a count aggregate in a projection list
pub const COUNT_MARKER: &str = "COUNT";

/// Substring filter over one variable's values.
///
/// Containment, not equality: a binding survives when its value for
/// `variable` contains `substring` anywhere.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSpec {
    pub variable: String,
    pub substring: String,
}

impl FilterSpec {
    pub fn new(variable: impl Into<String>, substring: impl Into<String>) -> Self {
        FilterSpec {
            variable: variable.into(),
            substring: substring.into(),
        }
    }
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortOrder {
    Asc,
    Desc,
}

/// Ordering directive: pick the single best row by a numeric variable.
///
/// Passing no `OrderSpec` at all is the "no ordering requested" case;
/// there is no sentinel value inside the type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderSpec {
    pub variable: String,
    pub direction: SortOrder,
}

impl OrderSpec {
    pub fn new(variable: impl Into<String>, direction: SortOrder) -> Self {
        OrderSpec {
            variable: variable.into(),
            direction,
        }
    }
}

/// Final output rows
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RowSet {
    /// One tuple per surviving binding, values in projection order
    Rows(Vec<Vec<String>>),
    /// Single aggregate row: the first surviving binding's projected
    /// values followed by the number of bindings that survived filtering
    Count { values: Vec<String>, count: usize },
}

impl RowSet {
    /// Whether the set holds no rows
    pub fn is_empty(&self) -> bool {
        match self {
            RowSet::Rows(rows) => rows.is_empty(),
            RowSet::Count { .. } => false,
        }
    }

    /// Number of output rows
    pub fn len(&self) -> usize {
        match self {
            RowSet::Rows(rows) => rows.len(),
            RowSet::Count { .. } => 1,
        }
    }
}

/// Parse an order key: split off any `^^` datatype suffix, trim quotes,
/// read the payload as a number.
fn order_key(raw: &str) -> Result<f64> {
    let payload = raw.split("^^").next().unwrap_or(raw).trim_matches('"');
    payload
        .parse::<f64>()
        .map_err(|_| EngineError::OrderValue {
            value: raw.to_string(),
        })
}

fn project(binding: &Binding, names: &[String]) -> Result<Vec<String>> {
    names
        .iter()
        .map(|name| {
            binding
                .get(name)
                .map(str::to_string)
                .ok_or_else(|| EngineError::MissingBinding {
                    variable: name.clone(),
                })
        })
        .collect()
}

/// Shape a binding set into output rows.
///
/// Fixed order of operations: filter, count capture, single-best order,
/// projection, count collapse. An empty binding set at entry (or after
/// filtering) yields an empty row set without running anything else.
pub fn post_process(
    bindings: BindingSet,
    projection: &[String],
    filters: Option<&[FilterSpec]>,
    order: Option<&OrderSpec>,
) -> Result<RowSet> {
    if bindings.is_empty() {
        return Ok(RowSet::Rows(Vec::new()));
    }

    let mut survivors: Vec<Binding> = bindings.into_iter().collect();

    if let Some(filters) = filters {
        for filter in filters {
            let mut kept = Vec::with_capacity(survivors.len());
            for binding in survivors {
                let value =
                    binding
                        .get(&filter.variable)
                        .ok_or_else(|| EngineError::MissingBinding {
                            variable: filter.variable.clone(),
                        })?;
                if value.contains(&filter.substring) {
                    kept.push(binding);
                }
            }
            survivors = kept;
        }
        debug!(remaining = survivors.len(), "applied filters");
        if survivors.is_empty() {
            return Ok(RowSet::Rows(Vec::new()));
        }
    }

    // captured before ordering collapses the survivors
    let filtered_count = survivors.len();

    if let Some(order) = order {
        let mut keyed = Vec::with_capacity(survivors.len());
        for binding in survivors {
            let raw = binding
                .get(&order.variable)
                .ok_or_else(|| EngineError::MissingBinding {
                    variable: order.variable.clone(),
                })?;
            keyed.push((order_key(raw)?, binding));
        }
        // stable sort: ties keep their pre-sort relative order
        match order.direction {
            SortOrder::Asc => keyed.sort_by(|a, b| a.0.total_cmp(&b.0)),
            SortOrder::Desc => keyed.sort_by(|a, b| b.0.total_cmp(&a.0)),
        }
        survivors = keyed.into_iter().take(1).map(|(_, binding)| binding).collect();
    }

    let count_requested = projection
        .last()
        .is_some_and(|name| name.starts_with(COUNT_MARKER));

    if count_requested {
        let leading = &projection[..projection.len() - 1];
        let Some(first) = survivors.first() else {
            return Ok(RowSet::Rows(Vec::new()));
        };
        return Ok(RowSet::Count {
            values: project(first, leading)?,
            count: filtered_count,
        });
    }

    let rows = survivors
        .iter()
        .map(|binding| project(binding, projection))
        .collect::<Result<Vec<_>>>()?;
    Ok(RowSet::Rows(rows))
}
