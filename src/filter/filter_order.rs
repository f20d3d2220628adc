use std::cmp::Ordering;

use crate::database::models::CashCard;

use super::error::FilterError;
use super::types::{SortDirection, SortOrder, SortProperty};

pub struct FilterOrder;

impl FilterOrder {
    /// Parse every `sort` query value, e.g. `["amount,desc", "id"]`.
    ///
    /// Each value is `property[,property...][,direction]`; a trailing direction applies to
    /// all properties of that value. Values that name no property contribute nothing.
    pub fn parse_sort_params<S: AsRef<str>>(values: &[S]) -> Result<Vec<SortOrder>, FilterError> {
        let mut out = Vec::new();
        for value in values {
            out.extend(Self::parse_sort_value(value.as_ref())?);
        }
        Ok(out)
    }

    fn parse_sort_value(s: &str) -> Result<Vec<SortOrder>, FilterError> {
        let tokens: Vec<&str> = s.split(',').map(str::trim).filter(|t| !t.is_empty()).collect();
        let Some((last, rest)) = tokens.split_last() else {
            return Ok(vec![]);
        };

        let (direction, properties) = match SortDirection::from_name(last) {
            Some(direction) => (direction, rest),
            None => (SortDirection::Asc, tokens.as_slice()),
        };

        properties
            .iter()
            .map(|name| {
                SortProperty::from_name(name)
                    .map(|property| SortOrder { property, direction })
                    .ok_or_else(|| FilterError::InvalidSortProperty(name.to_string()))
            })
            .collect()
    }

    /// ORDER BY clause for the given orders, always ending on `id` so equal keys come
    /// back in the same order on every query.
    pub fn generate(orders: &[SortOrder]) -> String {
        let mut parts: Vec<String> = orders
            .iter()
            .map(|o| format!("\"{}\" {}", o.property.column(), o.direction.to_sql()))
            .collect();
        if !orders.iter().any(|o| o.property == SortProperty::Id) {
            parts.push("\"id\" ASC".to_string());
        }
        format!("ORDER BY {}", parts.join(", "))
    }

    /// In-process equivalent of [`FilterOrder::generate`]
    pub fn compare(a: &CashCard, b: &CashCard, orders: &[SortOrder]) -> Ordering {
        orders
            .iter()
            .map(|o| {
                let ord = match o.property {
                    SortProperty::Id => a.id.cmp(&b.id),
                    SortProperty::Amount => a.amount.cmp(&b.amount),
                    SortProperty::Owner => a.owner.cmp(&b.owner),
                };
                match o.direction {
                    SortDirection::Asc => ord,
                    SortDirection::Desc => ord.reverse(),
                }
            })
            .find(|ord| ord.is_ne())
            .unwrap_or_else(|| a.id.cmp(&b.id))
    }
}
