//! Conversion from the filter criteria the UI edits to the query parameters
//! the list endpoint understands.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::filters::{FilterCriteria, SortBy, SortOrder};
use crate::models::TransactionType;

/// Fully resolved list query, in the backend's shape
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionQuery {
    pub page: u32,
    pub size: u32,
    pub sort_by: SortBy,
    pub sort_order: SortOrder,
    pub search: Option<String>,
    pub transaction_type: Option<TransactionType>,
    pub category_id: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub min_amount: Option<Decimal>,
    pub max_amount: Option<Decimal>,
}

impl TransactionQuery {
    /// Unfiltered query: newest transactions first
    pub fn unfiltered(page: u32, size: u32) -> Self {
        FilterCriteria::default().to_query(page, size)
    }

    /// Query-string pairs in a stable order; optional fields are omitted
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("page", self.page.to_string()),
            ("size", self.size.to_string()),
            ("sort_by", self.sort_by.as_str().to_string()),
            ("sort_order", self.sort_order.as_str().to_string()),
        ];

        if let Some(search) = &self.search {
            pairs.push(("search", search.clone()));
        }
        if let Some(transaction_type) = self.transaction_type {
            pairs.push(("transaction_type", transaction_type.as_str().to_string()));
        }
        if let Some(category_id) = &self.category_id {
            pairs.push(("category_id", category_id.clone()));
        }
        if let Some(start) = self.start_date {
            pairs.push(("start_date", format_date(start)));
        }
        if let Some(end) = self.end_date {
            pairs.push(("end_date", format_date(end)));
        }
        if let Some(min) = self.min_amount {
            pairs.push(("min_amount", min.normalize().to_string()));
        }
        if let Some(max) = self.max_amount {
            pairs.push(("max_amount", max.normalize().to_string()));
        }

        pairs
    }
}

impl FilterCriteria {
    /// Materialize the criteria as a query for `page`.
    ///
    /// Defaults and blanks are left out: the search only when non-blank after
    /// trimming, type and category only when not "all", dates only when both
    /// ends are set, and each amount bound on its own.
    pub fn to_query(&self, page: u32, size: u32) -> TransactionQuery {
        let search = self.search.trim();
        let (start_date, end_date) = match (self.date_range.start, self.date_range.end) {
            (Some(start), Some(end)) => (Some(start), Some(end)),
            _ => (None, None),
        };

        TransactionQuery {
            page,
            size,
            sort_by: self.sort_by,
            sort_order: self.sort_order,
            search: (!search.is_empty()).then(|| search.to_string()),
            transaction_type: self.transaction_type.as_transaction_type(),
            category_id: self.category.id().map(str::to_string),
            start_date,
            end_date,
            min_amount: self.amount_range.min.value(),
            max_amount: self.amount_range.max.value(),
        }
    }
}

/// `YYYY-MM-DD`
pub fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}
