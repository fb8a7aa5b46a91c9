//! # Filter State
//!
//! Holds the criteria the user is editing on the transactions page. Editing
//! never talks to the backend; the orchestrator decides when the criteria are
//! turned into a query.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use crate::models::TransactionType;

/// Transaction type selector, with an explicit "everything" choice
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TypeFilter {
    #[default]
    All,
    Income,
    Expense,
}

impl TypeFilter {
    /// The backend type to filter on, `None` for "all"
    pub fn as_transaction_type(&self) -> Option<TransactionType> {
        match self {
            TypeFilter::All => None,
            TypeFilter::Income => Some(TransactionType::Income),
            TypeFilter::Expense => Some(TransactionType::Expense),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TypeFilter::All => "all",
            TypeFilter::Income => "income",
            TypeFilter::Expense => "expense",
        }
    }

    /// Parse the value of a `<select>`; unknown values fall back to `All`
    pub fn from_select_value(value: &str) -> Self {
        match value {
            "income" => TypeFilter::Income,
            "expense" => TypeFilter::Expense,
            _ => TypeFilter::All,
        }
    }
}

/// Category selector; `All` is the sentinel for no category filter
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    #[default]
    All,
    Id(String),
}

impl CategoryFilter {
    /// Parse the value of a `<select>`, where `"all"` or empty means no filter
    pub fn from_select_value(value: &str) -> Self {
        let value = value.trim();
        if value.is_empty() || value == "all" {
            CategoryFilter::All
        } else {
            CategoryFilter::Id(value.to_string())
        }
    }

    pub fn id(&self) -> Option<&str> {
        match self {
            CategoryFilter::All => None,
            CategoryFilter::Id(id) => Some(id),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DateRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateRange {
    pub fn is_empty(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }
}

/// Parse an amount typed by the user. Accepts "1234.56", "1234,56",
/// "1.234,56" and an optional "R$" prefix.
pub fn parse_amount(input: &str) -> Option<Decimal> {
    let cleaned = input.trim().trim_start_matches("R$").trim().replace(' ', "");
    if cleaned.is_empty() {
        return None;
    }

    let normalized = if cleaned.contains(',') {
        cleaned.replace('.', "").replace(',', ".")
    } else {
        cleaned
    };
    normalized.parse::<Decimal>().ok()
}

/// One end of an amount range as the user left it
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum AmountBound {
    #[default]
    Empty,
    Value(Decimal),
    /// Text that is not an amount, kept so validation can reject it
    Invalid(String),
}

impl AmountBound {
    pub fn parse(input: &str) -> Self {
        if input.trim().is_empty() {
            return AmountBound::Empty;
        }
        match parse_amount(input) {
            Some(value) => AmountBound::Value(value),
            None => AmountBound::Invalid(input.to_string()),
        }
    }

    pub fn value(&self) -> Option<Decimal> {
        match self {
            AmountBound::Value(value) => Some(*value),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, AmountBound::Empty)
    }

    pub fn is_invalid(&self) -> bool {
        matches!(self, AmountBound::Invalid(_))
    }

    /// What an input showing this bound should contain
    pub fn input_text(&self) -> String {
        match self {
            AmountBound::Empty => String::new(),
            AmountBound::Value(value) => value.normalize().to_string(),
            AmountBound::Invalid(text) => text.clone(),
        }
    }
}

impl From<Option<Decimal>> for AmountBound {
    fn from(value: Option<Decimal>) -> Self {
        value.map_or(AmountBound::Empty, AmountBound::Value)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AmountRange {
    pub min: AmountBound,
    pub max: AmountBound,
}

impl AmountRange {
    pub fn new(min: Option<Decimal>, max: Option<Decimal>) -> Self {
        Self {
            min: min.into(),
            max: max.into(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.min.is_empty() && self.max.is_empty()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortBy {
    #[default]
    TransactionDate,
    Amount,
    Description,
    CreatedAt,
}

impl SortBy {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortBy::TransactionDate => "transaction_date",
            SortBy::Amount => "amount",
            SortBy::Description => "description",
            SortBy::CreatedAt => "created_at",
        }
    }

    pub fn from_select_value(value: &str) -> Self {
        match value {
            "amount" => SortBy::Amount,
            "description" => SortBy::Description,
            "created_at" => SortBy::CreatedAt,
            _ => SortBy::TransactionDate,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }

    pub fn from_select_value(value: &str) -> Self {
        match value {
            "asc" => SortOrder::Asc,
            _ => SortOrder::Desc,
        }
    }
}

/// Everything the user can filter and sort the transaction list by.
///
/// Replaced wholesale on every update; nested ranges are never mutated
/// through a shared reference.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    /// Free text, trimmed before use
    pub search: String,
    pub transaction_type: TypeFilter,
    pub category: CategoryFilter,
    pub date_range: DateRange,
    pub amount_range: AmountRange,
    pub sort_by: SortBy,
    pub sort_order: SortOrder,
}

/// Partial update of [`FilterCriteria`]; `None` leaves a field untouched.
///
/// Ranges are patched as a unit so a half-edited range still replaces the
/// previous one entirely.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterPatch {
    pub search: Option<String>,
    pub transaction_type: Option<TypeFilter>,
    pub category: Option<CategoryFilter>,
    pub date_range: Option<DateRange>,
    pub amount_range: Option<AmountRange>,
    pub sort_by: Option<SortBy>,
    pub sort_order: Option<SortOrder>,
}

impl FilterPatch {
    pub fn search(value: impl Into<String>) -> Self {
        Self {
            search: Some(value.into()),
            ..Self::default()
        }
    }

    pub fn transaction_type(value: TypeFilter) -> Self {
        Self {
            transaction_type: Some(value),
            ..Self::default()
        }
    }

    pub fn category(value: CategoryFilter) -> Self {
        Self {
            category: Some(value),
            ..Self::default()
        }
    }

    pub fn date_range(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        Self {
            date_range: Some(DateRange { start, end }),
            ..Self::default()
        }
    }

    pub fn amount_range(min: Option<Decimal>, max: Option<Decimal>) -> Self {
        Self::amount_bounds(min.into(), max.into())
    }

    /// Amount range as typed, unreadable bounds included
    pub fn amount_bounds(min: AmountBound, max: AmountBound) -> Self {
        Self {
            amount_range: Some(AmountRange { min, max }),
            ..Self::default()
        }
    }

    pub fn sort(sort_by: SortBy, sort_order: SortOrder) -> Self {
        Self {
            sort_by: Some(sort_by),
            sort_order: Some(sort_order),
            ..Self::default()
        }
    }
}

/// Owner of the current [`FilterCriteria`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterStore {
    criteria: FilterCriteria,
}

impl FilterStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    /// Merge a patch into the current criteria. No request is issued.
    pub fn update(&mut self, patch: FilterPatch) {
        let current = &self.criteria;
        self.criteria = FilterCriteria {
            search: patch.search.unwrap_or_else(|| current.search.clone()),
            transaction_type: patch.transaction_type.unwrap_or(current.transaction_type),
            category: patch.category.unwrap_or_else(|| current.category.clone()),
            date_range: patch.date_range.unwrap_or_else(|| current.date_range.clone()),
            amount_range: patch.amount_range.unwrap_or_else(|| current.amount_range.clone()),
            sort_by: patch.sort_by.unwrap_or(current.sort_by),
            sort_order: patch.sort_order.unwrap_or(current.sort_order),
        };
    }

    /// Back to the defaults: no filters, newest transactions first
    pub fn clear(&mut self) {
        self.criteria = FilterCriteria::default();
    }

    pub fn has_active_filters(&self) -> bool {
        self.criteria != FilterCriteria::default()
    }

    /// Number of independently active filter groups (at most 5).
    /// Each range counts once no matter how many of its bounds are set.
    pub fn active_filters_count(&self) -> usize {
        let c = &self.criteria;
        [
            !c.search.trim().is_empty(),
            c.transaction_type != TypeFilter::All,
            c.category != CategoryFilter::All,
            !c.date_range.is_empty(),
            !c.amount_range.is_empty(),
        ]
        .iter()
        .filter(|active| **active)
        .count()
    }
}
