use rust_decimal::Decimal;
use thiserror::Error;

use crate::filters::FilterCriteria;

/// Minimum number of characters for a non-empty search
pub const MIN_SEARCH_LENGTH: usize = 2;

/// Reasons a set of filter criteria cannot be turned into a query
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FilterValidationError {
    #[error("a busca deve ter pelo menos 2 caracteres")]
    SearchTooShort,
    #[error("a data inicial não pode ser posterior à data final")]
    StartAfterEnd,
    #[error("valor mínimo inválido")]
    InvalidMinAmount,
    #[error("valor máximo inválido")]
    InvalidMaxAmount,
    #[error("valor mínimo não pode ser negativo")]
    NegativeMinAmount,
    #[error("valor máximo não pode ser negativo")]
    NegativeMaxAmount,
    #[error("valor mínimo não pode ser maior que o máximo")]
    MinGreaterThanMax,
}

/// Check the criteria before a query is issued. Returns the first problem.
pub fn validate_filters(criteria: &FilterCriteria) -> Result<(), FilterValidationError> {
    let search = criteria.search.trim();
    if !search.is_empty() && search.chars().count() < MIN_SEARCH_LENGTH {
        return Err(FilterValidationError::SearchTooShort);
    }

    if let (Some(start), Some(end)) = (criteria.date_range.start, criteria.date_range.end) {
        if start > end {
            return Err(FilterValidationError::StartAfterEnd);
        }
    }

    let range = &criteria.amount_range;
    if range.min.is_invalid() {
        return Err(FilterValidationError::InvalidMinAmount);
    }
    if range.max.is_invalid() {
        return Err(FilterValidationError::InvalidMaxAmount);
    }

    let (min, max) = (range.min.value(), range.max.value());
    if min.is_some_and(|min| min < Decimal::ZERO) {
        return Err(FilterValidationError::NegativeMinAmount);
    }
    if max.is_some_and(|max| max < Decimal::ZERO) {
        return Err(FilterValidationError::NegativeMaxAmount);
    }
    if let (Some(min), Some(max)) = (min, max) {
        if min > max {
            return Err(FilterValidationError::MinGreaterThanMax);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::{AmountBound, AmountRange, DateRange};
    use chrono::NaiveDate;

    fn criteria() -> FilterCriteria {
        FilterCriteria::default()
    }

    #[test]
    fn test_default_criteria_is_valid() {
        assert_eq!(validate_filters(&criteria()), Ok(()));
    }

    #[test]
    fn test_search_length_counts_trimmed_characters() {
        let mut c = criteria();
        c.search = " a ".to_string();
        assert_eq!(validate_filters(&c), Err(FilterValidationError::SearchTooShort));

        c.search = "   ".to_string();
        assert_eq!(validate_filters(&c), Ok(()));

        c.search = "ãé".to_string();
        assert_eq!(validate_filters(&c), Ok(()));
    }

    #[test]
    fn test_start_after_end() {
        let mut c = criteria();
        c.date_range = DateRange {
            start: NaiveDate::from_ymd_opt(2025, 2, 1),
            end: NaiveDate::from_ymd_opt(2025, 1, 1),
        };
        assert_eq!(validate_filters(&c), Err(FilterValidationError::StartAfterEnd));

        c.date_range.end = None;
        assert_eq!(validate_filters(&c), Ok(()));
    }

    #[test]
    fn test_min_greater_than_max_message() {
        let mut c = criteria();
        c.amount_range = AmountRange::new(Some(Decimal::from(100)), Some(Decimal::from(50)));

        let err = validate_filters(&c).unwrap_err();
        assert_eq!(err, FilterValidationError::MinGreaterThanMax);
        assert_eq!(err.to_string(), "valor mínimo não pode ser maior que o máximo");
    }

    #[test]
    fn test_negative_bounds() {
        let mut c = criteria();
        c.amount_range = AmountRange::new(Some(Decimal::from(-1)), None);
        assert_eq!(validate_filters(&c), Err(FilterValidationError::NegativeMinAmount));

        c.amount_range = AmountRange::new(None, Some(Decimal::from(-1)));
        assert_eq!(validate_filters(&c), Err(FilterValidationError::NegativeMaxAmount));
    }

    #[test]
    fn test_first_error_wins() {
        let mut c = criteria();
        c.search = "x".to_string();
        c.amount_range = AmountRange::new(Some(Decimal::from(100)), Some(Decimal::from(50)));
        assert_eq!(validate_filters(&c), Err(FilterValidationError::SearchTooShort));
    }

    #[test]
    fn test_unreadable_amount_is_rejected() {
        let mut c = criteria();
        c.amount_range = AmountRange {
            min: AmountBound::parse("abc"),
            max: AmountBound::Value(Decimal::from(50)),
        };
        let err = validate_filters(&c).unwrap_err();
        assert_eq!(err, FilterValidationError::InvalidMinAmount);
        assert_eq!(err.to_string(), "valor mínimo inválido");

        c.amount_range = AmountRange {
            min: AmountBound::Empty,
            max: AmountBound::parse("12,3,4"),
        };
        assert_eq!(validate_filters(&c), Err(FilterValidationError::InvalidMaxAmount));
    }
}
