use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Direction of money for a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    /// Money coming in
    Income,
    /// Money going out
    Expense,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Income => "income",
            TransactionType::Expense => "expense",
        }
    }

    /// Label shown to the user
    pub fn label(&self) -> &'static str {
        match self {
            TransactionType::Income => "Receita",
            TransactionType::Expense => "Despesa",
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Category summary embedded in a transaction response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryInfo {
    pub id: String,
    pub name: String,
    pub color: Option<String>,
    #[serde(rename = "type")]
    pub category_type: Option<String>,
}

/// A transaction as returned by the backend.
///
/// The client treats this record as opaque: nothing in the transaction
/// subsystem derives balances or totals from it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    /// Always positive; the sign lives in `transaction_type`
    pub amount: Decimal,
    pub description: String,
    pub transaction_date: NaiveDate,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub category_id: Option<String>,
    #[serde(default)]
    pub category: Option<CategoryInfo>,
    /// Deprecated by the backend in favour of `category.name`
    #[serde(default)]
    pub category_name: Option<String>,
    /// Negative for expenses
    #[serde(default)]
    pub signed_amount: Option<Decimal>,
    #[serde(default)]
    pub user_id: String,
    /// RFC 3339 timestamp
    #[serde(default)]
    pub created_at: String,
    /// RFC 3339 timestamp
    #[serde(default)]
    pub updated_at: String,
}

impl Transaction {
    /// Category name to display, preferring the embedded category
    pub fn display_category(&self) -> Option<&str> {
        self.category
            .as_ref()
            .map(|c| c.name.as_str())
            .or(self.category_name.as_deref())
    }
}

/// Request body for creating a transaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionCreate {
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    pub amount: Decimal,
    pub description: String,
    pub transaction_date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<String>,
}

/// Request body for updating a transaction; only present fields are changed
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransactionUpdate {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub transaction_type: Option<TransactionType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<String>,
}

impl From<TransactionCreate> for TransactionUpdate {
    /// Full replacement of every editable field
    fn from(data: TransactionCreate) -> Self {
        Self {
            transaction_type: Some(data.transaction_type),
            amount: Some(data.amount),
            description: Some(data.description),
            transaction_date: Some(data.transaction_date),
            notes: data.notes,
            category_id: data.category_id,
        }
    }
}

/// Generic page of items with the backend's pagination metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaginatedResponse<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u32,
    pub size: u32,
    pub pages: u32,
    pub has_next: bool,
    pub has_previous: bool,
}

/// Generic acknowledgement returned by delete endpoints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuccessResponse {
    pub success: bool,
    pub message: String,
}

/// A user or system category, used to populate the category filter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(rename = "type", default)]
    pub category_type: Option<String>,
    /// "Parent > Child" for subcategories
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub is_system: bool,
    #[serde(default)]
    pub is_subcategory: bool,
    #[serde(default)]
    pub subcategories: Vec<Category>,
}

impl Category {
    /// Flatten a category tree into the order a dropdown shows it
    pub fn flatten(categories: &[Category]) -> Vec<&Category> {
        let mut flat = Vec::new();
        for category in categories {
            flat.push(category);
            flat.extend(Category::flatten(&category.subcategories));
        }
        flat
    }

    pub fn label(&self) -> &str {
        self.full_name.as_deref().unwrap_or(&self.name)
    }
}

/// Credentials for the login endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Response of the login endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub token_type: String,
    #[serde(default)]
    pub expires_in: u64,
    #[serde(rename = "requiresTwoFactor", default)]
    pub requires_two_factor: bool,
    #[serde(default)]
    pub message: Option<String>,
    /// Set when a second factor is required; passed back to `/auth/verify-2fa`
    #[serde(default)]
    pub user_id: Option<String>,
}

impl LoginResponse {
    /// User awaiting a verification code, if the login stopped at the second factor
    pub fn pending_two_factor(&self) -> Option<&str> {
        if self.requires_two_factor {
            self.user_id.as_deref()
        } else {
            None
        }
    }
}

/// Body of the second-factor verification endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TwoFactorVerify {
    pub totp_code: String,
}

impl TwoFactorVerify {
    /// Accept a six-digit authenticator code; surrounding spaces are ignored
    pub fn from_input(input: &str) -> Option<Self> {
        let code = input.trim();
        (code.len() == 6 && code.bytes().all(|b| b.is_ascii_digit())).then(|| Self {
            totp_code: code.to_string(),
        })
    }
}
