pub mod use_categories;
pub mod use_session;
pub mod use_transactions;

pub use use_categories::use_categories;
pub use use_session::{use_session, UseSessionResult};
pub use use_transactions::{use_transactions, CrudFeedback, UseTransactionsActions};
