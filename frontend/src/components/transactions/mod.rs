pub mod filter_panel;
pub mod pagination_controls;
pub mod transaction_form;
pub mod transaction_table;
pub mod transaction_view_container;

pub use filter_panel::FilterPanel;
pub use pagination_controls::PaginationControls;
pub use transaction_form::TransactionForm;
pub use transaction_table::TransactionTable;
pub use transaction_view_container::TransactionViewContainer;
