pub mod login_form;
pub mod transactions;

pub use login_form::LoginForm;
pub use transactions::TransactionViewContainer;
