//! Loan terms and loan-book loading

mod terms;
pub mod loader;

pub use terms::{LoanTerms, MAX_TERM_YEARS};
pub(crate) use terms::monthly_payment_count;
pub use loader::{load_loans, load_loans_from_reader};
