pub mod bank_store;
pub mod record_validator;

pub use bank_store::{BankStore, Table};
pub use record_validator::validate_records;
