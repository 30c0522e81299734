pub mod user;
pub mod bank_account;
pub mod trade;
pub mod transaction;
pub mod setting;
pub mod session;

pub use user::Entity as User;
pub use bank_account::Entity as BankAccount;
pub use trade::Entity as Trade;
pub use transaction::Entity as Transaction;
pub use setting::Entity as Setting;
pub use session::Entity as Session;
