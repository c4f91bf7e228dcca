mod history;
mod token;

pub use history::{TransactionHistory, TransactionRecord};
pub use token::{Token, TokenKind};
