mod loading_modal;
mod network_banner;
mod spinner;
mod token_balance;
mod transaction_history;
mod wallet_menu;

pub use loading_modal::LoadingModal;
pub use network_banner::NetworkBanner;
pub use spinner::Spinner;
pub use token_balance::TokenBalance;
pub use transaction_history::TransactionHistory;
pub use wallet_menu::WalletMenu;
