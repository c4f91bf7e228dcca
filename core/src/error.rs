use alloy_primitives::B256;

// The Clone and PartialEq traits are derived so that Errors can be stored in signals and
// returned from Actions.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("No Ethereum provider found. Please install MetaMask and try again.")]
    NoProvider,

    #[error("Please switch to the Sepolia network to proceed.")]
    WrongNetwork,

    #[error("Sepolia is not configured in your wallet.")]
    UnknownChain,

    #[error("Failed to add Sepolia network")]
    AddChainFailed,

    #[error("Please connect your wallet first")]
    NotConnected,

    #[error("Transaction was rejected. Please try again.")]
    UserRejected,

    #[error("Insufficient {0} balance")]
    InsufficientBalance(String),

    #[error("Insufficient funds for this transaction. Please check your balance.")]
    InsufficientFunds,

    #[error("Transaction may fail. Try increasing gas limit.")]
    GasEstimation,

    #[error("Please enter a valid amount")]
    InvalidAmount,

    #[error("Select two different tokens")]
    SameToken,

    #[error("Token not found in the token list!")]
    UnknownToken,

    #[error("Exchange failed: transaction {0} reverted")]
    Reverted(B256),

    #[error("Exchange failed: {0}")]
    Transaction(String),

    #[error("Serde Error: {0}")]
    Serde(String),
}

impl Error {
    pub fn transaction(message: impl ToString) -> Self {
        Error::Transaction(message.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Error::Serde(error.to_string())
    }
}

/// Sorts a provider failure into the user-facing taxonomy.
impl From<eip1193::Error> for Error {
    fn from(error: eip1193::Error) -> Self {
        if error.is_user_rejection() {
            return Error::UserRejected;
        }
        if error.is_unrecognized_chain() {
            return Error::UnknownChain;
        }

        match error {
            eip1193::Error::ProviderUnavailable => Error::NoProvider,
            eip1193::Error::Serialization(message) => Error::Serde(message),
            error => {
                let message = error.to_string();
                let lowercase = message.to_lowercase();
                if lowercase.contains("insufficient funds") {
                    Error::InsufficientFunds
                } else if lowercase.contains("gas required exceeds allowance") {
                    Error::GasEstimation
                } else {
                    Error::Transaction(message)
                }
            }
        }
    }
}
