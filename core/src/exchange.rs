use crate::{
    constants::{EXCHANGE_CONTRACT, NATIVE_GAS_RESERVE},
    network::ensure_network,
    state::{Balances, WalletSession},
    support::{IErc20, ITokenExchange},
    types::{Token, TransactionRecord},
    utils::parse_token_amount,
    Error,
};
use alloy_primitives::{Address, B256, U256};
use eip1193::{Eip1193Provider, Ethereum, TransactionRequest};
use tracing::{debug, info, warn};

/// Which contract entry point an exchange goes through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExchangeRoute {
    NativeForToken {
        token_out: Address,
    },
    TokenForNative {
        token_in: Address,
    },
    TokenForToken {
        token_in: Address,
        token_out: Address,
    },
}

impl ExchangeRoute {
    pub fn between(input: &Token, output: &Token) -> Result<Self, Error> {
        if input.symbol == output.symbol {
            return Err(Error::SameToken);
        }

        let route = match (input.address, output.address) {
            (None, Some(token_out)) => ExchangeRoute::NativeForToken { token_out },
            (Some(token_in), None) => ExchangeRoute::TokenForNative { token_in },
            (Some(token_in), Some(token_out)) => ExchangeRoute::TokenForToken {
                token_in,
                token_out,
            },
            (None, None) => return Err(Error::UnknownToken),
        };

        Ok(route)
    }

    /// The token the contract pulls from the wallet, if the input is not the native asset.
    pub fn token_in(&self) -> Option<Address> {
        match self {
            ExchangeRoute::NativeForToken { .. } => None,
            ExchangeRoute::TokenForNative { token_in }
            | ExchangeRoute::TokenForToken { token_in, .. } => Some(*token_in),
        }
    }

    fn transaction(&self, from: Address, amount: U256) -> TransactionRequest {
        let exchange = ITokenExchange(EXCHANGE_CONTRACT);
        match *self {
            ExchangeRoute::NativeForToken { token_out } => {
                exchange.exchange_eth_for_token(from, token_out, amount)
            }
            ExchangeRoute::TokenForNative { token_in } => {
                exchange.exchange_token_for_eth(from, token_in, amount)
            }
            ExchangeRoute::TokenForToken {
                token_in,
                token_out,
            } => exchange.exchange_tokens(from, token_in, token_out, amount),
        }
    }
}

/// A validated exchange, formed per submit and discarded once it settles.
#[derive(Debug, Clone, PartialEq)]
pub struct ExchangeRequest {
    pub input: Token,
    pub output: Token,
    /// Input amount in base units.
    pub amount: U256,
    /// Input amount as the user typed it.
    pub amount_text: String,
}

impl ExchangeRequest {
    pub fn new(input: &Token, output: &Token, amount: &str) -> Result<Self, Error> {
        if input.symbol == output.symbol {
            return Err(Error::SameToken);
        }

        let parsed = parse_token_amount(amount, input.decimals)?;
        if parsed.is_zero() {
            return Err(Error::InvalidAmount);
        }

        Ok(Self {
            input: input.clone(),
            output: output.clone(),
            amount: parsed,
            amount_text: amount.trim().to_string(),
        })
    }

    pub fn route(&self) -> Result<ExchangeRoute, Error> {
        ExchangeRoute::between(&self.input, &self.output)
    }

    /// An unknown balance counts as insufficient.
    pub fn check_balance(&self, balances: &Balances) -> Result<(), Error> {
        match balances.get(&self.input.symbol) {
            Some(balance) if self.amount <= balance => Ok(()),
            _ => Err(Error::InsufficientBalance(self.input.symbol.clone())),
        }
    }
}

/// Whether the submit control should be enabled.
pub fn can_submit(
    session: &WalletSession,
    balances: &Balances,
    input: &Token,
    amount: &str,
    pending: bool,
) -> bool {
    if pending || !session.is_connected() {
        return false;
    }

    let Ok(amount) = parse_token_amount(amount, input.decimals) else {
        return false;
    };

    !amount.is_zero()
        && balances
            .get(&input.symbol)
            .is_some_and(|balance| amount <= balance)
}

/// The largest amount the MAX control fills in. The native asset keeps back
/// [`NATIVE_GAS_RESERVE`] for gas.
pub fn max_input_amount(token: &Token, balance: U256) -> U256 {
    if token.is_native() {
        let reserve = parse_token_amount(NATIVE_GAS_RESERVE, token.decimals).unwrap_or_default();
        balance.saturating_sub(reserve)
    } else {
        balance
    }
}

async fn send_and_confirm<P: Eip1193Provider>(
    ethereum: &Ethereum<P>,
    transaction: &TransactionRequest,
) -> Result<B256, Error> {
    let hash = ethereum.send_transaction(transaction).await?;
    info!("submitted {hash}");

    let receipt = ethereum.wait_for_receipt(hash).await?;
    if !receipt.succeeded() {
        warn!("{hash} reverted");
        return Err(Error::Reverted(hash));
    }

    Ok(receipt.transaction_hash)
}

/// Approves exactly `amount` when the current allowance is lower, and waits for the approval
/// to be mined.
async fn approve_if_needed<P: Eip1193Provider>(
    ethereum: &Ethereum<P>,
    from: Address,
    token: Address,
    amount: U256,
) -> Result<(), Error> {
    let token = IErc20(token);
    let allowance = token.allowance(ethereum, from, EXCHANGE_CONTRACT).await?;
    debug!("allowance of {} for {EXCHANGE_CONTRACT}: {allowance}", *token);

    if allowance < amount {
        let approval = token.approve(from, EXCHANGE_CONTRACT, amount);
        let hash = send_and_confirm(ethereum, &approval).await?;
        info!("approval confirmed: {hash}");
    }

    Ok(())
}

/// Runs one exchange end to end and returns the record for the history list once the swap
/// is confirmed. An approval that succeeded before a failed swap is not undone.
pub async fn execute_exchange<P: Eip1193Provider>(
    ethereum: &Ethereum<P>,
    request: &ExchangeRequest,
    balances: &Balances,
) -> Result<TransactionRecord, Error> {
    ensure_network(ethereum).await?;

    let from = ethereum
        .accounts()
        .await?
        .first()
        .copied()
        .ok_or(Error::NotConnected)?;

    request.check_balance(balances)?;

    let route = request.route()?;
    debug!("{} -> {} via {route:?}", request.input, request.output);

    if let Some(token_in) = route.token_in() {
        approve_if_needed(ethereum, from, token_in, request.amount).await?;
    }

    let swap = route.transaction(from, request.amount);
    let hash = send_and_confirm(ethereum, &swap).await?;
    info!("Transaction confirmed: {hash}");

    Ok(TransactionRecord {
        hash,
        from: request.input.symbol.clone(),
        to: request.output.symbol.clone(),
        amount: request.amount_text.clone(),
    })
}
