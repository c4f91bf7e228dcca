use crate::{constants::TOKENS, state::Balances, state::WalletSession, support::IErc20, Error};
use alloy_primitives::{Address, U256};
use eip1193::{Eip1193Provider, Ethereum};
use tracing::{debug, error};

/// Opens a session with the wallet's first account. With `eager` set the wallet is only asked
/// for accounts it has already authorized, so no prompt is shown.
pub async fn connect<P: Eip1193Provider>(
    ethereum: &Ethereum<P>,
    eager: bool,
) -> Result<WalletSession, Error> {
    let accounts = if eager {
        ethereum.accounts().await?
    } else {
        ethereum.request_accounts().await?
    };

    let account = accounts.first().copied().ok_or(Error::NotConnected)?;
    let chain_id = ethereum.chain_id().await?;
    debug!("connected {account} on chain {chain_id}");

    Ok(WalletSession::connected(account, chain_id))
}

/// Fetches every listed token's balance. A token whose query fails reads as zero.
pub async fn load_balances<P: Eip1193Provider>(ethereum: &Ethereum<P>, account: Address) -> Balances {
    let mut balances = Balances::default();

    for token in TOKENS.iter() {
        let balance = match token.address {
            None => ethereum.get_balance(account).await.map_err(Error::from),
            Some(address) => IErc20(address).balance_of(ethereum, account).await,
        };

        let balance = balance.unwrap_or_else(|e| {
            error!("Error fetching balance for {}: {e}", token.symbol);
            U256::ZERO
        });
        balances.insert(token.symbol.clone(), balance);
    }

    balances
}
