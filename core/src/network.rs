use crate::{
    constants::{CHAIN_ID, SEPOLIA},
    Error,
};
use eip1193::{Eip1193Provider, Ethereum};
use tracing::{debug, info, warn};

/// Asks the wallet to switch to the required chain, registering it first if the wallet does
/// not know it.
pub async fn switch_network<P: Eip1193Provider>(ethereum: &Ethereum<P>) -> Result<(), Error> {
    match ethereum.switch_chain(CHAIN_ID).await {
        Ok(()) => {
            info!("switched to chain {CHAIN_ID}");
            Ok(())
        }
        Err(error) if error.is_unrecognized_chain() => {
            warn!("wallet does not know chain {CHAIN_ID}, adding it");
            ethereum.add_chain(&SEPOLIA).await.map_err(|error| {
                warn!("{error}");
                if error.is_user_rejection() {
                    Error::UserRejected
                } else {
                    Error::AddChainFailed
                }
            })?;
            ethereum.switch_chain(CHAIN_ID).await?;
            info!("added and switched to chain {CHAIN_ID}");
            Ok(())
        }
        Err(error) => {
            warn!("{error}");
            Err(error.into())
        }
    }
}

/// Succeeds once the wallet reports the required chain. A mismatch triggers one switch
/// request; any failure along the way is [`Error::WrongNetwork`].
pub async fn ensure_network<P: Eip1193Provider>(ethereum: &Ethereum<P>) -> Result<(), Error> {
    let chain_id = ethereum.chain_id().await?;
    if chain_id == CHAIN_ID {
        return Ok(());
    }

    debug!("wallet is on chain {chain_id}, expected {CHAIN_ID}");
    if let Err(error) = switch_network(ethereum).await {
        warn!("network switch failed: {error}");
        return Err(Error::WrongNetwork);
    }

    match ethereum.chain_id().await? {
        CHAIN_ID => Ok(()),
        other => {
            warn!("wallet still reports chain {other}");
            Err(Error::WrongNetwork)
        }
    }
}
