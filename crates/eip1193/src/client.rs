use crate::{
    injected::sleep, AddEthereumChainParameter, Eip1193Provider, Error, TransactionReceipt,
    TransactionRequest,
};
use alloy_primitives::{Address, Bytes, B256, U256, U64};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::json;
use tracing::{debug, trace};

pub const RECEIPT_POLL_INTERVAL_MS: i32 = 1_000;

/// Formats a chain id the way wallet methods expect it (`0x` prefixed, lowercase hex).
pub fn hex_chain_id(chain_id: u64) -> String {
    format!("{chain_id:#x}")
}

/// Typed access to the JSON-RPC and wallet methods of an EIP-1193 provider.
#[derive(Debug, Clone)]
pub struct Ethereum<P> {
    provider: P,
}

impl<P: Eip1193Provider> Ethereum<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub async fn request<R: DeserializeOwned>(
        &self,
        method: &str,
        params: impl Serialize,
    ) -> Result<R, Error> {
        let params = serde_json::to_value(params)?;
        let response = self.provider.request(method, params).await?;
        trace!("{method} -> {response}");
        Ok(serde_json::from_value(response)?)
    }

    /// Prompts the user to connect if the site is not yet authorized.
    pub async fn request_accounts(&self) -> Result<Vec<Address>, Error> {
        self.request("eth_requestAccounts", json!([])).await
    }

    /// Returns the authorized accounts without prompting.
    pub async fn accounts(&self) -> Result<Vec<Address>, Error> {
        self.request("eth_accounts", json!([])).await
    }

    pub async fn chain_id(&self) -> Result<u64, Error> {
        self.request::<U64>("eth_chainId", json!([]))
            .await
            .map(|chain_id| chain_id.to::<u64>())
    }

    pub async fn switch_chain(&self, chain_id: u64) -> Result<(), Error> {
        debug!("requesting switch to chain {chain_id}");
        self.request::<serde_json::Value>(
            "wallet_switchEthereumChain",
            json!([{ "chainId": hex_chain_id(chain_id) }]),
        )
        .await
        .map(|_| ())
    }

    pub async fn add_chain(&self, chain: &AddEthereumChainParameter) -> Result<(), Error> {
        debug!("requesting wallet add {}", chain.chain_name);
        self.request::<serde_json::Value>("wallet_addEthereumChain", json!([chain]))
            .await
            .map(|_| ())
    }

    pub async fn get_balance(&self, address: Address) -> Result<U256, Error> {
        self.request("eth_getBalance", json!([address, "latest"]))
            .await
    }

    pub async fn call(&self, to: Address, data: impl Into<Bytes>) -> Result<Bytes, Error> {
        let data: Bytes = data.into();
        self.request("eth_call", json!([{ "to": to, "data": data }, "latest"]))
            .await
    }

    /// Hands the transaction to the wallet for signing and broadcast.
    pub async fn send_transaction(&self, transaction: &TransactionRequest) -> Result<B256, Error> {
        debug!("{transaction:?}");
        self.request("eth_sendTransaction", json!([transaction]))
            .await
    }

    pub async fn transaction_receipt(
        &self,
        hash: B256,
    ) -> Result<Option<TransactionReceipt>, Error> {
        self.request("eth_getTransactionReceipt", json!([hash]))
            .await
    }

    /// Polls until the transaction is mined. There is no timeout.
    pub async fn wait_for_receipt(&self, hash: B256) -> Result<TransactionReceipt, Error> {
        loop {
            if let Some(receipt) = self.transaction_receipt(hash).await? {
                debug!("{hash} mined in block {:?}", receipt.block_number);
                return Ok(receipt);
            }
            sleep(RECEIPT_POLL_INTERVAL_MS).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use futures::executor::block_on;
    use serde_json::Value;
    use std::cell::RefCell;

    #[derive(Default)]
    struct Recorder {
        requests: RefCell<Vec<(String, Value)>>,
    }

    #[async_trait(?Send)]
    impl Eip1193Provider for Recorder {
        async fn request(&self, method: &str, params: Value) -> Result<Value, Error> {
            self.requests
                .borrow_mut()
                .push((method.to_string(), params.clone()));
            match method {
                "eth_chainId" => Ok(json!("0xaa36a7")),
                "eth_getBalance" => Ok(json!("0xde0b6b3a7640000")),
                "wallet_switchEthereumChain" => Ok(Value::Null),
                "eth_getTransactionReceipt" => Ok(json!({
                    "transactionHash": params[0],
                    "blockNumber": "0x1",
                    "status": "0x1",
                })),
                _ => Err(Error::Rpc {
                    code: -32601,
                    message: format!("{method} not supported"),
                }),
            }
        }
    }

    #[test]
    fn chain_id_is_parsed_from_hex() {
        let ethereum = Ethereum::new(Recorder::default());
        assert_eq!(block_on(ethereum.chain_id()), Ok(11_155_111));
    }

    #[test]
    fn switch_chain_sends_hex_chain_id() {
        let ethereum = Ethereum::new(Recorder::default());
        block_on(ethereum.switch_chain(11_155_111)).unwrap();

        let requests = ethereum.provider().requests.borrow();
        assert_eq!(requests[0].0, "wallet_switchEthereumChain");
        assert_eq!(requests[0].1, json!([{ "chainId": "0xaa36a7" }]));
    }

    #[test]
    fn balance_is_decoded_as_quantity() {
        let ethereum = Ethereum::new(Recorder::default());
        let balance = block_on(ethereum.get_balance(Address::ZERO)).unwrap();
        assert_eq!(balance, U256::from(1_000_000_000_000_000_000u128));
    }

    #[test]
    fn receipt_is_returned_once_available() {
        let ethereum = Ethereum::new(Recorder::default());
        let hash = B256::repeat_byte(0x42);
        let receipt = block_on(ethereum.wait_for_receipt(hash)).unwrap();
        assert_eq!(receipt.transaction_hash, hash);
        assert!(receipt.succeeded());
    }

    #[test]
    fn rpc_errors_propagate() {
        let ethereum = Ethereum::new(Recorder::default());
        let error = block_on(ethereum.accounts()).unwrap_err();
        assert_eq!(error.code(), Some(-32601));
    }

    #[test]
    fn hex_chain_id_is_lowercase() {
        assert_eq!(hex_chain_id(11_155_111), "0xaa36a7");
        assert_eq!(hex_chain_id(1), "0x1");
    }
}
