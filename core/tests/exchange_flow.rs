use alloy_primitives::{Address, B256, U256};
use async_trait::async_trait;
use eip1193::{Eip1193Provider, Error as ProviderError, Ethereum};
use futures::executor::block_on;
use gpex_core::{
    exchange::{execute_exchange, ExchangeRequest},
    get_token,
    network::{ensure_network, switch_network},
    wallet::{connect, load_balances},
    Balances, Error, CHAIN_ID, EXCHANGE_CONTRACT,
};
use serde_json::{json, Value};
use std::cell::{Cell, RefCell};

const ACCOUNT: Address = Address::repeat_byte(0xa1);
const ONE_ETHER: u128 = 1_000_000_000_000_000_000;

const APPROVE_SELECTOR: &str = "0x095ea7b3";
const ALLOWANCE_SELECTOR: &str = "0xdd62ed3e";
const BALANCE_OF_SELECTOR: &str = "0x70a08231";

/// A wallet that answers from a script and records every request it sees.
struct ScriptedWallet {
    chain_id: Cell<u64>,
    accounts: Vec<Address>,
    known_chains: RefCell<Vec<u64>>,
    add_chain_error: Option<i64>,
    reject_switch: bool,
    reject_send: bool,
    revert_swaps: bool,
    allowance: U256,
    token_balance: Option<U256>,
    sent: Cell<u8>,
    requests: RefCell<Vec<(String, Value)>>,
}

impl Default for ScriptedWallet {
    fn default() -> Self {
        Self {
            chain_id: Cell::new(CHAIN_ID),
            accounts: vec![ACCOUNT],
            known_chains: RefCell::new(vec![1, CHAIN_ID]),
            add_chain_error: None,
            reject_switch: false,
            reject_send: false,
            revert_swaps: false,
            allowance: U256::ZERO,
            token_balance: Some(U256::from(100 * ONE_ETHER)),
            sent: Cell::new(0),
            requests: RefCell::new(Vec::new()),
        }
    }
}

fn rpc_error(code: i64, message: &str) -> ProviderError {
    ProviderError::Rpc {
        code,
        message: message.to_string(),
    }
}

fn word(value: U256) -> Value {
    json!(B256::from(value.to_be_bytes::<32>()))
}

#[async_trait(?Send)]
impl Eip1193Provider for ScriptedWallet {
    async fn request(&self, method: &str, params: Value) -> Result<Value, ProviderError> {
        self.requests
            .borrow_mut()
            .push((method.to_string(), params.clone()));

        match method {
            "eth_accounts" | "eth_requestAccounts" => Ok(json!(self.accounts)),
            "eth_chainId" => Ok(json!(format!("{:#x}", self.chain_id.get()))),
            "wallet_switchEthereumChain" => {
                if self.reject_switch {
                    return Err(rpc_error(4001, "User rejected the request."));
                }
                if !self.known_chains.borrow().contains(&CHAIN_ID) {
                    return Err(rpc_error(4902, "Unrecognized chain ID \"0xaa36a7\"."));
                }
                self.chain_id.set(CHAIN_ID);
                Ok(Value::Null)
            }
            "wallet_addEthereumChain" => {
                if let Some(code) = self.add_chain_error {
                    return Err(rpc_error(code, "Could not add chain"));
                }
                self.known_chains.borrow_mut().push(CHAIN_ID);
                Ok(Value::Null)
            }
            "eth_getBalance" => Ok(json!(U256::from(2 * ONE_ETHER))),
            "eth_call" => {
                let data = params[0]["data"].as_str().unwrap_or_default();
                if data.starts_with(ALLOWANCE_SELECTOR) {
                    Ok(word(self.allowance))
                } else if data.starts_with(BALANCE_OF_SELECTOR) {
                    self.token_balance
                        .map(word)
                        .ok_or_else(|| rpc_error(-32000, "execution reverted"))
                } else {
                    Err(rpc_error(-32000, "unknown call"))
                }
            }
            "eth_sendTransaction" => {
                if self.reject_send {
                    return Err(rpc_error(
                        4001,
                        "MetaMask Tx Signature: User denied transaction signature.",
                    ));
                }
                self.sent.set(self.sent.get() + 1);
                Ok(json!(B256::repeat_byte(self.sent.get())))
            }
            "eth_getTransactionReceipt" => {
                let approval = self
                    .sends()
                    .iter()
                    .zip(1u8..)
                    .any(|(tx, n)| json!(B256::repeat_byte(n)) == params[0] && is_approval(tx));
                let status = if self.revert_swaps && !approval {
                    "0x0"
                } else {
                    "0x1"
                };
                Ok(json!({
                    "transactionHash": params[0],
                    "blockNumber": "0x10",
                    "status": status,
                }))
            }
            _ => Err(rpc_error(-32601, "method not found")),
        }
    }
}

impl ScriptedWallet {
    fn methods(&self) -> Vec<String> {
        self.requests
            .borrow()
            .iter()
            .map(|(method, _)| method.clone())
            .collect()
    }

    fn position(&self, method: &str) -> Option<usize> {
        self.methods().iter().position(|m| m == method)
    }

    /// Transaction objects passed to `eth_sendTransaction`, in order.
    fn sends(&self) -> Vec<Value> {
        self.requests
            .borrow()
            .iter()
            .filter(|(method, _)| method == "eth_sendTransaction")
            .map(|(_, params)| params[0].clone())
            .collect()
    }
}

fn is_approval(tx: &Value) -> bool {
    tx["data"]
        .as_str()
        .is_some_and(|data| data.starts_with(APPROVE_SELECTOR))
}

fn to_address(tx: &Value) -> Address {
    serde_json::from_value(tx["to"].clone()).unwrap()
}

fn request(input: &str, output: &str, amount: &str) -> ExchangeRequest {
    ExchangeRequest::new(
        get_token(input).unwrap(),
        get_token(output).unwrap(),
        amount,
    )
    .unwrap()
}

fn balances(symbol: &str, amount: u128) -> Balances {
    [(symbol.to_string(), U256::from(amount))]
        .into_iter()
        .collect()
}

#[test]
fn native_input_sends_a_single_value_call() {
    let ethereum = Ethereum::new(ScriptedWallet::default());
    let request = request("ETH", "gKIP", "1");

    let record = block_on(execute_exchange(&ethereum, &request, &balances("ETH", 2 * ONE_ETHER)))
        .unwrap();

    let wallet = ethereum.provider();
    let sends = wallet.sends();
    assert_eq!(sends.len(), 1);
    assert_eq!(to_address(&sends[0]), EXCHANGE_CONTRACT);
    assert_eq!(sends[0]["value"], json!(U256::from(ONE_ETHER)));
    assert_eq!(sends[0]["gas"], json!("0x493e0"));
    assert!(!wallet.methods().contains(&"eth_call".to_string()));

    assert_eq!(record.hash, B256::repeat_byte(1));
    assert_eq!((record.from.as_str(), record.to.as_str()), ("ETH", "gKIP"));
    assert_eq!(record.amount, "1");
}

#[test]
fn low_allowance_is_approved_and_confirmed_before_the_swap() {
    let ethereum = Ethereum::new(ScriptedWallet {
        allowance: U256::from(10 * ONE_ETHER),
        ..Default::default()
    });
    let request = request("gUSDC", "ETH", "50");
    let gusdc = get_token("gUSDC").unwrap().address.unwrap();

    let record = block_on(execute_exchange(&ethereum, &request, &balances("gUSDC", 100 * ONE_ETHER)))
        .unwrap();

    let wallet = ethereum.provider();
    let sends = wallet.sends();
    assert_eq!(sends.len(), 2);
    assert!(is_approval(&sends[0]));
    assert_eq!(to_address(&sends[0]), gusdc);
    assert!(sends[0].get("gas").is_none());
    assert!(!is_approval(&sends[1]));
    assert_eq!(to_address(&sends[1]), EXCHANGE_CONTRACT);
    assert!(sends[1].get("value").is_none());

    // The approval receipt is awaited between the two submissions.
    let methods = wallet.methods();
    let send_positions: Vec<_> = methods
        .iter()
        .enumerate()
        .filter(|(_, m)| *m == "eth_sendTransaction")
        .map(|(i, _)| i)
        .collect();
    assert!(methods[send_positions[0]..send_positions[1]]
        .contains(&"eth_getTransactionReceipt".to_string()));

    assert_eq!(record.hash, B256::repeat_byte(2));
}

#[test]
fn sufficient_allowance_skips_the_approval() {
    let ethereum = Ethereum::new(ScriptedWallet {
        allowance: U256::MAX,
        ..Default::default()
    });
    let request = request("gUSDT", "gKIP", "5");

    block_on(execute_exchange(&ethereum, &request, &balances("gUSDT", 5 * ONE_ETHER))).unwrap();

    let sends = ethereum.provider().sends();
    assert_eq!(sends.len(), 1);
    assert!(!is_approval(&sends[0]));
    // selector + two addresses + uint256
    assert_eq!(sends[0]["data"].as_str().unwrap().len(), 2 + 2 * (4 + 3 * 32));
}

#[test]
fn wrong_chain_is_switched_before_any_transaction() {
    let ethereum = Ethereum::new(ScriptedWallet {
        chain_id: Cell::new(1),
        ..Default::default()
    });
    let request = request("ETH", "gUSDC", "0.5");

    block_on(execute_exchange(&ethereum, &request, &balances("ETH", ONE_ETHER))).unwrap();

    let wallet = ethereum.provider();
    let switch = wallet.position("wallet_switchEthereumChain").unwrap();
    let send = wallet.position("eth_sendTransaction").unwrap();
    assert!(switch < send);
}

#[test]
fn rejected_switch_blocks_the_exchange() {
    let ethereum = Ethereum::new(ScriptedWallet {
        chain_id: Cell::new(1),
        reject_switch: true,
        ..Default::default()
    });
    let request = request("ETH", "gKIP", "1");

    let result = block_on(execute_exchange(&ethereum, &request, &balances("ETH", ONE_ETHER)));

    assert_eq!(result, Err(Error::WrongNetwork));
    assert_eq!(
        result.unwrap_err().to_string(),
        "Please switch to the Sepolia network to proceed."
    );
    assert!(ethereum.provider().sends().is_empty());
}

#[test]
fn unknown_chain_is_added_then_switched() {
    let ethereum = Ethereum::new(ScriptedWallet {
        chain_id: Cell::new(1),
        known_chains: RefCell::new(vec![1]),
        ..Default::default()
    });

    block_on(switch_network(&ethereum)).unwrap();

    let wallet = ethereum.provider();
    assert_eq!(
        wallet.methods(),
        [
            "wallet_switchEthereumChain",
            "wallet_addEthereumChain",
            "wallet_switchEthereumChain"
        ]
    );
    let requests = wallet.requests.borrow();
    assert_eq!(requests[1].1[0]["chainId"], json!("0xaa36a7"));
    assert_eq!(requests[1].1[0]["nativeCurrency"]["symbol"], json!("SEP"));
    assert_eq!(wallet.chain_id.get(), CHAIN_ID);
}

#[test]
fn rejected_chain_registration_is_not_retried() {
    let ethereum = Ethereum::new(ScriptedWallet {
        chain_id: Cell::new(1),
        known_chains: RefCell::new(vec![1]),
        add_chain_error: Some(4001),
        ..Default::default()
    });

    assert_eq!(block_on(switch_network(&ethereum)), Err(Error::UserRejected));
    assert_eq!(
        ethereum.provider().methods(),
        ["wallet_switchEthereumChain", "wallet_addEthereumChain"]
    );
}

#[test]
fn failed_chain_registration_is_reported() {
    let ethereum = Ethereum::new(ScriptedWallet {
        chain_id: Cell::new(1),
        known_chains: RefCell::new(vec![1]),
        add_chain_error: Some(-32603),
        ..Default::default()
    });

    let result = block_on(switch_network(&ethereum));

    assert_eq!(result, Err(Error::AddChainFailed));
    assert_eq!(result.unwrap_err().to_string(), "Failed to add Sepolia network");
    assert_eq!(
        ethereum.provider().methods(),
        ["wallet_switchEthereumChain", "wallet_addEthereumChain"]
    );
    assert_eq!(ethereum.provider().chain_id.get(), 1);
}

#[test]
fn failed_chain_registration_blocks_the_exchange() {
    let ethereum = Ethereum::new(ScriptedWallet {
        chain_id: Cell::new(1),
        known_chains: RefCell::new(vec![1]),
        add_chain_error: Some(-32603),
        ..Default::default()
    });
    let request = request("ETH", "gKIP", "1");

    let result = block_on(execute_exchange(&ethereum, &request, &balances("ETH", ONE_ETHER)));

    assert_eq!(result, Err(Error::WrongNetwork));
    assert!(ethereum.provider().sends().is_empty());
}

#[test]
fn exchange_without_accounts_is_not_connected() {
    let ethereum = Ethereum::new(ScriptedWallet {
        accounts: Vec::new(),
        ..Default::default()
    });
    let request = request("gUSDC", "ETH", "50");

    let result = block_on(execute_exchange(&ethereum, &request, &balances("gUSDC", 100 * ONE_ETHER)));

    assert_eq!(result, Err(Error::NotConnected));
    let wallet = ethereum.provider();
    assert!(wallet.sends().is_empty());
    assert_eq!(wallet.position("eth_call"), None);
}

#[test]
fn connect_without_accounts_is_not_connected() {
    let ethereum = Ethereum::new(ScriptedWallet {
        accounts: Vec::new(),
        ..Default::default()
    });
    assert_eq!(block_on(connect(&ethereum, true)), Err(Error::NotConnected));
}

#[test]
fn correct_chain_needs_no_switch() {
    let ethereum = Ethereum::new(ScriptedWallet::default());
    block_on(ensure_network(&ethereum)).unwrap();
    assert_eq!(ethereum.provider().methods(), ["eth_chainId"]);
}

#[test]
fn insufficient_balance_sends_nothing() {
    let ethereum = Ethereum::new(ScriptedWallet::default());
    let request = request("gKIP", "ETH", "10");

    let result = block_on(execute_exchange(&ethereum, &request, &balances("gKIP", ONE_ETHER)));

    assert_eq!(result, Err(Error::InsufficientBalance("gKIP".to_string())));
    assert!(ethereum.provider().sends().is_empty());
}

#[test]
fn rejected_signature_is_classified() {
    let ethereum = Ethereum::new(ScriptedWallet {
        reject_send: true,
        ..Default::default()
    });
    let request = request("ETH", "gKIP", "1");

    let result = block_on(execute_exchange(&ethereum, &request, &balances("ETH", ONE_ETHER)));

    assert_eq!(result, Err(Error::UserRejected));
}

#[test]
fn reverted_swap_is_an_error() {
    let ethereum = Ethereum::new(ScriptedWallet {
        revert_swaps: true,
        ..Default::default()
    });
    let request = request("gUSDC", "gKIP", "1");

    let result = block_on(execute_exchange(&ethereum, &request, &balances("gUSDC", ONE_ETHER)));

    // The approval went through and stays on chain.
    let sends = ethereum.provider().sends();
    assert_eq!(sends.len(), 2);
    assert!(is_approval(&sends[0]));
    assert_eq!(result, Err(Error::Reverted(B256::repeat_byte(2))));
}

#[test]
fn eager_connect_does_not_prompt() {
    let ethereum = Ethereum::new(ScriptedWallet::default());

    let session = block_on(connect(&ethereum, true)).unwrap();

    assert_eq!(session.account, Some(ACCOUNT));
    assert!(session.is_correct_chain());
    assert!(!ethereum
        .provider()
        .methods()
        .contains(&"eth_requestAccounts".to_string()));
}

#[test]
fn balances_cover_every_token() {
    let ethereum = Ethereum::new(ScriptedWallet::default());

    let balances = block_on(load_balances(&ethereum, ACCOUNT));

    assert_eq!(balances.get("ETH"), Some(U256::from(2 * ONE_ETHER)));
    for symbol in ["gUSDC", "gUSDT", "gKIP"] {
        assert_eq!(balances.get(symbol), Some(U256::from(100 * ONE_ETHER)));
    }
}

#[test]
fn failed_balance_queries_read_as_zero() {
    let ethereum = Ethereum::new(ScriptedWallet {
        token_balance: None,
        ..Default::default()
    });

    let balances = block_on(load_balances(&ethereum, ACCOUNT));

    assert_eq!(balances.get("ETH"), Some(U256::from(2 * ONE_ETHER)));
    assert_eq!(balances.get("gKIP"), Some(U256::ZERO));
}
