use crate::{constants::CHAIN_ID, types::TransactionHistory};
use alloy_primitives::{Address, U256};
use eip1193::{Ethereum, Injected};
use leptos::prelude::*;
use std::{collections::HashMap, ops::Deref};
use tracing::debug;

/// The connected account and the chain the wallet last reported.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WalletSession {
    pub account: Option<Address>,
    pub chain_id: Option<u64>,
}

impl WalletSession {
    pub fn connected(account: Address, chain_id: u64) -> Self {
        Self {
            account: Some(account),
            chain_id: Some(chain_id),
        }
    }

    pub fn is_connected(&self) -> bool {
        self.account.is_some()
    }

    pub fn is_correct_chain(&self) -> bool {
        self.chain_id == Some(CHAIN_ID)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NetworkStatus {
    Disconnected,
    WrongChain,
    CorrectChain,
    Switching,
}

impl NetworkStatus {
    pub fn of(session: &WalletSession, switching: bool) -> Self {
        if !session.is_connected() {
            NetworkStatus::Disconnected
        } else if switching {
            NetworkStatus::Switching
        } else if session.is_correct_chain() {
            NetworkStatus::CorrectChain
        } else {
            NetworkStatus::WrongChain
        }
    }
}

/// Last known balance of each token, keyed by symbol, in base units.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Balances(HashMap<String, U256>);

impl Balances {
    pub fn get(&self, symbol: &str) -> Option<U256> {
        self.0.get(symbol).copied()
    }

    pub fn insert(&mut self, symbol: impl Into<String>, amount: U256) {
        self.0.insert(symbol.into(), amount);
    }
}

impl Deref for Balances {
    type Target = HashMap<String, U256>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromIterator<(String, U256)> for Balances {
    fn from_iter<I: IntoIterator<Item = (String, U256)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Shared wallet state. Each field is written only by the flow that owns it.
#[derive(Copy, Clone)]
pub struct WalletSignals {
    pub session: RwSignal<WalletSession>,
    pub switching: RwSignal<bool>,
    pub balances: RwSignal<Balances>,
    pub history: RwSignal<TransactionHistory>,
}

impl WalletSignals {
    pub fn new() -> Self {
        Self {
            session: RwSignal::new(WalletSession::default()),
            switching: RwSignal::new(false),
            balances: RwSignal::new(Balances::default()),
            history: RwSignal::new(TransactionHistory::default()),
        }
    }

    pub fn status(&self) -> NetworkStatus {
        NetworkStatus::of(&self.session.get(), self.switching.get())
    }

    pub fn account(&self) -> Option<Address> {
        self.session.with(|session| session.account)
    }

    /// Starts or refreshes a session. Balances belong to an account, so a different account
    /// starts from an empty set.
    pub fn open(&self, session: WalletSession) {
        let previous = self.session.get_untracked();
        if previous.account != session.account {
            self.balances.set(Balances::default());
        }
        self.session.set(session);
    }

    /// Replaces the account of an open session. Does nothing while disconnected.
    pub fn switch_account(&self, account: Address) {
        let session = self.session.get_untracked();
        if session.is_connected() {
            self.open(WalletSession {
                account: Some(account),
                ..session
            });
        }
    }

    /// Stores balances read for `session`. A result for a session that has since changed is
    /// dropped and `false` is returned.
    pub fn apply_balances(&self, session: WalletSession, balances: Balances) -> bool {
        if self.session.get_untracked() != session {
            debug!("dropping balances read for {:?}", session.account);
            return false;
        }
        self.balances.set(balances);
        true
    }

    /// Ends the session. History is kept for the rest of the page session.
    pub fn disconnect(&self) {
        debug!("clearing wallet session");
        self.session.set(WalletSession::default());
        self.balances.set(Balances::default());
    }
}

impl Default for WalletSignals {
    fn default() -> Self {
        Self::new()
    }
}

/// The injected wallet, if the browser has one.
#[derive(Clone, Debug)]
pub struct WalletProvider(pub Option<Ethereum<Injected>>);

impl WalletProvider {
    pub fn detect() -> Self {
        Self(Injected::detect().ok().map(Ethereum::new))
    }
}

impl Deref for WalletProvider {
    type Target = Option<Ethereum<Injected>>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
