use crate::constants::{EXPLORER_URL, HISTORY_LIMIT};
use alloy_primitives::B256;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// A confirmed exchange, as shown in the recent transactions list.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct TransactionRecord {
    pub hash: B256,
    pub from: String,
    pub to: String,
    pub amount: String,
}

impl TransactionRecord {
    pub fn explorer_url(&self) -> String {
        format!("{EXPLORER_URL}/tx/{}", self.hash)
    }
}

/// Recent exchanges, newest first, never more than [`HISTORY_LIMIT`] entries.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionHistory(VecDeque<TransactionRecord>);

impl TransactionHistory {
    pub fn push(&mut self, record: TransactionRecord) {
        self.0.push_front(record);
        self.0.truncate(HISTORY_LIMIT);
    }

    pub fn iter(&self) -> impl Iterator<Item = &TransactionRecord> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn to_vec(&self) -> Vec<TransactionRecord> {
        self.0.iter().cloned().collect()
    }
}
