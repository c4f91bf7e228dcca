use crate::{constants::SWAP_GAS_LIMIT, Error};
use alloy_primitives::{Address, Bytes, U256};
use alloy_sol_types::SolCall;
use eip1193::{Eip1193Provider, Ethereum, TransactionRequest};
use std::ops::Deref;

mod abi {
    alloy_sol_types::sol! {
        interface IERC20 {
            function balanceOf(address owner) external view returns (uint256 balance);
            function allowance(address owner, address spender) external view returns (uint256 remaining);
            function approve(address spender, uint256 value) external returns (bool);
        }

        interface ITokenExchange {
            function exchangeETHForToken(address tokenOut) external payable;
            function exchangeTokens(address tokenIn, address tokenOut, uint256 amountIn) external;
            function exchangeTokenForETH(address tokenIn, uint256 amountIn) external;
        }
    }
}

/// Reads a single `uint256` return value.
pub fn decode_uint256(data: &[u8]) -> Result<U256, Error> {
    data.get(..32)
        .and_then(U256::try_from_be_slice)
        .ok_or_else(|| {
            Error::transaction(format!(
                "malformed uint256 return data: {}",
                Bytes::copy_from_slice(data)
            ))
        })
}

/// An ERC-20 token contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IErc20(pub Address);

impl Deref for IErc20 {
    type Target = Address;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl IErc20 {
    pub async fn balance_of<P: Eip1193Provider>(
        &self,
        ethereum: &Ethereum<P>,
        owner: Address,
    ) -> Result<U256, Error> {
        let data = abi::IERC20::balanceOfCall { owner }.abi_encode();
        let output = ethereum.call(self.0, data).await?;
        decode_uint256(&output)
    }

    pub async fn allowance<P: Eip1193Provider>(
        &self,
        ethereum: &Ethereum<P>,
        owner: Address,
        spender: Address,
    ) -> Result<U256, Error> {
        let data = abi::IERC20::allowanceCall { owner, spender }.abi_encode();
        let output = ethereum.call(self.0, data).await?;
        decode_uint256(&output)
    }

    /// The wallet estimates gas for approvals.
    pub fn approve(&self, from: Address, spender: Address, value: U256) -> TransactionRequest {
        let data = abi::IERC20::approveCall { spender, value }.abi_encode();
        TransactionRequest::new(from, self.0).data(data)
    }
}

/// The exchange contract. Every call carries [`SWAP_GAS_LIMIT`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ITokenExchange(pub Address);

impl Deref for ITokenExchange {
    type Target = Address;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl ITokenExchange {
    pub fn exchange_eth_for_token(
        &self,
        from: Address,
        token_out: Address,
        value: U256,
    ) -> TransactionRequest {
        let data = abi::ITokenExchange::exchangeETHForTokenCall {
            tokenOut: token_out,
        }
        .abi_encode();
        TransactionRequest::new(from, self.0)
            .value(value)
            .data(data)
            .gas(SWAP_GAS_LIMIT)
    }

    pub fn exchange_tokens(
        &self,
        from: Address,
        token_in: Address,
        token_out: Address,
        amount_in: U256,
    ) -> TransactionRequest {
        let data = abi::ITokenExchange::exchangeTokensCall {
            tokenIn: token_in,
            tokenOut: token_out,
            amountIn: amount_in,
        }
        .abi_encode();
        TransactionRequest::new(from, self.0)
            .data(data)
            .gas(SWAP_GAS_LIMIT)
    }

    pub fn exchange_token_for_eth(
        &self,
        from: Address,
        token_in: Address,
        amount_in: U256,
    ) -> TransactionRequest {
        let data = abi::ITokenExchange::exchangeTokenForETHCall {
            tokenIn: token_in,
            amountIn: amount_in,
        }
        .abi_encode();
        TransactionRequest::new(from, self.0)
            .data(data)
            .gas(SWAP_GAS_LIMIT)
    }
}
