use crate::{
    constants::{native_token, TOKENS},
    types::Token,
};

/// The input and output sides of the exchange form. The two sides never hold the same token.
#[derive(Debug, Clone, PartialEq)]
pub struct TokenPair {
    input: Token,
    output: Token,
}

impl TokenPair {
    /// Returns `None` when both sides are the same token.
    pub fn new(input: Token, output: Token) -> Option<Self> {
        (input.symbol != output.symbol).then_some(Self { input, output })
    }

    pub fn input(&self) -> &Token {
        &self.input
    }

    pub fn output(&self) -> &Token {
        &self.output
    }

    /// Picking the token already on the other side swaps the two sides.
    pub fn select_input(&mut self, token: Token) {
        if token.symbol == self.output.symbol {
            self.flip();
        } else {
            self.input = token;
        }
    }

    /// Picking the token already on the other side swaps the two sides.
    pub fn select_output(&mut self, token: Token) {
        if token.symbol == self.input.symbol {
            self.flip();
        } else {
            self.output = token;
        }
    }

    pub fn flip(&mut self) {
        std::mem::swap(&mut self.input, &mut self.output);
    }
}

impl Default for TokenPair {
    /// Native asset in, volatile token out.
    fn default() -> Self {
        let input = native_token().clone();
        let output = TOKENS
            .iter()
            .find(|token| token.is_volatile())
            .or_else(|| TOKENS.iter().find(|token| !token.is_native()))
            .cloned()
            .expect("token list needs at least two tokens");
        Self { input, output }
    }
}
