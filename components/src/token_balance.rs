use gpex_core::{types::Token, utils::format_token_amount, WalletSignals};
use leptos::prelude::*;

/// Shows the last known balance of `token`, or zero while disconnected.
#[component]
pub fn TokenBalance(#[prop(into)] token: Signal<Token>) -> impl IntoView {
    let wallet = use_context::<WalletSignals>().expect("wallet signals context missing!");

    let amount = move || {
        let token = token.get();
        let balance = wallet
            .balances
            .with(|balances| balances.get(&token.symbol))
            .unwrap_or_default();
        format!(
            "{} {}",
            format_token_amount(balance, token.decimals, 4),
            token.symbol
        )
    };

    view! {
        <div class="py-0 px-2 text-sm text-muted-foreground cursor-default">
            <span>"Balance: "</span>
            <span class="text-foreground font-medium">{amount}</span>
        </div>
    }
}
