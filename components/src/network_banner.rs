use gpex_core::{constants::CHAIN_NAME, Error, NetworkStatus, WalletSignals};
use leptos::prelude::*;

#[component]
pub fn NetworkBanner(#[prop(into)] on_switch: Callback<()>) -> impl IntoView {
    let wallet = use_context::<WalletSignals>().expect("wallet signals context missing!");

    let message = move || match wallet.status() {
        NetworkStatus::Switching => format!("Waiting for the wallet to switch to {CHAIN_NAME}..."),
        _ => Error::WrongNetwork.to_string(),
    };

    view! {
        <Show when=move || {
            matches!(wallet.status(), NetworkStatus::WrongChain | NetworkStatus::Switching)
        }>
            <div class="flex items-center justify-between gap-4 px-4 py-2 bg-gold/20 text-sm border-b">
                <div class="font-medium">{message}</div>
                <button
                    class="py-1 px-3 bg-secondary text-secondary-foreground rounded-md text-sm"
                    disabled=move || wallet.switching.get()
                    on:click=move |_| on_switch.run(())
                >
                    {format!("Switch to {CHAIN_NAME}")}
                </button>
            </div>
        </Show>
    }
}
