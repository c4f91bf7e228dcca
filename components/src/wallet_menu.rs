use crate::TransactionHistory;
use gpex_core::{
    constants::{EXPLORER_URL, TOKENS},
    utils::{format_token_amount, shorten_address},
    WalletSignals,
};
use leptos::{html, prelude::*};
use lucide_leptos::{ArrowLeft, ChevronRight, History, Power, Wallet};
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuContents {
    Main,
    Activity,
}

#[component]
pub fn WalletMenu(
    dialog_ref: NodeRef<html::Dialog>,
    #[prop(into)] on_disconnect: Callback<()>,
) -> impl IntoView {
    info!("rendering <WalletMenu/>");

    let (contents, set_contents) = signal(MenuContents::Main);

    let wallet = use_context::<WalletSignals>().expect("wallet signals context missing!");

    let address = move || wallet.account().map(shorten_address);
    let address_url = move || {
        wallet
            .account()
            .map(|account| format!("{EXPLORER_URL}/address/{account}"))
    };

    let disconnect = move |_| {
        if let Some(dialog) = dialog_ref.get() {
            dialog.close();
        }
        on_disconnect.run(());
    };

    view! {
        <dialog
            node_ref=dialog_ref
            class="z-50 mr-0 mt-2 px-0 py-3 w-80 shadow-md bg-popover text-popover-foreground rounded-lg border border-solid border-border"
        >
            <Show when=move || contents.get() == MenuContents::Activity>
                <div class="flex items-center px-2 pb-3">
                    <div
                        on:click=move |_| set_contents.set(MenuContents::Main)
                        class="inline-flex gap-x-3 items-center box-border w-full h-10 px-3 py-1 rounded
                        text-lg font-semibold hover:bg-secondary transition-colors ease-linear"
                    >
                        <ArrowLeft size=22 absolute_stroke_width=true />
                        "Activity"
                    </div>
                </div>
                <hr class="m-0 border-border" />
                <div class="py-4 px-5">
                    <TransactionHistory />
                </div>
                <hr class="m-0 border-border" />
                <div class="px-2 pt-3">
                    <a href=address_url target="_blank" rel="noopener">
                        <div class="menu-button">
                            <span class="text-sm text-muted-foreground">
                                "View more on explorer"
                            </span>
                            <ChevronRight size=20 absolute_stroke_width=true />
                        </div>
                    </a>
                </div>
            </Show>
            <Show when=move || contents.get() == MenuContents::Main>
                <div class="flex items-center justify-between px-6 pb-3">
                    <div>
                        <div class="text-xs text-muted-foreground font-light">
                            "Connected Account:"
                        </div>
                        <div class="text-base font-semibold">{address}</div>
                    </div>
                    <button
                        title="Disconnect wallet"
                        on:click=disconnect
                        class="w-10 h-10 p-0 inline-flex items-center justify-center rounded-full bg-transparent text-gold
                        hover:bg-secondary border border-solid border-border transition-all ease-standard duration-200"
                    >
                        <Power size=16 />
                    </button>
                </div>
                <hr class="m-0 border-border" />
                <ul class="space-y-1 px-1 py-2 list-none">
                    <li>
                        <div
                            on:click=move |_| set_contents.set(MenuContents::Activity)
                            class="menu-button"
                        >
                            <History size=22 />
                            "Activity"
                            <ChevronRight size=20 absolute_stroke_width=true />
                        </div>
                    </li>
                </ul>
                <hr class="m-0 border-border" />
                <div class="px-1 pt-2">
                    <div class="flex items-center gap-3 px-3 py-2 font-semibold [&_svg]:stroke-muted-foreground">
                        <Wallet size=22 />
                        "Wallet"
                    </div>
                    {TOKENS
                        .iter()
                        .map(|token| {
                            let symbol = token.symbol.clone();
                            let decimals = token.decimals;
                            let balance = move || {
                                let balance = wallet
                                    .balances
                                    .with(|balances| balances.get(&symbol))
                                    .unwrap_or_default();
                                format_token_amount(balance, decimals, 4)
                            };
                            view! {
                                <div class="flex items-center justify-between px-3 py-2 rounded hover:bg-secondary">
                                    <div>
                                        <div class="text-sm font-semibold">{token.symbol.clone()}</div>
                                        <div class="text-xs text-muted-foreground">
                                            {token.name.clone()}
                                        </div>
                                    </div>
                                    <div class="text-sm font-semibold">{balance}</div>
                                </div>
                            }
                        })
                        .collect_view()}
                </div>
            </Show>
        </dialog>
    }
}
