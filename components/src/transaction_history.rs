use gpex_core::{types::TransactionRecord, WalletSignals};
use leptos::prelude::*;
use lucide_leptos::ExternalLink;

#[component]
pub fn TransactionHistory() -> impl IntoView {
    let wallet = use_context::<WalletSignals>().expect("wallet signals context missing!");

    let records = move || wallet.history.with(|history| history.to_vec());

    view! {
        <div class="space-y-2">
            <h3 class="m-0 text-base font-semibold">"Recent Transactions"</h3>
            <Show
                when=move || wallet.history.with(|history| !history.is_empty())
                fallback=|| {
                    view! { <p class="m-0 text-sm text-muted-foreground">"No recent transactions"</p> }
                }
            >
                <ul class="m-0 p-0 list-none space-y-1">
                    <For
                        each=records
                        key=|record| record.hash
                        children=move |record: TransactionRecord| {
                            let href = record.explorer_url();
                            view! {
                                <li class="flex items-center justify-between text-sm">
                                    <span>
                                        {format!("{} to {}: {}", record.from, record.to, record.amount)}
                                    </span>
                                    <a
                                        href=href
                                        target="_blank"
                                        rel="noopener noreferrer"
                                        class="inline-flex items-center gap-1"
                                    >
                                        "View"
                                        <ExternalLink size=14 />
                                    </a>
                                </li>
                            }
                        }
                    />
                </ul>
            </Show>
        </div>
    }
}
