use gpex_components::{LoadingModal, TokenBalance, TransactionHistory};
use gpex_core::{
    constants::TOKENS,
    exchange::{can_submit, execute_exchange, max_input_amount, ExchangeRequest},
    get_token,
    rate::estimate_output,
    selection::TokenPair,
    types::{Token, TransactionRecord},
    utils::{alert, display_token_amount},
    wallet::load_balances,
    Error, WalletProvider, WalletSignals,
};
use leptos::prelude::*;
use lucide_leptos::ArrowDownUp;
use tracing::{debug, error, info};

#[component]
pub fn Exchange() -> impl IntoView {
    info!("rendering <Exchange/>");

    on_cleanup(move || {
        info!("cleaning up <Exchange/>");
    });

    let wallet = use_context::<WalletSignals>().expect("wallet signals context missing!");
    let provider = use_context::<WalletProvider>().expect("wallet provider context missing!");

    let pair = RwSignal::new(TokenPair::default());
    let (amount, set_amount) = signal("0".to_string());
    let (error_message, set_error_message) = signal(None::<String>);

    let input_token = Signal::derive(move || pair.with(|pair| pair.input().clone()));
    let output_token = Signal::derive(move || pair.with(|pair| pair.output().clone()));

    let output_amount = Memo::new(move |_| {
        pair.with(|pair| amount.with(|amount| estimate_output(pair.input(), pair.output(), amount)))
    });

    // Changing either side starts the amount over.
    let select_token = move |symbol: String, is_input: bool| {
        let Some(token) = get_token(&symbol).cloned() else {
            error!("{symbol}: {}", Error::UnknownToken);
            return;
        };
        pair.update(|pair| {
            if is_input {
                pair.select_input(token)
            } else {
                pair.select_output(token)
            }
        });
        set_amount.set("0".to_string());
        set_error_message.set(None);
    };

    let fill_max = move |_| {
        let token = input_token.get_untracked();
        let balance = wallet
            .balances
            .with_untracked(|balances| balances.get(&token.symbol))
            .unwrap_or_default();
        let max = max_input_amount(&token, balance);
        set_amount.set(display_token_amount(max, token.decimals));
    };

    let exchange: Action<ExchangeRequest, Result<TransactionRecord, Error>, LocalStorage> =
        Action::new_local(move |request: &ExchangeRequest| {
            let request = request.clone();
            let ethereum = provider.0.clone();
            let balances = wallet.balances.get_untracked();

            async move {
                let ethereum = ethereum.ok_or(Error::NoProvider)?;
                let record = execute_exchange(&ethereum, &request, &balances).await?;

                wallet.history.update(|history| history.push(record.clone()));
                alert("Exchange successful!");

                let session = wallet.session.get_untracked();
                if let Some(account) = session.account {
                    let balances = load_balances(&ethereum, account).await;
                    wallet.apply_balances(session, balances);
                }

                Ok(record)
            }
        });

    Effect::new(move || match exchange.value().get() {
        Some(Err(error)) => {
            error!("Exchange failed: {error:?}");
            set_error_message.set(Some(error.to_string()));
        }
        Some(Ok(record)) => debug!("exchange settled: {}", record.hash),
        None => {}
    });

    let handle_exchange = move |_| {
        let request = pair.with_untracked(|pair| {
            amount.with_untracked(|amount| ExchangeRequest::new(pair.input(), pair.output(), amount))
        });

        match request {
            Ok(request) => {
                set_error_message.set(None);
                _ = exchange.dispatch(request);
            }
            Err(error) => set_error_message.set(Some(error.to_string())),
        }
    };

    let submit_disabled = move || {
        let pending = exchange.pending().get();
        let session = wallet.session.get();
        pair.with(|pair| {
            wallet.balances.with(|balances| {
                amount.with(|amount| !can_submit(&session, balances, pair.input(), amount, pending))
            })
        })
    };

    let token_option = move |token: &Token, selected: Signal<Token>| {
        let symbol = token.symbol.clone();
        let is_selected = move || selected.with(|selected| selected.symbol == symbol);
        view! {
            <option value=token.symbol.clone() selected=is_selected>
                {token.symbol.clone()}
            </option>
        }
    };

    view! {
        <LoadingModal when=exchange.pending() message="Processing..." />
        <div class="flex items-center justify-center py-8">
            <div class="grid gap-4 grid-cols-1 max-w-sm w-full">
                <div class="rounded-lg shadow-sm bg-card text-card-foreground border border-solid border-border">
                    // card header
                    <div class="p-6 flex justify-between items-center">
                        <h2 class="m-0">"Exchange"</h2>
                    </div>

                    // card body
                    <div class="px-6 pb-6 space-y-4">
                        <div class="space-y-2">
                            <div class="flex items-center justify-between">
                                <label class="block text-sm font-medium" for="from-token">
                                    "From"
                                </label>
                                <div class="flex items-center gap-1">
                                    <TokenBalance token=input_token />
                                    <button
                                        type="button"
                                        class="py-0 px-2 text-xs font-semibold rounded-sm bg-secondary text-secondary-foreground"
                                        disabled=move || !wallet.session.with(|session| session.is_connected())
                                        on:click=fill_max
                                    >
                                        "MAX"
                                    </button>
                                </div>
                            </div>
                            <div class="flex justify-between gap-4 h-9">
                                <input
                                    id="from-token"
                                    type="text"
                                    pattern="^[0-9]*[.,]?[0-9]*$"
                                    inputmode="decimal"
                                    placeholder="0.0"
                                    autocomplete="off"
                                    class="px-3 py-1 w-full text-sm rounded-md font-normal"
                                    prop:value=move || amount.get()
                                    on:input=move |ev| {
                                        set_amount.set(event_target_value(&ev));
                                        set_error_message.set(None);
                                    }
                                />
                                <select
                                    title="Select input token"
                                    class="w-[135px] font-medium py-2 px-4 bg-card rounded-md"
                                    prop:value=move || input_token.with(|token| token.symbol.clone())
                                    on:change=move |ev| select_token(event_target_value(&ev), true)
                                >
                                    {TOKENS
                                        .iter()
                                        .map(|token| token_option(token, input_token))
                                        .collect_view()}
                                </select>
                            </div>
                        </div>

                        <div class="flex items-center gap-0.5 w-full">
                            <hr class="w-full" />
                            <button
                                type="button"
                                aria-label="change exchange direction"
                                class="inline-flex items-center justify-center rounded-full border-0 min-w-[1.5rem] h-6 p-0
                                hover:text-primary"
                                on:click=move |_| {
                                    pair.update(TokenPair::flip);
                                    set_amount.set("0".to_string());
                                }
                            >
                                <ArrowDownUp size=15 />
                            </button>
                            <hr class="w-full" />
                        </div>

                        <div class="space-y-2">
                            <div class="flex justify-between leading-none">
                                <label class="block text-sm font-medium" for="to-token">
                                    "To (estimated)"
                                </label>
                                <TokenBalance token=output_token />
                            </div>
                            <div class="flex justify-between gap-4 h-9">
                                <input
                                    disabled
                                    id="to-token"
                                    type="text"
                                    class="px-3 py-1 w-full text-sm rounded-md font-normal"
                                    prop:value=move || output_amount.get()
                                />
                                // the input token is never offered on this side
                                <select
                                    title="Select output token"
                                    class="w-[135px] font-medium py-2 px-4 bg-card rounded-md"
                                    prop:value=move || output_token.with(|token| token.symbol.clone())
                                    on:change=move |ev| select_token(event_target_value(&ev), false)
                                >
                                    {move || {
                                        let input = input_token.get();
                                        TOKENS
                                            .iter()
                                            .filter(|token| token.symbol != input.symbol)
                                            .map(|token| token_option(token, output_token))
                                            .collect_view()
                                    }}
                                </select>
                            </div>
                        </div>

                        <Show when=move || error_message.with(Option::is_some)>
                            <p class="m-0 text-sm text-gold font-semibold">
                                {move || error_message.get()}
                            </p>
                        </Show>
                    </div>

                    // card footer
                    <div class="px-6 pb-6">
                        <button
                            class="w-full py-2 px-6 bg-primary active:brightness-90 text-primary-foreground text-sm font-medium rounded-md"
                            disabled=submit_disabled
                            on:click=handle_exchange
                        >
                            {move || if exchange.pending().get() { "Processing..." } else { "Swap" }}
                        </button>
                    </div>
                </div>

                <div class="rounded-lg p-6 bg-card text-card-foreground border border-solid border-border">
                    <TransactionHistory />
                </div>
            </div>
        </div>
    }
}
