use codee::string::FromToStringCodec;
use eip1193::{Injected, Subscription};
use gpex_components::{LoadingModal, NetworkBanner, WalletMenu};
use gpex_core::{
    constants::{CHAIN_ID, CHAIN_NAME},
    network::switch_network,
    utils::{alert, confirm, shorten_address},
    wallet::{connect, load_balances},
    Error, NetworkStatus, WalletProvider, WalletSession, WalletSignals,
};
use gpex_exchange_feature::ExchangeRoutes;
use leptos::{ev, html::Dialog, prelude::*};
use leptos_meta::*;
use leptos_router::components::{Router, Routes};
use leptos_use::storage::use_local_storage;
use lucide_leptos::{ArrowUpDown, Wallet};
use send_wrapper::SendWrapper;
use tracing::{debug, error, info, warn};

#[component]
pub fn App() -> impl IntoView {
    info!("rendering <App/>");

    // Provides context that manages stylesheets, titles, meta tags, etc.
    provide_meta_context();

    // Global Contexts

    provide_context(WalletSignals::new());
    provide_context(WalletProvider::detect());

    let wallet = use_context::<WalletSignals>().expect("wallet signals context missing!");
    let provider = use_context::<WalletProvider>().expect("wallet provider context missing!");

    let (remember_wallet, set_remember_wallet, _) =
        use_local_storage::<bool, FromToStringCodec>("is_wallet_connected");

    Effect::new(move |_| debug!("{:?}", wallet.session.get()));
    Effect::new(move |_| info!("Network status: {:?}", wallet.status()));

    // Balances follow the account, and are only read on the required chain. A read that
    // settles after the session moved on is dropped by `apply_balances`.
    let balances = LocalResource::new({
        let provider = provider.clone();
        move || {
            let session = wallet.session.get();
            let ethereum = provider.0.clone();
            async move {
                let account = session.account.filter(|_| session.is_correct_chain())?;
                let balances = load_balances(&ethereum?, account).await;
                debug!("{} balances loaded for {account}", balances.len());
                Some((session, balances))
            }
        }
    });

    Effect::new(move |_| {
        if let Some((session, loaded)) = balances.get().and_then(SendWrapper::take) {
            wallet.apply_balances(session, loaded);
        }
    });

    let disconnect = move || {
        info!("disconnecting wallet");
        wallet.disconnect();
        set_remember_wallet.set(false);
    };

    // Actions

    let switch_action: Action<(), Result<(), Error>, LocalStorage> = Action::new_local({
        let provider = provider.clone();
        move |_: &()| {
            let provider = provider.clone();
            async move {
                let ethereum = provider.0.ok_or(Error::NoProvider)?;

                wallet.switching.set(true);
                let result = switch_network(&ethereum).await;
                wallet.switching.set(false);
                result?;

                let chain_id = ethereum.chain_id().await?;
                wallet.session.update(|session| {
                    if session.is_connected() {
                        session.chain_id = Some(chain_id);
                    }
                });
                Ok(())
            }
        }
    });

    Effect::new(move |_| {
        if let Some(Err(error)) = switch_action.value().get() {
            warn!("{error}");
            alert(error.to_string());
        }
    });

    // `true` reconnects silently with accounts the wallet already authorized.
    let connect_action: Action<bool, Result<WalletSession, Error>, LocalStorage> = Action::new_local({
        let provider = provider.clone();
        move |eager: &bool| {
            let eager = *eager;
            let provider = provider.clone();
            async move {
                let result: Result<WalletSession, Error> = async move {
                    let ethereum = provider.0.ok_or(Error::NoProvider)?;

                    let session = connect(&ethereum, eager).await?;
                    wallet.open(session);
                    set_remember_wallet.set(true);

                    if session.is_correct_chain() || eager {
                        return Ok(session);
                    }

                    warn!("Connected to unsupported network. Attempting to switch to {CHAIN_NAME}...");
                    if !confirm(format!(
                        "This application requires {CHAIN_NAME} network. Do you want to switch to {CHAIN_NAME}?"
                    )) {
                        alert(format!(
                            "This application requires {CHAIN_NAME} network. Please switch to {CHAIN_NAME} and try connecting again."
                        ));
                        disconnect();
                        return Err(Error::WrongNetwork);
                    }

                    wallet.switching.set(true);
                    let switched = switch_network(&ethereum).await;
                    wallet.switching.set(false);

                    if let Err(error) = switched {
                        error!("Failed to switch to {CHAIN_NAME}: {error}");
                        alert(format!(
                            "Failed to switch to {CHAIN_NAME} network. Please switch manually in your wallet and try connecting again."
                        ));
                        disconnect();
                        return Err(Error::WrongNetwork);
                    }

                    let session = connect(&ethereum, true).await?;
                    wallet.open(session);
                    Ok(session)
                }
                .await;

                match &result {
                    Ok(session) => debug!("connected: {session:?}"),
                    // already reported to the user
                    Err(Error::WrongNetwork) => {}
                    Err(error) if eager => warn!("could not reconnect: {error}"),
                    Err(error) => {
                        error!("Failed to connect: {error}");
                        alert(error.to_string());
                    }
                }

                result
            }
        }
    });

    if remember_wallet.get_untracked() {
        debug!("reconnecting remembered wallet");
        connect_action.dispatch(true);
    }

    // Event Listeners

    let subscriptions = provider
        .as_ref()
        .map(|ethereum| subscribe(ethereum.provider(), wallet, switch_action, disconnect))
        .unwrap_or_default();

    on_cleanup(move || {
        info!("cleaning up <App/>");
        for subscription in subscriptions {
            subscription.remove();
        }
    });

    // Node references

    let wallet_dialog_ref = NodeRef::<Dialog>::new();

    // HTML Elements

    let toggle_wallet_menu = move |_: ev::MouseEvent| match wallet_dialog_ref.get() {
        Some(dialog) => match dialog.open() {
            false => {
                let _ = dialog.show();
            }
            true => dialog.close(),
        },
        None => alert("Something is wrong!"),
    };

    let connect_wallet = move |_: ev::MouseEvent| {
        connect_action.dispatch(false);
    };

    let address = move || wallet.account().map(shorten_address);

    view! {
        <Title text="GPEX Token Exchange" />
        <Router>
            <header class="bg-background z-40">
                <div class="p-4 flex justify-between items-center border-b">
                    <div class="flex flex-row items-center gap-3">
                        <ArrowUpDown size=24 />
                        <div class="m-0 font-bold text-2xl cursor-default">"GPEX"</div>
                    </div>
                    <div class="flex gap-1">
                        <Show
                            when=move || wallet.session.with(WalletSession::is_connected)
                            fallback=move || {
                                view! {
                                    <button
                                        on:click=connect_wallet
                                        disabled=connect_action.pending()
                                        class="min-w-24 text-sm font-medium py-2 px-4 border-none
                                        bg-primary text-primary-foreground rounded-md"
                                    >
                                        <div class="h-6 flex flex-row items-center gap-2">
                                            <Wallet size=16 />
                                            "Connect Wallet"
                                        </div>
                                    </button>
                                }
                            }
                        >
                            <Show when=move || wallet.status() == NetworkStatus::WrongChain>
                                <button
                                    on:click=move |_| {
                                        switch_action.dispatch(());
                                    }
                                    class="text-sm font-medium py-2 px-4 border-none bg-secondary text-secondary-foreground rounded-md"
                                >
                                    {format!("Switch to {CHAIN_NAME}")}
                                </button>
                            </Show>
                            <div class="relative inline-block">
                                <button
                                    on:click=toggle_wallet_menu
                                    class="min-w-24 text-sm font-medium leading-none py-2 px-4 border-none
                                    bg-secondary text-secondary-foreground rounded-md"
                                >
                                    <div class="h-6 flex flex-row items-center gap-2">
                                        <Wallet size=16 />
                                        {address}
                                    </div>
                                </button>
                                <WalletMenu
                                    dialog_ref=wallet_dialog_ref
                                    on_disconnect=move || disconnect()
                                />
                            </div>
                        </Show>
                    </div>
                </div>
                <NetworkBanner on_switch=move || {
                    switch_action.dispatch(());
                } />
            </header>
            <main class="flex-1 px-2.5 lg:px-8 py-3 overflow-x-auto">
                <Routes fallback=|| "This page could not be found.">
                    <ExchangeRoutes />
                </Routes>
            </main>
            <LoadingModal when=connect_action.pending() message="Requesting Connection" />
        </Router>
    }
}

/// Keeps the session in step with the wallet. The returned subscriptions stop their handlers
/// once removed.
fn subscribe(
    injected: &Injected,
    wallet: WalletSignals,
    switch_action: Action<(), Result<(), Error>, LocalStorage>,
    disconnect: impl Fn() + Copy + 'static,
) -> Vec<Subscription> {
    let accounts_changed = injected.on_accounts_changed(move |accounts| {
        warn!("accounts changed: {accounts:?}");
        match accounts.first() {
            None => disconnect(),
            Some(&account) => wallet.switch_account(account),
        }
    });

    let chain_changed = injected.on_chain_changed(move |chain_id| {
        warn!("chain changed: {chain_id}");
        if !wallet.session.with_untracked(WalletSession::is_connected) {
            return;
        }
        wallet.session.update(|session| session.chain_id = Some(chain_id));

        if chain_id != CHAIN_ID && !wallet.switching.get_untracked() {
            switch_action.dispatch(());
        }
    });

    [accounts_changed, chain_changed]
        .into_iter()
        .filter_map(|subscription| subscription.inspect_err(|e| error!("{e}")).ok())
        .collect()
}
