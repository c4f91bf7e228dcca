use crate::{Eip1193Provider, Error, ProviderEvent};
use alloy_primitives::{Address, U64};
use async_trait::async_trait;
use send_wrapper::SendWrapper;
use serde::Serialize;
use serde_json::Value;
use std::rc::Rc;
use tracing::{debug, trace, warn};
use wasm_bindgen_futures::JsFuture;
use web_sys::{
    js_sys::{Function, Object, Promise, Reflect},
    wasm_bindgen::{closure::Closure, JsCast, JsValue},
};

#[derive(Serialize)]
struct RequestArguments<'a> {
    method: &'a str,
    params: &'a Value,
}

/// The provider a browser wallet injects at `window.ethereum`.
#[derive(Debug, Clone)]
pub struct Injected {
    inner: SendWrapper<Rc<Object>>,
}

impl Injected {
    pub fn detect() -> Result<Self, Error> {
        Self::lookup()
            .map(|provider| Self {
                inner: SendWrapper::new(Rc::new(provider)),
            })
            .ok_or(Error::ProviderUnavailable)
    }

    fn lookup() -> Option<Object> {
        web_sys::window()
            .and_then(|window| Reflect::get(&window, &JsValue::from_str("ethereum")).ok())
            .filter(|ethereum| !ethereum.is_undefined() && !ethereum.is_null())
            .and_then(|ethereum| ethereum.dyn_into::<Object>().ok())
    }

    fn method(&self, name: &str) -> Result<Function, Error> {
        Reflect::get(&self.inner, &JsValue::from_str(name))
            .map_err(Error::js)?
            .dyn_into::<Function>()
            .map_err(|_| Error::generic(format!("provider has no `{name}` method")))
    }

    /// Registers a raw listener. The listener stays registered until the returned
    /// [`Subscription`] is removed or dropped.
    pub fn on(
        &self,
        event: ProviderEvent,
        handler: impl FnMut(JsValue) + 'static,
    ) -> Result<Subscription, Error> {
        let closure = Closure::<dyn FnMut(JsValue)>::new(handler);
        self.method("on")?
            .call2(
                &self.inner,
                &JsValue::from_str(event.as_str()),
                closure.as_ref(),
            )
            .map_err(Error::js)?;

        debug!("subscribed to `{}`", event.as_str());

        Ok(Subscription {
            provider: self.clone(),
            event,
            closure: Some(SendWrapper::new(closure)),
        })
    }

    /// Calls `handler` with the new account list. An empty list means the wallet locked or
    /// the user revoked access.
    pub fn on_accounts_changed(
        &self,
        handler: impl Fn(Vec<Address>) + 'static,
    ) -> Result<Subscription, Error> {
        self.on(ProviderEvent::AccountsChanged, move |accounts: JsValue| {
            match serde_wasm_bindgen::from_value::<Vec<Address>>(accounts) {
                Ok(accounts) => handler(accounts),
                Err(error) => warn!("malformed accountsChanged payload: {error}"),
            }
        })
    }

    pub fn on_chain_changed(&self, handler: impl Fn(u64) + 'static) -> Result<Subscription, Error> {
        self.on(ProviderEvent::ChainChanged, move |chain_id: JsValue| {
            match serde_wasm_bindgen::from_value::<U64>(chain_id) {
                Ok(chain_id) => handler(chain_id.to::<u64>()),
                Err(error) => warn!("malformed chainChanged payload: {error}"),
            }
        })
    }
}

#[async_trait(?Send)]
impl Eip1193Provider for Injected {
    async fn request(&self, method: &str, params: Value) -> Result<Value, Error> {
        trace!("{method} {params}");

        let arguments = RequestArguments {
            method,
            params: &params,
        }
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())?;

        let promise = self
            .method("request")?
            .call1(&self.inner, &arguments)
            .map_err(Error::js)?;

        let response = JsFuture::from(Promise::from(promise))
            .await
            .map_err(Error::js)?;

        if response.is_undefined() {
            return Ok(Value::Null);
        }

        Ok(serde_wasm_bindgen::from_value(response)?)
    }
}

/// A registered provider event listener.
///
/// Removing (or dropping) the subscription unregisters the listener before its closure is
/// released, so the handler never runs afterwards.
pub struct Subscription {
    provider: Injected,
    event: ProviderEvent,
    closure: Option<SendWrapper<Closure<dyn FnMut(JsValue)>>>,
}

impl Subscription {
    pub fn remove(self) {
        drop(self)
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        let Some(closure) = self.closure.take() else {
            return;
        };

        let closure: &Closure<dyn FnMut(JsValue)> = &closure;
        let removed = self.provider.method("removeListener").and_then(|remove| {
            remove
                .call2(
                    &self.provider.inner,
                    &JsValue::from_str(self.event.as_str()),
                    closure.as_ref(),
                )
                .map_err(Error::js)
        });

        match removed {
            Ok(_) => debug!("unsubscribed from `{}`", self.event.as_str()),
            Err(error) => warn!("failed to remove `{}` listener: {error}", self.event.as_str()),
        }
    }
}

/// Resolves after `ms` milliseconds on the browser event loop.
pub(crate) async fn sleep(ms: i32) {
    let promise = Promise::new(&mut |resolve: Function, _reject: Function| {
        let scheduled = web_sys::window().and_then(|window| {
            window
                .set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, ms)
                .ok()
        });
        if scheduled.is_none() {
            let _ = resolve.call0(&JsValue::NULL);
        }
    });
    let _ = JsFuture::from(promise).await;
}
