use serde::{Deserialize, Serialize};
use web_sys::{js_sys, wasm_bindgen::JsValue};

/// The user rejected the request.
pub const USER_REJECTED_REQUEST: i64 = 4001;
/// The wallet does not know the requested chain.
pub const UNRECOGNIZED_CHAIN: i64 = 4902;

#[derive(thiserror::Error, Serialize, Deserialize, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("No Ethereum provider found")]
    ProviderUnavailable,

    #[error("{message}")]
    Rpc { code: i64, message: String },

    #[error("{0}")]
    Js(String),

    #[error("Serialization Error: {0}")]
    Serialization(String),

    #[error("{0}")]
    Generic(String),
}

impl Error {
    pub fn js(value: JsValue) -> Self {
        value.into()
    }

    pub fn generic(value: impl std::fmt::Display) -> Self {
        Self::Generic(value.to_string())
    }

    pub fn code(&self) -> Option<i64> {
        match self {
            Error::Rpc { code, .. } => Some(*code),
            _ => None,
        }
    }

    pub fn is_user_rejection(&self) -> bool {
        self.code() == Some(USER_REJECTED_REQUEST)
    }

    pub fn is_unrecognized_chain(&self) -> bool {
        self.code() == Some(UNRECOGNIZED_CHAIN)
    }
}

fn property(target: &JsValue, key: &str) -> Option<JsValue> {
    if !target.is_object() {
        return None;
    }
    js_sys::Reflect::get(target, &JsValue::from_str(key))
        .ok()
        .filter(|value| !value.is_undefined() && !value.is_null())
}

// Wallets reject with plain objects shaped like `{ code, message, data }` rather than `Error`
// instances. Some mobile wallets bury the 4902 code in `data.originalError`.
impl From<JsValue> for Error {
    fn from(error: JsValue) -> Self {
        let code = property(&error, "code")
            .and_then(|code| code.as_f64())
            .or_else(|| {
                property(&error, "data")
                    .and_then(|data| property(&data, "originalError"))
                    .and_then(|original| property(&original, "code"))
                    .and_then(|code| code.as_f64())
            });

        let message = property(&error, "message")
            .and_then(|message| message.as_string())
            .or_else(|| error.as_string())
            .unwrap_or("unknown JS error".to_string());

        match code {
            Some(code) => Error::Rpc {
                code: code as i64,
                message,
            },
            None => Error::Js(message),
        }
    }
}

impl From<serde_wasm_bindgen::Error> for Error {
    fn from(error: serde_wasm_bindgen::Error) -> Self {
        Error::Serialization(error.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Error::Serialization(error.to_string())
    }
}
