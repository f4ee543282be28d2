//! HTTP access to the game server.
//!
//! [`Transport`] is the seam the sync loop and input handler talk to;
//! [`FetchTransport`] implements it on top of the browser `fetch` API.

use crate::config::ClientConfig;
use crate::error::{ClientError, Result};
use crate::model::{MatchState, MoveRequest};
use crate::state::PollControl;
use gloo_timers::callback::Timeout;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{AbortController, AbortSignal, DomException, RequestInit, Response};

#[allow(async_fn_in_trait)]
pub trait Transport {
    /// Short-lived query for the current match state. Cancelling `control`
    /// aborts it with `Err(Aborted)`.
    async fn game_state(&self, match_id: u64, control: &PollControl) -> Result<MatchState>;

    /// Long-poll that returns once the server reports a change (or gives up).
    /// `Ok` carries the HTTP status; a timeout or cancellation is `Err(Aborted)`.
    async fn wait_for_update(&self, match_id: u64, control: &PollControl) -> Result<u16>;

    /// Submits a move. The response body is not interpreted.
    async fn make_move(&self, mv: MoveRequest) -> Result<u16>;
}

#[derive(Clone, Debug)]
pub struct FetchTransport {
    config: ClientConfig,
}

impl FetchTransport {
    pub fn new(config: ClientConfig) -> Self {
        Self { config }
    }

    async fn get(&self, url: &str, signal: Option<&AbortSignal>) -> Result<Response> {
        let window = web_sys::window().ok_or_else(|| ClientError::Dom("no window".to_string()))?;
        let init = RequestInit::new();
        init.set_method("GET");
        if let Some(signal) = signal {
            init.set_signal(Some(signal));
        }
        let value = JsFuture::from(window.fetch_with_str_and_init(url, &init))
            .await
            .map_err(classify_rejection)?;
        value
            .dyn_into::<Response>()
            .map_err(|_| ClientError::Dom("fetch did not resolve to a Response".to_string()))
    }

    /// GET bounded by `timeout_ms` and abortable through `control`.
    async fn get_cancellable(
        &self,
        url: &str,
        timeout_ms: u32,
        control: &PollControl,
    ) -> Result<Response> {
        let controller = AbortController::new()
            .map_err(|e| ClientError::Dom(format!("AbortController: {:?}", e)))?;
        let signal = controller.signal();
        let timeout = {
            let controller = controller.clone();
            Timeout::new(timeout_ms, move || controller.abort())
        };
        {
            let controller = controller.clone();
            control.set_abort(move || controller.abort());
        }
        let result = self.get(url, Some(&signal)).await;
        drop(timeout);
        control.clear_abort();
        result
    }
}

/// Maps the name of a rejected fetch's exception to an error.
/// `AbortError` is what both the timeout and explicit cancellation produce.
pub fn rejection_from_name(name: Option<&str>, detail: String) -> ClientError {
    match name {
        Some("AbortError") => ClientError::Aborted,
        _ => ClientError::Network(detail),
    }
}

/// Only a 200 carries a usable match state.
pub fn expect_ok(status: u16) -> Result<()> {
    if status == 200 {
        Ok(())
    } else {
        Err(ClientError::Status(status))
    }
}

fn classify_rejection(err: JsValue) -> ClientError {
    let name = err.dyn_ref::<DomException>().map(|ex| ex.name());
    rejection_from_name(name.as_deref(), format!("{:?}", err))
}

impl Transport for FetchTransport {
    async fn game_state(&self, match_id: u64, control: &PollControl) -> Result<MatchState> {
        let resp = self
            .get_cancellable(
                &self.config.state_url(match_id),
                self.config.state_timeout_ms,
                control,
            )
            .await?;
        expect_ok(resp.status())?;
        let text_promise = resp
            .text()
            .map_err(|e| ClientError::Network(format!("{:?}", e)))?;
        let text = JsFuture::from(text_promise)
            .await
            .map_err(classify_rejection)?
            .as_string()
            .ok_or_else(|| ClientError::Decode("response body is not text".to_string()))?;
        Ok(serde_json::from_str(&text)?)
    }

    async fn wait_for_update(&self, match_id: u64, control: &PollControl) -> Result<u16> {
        let resp = self
            .get_cancellable(
                &self.config.wait_url(match_id),
                self.config.long_poll_timeout_ms,
                control,
            )
            .await?;
        Ok(resp.status())
    }

    async fn make_move(&self, mv: MoveRequest) -> Result<u16> {
        let resp = self.get(&self.config.move_url(&mv), None).await?;
        Ok(resp.status())
    }
}
