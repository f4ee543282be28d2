use super::{board_canvas::BoardCanvas, match_header::MatchHeader};
use crate::config::ClientConfig;
use crate::net::FetchTransport;
use crate::state::{ClientSession, PollControl, SyncLoop};
use crate::util::{clog, current_href, parse_match_id};
use std::rc::Rc;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

#[function_component(App)]
pub fn app() -> Html {
    let config = use_memo((), |_| ClientConfig::load());
    let session = use_memo((), |_| {
        let match_id = current_href()
            .map(|href| parse_match_id(&href))
            .unwrap_or(0);
        ClientSession::new(match_id)
    });
    let match_state = use_state(|| session.current());

    // Subscribe to the store and start polling; unmount cancels both
    {
        let session = session.clone();
        let config = config.clone();
        let match_state = match_state.clone();
        use_effect_with((), move |_| {
            session.subscribe(move |s| match_state.set(Rc::new(s.clone())));
            let control = PollControl::new();
            let sync = SyncLoop::new(
                session.clone(),
                FetchTransport::new((*config).clone()),
                control.clone(),
            );
            spawn_local(async move {
                let reason = sync.run().await;
                clog(&format!("polling stopped: {}", reason));
            });
            move || {
                control.cancel();
                session.clear_listeners();
            }
        });
    }

    html! {
        <div id="root">
            <MatchHeader match_id={session.match_id()} status={match_state.state.to_string()} />
            <BoardCanvas
                match_id={session.match_id()}
                state={(*match_state).clone()}
                config={config.clone()}
            />
        </div>
    }
}
