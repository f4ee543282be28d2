use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct MatchHeaderProps {
    pub match_id: u64,
    /// Raw status string as the server sent it.
    pub status: String,
}

#[function_component]
pub fn MatchHeader(props: &MatchHeaderProps) -> Html {
    html! {
        <div style="display:flex; flex-direction:column; align-items:center; gap:6px; margin:12px 0;">
            <h1 id="header" style="margin:0; font-size:22px;">{ format!("Game ID: {}", props.match_id) }</h1>
            <div id="game_state" style="font-size:16px; font-weight:600;">{ props.status.clone() }</div>
        </div>
    }
}
