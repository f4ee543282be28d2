use crate::config::ClientConfig;
use crate::model::MatchState;
use crate::net::{FetchTransport, Transport};
use crate::render::{Canvas2dSurface, canvas_edge, render};
use crate::state::click_action;
use crate::util::{clog, cwarn};
use std::rc::Rc;
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlCanvasElement;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct BoardCanvasProps {
    pub match_id: u64,
    pub state: Rc<MatchState>,
    pub config: Rc<ClientConfig>,
}

#[function_component(BoardCanvas)]
pub fn board_canvas(props: &BoardCanvasProps) -> Html {
    let canvas_ref = use_node_ref();

    // Square canvas sized once from the viewport; no resize handling
    {
        let canvas_ref = canvas_ref.clone();
        let fraction = props.config.canvas_fraction;
        use_effect_with((), move |_| {
            if let (Some(window), Some(canvas)) =
                (web_sys::window(), canvas_ref.cast::<HtmlCanvasElement>())
            {
                let width = window
                    .inner_width()
                    .ok()
                    .and_then(|v| v.as_f64())
                    .unwrap_or(800.0);
                let height = window
                    .inner_height()
                    .ok()
                    .and_then(|v| v.as_f64())
                    .unwrap_or(600.0);
                let edge = canvas_edge(width, height, fraction);
                canvas.set_width(edge);
                canvas.set_height(edge);
            }
            || ()
        });
    }

    // Full redraw whenever a new state arrives
    {
        let canvas_ref = canvas_ref.clone();
        use_effect_with(props.state.clone(), move |state| {
            if let Some(canvas) = canvas_ref.cast::<HtmlCanvasElement>() {
                match Canvas2dSurface::from_canvas(&canvas) {
                    Ok(mut surface) => render(&mut surface, state),
                    Err(err) => cwarn(&format!("cannot draw board: {}", err)),
                }
            }
            || ()
        });
    }

    let onclick = {
        let canvas_ref = canvas_ref.clone();
        let state = props.state.clone();
        let config = props.config.clone();
        let match_id = props.match_id;
        Callback::from(move |e: MouseEvent| {
            let Some(canvas) = canvas_ref.cast::<HtmlCanvasElement>() else {
                return;
            };
            let edge = canvas.width() as f64;
            let Some(mv) = click_action(
                &state,
                match_id,
                e.offset_x() as f64,
                e.offset_y() as f64,
                edge,
            ) else {
                return;
            };
            // fire and forget: the next poll cycle shows the result
            let transport = FetchTransport::new((*config).clone());
            spawn_local(async move {
                match transport.make_move(mv).await {
                    Ok(status) => clog(&format!("move ({}, {}) sent: HTTP {}", mv.x, mv.y, status)),
                    Err(err) => cwarn(&format!("move ({}, {}) failed: {}", mv.x, mv.y, err)),
                }
            });
        })
    };

    html! {
        <canvas id="game_canvas" ref={canvas_ref} {onclick} style="display:block; margin:0 auto;"></canvas>
    }
}
