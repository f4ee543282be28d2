//! Board renderer: grid lines plus one stroked mark per occupied cell.
//!
//! Drawing goes through [`Surface`], the stroked-path subset of a 2D canvas
//! context, so the geometry can be checked without a browser.

use crate::error::{ClientError, Result};
use crate::model::{Cell, MatchState};
use crate::util::cwarn;
use std::f64::consts::PI;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

/// Inset of a cross from each cell edge, as a fraction of the tile.
const CROSS_INSET: f64 = 0.1;
/// Circle radius as a fraction of the tile.
const CIRCLE_RADIUS: f64 = 0.4;

pub trait Surface {
    /// Width of the (square) drawing area in pixels.
    fn edge(&self) -> f64;
    fn clear(&mut self);
    fn begin_path(&mut self);
    fn move_to(&mut self, x: f64, y: f64);
    fn line_to(&mut self, x: f64, y: f64);
    fn arc(&mut self, x: f64, y: f64, radius: f64, start: f64, end: f64);
    fn stroke(&mut self);
    fn close_path(&mut self);
}

pub struct Canvas2dSurface {
    ctx: CanvasRenderingContext2d,
    width: f64,
    height: f64,
}

impl Canvas2dSurface {
    pub fn from_canvas(canvas: &HtmlCanvasElement) -> Result<Self> {
        let ctx = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .ok_or_else(|| ClientError::Dom("canvas has no 2d context".to_string()))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| ClientError::Dom("2d context has unexpected type".to_string()))?;
        Ok(Self {
            ctx,
            width: canvas.width() as f64,
            height: canvas.height() as f64,
        })
    }
}

impl Surface for Canvas2dSurface {
    fn edge(&self) -> f64 {
        self.width
    }
    fn clear(&mut self) {
        self.ctx.clear_rect(0.0, 0.0, self.width, self.height);
    }
    fn begin_path(&mut self) {
        self.ctx.begin_path();
    }
    fn move_to(&mut self, x: f64, y: f64) {
        self.ctx.move_to(x, y);
    }
    fn line_to(&mut self, x: f64, y: f64) {
        self.ctx.line_to(x, y);
    }
    fn arc(&mut self, x: f64, y: f64, radius: f64, start: f64, end: f64) {
        if let Err(err) = self.ctx.arc(x, y, radius, start, end) {
            cwarn(&format!("arc at ({}, {}) r={} failed: {:?}", x, y, radius, err));
        }
    }
    fn stroke(&mut self) {
        self.ctx.stroke();
    }
    fn close_path(&mut self) {
        self.ctx.close_path();
    }
}

/// Square canvas edge for a viewport, truncated to whole pixels.
pub fn canvas_edge(inner_width: f64, inner_height: f64, fraction: f64) -> u32 {
    (inner_width.min(inner_height) * fraction).max(0.0) as u32
}

pub fn tile_size(edge: f64, n: usize) -> f64 {
    edge / n as f64
}

/// Clears the surface and partitions it into an `n` x `n` grid.
pub fn draw_grid<S: Surface>(surface: &mut S, n: usize) {
    surface.clear();
    if n == 0 {
        return;
    }
    let edge = surface.edge();
    let tile = tile_size(edge, n);
    surface.begin_path();
    for i in 1..n {
        let x = tile * i as f64;
        surface.move_to(x, 0.0);
        surface.line_to(x, edge);
    }
    for i in 1..n {
        let y = tile * i as f64;
        surface.move_to(0.0, y);
        surface.line_to(edge, y);
    }
    surface.stroke();
    surface.close_path();
}

pub fn draw_mark<S: Surface>(surface: &mut S, tile: f64, x: usize, y: usize, cell: Cell) {
    let (x, y) = (x as f64, y as f64);
    match cell {
        Cell::Empty => {}
        Cell::Cross => {
            let near = CROSS_INSET;
            let far = 1.0 - CROSS_INSET;
            surface.begin_path();
            surface.move_to(tile * (x + near), tile * (y + near));
            surface.line_to(tile * (x + far), tile * (y + far));
            surface.move_to(tile * (x + near), tile * (y + far));
            surface.line_to(tile * (x + far), tile * (y + near));
            surface.stroke();
            surface.close_path();
        }
        Cell::Circle => {
            surface.begin_path();
            surface.arc(
                tile * (x + 0.5),
                tile * (y + 0.5),
                tile * CIRCLE_RADIUS,
                0.0,
                2.0 * PI,
            );
            surface.stroke();
            surface.close_path();
        }
    }
}

/// Full redraw of a match: clear, grid, then every occupied cell.
pub fn render<S: Surface>(surface: &mut S, state: &MatchState) {
    let n = state.board.size();
    draw_grid(surface, n);
    if n == 0 {
        return;
    }
    let tile = tile_size(surface.edge(), n);
    for (x, y, cell) in state.board.marks() {
        draw_mark(surface, tile, x, y, cell);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Board, GameStatus};

    #[derive(Clone, Debug, PartialEq)]
    enum Op {
        Clear,
        Begin,
        Move(f64, f64),
        Line(f64, f64),
        Arc(f64, f64, f64),
        Stroke,
        Close,
    }

    struct RecordingSurface {
        edge: f64,
        ops: Vec<Op>,
    }

    impl RecordingSurface {
        fn new(edge: f64) -> Self {
            Self { edge, ops: Vec::new() }
        }

        /// Line segments as (from, to) pairs.
        fn segments(&self) -> Vec<((f64, f64), (f64, f64))> {
            let mut out = Vec::new();
            let mut pen = None;
            for op in &self.ops {
                match *op {
                    Op::Move(x, y) => pen = Some((x, y)),
                    Op::Line(x, y) => {
                        if let Some(from) = pen {
                            out.push((from, (x, y)));
                        }
                        pen = Some((x, y));
                    }
                    _ => {}
                }
            }
            out
        }
    }

    impl Surface for RecordingSurface {
        fn edge(&self) -> f64 {
            self.edge
        }
        fn clear(&mut self) {
            self.ops.push(Op::Clear);
        }
        fn begin_path(&mut self) {
            self.ops.push(Op::Begin);
        }
        fn move_to(&mut self, x: f64, y: f64) {
            self.ops.push(Op::Move(x, y));
        }
        fn line_to(&mut self, x: f64, y: f64) {
            self.ops.push(Op::Line(x, y));
        }
        fn arc(&mut self, x: f64, y: f64, radius: f64, _start: f64, _end: f64) {
            self.ops.push(Op::Arc(x, y, radius));
        }
        fn stroke(&mut self) {
            self.ops.push(Op::Stroke);
        }
        fn close_path(&mut self) {
            self.ops.push(Op::Close);
        }
    }

    fn state_with(rows: &[&str]) -> MatchState {
        MatchState {
            state: GameStatus::Player1Turn,
            player_num: 1,
            board: Board::try_from(rows.iter().map(|r| r.to_string()).collect::<Vec<_>>())
                .unwrap(),
        }
    }

    #[test]
    fn grid_has_n_minus_one_lines_each_way() {
        for n in 1..=7 {
            let edge = 300.0;
            let mut s = RecordingSurface::new(edge);
            draw_grid(&mut s, n);
            assert_eq!(s.ops[0], Op::Clear);
            let segs = s.segments();
            let vertical: Vec<_> = segs.iter().filter(|(a, b)| a.0 == b.0).collect();
            let horizontal: Vec<_> = segs.iter().filter(|(a, b)| a.1 == b.1).collect();
            assert_eq!(vertical.len(), n - 1, "n = {}", n);
            assert_eq!(horizontal.len(), n - 1, "n = {}", n);
            for (a, b) in vertical {
                assert_eq!((a.1, b.1), (0.0, edge));
                assert!(a.0 > 0.0 && a.0 < edge);
            }
            for (a, b) in horizontal {
                assert_eq!((a.0, b.0), (0.0, edge));
                assert!(a.1 > 0.0 && a.1 < edge);
            }
        }
    }

    #[test]
    fn empty_board_only_clears() {
        let mut s = RecordingSurface::new(120.0);
        render(&mut s, &MatchState::default());
        assert_eq!(s.ops, vec![Op::Clear]);
    }

    #[test]
    fn marks_stay_inside_their_cell() {
        let edge = 301.0;
        let n = 3;
        let tile = tile_size(edge, n);
        for y in 0..n {
            for x in 0..n {
                let lo_x = x as f64 * tile;
                let lo_y = y as f64 * tile;
                let inside = |px: f64, py: f64| {
                    px >= lo_x && px < lo_x + tile && py >= lo_y && py < lo_y + tile
                };

                let mut s = RecordingSurface::new(edge);
                draw_mark(&mut s, tile, x, y, Cell::Cross);
                let segs = s.segments();
                assert_eq!(segs.len(), 2);
                for (a, b) in segs {
                    assert!(inside(a.0, a.1) && inside(b.0, b.1));
                }

                let mut s = RecordingSurface::new(edge);
                draw_mark(&mut s, tile, x, y, Cell::Circle);
                let arcs: Vec<_> = s
                    .ops
                    .iter()
                    .filter_map(|op| match *op {
                        Op::Arc(cx, cy, r) => Some((cx, cy, r)),
                        _ => None,
                    })
                    .collect();
                assert_eq!(arcs.len(), 1);
                let (cx, cy, r) = arcs[0];
                assert!((r - tile * 0.4).abs() < 1e-9);
                assert!(inside(cx - r, cy - r) && inside(cx + r, cy + r));
            }
        }
    }

    #[test]
    fn empty_cells_draw_nothing() {
        let mut s = RecordingSurface::new(90.0);
        draw_mark(&mut s, 30.0, 1, 1, Cell::Empty);
        assert!(s.ops.is_empty());
    }

    #[test]
    fn render_draws_grid_then_each_mark() {
        let mut s = RecordingSurface::new(300.0);
        render(&mut s, &state_with(&["x*o", "***", "**x"]));
        let arcs = s.ops.iter().filter(|op| matches!(op, Op::Arc(..))).count();
        // one stroke for the grid, one per mark
        let strokes = s.ops.iter().filter(|op| **op == Op::Stroke).count();
        assert_eq!(arcs, 1);
        assert_eq!(strokes, 4);
        assert_eq!(s.ops[0], Op::Clear);
        assert_eq!(s.ops.iter().filter(|op| **op == Op::Clear).count(), 1);
    }

    #[test]
    fn identical_state_redraws_identically() {
        let state = state_with(&["xo*", "*x*", "o*o"]);
        let mut first = RecordingSurface::new(240.0);
        let mut second = RecordingSurface::new(240.0);
        render(&mut first, &state);
        render(&mut second, &state.clone());
        assert_eq!(first.ops, second.ops);
    }

    #[test]
    fn canvas_edge_uses_smaller_dimension() {
        assert_eq!(canvas_edge(1000.0, 800.0, 0.6), 480);
        assert_eq!(canvas_edge(500.0, 900.0, 0.6), 300);
        assert_eq!(canvas_edge(333.0, 900.0, 0.6), 199);
        assert_eq!(canvas_edge(-5.0, 10.0, 0.6), 0);
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod browser_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn canvas(edge: u32) -> HtmlCanvasElement {
        let document = web_sys::window().unwrap().document().unwrap();
        let canvas: HtmlCanvasElement = document
            .create_element("canvas")
            .unwrap()
            .dyn_into()
            .unwrap();
        canvas.set_width(edge);
        canvas.set_height(edge);
        canvas
    }

    #[wasm_bindgen_test]
    fn surface_edge_is_canvas_width() {
        let surface = Canvas2dSurface::from_canvas(&canvas(90)).unwrap();
        assert_eq!(surface.edge(), 90.0);
    }

    #[wasm_bindgen_test]
    fn rejected_arc_is_logged_not_fatal() {
        let mut surface = Canvas2dSurface::from_canvas(&canvas(90)).unwrap();
        // negative radius makes the context throw IndexSizeError
        surface.begin_path();
        surface.arc(10.0, 10.0, -1.0, 0.0, 2.0 * PI);
        surface.stroke();
        surface.close_path();
        draw_mark(&mut surface, 30.0, 1, 1, Cell::Circle);
    }
}
