pub mod app;
pub mod board_canvas;
pub mod match_header;

pub use app::App;
