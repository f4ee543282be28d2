pub mod input;
pub mod session;
pub mod sync;

pub use input::click_action;
pub use session::ClientSession;
pub use sync::{PollControl, SyncLoop};
