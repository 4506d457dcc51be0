mod buffer;
mod cursor;
mod layout;
mod mode;
mod tab;
mod workspace;

pub use buffer::Buffer;
pub use cursor::Cursor;
pub use layout::{Rect, ScreenLayout};
pub use mode::Mode;
pub use tab::{TabError, Tabs};
pub use workspace::{Workspace, canvas_point};
