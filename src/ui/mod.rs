mod dashboard;
mod detail;
mod help;
mod modal;
mod pane;
mod sidebar;
mod tickets;

pub use dashboard::*;
pub use detail::*;
pub use help::*;
pub use modal::*;
pub use pane::*;
pub use sidebar::*;
pub use tickets::*;
