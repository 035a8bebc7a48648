//! Command handlers, one module per command family.

mod explain;
mod listing;
mod misc;
mod passwd;
mod records;

pub use explain::handle_explain;
pub use listing::{handle_list, handle_query};
pub use misc::handle_completions;
pub use passwd::handle_passwd;
pub use records::{handle_add, handle_delete};
