pub mod lookup;
pub mod repl;

pub use lookup::{format_appointment, run_lookup};
pub use repl::run_repl_mode;
