//! Line formatting
//!
//! - `Template`: the `%`-directive mini language for line layouts
//! - `stamp`: timestamp renderings shared with session file names

mod template;
pub mod stamp;

pub use template::{Template, CONSOLE_FORMAT, FILE_FORMAT, EXTRA_FORMAT};
