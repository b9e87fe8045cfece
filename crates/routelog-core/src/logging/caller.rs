//! Caller tags
//!
//! Rust has no cheap runtime stack walk, so the caller is captured at the call
//! site by the `caller!` macro from the enclosing function's path.

use std::any::type_name;

#[doc(hidden)]
pub const MARKER: &str = "__routelog_here";

#[doc(hidden)]
pub fn type_name_of<T>(_: T) -> &'static str {
    type_name::<T>()
}

/// Turn `crate::module::Type::method::__routelog_here` into
/// `crate::module::Type.method`.
///
/// Closure segments are dropped so a call inside a closure or async block is
/// attributed to the enclosing function.
pub fn from_type_name(path: &str) -> String {
    let path = path
        .strip_suffix(MARKER)
        .map(|p| p.trim_end_matches("::"))
        .unwrap_or(path);

    let segments: Vec<&str> = path
        .split("::")
        .filter(|s| !s.is_empty() && *s != "{{closure}}")
        .collect();

    match segments.split_last() {
        Some((name, scope)) if !scope.is_empty() => format!("{}.{}", scope.join("::"), name),
        Some((name, _)) => name.to_string(),
        None => String::new(),
    }
}

/// Caller tag of the enclosing function, as `<scope>.<function>`
///
/// ```
/// mod server {
///     pub fn handle() -> String {
///         routelog_core::caller!()
///     }
/// }
/// assert!(server::handle().ends_with("server.handle"));
/// ```
#[macro_export]
macro_rules! caller {
    () => {{
        fn __routelog_here() {}
        $crate::logging::caller::from_type_name($crate::logging::caller::type_name_of(__routelog_here))
    }};
}
