pub mod event;
pub mod recycling_point;
pub mod user;

/// Treats absent, empty and whitespace-only values alike.
pub(crate) fn required(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
