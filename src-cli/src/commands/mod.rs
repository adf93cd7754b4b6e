//! Command handlers for `passgen`.
//!
//! Each handler binds its arguments to a `passgen-core` request, calls the
//! engine, and renders the result. Generation logic never lives here.

pub mod random_number;
pub mod random_password;

use serde::Serialize;

/// Output DTO shared by every command: `{"value": ...}` in JSON mode.
///
/// Borrows the value so a secret can be rendered without an extra copy.
#[derive(Serialize)]
pub struct ValueOutput<'a, T: ?Sized + Serialize> {
    /// The generated number or password.
    pub value: &'a T,
}
