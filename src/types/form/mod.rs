//! Request bodies and response views of the HTTP surface.
mod auth;
mod boats;

pub use auth::{CsrfTokenView, IdentityView, LoginForm, MessageView};
pub use boats::{BoatField, BoatForm, BoatInput, ListBoats};
