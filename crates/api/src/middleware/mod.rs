//! The middleware chain wrapped around every route.
//!
//! Applied outermost first: [`crate::web::attach_values`], [`logger`],
//! [`errors`], request timeout, [`panics`], then [`auth`] on protected routes.

pub mod auth;
pub mod errors;
pub mod logger;
pub mod panics;
