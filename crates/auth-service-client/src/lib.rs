//! Client side of the Taskdeck authentication service.
//!
//! This crate provides:
//! - The wire types shared with the service (`User`, `SessionRecord`, request bodies)
//! - The [`AuthService`] trait the session state machine consumes
//! - [`HttpAuthService`], a REST implementation over `reqwest`

mod error;
mod http;
mod service;
mod types;

pub use error::{ServiceError, ServiceResult};
pub use http::HttpAuthService;
pub use service::AuthService;
pub use types::{Credentials, PasswordChange, Registration, SessionRecord, User};
