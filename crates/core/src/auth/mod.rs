//! OAuth token lifecycle and sign-in

pub mod ports;
pub mod signin;
pub mod token_manager;

pub use ports::{GoogleTokenClient, OAuthProfile};
pub use signin::SignInService;
pub use token_manager::TokenManager;
