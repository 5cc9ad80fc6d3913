//! Google OAuth integration

pub mod google;

pub use google::GoogleOAuthClient;
