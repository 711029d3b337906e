//! Authentication domain: session state, credentials, and the auth API seam.

pub mod api;
pub mod model;
pub mod repository;
pub mod signal;
pub mod token;

pub use api::AuthApi;
pub use model::{
    CheckField, FieldExists, PasswordChange, ProfileUpdate, RegistrationForm, SessionPhase,
    StoredCredentials, UserProfile,
};
pub use repository::CredentialRepository;
pub use signal::{AuthSignal, auth_signal_channel};
pub use token::TokenCell;
