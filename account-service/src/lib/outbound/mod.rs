pub mod credentials;
pub mod repositories;

pub use credentials::AuthCredentialService;
