//! `bakeledger-auth`: demo-only local sign-in.
//!
//! There is no credential verification: a signed-in user is simply whatever identity
//! was last stored. This crate only holds the form rules and the stored-user shape;
//! persisting it is the caller's job.

pub mod form;
pub mod session;

pub use form::{FormErrors, MIN_PASSWORD_LEN, SignInForm, SignUpForm};
pub use session::LocalUser;
