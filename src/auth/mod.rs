pub mod guard;
pub mod sign_in;

pub use guard::{check_access, Access};
pub use sign_in::{sign_in, SignInForm, SignInOutcome};
