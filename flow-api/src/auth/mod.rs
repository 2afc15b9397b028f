mod extractor;
mod password;
mod router;
mod token;

pub use extractor::AuthUser;
pub use password::{hash_password, verify_password};
pub use router::router;
pub use token::{Claims, TokenError, TokenIssuer};
