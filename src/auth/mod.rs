pub mod middleware;
pub mod password;
pub mod token;

pub use middleware::auth_middleware;
pub use password::{hash_password, verify_password};
pub use token::{issue_token, verify_token, Claims, Principal, Role, TOKEN_COOKIE};
