pub mod extractors;
pub mod jwt;
pub mod password;
pub mod token;

pub use extractors::Requester;
pub use jwt::JwtProvider;
pub use password::{gen_salt, Hasher, Sha256Hasher};
pub use token::{Token, TokenError, TokenPayload, TokenProvider};
