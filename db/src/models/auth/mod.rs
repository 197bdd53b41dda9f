pub use self::default_token_issuer::*;
pub use self::qr_claims::*;
pub use self::token_issuer::*;

mod default_token_issuer;
mod qr_claims;
mod token_issuer;
