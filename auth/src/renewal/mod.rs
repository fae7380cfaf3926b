pub mod errors;
pub mod generator;
pub mod ports;
pub mod record;

pub use errors::RenewalTokenError;
pub use generator::generate;
pub use ports::RenewalTokenStore;
pub use record::RenewalTokenRecord;
pub use record::RenewalTokenStatus;
pub use record::DEFAULT_RENEWAL_TOKEN_TTL_DAYS;
