pub mod fingerprint;
pub mod logger;
