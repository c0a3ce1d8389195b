//! Stateless, signed, expiring password-reset tokens.
//!
//! A reset token binds exactly one account id to its issuance time under an
//! HMAC signature. Nothing is stored server-side: verification checks the
//! signature and then the elapsed time against the verifier's configured
//! window. Every rejection path returns the same uniform result, so callers
//! learn nothing about why a token was refused.

pub mod codec;
pub mod delivery;

pub use codec::ResetTokenCodec;
pub use delivery::{DeliveryError, LogDelivery, TokenDelivery};
