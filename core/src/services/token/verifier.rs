//! Access-token verification against a published key set
//!
//! This is the check downstream services run; the issuer never re-validates
//! its own output.

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, decode_header, Algorithm, DecodingKey, Validation};

use crate::domain::entities::token::AccessClaims;
use crate::domain::value_objects::PublishedKeySet;
use crate::errors::TokenError;

/// Verifies `token` with the key named by its `kid` header
///
/// # Returns
///
/// * `Ok(AccessClaims)` - signature and expiry are valid
/// * `Err(TokenError::UnknownKeyId)` - no key in `key_set` matches the header
/// * `Err(TokenError::Expired)` - the token is past `exp`
/// * `Err(TokenError::InvalidSignature)` - the signature does not verify
/// * `Err(TokenError::InvalidFormat)` - the token is malformed
pub fn verify_access_token(
    token: &str,
    key_set: &PublishedKeySet,
) -> Result<AccessClaims, TokenError> {
    let header = decode_header(token).map_err(|_| TokenError::InvalidFormat)?;
    if header.alg != Algorithm::RS256 {
        return Err(TokenError::InvalidFormat);
    }
    let kid = header.kid.ok_or(TokenError::UnknownKeyId)?;
    let jwk = key_set.find(&kid).ok_or(TokenError::UnknownKeyId)?;

    let decoding_key =
        DecodingKey::from_rsa_components(&jwk.n, &jwk.e).map_err(|_| TokenError::InvalidFormat)?;

    let mut validation = Validation::new(Algorithm::RS256);
    validation.validate_exp = true;
    validation.set_required_spec_claims(&["exp", "sub"]);

    decode::<AccessClaims>(token, &decoding_key, &validation)
        .map(|data| data.claims)
        .map_err(|e| match e.kind() {
            ErrorKind::ExpiredSignature => TokenError::Expired,
            ErrorKind::InvalidSignature => TokenError::InvalidSignature,
            _ => TokenError::InvalidFormat,
        })
}
