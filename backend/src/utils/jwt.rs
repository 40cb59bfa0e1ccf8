use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde_json::Value;

/// Checks the HS256 signature and `exp` of a credential. Claims are not
/// interpreted here; routing still goes through the structural decoder.
pub fn verify_signature(token: &str, secret: &str) -> Result<(), jsonwebtoken::errors::Error> {
    let validation = Validation::new(Algorithm::HS256);
    decode::<Value>(
        token,
        &DecodingKey::from_secret(secret.as_ref()),
        &validation,
    )?;
    Ok(())
}

#[cfg(test)]
pub(crate) fn sign_for_test(claims: &Value, secret: &str) -> String {
    use jsonwebtoken::{encode, EncodingKey, Header};
    encode(
        &Header::new(Algorithm::HS256),
        claims,
        &EncodingKey::from_secret(secret.as_ref()),
    )
    .expect("sign token")
}
