use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use rand::rngs::OsRng;

use crate::errors::AppError;

/// Salted Argon2id hash in PHC string form.
pub fn hash_password(password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AppError::PasswordHash(e.to_string()))?
        .to_string();
    Ok(hash)
}

/// `Ok(false)` on mismatch. An unparseable stored hash is an error, not a mismatch.
pub fn verify_password(password: &str, stored_hash: &str) -> Result<bool, AppError> {
    let parsed =
        PasswordHash::new(stored_hash).map_err(|e| AppError::PasswordHash(e.to_string()))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

/// [`hash_password`] on the blocking pool, so a hash never stalls other requests.
pub async fn hash_password_blocking(password: String) -> Result<String, AppError> {
    tokio::task::spawn_blocking(move || hash_password(&password))
        .await
        .map_err(|e| AppError::PasswordHash(e.to_string()))?
}

/// [`verify_password`] on the blocking pool.
pub async fn verify_password_blocking(
    password: String,
    stored_hash: String,
) -> Result<bool, AppError> {
    tokio::task::spawn_blocking(move || verify_password(&password, &stored_hash))
        .await
        .map_err(|e| AppError::PasswordHash(e.to_string()))?
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn blocking_pool_variants_agree() {
        let hash = hash_password_blocking("s3cret".into()).await.unwrap();

        assert!(verify_password_blocking("s3cret".into(), hash.clone()).await.unwrap());
        assert!(!verify_password_blocking("S3cret".into(), hash.clone()).await.unwrap());
        assert!(verify_password("s3cret", &hash).unwrap());
        assert!(matches!(
            verify_password_blocking("s3cret".into(), "plain".into()).await,
            Err(AppError::PasswordHash(_))
        ));
    }

    #[test]
    fn hash_is_salted_and_verifiable() {
        let first = hash_password("p").unwrap();
        let second = hash_password("p").unwrap();

        assert_ne!(first, "p");
        assert_ne!(first, second);
        assert!(first.starts_with("$argon2id$"));
        assert!(verify_password("p", &first).unwrap());
        assert!(verify_password("p", &second).unwrap());
        assert!(!verify_password("P", &first).unwrap());
    }

    #[test]
    fn plaintext_in_store_is_rejected() {
        assert!(matches!(
            verify_password("p", "p"),
            Err(AppError::PasswordHash(_))
        ));
    }
}
