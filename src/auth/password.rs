use bcrypt::{hash, verify, BcryptError};

/// Work factors bcrypt accepts.
pub const MIN_HASH_COST: u32 = 4;
pub const MAX_HASH_COST: u32 = 31;

/// Hash `password` into a bcrypt modular-crypt string (`$2b$<cost>$...`).
///
/// CPU-bound; async callers run it on the blocking pool.
pub fn hash_password(password: &str, cost: u32) -> Result<String, BcryptError> {
    hash(password, cost)
}

/// Check `password` against a stored bcrypt hash. A hash that does not parse is an error.
pub fn verify_password(password: &str, password_hash: &str) -> Result<bool, BcryptError> {
    verify(password, password_hash)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_uses_modular_crypt_format() {
        let password_hash = hash_password("open sesame", MIN_HASH_COST).unwrap();
        assert!(password_hash.starts_with("$2"));
        assert!(password_hash.contains(&format!("${:02}$", MIN_HASH_COST)));
    }

    #[test]
    fn correct_password_verifies() {
        let password_hash = hash_password("open sesame", MIN_HASH_COST).unwrap();
        assert!(verify_password("open sesame", &password_hash).unwrap());
        assert!(!verify_password("open sesame!", &password_hash).unwrap());
    }

    #[test]
    fn same_password_hashes_differently() {
        let a = hash_password("same", MIN_HASH_COST).unwrap();
        let b = hash_password("same", MIN_HASH_COST).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn malformed_hash_is_an_error() {
        assert!(verify_password("anything", "not-a-bcrypt-hash").is_err());
    }
}
