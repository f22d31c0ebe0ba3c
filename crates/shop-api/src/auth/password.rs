//! 비밀번호 해싱 유틸리티.
//!
//! Argon2id 기반 비밀번호 해싱 및 검증.
//!
//! 입력은 해싱 전에 72바이트로 절단됩니다. 원 시스템이 사용하던 해시
//! 프리미티브의 한계를 명시적인 정책으로 유지한 것으로, 암묵적 절단으로
//! 인한 검증 불일치를 막습니다.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

/// 해싱 전에 적용되는 비밀번호 최대 길이 (바이트).
pub const MAX_PASSWORD_BYTES: usize = 72;

/// 비밀번호 처리 에러.
#[derive(Debug, thiserror::Error)]
pub enum PasswordError {
    #[error("비밀번호가 비어 있습니다")]
    EmptyPassword,
    #[error("비밀번호 해싱 실패")]
    HashingFailed,
}

/// 72바이트 한도로 절단합니다. UTF-8 문자 경계를 깨지 않습니다.
fn truncate_password(password: &str) -> &str {
    if password.len() <= MAX_PASSWORD_BYTES {
        return password;
    }

    let mut end = MAX_PASSWORD_BYTES;
    while !password.is_char_boundary(end) {
        end -= 1;
    }
    &password[..end]
}

/// 비밀번호 해싱.
///
/// Argon2id 알고리즘을 사용하며 호출마다 랜덤 솔트가 생성됩니다.
/// 같은 비밀번호를 두 번 해싱해도 결과는 다릅니다.
///
/// # Errors
///
/// 빈 비밀번호는 `PasswordError::EmptyPassword`로 거부됩니다.
pub fn hash_password(password: &str) -> Result<String, PasswordError> {
    if password.is_empty() {
        return Err(PasswordError::EmptyPassword);
    }

    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    let hash = argon2
        .hash_password(truncate_password(password).as_bytes(), &salt)
        .map_err(|_| PasswordError::HashingFailed)?;

    Ok(hash.to_string())
}

/// 비밀번호 검증.
///
/// 검증 실패 사유(해시 형식 오류, 빈 입력, 불일치)를 구분하지 않고
/// 모두 false를 반환합니다. 호출자에게 오라클을 제공하지 않습니다.
pub fn verify_password(password: &str, hash: &str) -> bool {
    if password.is_empty() || hash.is_empty() {
        return false;
    }

    let Ok(parsed_hash) = PasswordHash::new(hash) else {
        return false;
    };

    Argon2::default()
        .verify_password(truncate_password(password).as_bytes(), &parsed_hash)
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_hash_and_verify_password() {
        let password = "TestPassword123!";
        let hash = hash_password(password).unwrap();

        // 해시 형식 확인 (argon2id)
        assert!(hash.starts_with("$argon2id$"));

        assert!(verify_password(password, &hash));
        assert!(!verify_password("WrongPassword123!", &hash));
    }

    #[test]
    fn test_same_password_different_hashes() {
        let hash1 = hash_password("Password1").unwrap();
        let hash2 = hash_password("Password1").unwrap();

        // 솔트가 다르므로 해시가 다름
        assert_ne!(hash1, hash2);

        // 하지만 둘 다 검증 가능
        assert!(verify_password("Password1", &hash1));
        assert!(verify_password("Password1", &hash2));
    }

    #[test]
    fn test_empty_password_rejected() {
        assert!(matches!(
            hash_password(""),
            Err(PasswordError::EmptyPassword)
        ));
    }

    #[test]
    fn test_verify_never_errors() {
        let hash = hash_password("Password1").unwrap();

        assert!(!verify_password("", &hash));
        assert!(!verify_password("Password1", ""));
        assert!(!verify_password("Password1", "not-a-valid-hash"));
    }

    #[test]
    fn test_long_password_truncated_at_72_bytes() {
        // 80바이트 비밀번호는 앞 72바이트로 검증된다
        let long: String = "a".repeat(80);
        let prefix: String = "a".repeat(72);
        let other: String = "a".repeat(71);

        let hash = hash_password(&long).unwrap();
        assert!(verify_password(&prefix, &hash));
        assert!(!verify_password(&other, &hash));
    }

    #[test]
    fn test_unicode_password() {
        let password = "한글비밀번호123";
        let hash = hash_password(password).unwrap();
        assert!(verify_password(password, &hash));
    }

    proptest! {
        #[test]
        fn prop_truncation_respects_char_boundaries(s in "\\PC{0,40}") {
            // 멀티바이트 문자가 72바이트 경계에 걸려도 패닉하지 않아야 함
            let padded = format!("{}{}", "한".repeat(24), s);
            let truncated = truncate_password(&padded);
            prop_assert!(truncated.len() <= MAX_PASSWORD_BYTES);
            prop_assert!(padded.starts_with(truncated));
        }
    }
}
