//! # 문자열 유틸리티
//!
//! 난수 토큰 생성, 해시, 로그용 마스킹 등 공통 문자열 처리 함수들입니다.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use rand::RngCore;
use rand::rngs::OsRng;
use sha2::{Digest, Sha256};

/// 로그인 코드 / sync code 기본 바이트 수 (256비트)
pub const DEFAULT_TOKEN_BYTES: usize = 32;

/// OS 난수원으로 `num_bytes` 바이트를 만들어 URL-safe base64(패딩 없음)로 인코딩합니다.
///
/// ```rust,ignore
/// let code = generate_random_token(32);
/// assert_eq!(code.len(), 43);
/// ```
pub fn generate_random_token(num_bytes: usize) -> String {
    let mut bytes = vec![0u8; num_bytes];
    OsRng.fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}

/// 입력의 SHA-256 다이제스트를 소문자 16진수로 반환합니다.
pub fn sha256_hex(input: &str) -> String {
    format!("{:x}", Sha256::digest(input.as_bytes()))
}

/// 로그 출력용 이메일 마스킹: `alice@example.com` → `a***@example.com`
pub fn mask_email(email: &str) -> String {
    match email.split_once('@') {
        Some((local, domain)) => {
            let first = local.chars().next().map(String::from).unwrap_or_default();
            format!("{}***@{}", first, domain)
        }
        None => "***".to_string(),
    }
}
