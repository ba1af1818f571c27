//! 공통 유틸리티 함수 모듈
//!
//! - [`string_utils`] - 난수 토큰 생성, SHA-256 해시, 로그용 이메일 마스킹

pub mod string_utils;
