//! # Account Service Backend
//!
//! 인증 계정(Identity), 프로필, 사용자 디렉터리 세 서비스에 걸친 계정 생성과
//! 인증을 조율하는 오케스트레이션 서비스입니다.
//!
//! ## 주요 기능
//!
//! - **회원가입 사가**: 디렉터리 → 인증 계정 → 프로필 순서로 생성하고 실패 시 역순 보상
//! - **일회용 로그인 코드**: Redis Lua 스크립트 기반의 원자적 compare-and-delete
//! - **OAuth 로그인**: Google / Naver / Kakao, 계정이 없으면 원격 회원가입 API로 자동 가입
//! - **이메일 인증**: 슬라이딩 윈도 발송 제한, 서명 토큰 + 일회용 코드 이중 확인
//!
//! ## 모듈 구조
//!
//! ```text
//! src/
//! ├── core/          - AppError, ServiceLocator
//! ├── config/        - 환경 변수 기반 설정
//! ├── db/            - MongoDB 연결
//! ├── caching/       - Redis 클라이언트 (코드 저장, 이벤트 스트림)
//! ├── domain/        - 엔티티, 원격 모델, DTO
//! ├── repositories/  - 저장소와 원격 서비스 어댑터
//! ├── services/      - 사가, 로그인, 이메일 인증, 사용자 관리
//! ├── handlers/      - HTTP 핸들러
//! ├── middlewares/   - 게이트웨이 사용자 추출기
//! ├── routes/        - 라우트 구성
//! └── utils/         - 난수 토큰, 해시, 마스킹
//! ```

pub mod core;
pub mod config;
pub mod db;
pub mod caching;
pub mod domain;
pub mod repositories;
pub mod services;
pub mod utils;
pub mod routes;
pub mod handlers;
pub mod middlewares;

#[cfg(test)]
pub(crate) mod test_support;
