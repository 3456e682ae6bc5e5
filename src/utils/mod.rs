//! 공통 유틸리티 함수 모듈
//!
//! - [`string_utils`] - 필드 검증, 공백 정리, 라벨 정규화
//! - [`display_terminal`] - 기동 시 레지스트리 상태 출력

pub mod string_utils;
pub mod display_terminal;
