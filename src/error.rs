//! 에러 타입 정의

use thiserror::Error;

/// SFP 패킷 에러 타입
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO 에러: {0}")]
    Io(#[from] std::io::Error),

    /// 입력이 5바이트 헤더보다 짧음
    #[error("잘린 입력: {len}바이트 (헤더 최소 {min}바이트)")]
    TruncatedInput { len: usize, min: usize },

    /// 인코딩 결과가 데이터그램 용량을 넘음
    #[error("데이터그램 크기 초과: {size}바이트 (최대 {max}바이트)")]
    OversizeDatagram { size: usize, max: usize },
}

impl Error {
    /// 디코딩 실패 여부 (수신측에서 패킷만 버리고 계속할 수 있는 에러)
    pub fn is_malformed(&self) -> bool {
        matches!(self, Error::TruncatedInput { .. })
    }
}

/// Result 타입 별칭
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = Error::TruncatedInput { len: 3, min: 5 };
        assert_eq!(err.to_string(), "잘린 입력: 3바이트 (헤더 최소 5바이트)");
        assert!(err.is_malformed());

        let err = Error::OversizeDatagram { size: 1473, max: 1472 };
        assert!(err.to_string().contains("1473"));
        assert!(!err.is_malformed());
    }

    #[test]
    fn test_io_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::AddrInUse, "busy");
        let err: Error = io.into();
        assert!(matches!(err, Error::Io(_)));
    }
}
