//! 코덱 / 리포터 설정

use serde::{Deserialize, Serialize};

use crate::{HEADER_SIZE, IP_HEADER_SIZE, MTU, UDP_HEADER_SIZE};

/// IPv6 고정 헤더 크기
const IPV6_HEADER_SIZE: usize = 40;

/// 인코딩 시 크기 제한 정책
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SizePolicy {
    /// 데이터그램 용량을 넘으면 encode가 실패
    #[default]
    Enforce,

    /// 검사하지 않음 (호출자 책임)
    Unchecked,
}

/// 코덱 설정
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// 링크 MTU (바이트)
    pub mtu: usize,

    /// IP 헤더 크기
    pub ip_header_size: usize,

    /// UDP 헤더 크기
    pub udp_header_size: usize,

    /// 크기 제한 정책
    pub size_policy: SizePolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self::ethernet()
    }
}

impl Config {
    /// 새 설정 생성
    pub fn new() -> Self {
        Self::default()
    }

    /// 이더넷 + IPv4 (MTU 1500, 데이터그램 1472)
    pub fn ethernet() -> Self {
        Self {
            mtu: MTU,
            ip_header_size: IP_HEADER_SIZE,
            udp_header_size: UDP_HEADER_SIZE,
            size_policy: SizePolicy::Enforce,
        }
    }

    /// 이더넷 + IPv6 (데이터그램 1452)
    pub fn ipv6() -> Self {
        Self {
            ip_header_size: IPV6_HEADER_SIZE,
            ..Self::ethernet()
        }
    }

    /// 크기 검사 없음
    pub fn unchecked() -> Self {
        Self {
            size_policy: SizePolicy::Unchecked,
            ..Self::ethernet()
        }
    }

    /// 인코딩된 패킷 하나가 넘을 수 없는 크기
    pub fn datagram_capacity(&self) -> usize {
        self.mtu
            .saturating_sub(self.ip_header_size)
            .saturating_sub(self.udp_header_size)
    }

    /// 패킷 헤더를 뺀 실제 페이로드 한도
    pub fn max_payload_size(&self) -> usize {
        self.datagram_capacity().saturating_sub(HEADER_SIZE)
    }
}

/// 리포터 설정
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReporterConfig {
    /// 출력 여부
    pub enabled: bool,

    /// ANSI 색상 사용 (파일로 리다이렉트할 때는 끔)
    pub colorize: bool,

    /// 타임스탬프 prefix
    pub timestamps: bool,
}

impl Default for ReporterConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            colorize: true,
            timestamps: true,
        }
    }
}

impl ReporterConfig {
    /// 색상/타임스탬프 없는 평문 출력 (테스트, 로그 파일용)
    pub fn plain() -> Self {
        Self {
            enabled: true,
            colorize: false,
            timestamps: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{MAX_DATA_SIZE, MAX_PAYLOAD_SIZE};

    #[test]
    fn test_default_bounds() {
        let config = Config::default();
        assert_eq!(config.datagram_capacity(), MAX_DATA_SIZE);
        assert_eq!(config.max_payload_size(), MAX_PAYLOAD_SIZE);
        assert_eq!(config.max_payload_size(), 1467);
        assert_eq!(config.size_policy, SizePolicy::Enforce);
    }

    #[test]
    fn test_presets() {
        assert_eq!(Config::ipv6().datagram_capacity(), 1452);
        assert_eq!(Config::unchecked().size_policy, SizePolicy::Unchecked);
    }

    #[test]
    fn test_tiny_mtu_saturates() {
        let config = Config {
            mtu: 10,
            ..Config::ethernet()
        };
        assert_eq!(config.datagram_capacity(), 0);
        assert_eq!(config.max_payload_size(), 0);
    }

    #[test]
    fn test_serde_roundtrip() {
        let json = serde_json::to_string(&Config::ipv6()).unwrap();
        let restored: Config = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, Config::ipv6());

        let json = serde_json::to_string(&ReporterConfig::plain()).unwrap();
        let restored: ReporterConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, ReporterConfig::plain());
    }
}
