//! # SFP Packet
//!
//! UDP 위에서 신뢰성 전송 스타일의 제어/데이터 세그먼트를 실어 나르는 패킷 코덱
//!
//! ## 핵심 특징
//! - **고정 헤더**: 시퀀스 번호(4) + 플래그(1) = 5바이트
//! - **raw 페이로드**: 길이 prefix 없이 헤더 뒤에 그대로 붙음
//! - **상태 없음**: encode/decode는 순수 함수, 어느 스레드에서든 호출 가능
//! - **MTU 기반 크기 제한**: 이더넷 MTU 1500 기준 데이터그램 1472바이트
//!
//! ## 와이어 포맷
//! ```text
//! offset 0..3  : sequence  (u32, big-endian)
//! offset 4     : flags     (bit0=ACK, bit1=EOF, bit2=FIN, bit3-7 예약=0)
//! offset 5..N  : data      (raw bytes, 길이 = 전체 - 5)
//! ```
//!
//! 체크섬 필드는 없음. 전송 중 비트 오류는 이 계층에서 감지되지 않음.

pub mod codec;
pub mod config;
pub mod error;
pub mod packet;
pub mod report;
pub mod socket;

pub use codec::PacketCodec;
pub use config::{Config, ReporterConfig, SizePolicy};
pub use error::{Error, Result};
pub use packet::{Flags, Packet, PacketKind};
pub use report::{Level, Reporter};
pub use socket::PacketSocket;

/// 이더넷 기본 MTU (바이트)
pub const MTU: usize = 1500;

/// IPv4 헤더 크기 (옵션 없음)
pub const IP_HEADER_SIZE: usize = 20;

/// UDP 헤더 크기
pub const UDP_HEADER_SIZE: usize = 8;

/// 데이터그램 하나에 실을 수 있는 최대 바이트 (헤더 포함 인코딩 결과 기준)
pub const MAX_DATA_SIZE: usize = MTU - IP_HEADER_SIZE - UDP_HEADER_SIZE; // 1472

/// 패킷 헤더 크기: sequence(4) + flags(1)
pub const HEADER_SIZE: usize = 5;

/// 패킷 하나에 실을 수 있는 최대 페이로드
pub const MAX_PAYLOAD_SIZE: usize = MAX_DATA_SIZE - HEADER_SIZE; // 1467
