//! 패킷 정의
//!
//! - Flags: ACK/EOF/FIN 비트필드 (1바이트)
//! - Packet: 시퀀스 번호 + 플래그 + raw 페이로드
//!
//! 헤더는 고정 5바이트 prefix, 페이로드는 헤더 뒤에 붙는 raw suffix.
//! 페이로드를 고정폭 구조체 필드로 넣으면 1바이트로 잘리므로 절대 그렇게 하지 않음.

use std::fmt;

use bytes::{BufMut, Bytes, BytesMut};

use crate::{Error, Result, HEADER_SIZE};

/// 플래그 바이트
///
/// 각 비트는 서로 독립적. 구조적으로 금지된 조합은 없음.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Flags(u8);

impl Flags {
    /// bit 0: 확인 응답
    pub const ACK: u8 = 0b0000_0001;
    /// bit 1: 스트림 마지막 데이터
    pub const EOF: u8 = 0b0000_0010;
    /// bit 2: 송신 종료
    pub const FIN: u8 = 0b0000_0100;
    /// 정의된 비트 전체
    pub const ALL: u8 = Self::ACK | Self::EOF | Self::FIN;

    pub fn new(ack: bool, eof: bool, fin: bool) -> Self {
        Self(u8::from(ack) | (u8::from(eof) << 1) | (u8::from(fin) << 2))
    }

    /// 예약 비트(3-7)는 버림
    pub fn from_bits_truncate(bits: u8) -> Self {
        Self(bits & Self::ALL)
    }

    pub fn bits(self) -> u8 {
        self.0
    }

    pub fn ack(self) -> bool {
        self.0 & Self::ACK != 0
    }

    pub fn eof(self) -> bool {
        self.0 & Self::EOF != 0
    }

    pub fn fin(self) -> bool {
        self.0 & Self::FIN != 0
    }
}

/// 이름 있는 생성자 프리셋
///
/// 별도 타입이 아니라 모두 같은 [`Packet`] 형태로 투영됨.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PacketKind {
    /// 데이터 세그먼트 (ACK/FIN 없음)
    Data,
    /// 확인 응답
    Ack,
    /// 송신 종료
    Fin,
    /// 종료 확인 (ACK + FIN)
    FinAck,
}

impl PacketKind {
    /// 이 프리셋이 세우는 (ack, fin) 비트
    pub fn flags(self, eof: bool) -> Flags {
        match self {
            PacketKind::Data => Flags::new(false, eof, false),
            PacketKind::Ack => Flags::new(true, eof, false),
            PacketKind::Fin => Flags::new(false, eof, true),
            PacketKind::FinAck => Flags::new(true, eof, true),
        }
    }
}

impl fmt::Display for PacketKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PacketKind::Data => "Data",
            PacketKind::Ack => "ACK",
            PacketKind::Fin => "FIN",
            PacketKind::FinAck => "FIN-ACK",
        };
        f.write_str(name)
    }
}

/// 패킷 (데이터그램 하나)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Packet {
    /// 시퀀스 번호 (순서 제약은 상위 계층 몫)
    pub sequence: u32,

    /// ACK 플래그
    pub ack: bool,

    /// EOF 플래그
    pub eof: bool,

    /// FIN 플래그
    pub fin: bool,

    /// 페이로드 (제어 패킷은 빈 값)
    pub data: Bytes,
}

impl Packet {
    /// 플래그를 직접 지정해 생성
    pub fn new(sequence: u32, flags: Flags, data: impl Into<Bytes>) -> Self {
        Self {
            sequence,
            ack: flags.ack(),
            eof: flags.eof(),
            fin: flags.fin(),
            data: data.into(),
        }
    }

    /// 데이터 패킷
    pub fn data(sequence: u32, eof: bool, data: impl Into<Bytes>) -> Self {
        Self::new(sequence, PacketKind::Data.flags(eof), data)
    }

    /// ACK 패킷
    pub fn ack(sequence: u32) -> Self {
        Self::new(sequence, PacketKind::Ack.flags(false), Bytes::new())
    }

    /// FIN 패킷
    pub fn fin(sequence: u32) -> Self {
        Self::new(sequence, PacketKind::Fin.flags(false), Bytes::new())
    }

    /// FIN-ACK 패킷
    pub fn fin_ack(sequence: u32) -> Self {
        Self::new(sequence, PacketKind::FinAck.flags(false), Bytes::new())
    }

    /// 프리셋으로 생성. Data 외에는 페이로드가 비어 있음
    pub fn from_kind(kind: PacketKind, sequence: u32) -> Self {
        match kind {
            PacketKind::Data => Self::data(sequence, false, Bytes::new()),
            PacketKind::Ack => Self::ack(sequence),
            PacketKind::Fin => Self::fin(sequence),
            PacketKind::FinAck => Self::fin_ack(sequence),
        }
    }

    pub fn flags(&self) -> Flags {
        Flags::new(self.ack, self.eof, self.fin)
    }

    /// ACK/FIN 비트로 분류 (EOF는 분류에 영향 없음)
    pub fn kind(&self) -> PacketKind {
        match (self.ack, self.fin) {
            (true, true) => PacketKind::FinAck,
            (false, true) => PacketKind::Fin,
            (true, false) => PacketKind::Ack,
            (false, false) => PacketKind::Data,
        }
    }

    /// 인코딩 후 크기
    pub fn encoded_len(&self) -> usize {
        HEADER_SIZE + self.data.len()
    }

    /// 버퍼 뒤에 와이어 포맷으로 기록
    pub fn encode_into(&self, buf: &mut BytesMut) {
        buf.reserve(self.encoded_len());
        buf.put_u32(self.sequence);
        buf.put_u8(self.flags().bits());
        buf.put_slice(&self.data);
    }

    /// 바이트로 직렬화 (크기 제한 검사 없음, [`crate::PacketCodec`] 참고)
    pub fn to_bytes(&self) -> Bytes {
        let mut buf = BytesMut::with_capacity(self.encoded_len());
        self.encode_into(&mut buf);
        buf.freeze()
    }

    /// 바이트에서 역직렬화
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < HEADER_SIZE {
            return Err(Error::TruncatedInput {
                len: bytes.len(),
                min: HEADER_SIZE,
            });
        }

        let sequence = u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
        let flags = Flags::from_bits_truncate(bytes[4]);
        let data = Bytes::copy_from_slice(&bytes[HEADER_SIZE..]);

        Ok(Self::new(sequence, flags, data))
    }

    /// 이미 소유한 버퍼에서 복사 없이 역직렬화
    pub fn from_shared(bytes: Bytes) -> Result<Self> {
        if bytes.len() < HEADER_SIZE {
            return Err(Error::TruncatedInput {
                len: bytes.len(),
                min: HEADER_SIZE,
            });
        }

        let sequence = u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
        let flags = Flags::from_bits_truncate(bytes[4]);

        Ok(Self::new(sequence, flags, bytes.slice(HEADER_SIZE..)))
    }
}

impl fmt::Display for Packet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind() {
            PacketKind::Data => write!(
                f,
                "Data packet (sequence: {}, eof: {}, data: {} bytes)",
                self.sequence,
                self.eof,
                self.data.len()
            ),
            kind if self.data.is_empty() => {
                write!(f, "{} packet (sequence: {})", kind, self.sequence)
            }
            kind => write!(
                f,
                "{} packet (sequence: {}, data: {} bytes)",
                kind,
                self.sequence,
                self.data.len()
            ),
        }
    }
}
