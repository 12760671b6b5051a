//! UDP 소켓 어댑터
//!
//! tokio `UdpSocket` + [`PacketCodec`]. 데이터그램 하나 = 패킷 하나.
//! 핸드쉐이크, 윈도우, 재전송 타이머는 없음. 상위 계층에서 구현.

use std::net::SocketAddr;

use tokio::net::{ToSocketAddrs, UdpSocket};
use tracing::{debug, warn};

use crate::{Config, Error, Packet, PacketCodec, Result, SizePolicy};

/// UDP 데이터그램 최대 크기 (길이 필드 16비트)
const MAX_DATAGRAM_SIZE: usize = u16::MAX as usize;

/// 패킷 단위 UDP 소켓
#[derive(Debug)]
pub struct PacketSocket {
    socket: UdpSocket,
    codec: PacketCodec,
}

impl PacketSocket {
    /// 주소에 바인딩
    pub async fn bind(addr: impl ToSocketAddrs, config: Config) -> Result<Self> {
        let socket = UdpSocket::bind(addr).await?;
        Ok(Self::from_socket(socket, config))
    }

    /// 이미 열린 소켓 사용
    pub fn from_socket(socket: UdpSocket, config: Config) -> Self {
        Self {
            socket,
            codec: PacketCodec::new(config),
        }
    }

    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.socket.local_addr()?)
    }

    pub fn codec(&self) -> &PacketCodec {
        &self.codec
    }

    /// 패킷 전송
    pub async fn send_to(&self, packet: &Packet, target: SocketAddr) -> Result<usize> {
        let bytes = self.codec.encode(packet)?;
        let sent = self.socket.send_to(&bytes, target).await?;

        debug!(
            "패킷 전송: {} -> {} ({}바이트)",
            packet, target, sent
        );
        Ok(sent)
    }

    /// 데이터그램 하나 수신 후 디코딩
    ///
    /// 디코딩 실패는 에러로 돌려줌. 계속 받으려면 [`Self::recv_valid_from`] 사용.
    pub async fn recv_from(&self) -> Result<(Packet, SocketAddr)> {
        // 커널이 잘라내지 않도록 UDP 최대 크기로 받고, 실제 길이로 검사
        let mut buf = vec![0u8; MAX_DATAGRAM_SIZE];
        let (len, from) = self.socket.recv_from(&mut buf).await?;

        if self.codec.config().size_policy == SizePolicy::Enforce {
            let max = self.codec.config().datagram_capacity();
            if len > max {
                return Err(Error::OversizeDatagram { size: len, max });
            }
        }

        let packet = self.codec.decode(&buf[..len])?;
        debug!("패킷 수신: {} <- {}", packet, from);
        Ok((packet, from))
    }

    /// 잘못된 데이터그램은 버리고 다음 유효한 패킷까지 대기
    pub async fn recv_valid_from(&self) -> Result<(Packet, SocketAddr)> {
        loop {
            match self.recv_from().await {
                Ok(received) => return Ok(received),
                Err(Error::Io(e)) => return Err(Error::Io(e)),
                Err(e) => warn!("잘못된 데이터그램 버림: {}", e),
            }
        }
    }
}
