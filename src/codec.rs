//! 패킷 코덱
//!
//! 상태 없는 encode/decode. [`Config::size_policy`]에 따라 인코딩 크기를 검사함.
//! 디코딩은 헤더 길이만 검사하고 나머지는 전부 페이로드로 취급.

use bytes::{Bytes, BytesMut};

use crate::{Config, Error, Packet, Result, SizePolicy};

/// 패킷 코덱
#[derive(Debug, Clone, Default)]
pub struct PacketCodec {
    config: Config,
}

impl PacketCodec {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// 크기 정책 검사
    pub fn check_size(&self, packet: &Packet) -> Result<()> {
        if self.config.size_policy == SizePolicy::Unchecked {
            return Ok(());
        }

        let size = packet.encoded_len();
        let max = self.config.datagram_capacity();
        if size > max {
            return Err(Error::OversizeDatagram { size, max });
        }
        Ok(())
    }

    /// 패킷을 바이트로 인코딩
    pub fn encode(&self, packet: &Packet) -> Result<Bytes> {
        self.check_size(packet)?;
        Ok(packet.to_bytes())
    }

    /// 기존 버퍼 뒤에 인코딩 (실패하면 버퍼는 그대로)
    pub fn encode_into(&self, packet: &Packet, buf: &mut BytesMut) -> Result<()> {
        self.check_size(packet)?;
        packet.encode_into(buf);
        Ok(())
    }

    /// 바이트에서 패킷 디코딩
    pub fn decode(&self, raw: &[u8]) -> Result<Packet> {
        Packet::from_bytes(raw)
    }

    /// 소유한 버퍼에서 복사 없이 디코딩
    pub fn decode_shared(&self, raw: Bytes) -> Result<Packet> {
        Packet::from_shared(raw)
    }
}

/// 기본 설정(이더넷, 크기 검사)으로 인코딩
pub fn encode(packet: &Packet) -> Result<Bytes> {
    PacketCodec::default().encode(packet)
}

/// 기본 설정으로 디코딩
pub fn decode(raw: &[u8]) -> Result<Packet> {
    PacketCodec::default().decode(raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{MAX_DATA_SIZE, MAX_PAYLOAD_SIZE};

    #[test]
    fn test_max_payload_fits() {
        let packet = Packet::data(1, false, vec![0xAB; MAX_PAYLOAD_SIZE]);
        let bytes = encode(&packet).unwrap();

        assert_eq!(bytes.len(), MAX_DATA_SIZE);
        assert_eq!(decode(&bytes).unwrap(), packet);
    }

    #[test]
    fn test_oversize_rejected() {
        let packet = Packet::data(1, false, vec![0; MAX_PAYLOAD_SIZE + 1]);

        match encode(&packet) {
            Err(Error::OversizeDatagram { size, max }) => {
                assert_eq!(size, MAX_DATA_SIZE + 1);
                assert_eq!(max, MAX_DATA_SIZE);
            }
            other => panic!("expected OversizeDatagram, got {:?}", other),
        }
    }

    #[test]
    fn test_unchecked_policy() {
        let codec = PacketCodec::new(Config::unchecked());
        let packet = Packet::data(1, true, vec![7; 4000]);
        let bytes = codec.encode(&packet).unwrap();

        assert_eq!(bytes.len(), 4005);
        assert_eq!(codec.decode(&bytes).unwrap(), packet);
    }

    #[test]
    fn test_encode_into_leaves_buffer_on_error() {
        let codec = PacketCodec::default();
        let mut buf = BytesMut::from(&b"xx"[..]);

        codec.encode_into(&Packet::ack(1), &mut buf).unwrap();
        assert_eq!(buf.len(), 2 + 5);

        let big = Packet::data(2, false, vec![0; 2000]);
        assert!(codec.encode_into(&big, &mut buf).is_err());
        assert_eq!(buf.len(), 7);
    }

    #[test]
    fn test_decode_truncated() {
        let codec = PacketCodec::default();
        for len in 0..5 {
            let err = codec.decode(&vec![0u8; len]).unwrap_err();
            assert!(err.is_malformed());
        }
        assert!(codec.decode_shared(Bytes::new()).is_err());
    }

    #[test]
    fn test_codec_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PacketCodec>();
        assert_send_sync::<Packet>();
    }

    #[test]
    fn test_concurrent_use() {
        let codec = std::sync::Arc::new(PacketCodec::default());
        let handles: Vec<_> = (0..4u32)
            .map(|t| {
                let codec = codec.clone();
                std::thread::spawn(move || {
                    for seq in 0..100u32 {
                        let packet = Packet::data(t * 1000 + seq, seq % 2 == 0, seq.to_be_bytes().to_vec());
                        let bytes = codec.encode(&packet).unwrap();
                        assert_eq!(codec.decode(&bytes).unwrap(), packet);
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }
    }
}
