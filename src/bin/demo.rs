//! SFP 패킷 데모
//!
//! 대표 패킷들을 인코딩/디코딩해보고 결과를 리포터로 출력
//!
//! 사용법:
//!   cargo run --bin sfp-packet-demo -- [OPTIONS]
//!
//! 예시:
//!   # 파일로 저장할 때는 색상 끄기
//!   cargo run --bin sfp-packet-demo -- --no-color > demo.log

use bytes::Bytes;
use rand::RngCore;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use sfp_packet::{Packet, PacketCodec, Reporter, ReporterConfig, MAX_PAYLOAD_SIZE};

/// 데모 메시지 포맷
const FORMATS: &[(&str, &str)] = &[
    ("header", "== Testing {name} packet packing/unpacking =="),
    ("packet", "{name} packet: {packet}"),
    ("packed", "{name} packet (packed): {hex}"),
    ("unpacked", "{name} packet (unpacked): {packet}"),
    ("ok", "{packet} successfully encoded and decoded"),
    ("mismatch", "{packet} encoding/decoding failed; got {got}"),
    ("decode_failed", "{packet} could not be decoded: {error}"),
    ("rejected", "{packet} rejected as expected: {error}"),
    ("encode_failed", "{packet} could not be encoded: {error}"),
    ("summary", "{passed}/{total} checks passed"),
];

fn parse_args() -> ReporterConfig {
    let mut config = ReporterConfig::default();

    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--no-color" => config.colorize = false,
            "--no-timestamps" => config.timestamps = false,
            "--quiet" | "-q" => config.enabled = false,
            "--help" | "-h" => {
                println!(
                    r#"SFP Packet Demo - 패킷 인코딩/디코딩 자체 테스트

사용법:
  cargo run --bin sfp-packet-demo -- [OPTIONS]

옵션:
  --no-color          ANSI 색상 끄기
  --no-timestamps     타임스탬프 끄기
  -q, --quiet         출력 없음 (종료 코드만)
  -h, --help          이 도움말 출력

로그 레벨은 RUST_LOG 환경 변수로 지정 (기본: warn)
"#
                );
                std::process::exit(0);
            }
            _ => {}
        }
    }

    config
}

/// 인코딩 -> 디코딩 후 원본과 비교
fn check_roundtrip(reporter: &Reporter, codec: &PacketCodec, packet: &Packet) -> bool {
    let name = packet.kind();
    reporter.info("header", &[("name", &name)]);
    reporter.info("packet", &[("name", &name), ("packet", packet)]);

    let packed = match codec.encode(packet) {
        Ok(bytes) => bytes,
        Err(e) => {
            reporter.error("encode_failed", &[("packet", packet), ("error", &e)]);
            return false;
        }
    };
    // 큰 페이로드는 헤더만 출력
    let shown = &packed[..packed.len().min(32)];
    reporter.info("packed", &[("name", &name), ("hex", &hex::encode(shown))]);

    match codec.decode(&packed) {
        Ok(unpacked) if unpacked == *packet => {
            reporter.info("unpacked", &[("name", &name), ("packet", &unpacked)]);
            reporter.success("ok", &[("packet", packet)]);
            true
        }
        Ok(unpacked) => {
            reporter.error("mismatch", &[("packet", packet), ("got", &unpacked)]);
            false
        }
        Err(e) => {
            reporter.error("decode_failed", &[("packet", packet), ("error", &e)]);
            false
        }
    }
}

/// 데이터그램 용량을 넘는 패킷은 거부돼야 함
fn check_rejected(reporter: &Reporter, codec: &PacketCodec, packet: &Packet) -> bool {
    match codec.encode(packet) {
        Err(e) => {
            reporter.success("rejected", &[("packet", packet), ("error", &e)]);
            true
        }
        Ok(bytes) => {
            reporter.error(
                "encode_failed",
                &[("packet", packet), ("error", &format!("accepted {} bytes", bytes.len()))],
            );
            false
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 로깅 설정 (리포터 출력과 겹치지 않게 기본 warn)
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let subscriber = FmtSubscriber::builder().with_env_filter(filter).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let reporter = Reporter::new(parse_args()).with_formats(FORMATS.iter().copied());
    let codec = PacketCodec::default();

    let mut max_payload = vec![0u8; MAX_PAYLOAD_SIZE];
    rand::thread_rng().fill_bytes(&mut max_payload);

    let roundtrips = [
        Packet::ack(50),
        Packet::data(100, false, Bytes::from_static(b"base test")),
        Packet::data(100, true, Bytes::from_static(b"endoffile test")),
        Packet::fin(101),
        Packet::fin_ack(101),
        Packet::data(102, true, max_payload),
    ];
    let oversize = Packet::data(103, false, vec![0u8; MAX_PAYLOAD_SIZE + 1]);

    let total = roundtrips.len() + 1;
    let mut passed = roundtrips
        .iter()
        .filter(|packet| check_roundtrip(&reporter, &codec, packet))
        .count();
    if check_rejected(&reporter, &codec, &oversize) {
        passed += 1;
    }

    if passed == total {
        reporter.success("summary", &[("passed", &passed), ("total", &total)]);
        Ok(())
    } else {
        reporter.error("summary", &[("passed", &passed), ("total", &total)]);
        std::process::exit(1);
    }
}
