use bytes::{Bytes, BytesMut};
use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use sfp_packet::{Packet, PacketCodec, MAX_PAYLOAD_SIZE};

#[allow(clippy::unwrap_used)]
fn bench_packet_encode_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("packet_encode_decode");
    let codec = PacketCodec::default();
    let payload_sizes = [0usize, 64, 512, MAX_PAYLOAD_SIZE];

    for &size in &payload_sizes {
        let packet = Packet::data(1, false, vec![0xA5u8; size]);
        let wire = codec.encode(&packet).unwrap();

        group.throughput(Throughput::Bytes(wire.len() as u64));
        group.bench_function(format!("encode_{size}b"), |b| {
            let mut buf = BytesMut::with_capacity(wire.len());
            b.iter(|| {
                buf.clear();
                codec.encode_into(black_box(&packet), &mut buf).unwrap();
            })
        });
        group.bench_function(format!("decode_{size}b"), |b| {
            b.iter(|| {
                let decoded = codec.decode(black_box(&wire));
                assert!(decoded.is_ok());
            })
        });
        group.bench_function(format!("decode_shared_{size}b"), |b| {
            b.iter(|| {
                let decoded = codec.decode_shared(Bytes::clone(black_box(&wire)));
                assert!(decoded.is_ok());
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_packet_encode_decode);
criterion_main!(benches);
