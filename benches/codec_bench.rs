//! Criterion benchmark untuk Zero-Net codec
//!
//! Run dengan: cargo bench

use chrono::NaiveDate;
use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use zeronet::protocol::{compress, pack};
use zeronet::profile::to_compact;
use zeronet::{CodecConfig, EmergencyProfile, ZeroNetCodec};

fn sample_profile() -> EmergencyProfile {
    EmergencyProfile {
        full_name: Some("Aisha Khan".into()),
        date_of_birth: NaiveDate::from_ymd_opt(1988, 11, 5),
        gender: Some("Female".into()),
        blood_group: Some("O+".into()),
        allergies: Some("Penicillin, peanuts".into()),
        medications: Some("Metformin 500mg twice daily".into()),
        conditions: Some("Type 2 diabetes; asthma".into()),
        emergency_name: Some("Imran Khan".into()),
        emergency_relation: Some("Brother".into()),
        emergency_phone: Some("+919876543210".into()),
        wallet_address: Some("0x52908400098527886E0F7030069857D2E4169EE7".into()),
    }
}

fn bench_codec(c: &mut Criterion) {
    let codec = ZeroNetCodec::new(CodecConfig::new("bench-secret-0123456789").unwrap()).unwrap();
    let profile = sample_profile();
    let token = codec.encode_emergency_profile(&profile).unwrap();

    let mut group = c.benchmark_group("codec");
    group.throughput(Throughput::Elements(1));

    group.bench_function("encode", |b| {
        b.iter(|| codec.encode_emergency_profile(black_box(&profile)))
    });

    group.bench_function("decode", |b| {
        b.iter(|| codec.decode_emergency_profile(black_box(&token)))
    });

    group.finish();
}

fn bench_stages(c: &mut Criterion) {
    let profile = sample_profile();
    let compact = to_compact(&profile);
    let packed = pack(&compact).unwrap();

    let mut group = c.benchmark_group("stages");

    group.bench_function("to_compact", |b| b.iter(|| to_compact(black_box(&profile))));

    group.throughput(Throughput::Bytes(packed.len() as u64));
    group.bench_function("pack", |b| b.iter(|| pack(black_box(&compact))));
    group.bench_function("compress", |b| b.iter(|| compress(black_box(&packed))));

    group.finish();
}

criterion_group!(benches, bench_codec, bench_stages);
criterion_main!(benches);
