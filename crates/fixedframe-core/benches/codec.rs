//! Benchmarks for record encoding and decoding.
//!
//! Run with: `cargo bench -p fixedframe-core`

#![allow(missing_docs)]

use std::sync::Arc;

use chrono::NaiveDate;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use fixedframe_core::{codec, DynamicRecord, FieldDescriptor, FieldKind, Record, Schema};

/// Build a flat schema with `width` text/integer field pairs.
fn wide_schema(width: usize) -> Arc<Schema> {
    let mut builder = Schema::builder("Wide");
    for i in 0..width {
        builder = builder.text(format!("name{i}"), 12).integer(format!("count{i}"), 8);
    }
    Arc::new(builder.build())
}

fn wide_record(schema: &Arc<Schema>) -> DynamicRecord {
    let width = schema.fields().len() / 2;
    let mut record = DynamicRecord::new(Arc::clone(schema));
    for i in 0..width {
        record = record
            .with_value(format!("name{i}"), format!("item-{i}"))
            .with_value(format!("count{i}"), i64::try_from(i * 97).unwrap_or_default());
    }
    record
}

/// An order with a nested customer and a date.
fn order_record() -> DynamicRecord {
    let customer = Schema::builder("Customer").text("name", 20).boolean("vip", 1).build();
    let schema = Schema::builder("Order")
        .integer("id", 10)
        .nested("customer", customer)
        .double("total", 12)
        .temporal("placed", FieldDescriptor::new(8).with_formatter("%Y%m%d"))
        .build();
    let customer_schema = match schema.field("customer").map(|f| f.kind()) {
        Some(FieldKind::Nested(c)) => Arc::clone(c),
        _ => unreachable!(),
    };
    let placed = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap_or_default();

    DynamicRecord::new(schema)
        .with_value("id", 1_234_567i64)
        .with_nested(
            "customer",
            DynamicRecord::new(customer_schema)
                .with_value("name", "Ada Lovelace")
                .with_value("vip", true),
        )
        .with_value("total", 1999.95f64)
        .with_value("placed", placed)
}

fn bench_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("encode");

    for width in [4, 16, 64] {
        let schema = wide_schema(width);
        let record = wide_record(&schema);

        group.throughput(Throughput::Bytes(schema.encoded_len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(width), &record, |b, record| {
            b.iter(|| codec::encode(black_box(record)));
        });
    }

    group.finish();
}

fn bench_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode");

    for width in [4, 16, 64] {
        let schema = wide_schema(width);
        let bytes = codec::encode(&wide_record(&schema)).unwrap_or_default();

        group.throughput(Throughput::Bytes(bytes.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(width), &bytes, |b, bytes| {
            b.iter(|| {
                let mut target = DynamicRecord::new(Arc::clone(&schema));
                codec::decode_into(black_box(bytes), 0, &mut target)
            });
        });
    }

    group.finish();
}

fn bench_nested(c: &mut Criterion) {
    let record = order_record();
    let bytes = codec::encode(&record).unwrap_or_default();

    c.bench_function("nested_encode", |b| b.iter(|| codec::encode(black_box(&record))));
    c.bench_function("nested_decode", |b| {
        b.iter(|| {
            let mut target = DynamicRecord::new(record.schema());
            codec::decode_into(black_box(&bytes), 0, &mut target)
        });
    });
    c.bench_function("nested_normalize", |b| {
        b.iter_batched(
            || record.clone(),
            |mut r| codec::normalize(&mut r).map(|_| ()),
            criterion::BatchSize::SmallInput,
        );
    });
}

criterion_group!(benches, bench_encode, bench_decode, bench_nested);
criterion_main!(benches);
