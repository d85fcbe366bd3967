use criterion::{black_box, criterion_group, criterion_main, Criterion};
use cp_core::{ComplaintRecord, Priority};
use cp_storage::{read_corpus_from, write_corpus_to};

fn bench_corpus_csv(c: &mut Criterion) {
    let rows: Vec<ComplaintRecord> = (0..1000)
        .map(|i| ComplaintRecord::new(format!("Complaint {i}, with a comma"), Priority::ALL[i % 3]))
        .collect();
    let mut buf = Vec::new();
    write_corpus_to(&mut buf, &rows).unwrap();

    c.bench_function("corpus_write_1000", |b| {
        b.iter(|| {
            let mut out = Vec::with_capacity(buf.len());
            write_corpus_to(&mut out, &rows).unwrap();
            black_box(out)
        })
    });

    c.bench_function("corpus_read_1000", |b| {
        b.iter(|| black_box(read_corpus_from(buf.as_slice()).unwrap()))
    });
}

criterion_group!(benches, bench_corpus_csv);
criterion_main!(benches);
