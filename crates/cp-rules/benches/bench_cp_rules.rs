use criterion::{black_box, criterion_group, criterion_main, Criterion};
use cp_rules::{RuleDefinition, RuleTable, RULE_TABLE};

fn bench_match_rules(c: &mut Criterion) {
    let table = &**RULE_TABLE;
    let texts = vec![
        ("Lab not conducted this week", "phrase"),
        ("Professor is not available during office hours.", "keyword_early"),
        ("Water leakage near the hostel gate.", "keyword_mid"),
        ("The road outside is dusty and nobody sweeps it", "no_match"),
    ];

    c.bench_function("match_rules_1000_mixed", |b| {
        b.iter(|| {
            for _ in 0..250 {
                for (text, _label) in &texts {
                    black_box(table.match_rules(text));
                }
            }
        })
    });

    let long = "the corridor outside the dormitory is dusty ".repeat(200);
    c.bench_function("match_rules_long_no_match", |b| {
        b.iter(|| black_box(table.match_rules(&long)))
    });
}

fn bench_build_table(c: &mut Criterion) {
    let def = RuleDefinition::canonical();
    c.bench_function("build_canonical_table", |b| {
        b.iter(|| black_box(RuleTable::from_definition(&def)))
    });
}

criterion_group!(benches, bench_match_rules, bench_build_table);
criterion_main!(benches);
