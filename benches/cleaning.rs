use std::hint::black_box;

use auto_data_cleaner::auto_clean;
use auto_data_cleaner::cleaning::{DateGrammars, RomanNumerals, parse_date, parse_numeral};
use auto_data_cleaner::types::{DataSet, DataType, Field, Schema, Value};
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};

fn messy_table(rows: usize) -> DataSet {
    let schema = Schema::new(
        [" full name ", "salary", "age", "join date", "city"]
            .into_iter()
            .map(|name| Field::new(name, DataType::Utf8))
            .collect(),
    );
    let salaries = ["$50,000", "xl", "60k", "n/a", "72,500"];
    let ages = ["thirty", "22", "unknown", "45", "twenty"];
    let dates = ["2023-01-15", "15/02/2023", "March 5, 2023", "01-02-2023", "soon"];

    let data = (0..rows)
        .map(|i| {
            let pick = |list: &[&str]| Value::Utf8(list[i % list.len()].to_string());
            vec![
                Value::Utf8(format!("  PERSON #{} smith ", i % (rows / 2).max(1))),
                pick(&salaries),
                pick(&ages),
                pick(&dates),
                if i % 7 == 0 {
                    Value::Null
                } else {
                    Value::Utf8("Paris".to_string())
                },
            ]
        })
        .collect();
    DataSet::new(schema, data)
}

fn bench_auto_clean(c: &mut Criterion) {
    let mut group = c.benchmark_group("auto_clean");
    for rows in [1_000usize, 10_000] {
        let ds = messy_table(rows);
        group.bench_with_input(BenchmarkId::from_parameter(rows), &ds, |b, ds| {
            b.iter(|| auto_clean(black_box(ds)))
        });
    }
    group.finish();
}

fn bench_cell_parsers(c: &mut Criterion) {
    let numerals = RomanNumerals::default();
    let grammars = DateGrammars::default();

    c.bench_function("parse_numeral", |b| {
        b.iter(|| {
            for raw in ["$50,000", "xl", "60k", "n/a"] {
                black_box(parse_numeral(black_box(raw), &numerals));
            }
        })
    });
    c.bench_function("parse_date", |b| {
        b.iter(|| {
            for raw in ["2023-01-15", "march 5, 2023", "2023-01-02 103000", "soon"] {
                black_box(parse_date(black_box(raw), &grammars));
            }
        })
    });
}

criterion_group!(benches, bench_auto_clean, bench_cell_parsers);
criterion_main!(benches);
