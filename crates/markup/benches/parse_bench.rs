use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use dom::Document;
use markup::{check, Parser};

const CARDS: usize = 500;

fn make_cards(count: usize) -> String {
    let mut text = String::with_capacity(count * 96);
    text.push_str("main.list {");
    for i in 0..count {
        text.push_str(&format!(
            " div.card<title:'card {i}, quoted'> {{ h2(Card {i}) p('a (b) {{c}}') checkbox<name:c{i}>#c{i} }}"
        ));
    }
    text.push_str(" }");
    text
}

fn bench_brace_pass(c: &mut Criterion) {
    let input = make_cards(CARDS);
    c.bench_function("bench_brace_pass", |b| {
        b.iter(|| {
            let table = check(black_box(&input)).unwrap();
            black_box(table.len());
        });
    });
}

fn bench_parse_into_document(c: &mut Criterion) {
    let input = make_cards(CARDS);
    let parser = Parser::new();
    c.bench_function("bench_parse_into_document", |b| {
        b.iter_batched(
            Document::new,
            |mut doc| {
                let root = doc.root();
                parser.parse(&mut doc, root, black_box(&input)).unwrap();
                black_box(doc.len());
            },
            BatchSize::SmallInput,
        );
    });
}

criterion_group!(benches, bench_brace_pass, bench_parse_into_document);
criterion_main!(benches);
