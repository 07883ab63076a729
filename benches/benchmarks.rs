use criterion::{BenchmarkId,black_box, criterion_group, criterion_main, Criterion};

use phrasegram::*;
use phrasegram::test::*;

pub fn anakey_benchmark(c: &mut Criterion) {
    c.bench_function("anakey_single_char", |b| b.iter(|| {
        black_box("a").anagram_key()
    }));

    c.bench_function("anakey_word_6_chars", |b| b.iter(|| {
        black_box("houses").anagram_key()
    }));

    c.bench_function("anakey_sentence_34_chars", |b| b.iter(|| {
        black_box("the lazy dog jumped over the quick brown fox").anagram_key()
    }));

    let name = "kellywainwright".anagram_key();
    let part = "nightwalker".anagram_key();
    c.bench_function("anakey_subtract", |b| b.iter(|| {
        black_box(&name).try_subtract(black_box(&part))
    }));

    c.bench_function("anakey_combine", |b| b.iter(|| {
        black_box(&part).combine(black_box(&name))
    }));
}

pub fn search_benchmark(c: &mut Criterion) {
    let model = get_test_model();

    for input in ["Wainwright", "Angela Curran", "Stephanie Cheung", "quiet"] {
        c.bench_with_input(BenchmarkId::new("search", input), &input, |b, input| b.iter(|| {
            model.search(input).count()
        }));
    }

    c.bench_function("dictionary_parse", |b| b.iter(|| {
        WordDictionary::parse(black_box(TEST_DICTIONARY), &DictionaryParams::default())
    }));
}

criterion_group!(benches, anakey_benchmark, search_benchmark);
criterion_main!(benches);
