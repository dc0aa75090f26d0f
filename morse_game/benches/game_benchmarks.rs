use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use morse_game::{
    MorseTokenizer, Session, Vocabulary,
    entities::{RawSymbol, RoundState, TargetWord},
    morse::{decode, encode},
};

/// Helper to build the wire transcript that spells `word`
fn transcript(word: &str) -> Vec<u8> {
    word.chars()
        .filter_map(encode)
        .flat_map(|code| code.bytes().chain(std::iter::once(b' ')))
        .collect()
}

/// Benchmark table lookups for the shortest and longest codes
fn bench_decode(c: &mut Criterion) {
    c.bench_function("decode_letter", |b| {
        b.iter(|| decode("."));
    });
    c.bench_function("decode_digit", |b| {
        b.iter(|| decode("----."));
    });
}

/// Benchmark the tokenizer alone on a long run of marks and pauses
fn bench_tokenizer(c: &mut Criterion) {
    let symbols: Vec<RawSymbol> = transcript("COMMUNICATION")
        .into_iter()
        .filter_map(RawSymbol::from_byte)
        .collect();

    c.bench_function("tokenize_communication", |b| {
        b.iter_batched(
            || RoundState::new(TargetWord::new("COMMUNICATION").unwrap()),
            |mut state| {
                for symbol in &symbols {
                    MorseTokenizer::consume(*symbol, &mut state);
                }
                state
            },
            criterion::BatchSize::SmallInput,
        );
    });
}

/// Benchmark full rounds through a session for words of different lengths
fn bench_session_round(c: &mut Criterion) {
    let mut group = c.benchmark_group("session_round");

    for word in ["E", "FIBER", "COMMUNICATION"] {
        let bytes = transcript(word);
        group.bench_with_input(BenchmarkId::from_parameter(word), &bytes, |b, bytes| {
            b.iter_batched(
                || Session::with_seed(Vocabulary::new([word]).unwrap(), 0),
                |mut session| {
                    for byte in bytes {
                        session.handle_byte(*byte);
                    }
                    session
                },
                criterion::BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

criterion_group!(table_lookups, bench_decode);

criterion_group!(round_operations, bench_tokenizer, bench_session_round);

criterion_main!(table_lookups, round_operations);
