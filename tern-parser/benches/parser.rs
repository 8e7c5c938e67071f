use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use tern_parser::{Parser, ParserEvents};

struct Sink {
    printed: u64,
    dispatched: u64,
}

impl ParserEvents for Sink {
    fn print(&mut self, _ch: char) {
        self.printed += 1;
    }
    fn dispatch_csi(&mut self, _final_byte: u8) {
        self.dispatched += 1;
    }
}

fn generate_plain_text(size: usize) -> Vec<u8> {
    let text = "The quick brown fox jumps over the lazy dog. ";
    text.as_bytes().iter().cycle().take(size).copied().collect()
}

fn generate_colored_text(size: usize) -> Vec<u8> {
    let mut data = Vec::with_capacity(size);
    let colors = [
        "\x1b[31m", "\x1b[38;5;208m", "\x1b[38;2;10;20;30m", "\x1b[1;4m", "\x1b[0m",
    ];
    let mut i = 0;
    while data.len() < size {
        data.extend_from_slice(colors[i % colors.len()].as_bytes());
        data.extend_from_slice(b"colored ");
        i += 1;
    }
    data.truncate(size);
    data
}

fn generate_cursor_movement(size: usize) -> Vec<u8> {
    let mut data = Vec::with_capacity(size);
    let sequences: [&[u8]; 6] = [
        b"\x1b[A",
        b"\x1b[B",
        b"\x1b[10;20H",
        b"\x1b[2J",
        b"\x1b[K",
        b"\x1b[?25h",
    ];
    let mut i = 0;
    while data.len() < size {
        data.extend_from_slice(sequences[i % sequences.len()]);
        i += 1;
    }
    data.truncate(size);
    data
}

fn bench_parser(c: &mut Criterion) {
    const SIZE: usize = 64 * 1024;

    let mut group = c.benchmark_group("parser");
    group.throughput(Throughput::Bytes(SIZE as u64));

    let plain = generate_plain_text(SIZE);
    group.bench_function("plain_text", |b| {
        b.iter(|| {
            let mut parser = Parser::new();
            let mut sink = Sink {
                printed: 0,
                dispatched: 0,
            };
            parser.parse(black_box(&plain), &mut sink);
            black_box(sink.printed)
        })
    });

    let colored = generate_colored_text(SIZE);
    group.bench_function("colored_text", |b| {
        b.iter(|| {
            let mut parser = Parser::new();
            let mut sink = Sink {
                printed: 0,
                dispatched: 0,
            };
            parser.parse(black_box(&colored), &mut sink);
            black_box(sink.dispatched)
        })
    });

    let movement = generate_cursor_movement(SIZE);
    group.bench_function("cursor_movement", |b| {
        b.iter(|| {
            let mut parser = Parser::new();
            let mut sink = Sink {
                printed: 0,
                dispatched: 0,
            };
            parser.parse(black_box(&movement), &mut sink);
            black_box(sink.dispatched)
        })
    });

    group.finish();
}

criterion_group!(benches, bench_parser);
criterion_main!(benches);
