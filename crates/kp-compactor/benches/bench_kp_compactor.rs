use criterion::{black_box, criterion_group, criterion_main, Criterion};
use kp_compactor::CodeCompactor;
use kp_core::SettingsOverrides;
use rand::{rngs::StdRng, Rng, SeedableRng};

fn generate_js(size_kb: usize) -> String {
    let mut rng = StdRng::seed_from_u64(7);
    let mut text = String::with_capacity(size_kb * 1024);
    let mut i = 0;
    while text.len() < size_kb * 1024 {
        match rng.gen_range(0..4) {
            0 => text.push_str(&format!("// step {i}: update the counter\n")),
            1 => text.push_str("/*\n * Block comment describing the next function.\n */\n"),
            2 => text.push_str(&format!("function f{i}(a,  b) {{\n    return  a + b;\n}}\n\n")),
            _ => text.push_str(&format!("const item{i} = {{ \"name\": \"n{i}\", \"value\": {i} }};\n")),
        }
        i += 1;
    }
    text
}

fn generate_json(size_kb: usize) -> String {
    let mut entries = Vec::new();
    let mut total = 0;
    let mut i = 0;
    while total < size_kb * 1024 {
        let entry = format!(
            "  {{\n    \"name\": \"entry {i}\",\n    \"description\": \"generated entry\",\n    \"value\": {i}\n  }}"
        );
        total += entry.len() + 2;
        entries.push(entry);
        i += 1;
    }
    format!("[\n{}\n]\n", entries.join(",\n"))
}

fn bench_compress_js(c: &mut Criterion) {
    let compactor = CodeCompactor::default();
    for size in [1, 10, 100] {
        let src = generate_js(size);
        c.bench_function(&format!("compress_js_{size}kb"), |b| {
            b.iter(|| black_box(compactor.compress(black_box(&src), "bench.js")))
        });
    }
}

fn bench_compress_json(c: &mut Criterion) {
    let compactor = CodeCompactor::new(
        SettingsOverrides::new().with_minify_keys(true).build().unwrap(),
    );
    let src = generate_json(10);
    c.bench_function("compress_json_minify_10kb", |b| {
        b.iter(|| black_box(compactor.compress(black_box(&src), "bench.json")))
    });
}

criterion_group!(benches, bench_compress_js, bench_compress_json);
criterion_main!(benches);
