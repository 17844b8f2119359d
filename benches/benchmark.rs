//! Performance benchmarks for chat-saver.
//!
//! Run with: `cargo bench`
//!
//! Benchmarks include:
//! - A short tagged ChatGPT page for the common path
//! - A long chat to see how extraction scales with turn count
//! - The whole-page fallback, which walks the entire document

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use chat_saver::{export, extract, ExportRequest, Format, Options, SelectionMode};

const SAMPLE_HTML: &str = r#"
<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <title>Borrow checker basics - ChatGPT</title>
    <link rel="canonical" href="https://chatgpt.com/c/bench">
</head>
<body>
    <nav>
        <a href="/">New chat</a>
        <a aria-current="page" href="/c/bench">Borrow checker basics</a>
    </nav>
    <main>
        <div data-message-id="1" data-message-author-role="user">
            <p>Why does the borrow checker reject two mutable references?</p>
        </div>
        <div data-message-id="2" data-message-author-role="assistant">
            <p>Two live mutable references could write the same memory.</p>
            <div>rust</div><div><button>Copy code</button></div>
            <pre><code>let a = &mut v;
let b = &mut v; // error</code></pre>
            <p>Only one may exist at a time.</p>
        </div>
    </main>
</body>
</html>
"#;

fn long_chat(turns: usize) -> String {
    let mut html = String::from(r#"<html><head><link rel="canonical" href="https://chatgpt.com/c/long"></head><body>"#);
    for i in 0..turns {
        let role = if i % 2 == 0 { "user" } else { "assistant" };
        html.push_str(&format!(
            r#"<div data-message-id="{i}" data-message-author-role="{role}"><p>Turn {i} with a sentence or two of text.</p><p>And a second paragraph.</p></div>"#
        ));
    }
    html.push_str("</body></html>");
    html
}

fn bench_extract_default(c: &mut Criterion) {
    let options = Options::default();
    c.bench_function("extract_default", |b| {
        b.iter(|| extract(black_box(SAMPLE_HTML), black_box(&options)));
    });
}

fn bench_export_formats(c: &mut Criterion) {
    let options = Options::default();
    let mut group = c.benchmark_group("export");

    for format in [Format::Txt, Format::Md, Format::Html, Format::Json] {
        let request = ExportRequest {
            format,
            selection: SelectionMode::Full,
        };
        group.bench_with_input(BenchmarkId::from_parameter(format), &request, |b, request| {
            b.iter(|| export(black_box(SAMPLE_HTML), &options, request));
        });
    }

    group.finish();
}

/// Extraction cost as the conversation grows
fn bench_long_conversations(c: &mut Criterion) {
    let options = Options::default();
    let mut group = c.benchmark_group("long_conversation");

    for turns in [10, 100, 1_000] {
        let html = long_chat(turns);
        group.throughput(Throughput::Bytes(html.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(turns), &html, |b, html| {
            b.iter(|| extract(black_box(html), &options));
        });
    }

    group.finish();
}

fn bench_visible_text_fallback(c: &mut Criterion) {
    let options = Options {
        url: Some("https://chatgpt.com/c/fallback".to_string()),
        ..Options::default()
    };
    let html = format!(
        "<html><body><nav>Settings</nav>{}</body></html>",
        "<div>Untagged conversation line with some words.</div>".repeat(200)
    );

    c.bench_function("visible_text_fallback", |b| {
        b.iter(|| extract(black_box(&html), &options));
    });
}

criterion_group!(
    benches,
    bench_extract_default,
    bench_export_formats,
    bench_long_conversations,
    bench_visible_text_fallback
);
criterion_main!(benches);
