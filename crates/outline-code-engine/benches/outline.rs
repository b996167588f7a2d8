use std::sync::Arc;

use criterion::{Criterion, criterion_group, criterion_main};
use outline_code_engine::{Cmd, LanguageSupport, Session, build_outline};

fn generate_python_module(classes: usize) -> String {
    let mut content = String::from("* Overview\n\n");
    for i in 0..classes {
        content.push_str(&format!(
            "class Widget{i}:\n    def __init__(self):\n        self.value = {i}\n\n    async def refresh(self):\n        return self.value\n\n"
        ));
        if i % 10 == 0 {
            content.push_str(&format!("** Section {i}\n\n"));
        }
    }
    content
}

fn bench_outline(c: &mut Criterion) {
    let mut group = c.benchmark_group("outline");
    group.sample_size(10);

    let content = generate_python_module(200);
    let mut session = Session::new().unwrap();
    session.add_activation_hook(Arc::new(LanguageSupport::default()));
    let id = session.open_buffer("widgets.py", "python-mode", &content);

    let mut buffer = session.close_buffer(id).unwrap();

    group.bench_function("headlines_combined", |b| {
        b.iter(|| std::hint::black_box(build_outline(buffer.headlines())));
    });

    group.bench_function("demote_subtree", |b| {
        b.iter(|| {
            let patch = buffer.apply(Cmd::DemoteSubtree {
                line: std::hint::black_box(0),
            });
            std::hint::black_box(patch)
        });
    });

    group.finish();
}

criterion_group!(benches, bench_outline);
criterion_main!(benches);
