use criterion::{black_box, criterion_group, criterion_main, Criterion};
use dom::{scan_document, DomArena, ElementHandle};

/// A long page: repeated article blocks with nested landmarks and filler
fn build_page(blocks: usize) -> DomArena {
    let mut arena = DomArena::with_capacity(blocks * 12);
    let body = arena.create_element("body");
    arena.append_child(arena.root(), body).unwrap();

    let header = arena.create_element("header");
    arena.append_child(body, header).unwrap();
    let main = arena.create_element("main");
    arena.append_child(body, main).unwrap();

    for i in 0..blocks {
        let article = arena.create_element("article");
        arena.append_child(main, article).unwrap();
        let section = add(&mut arena, article, "section");
        arena
            .set_attribute(section, "aria-label", &format!("Block {}", i))
            .unwrap();
        for _ in 0..6 {
            let p = add(&mut arena, section, "p");
            let text = arena.create_text("lorem ipsum dolor sit amet");
            arena.append_child(p, text).unwrap();
        }
        if i % 10 == 0 {
            let aside = add(&mut arena, article, "aside");
            arena.set_attribute(aside, "style", "display: none").unwrap();
        }
    }
    arena
}

fn add(arena: &mut DomArena, parent: ElementHandle, tag: &str) -> ElementHandle {
    let el = arena.create_element(tag);
    arena.append_child(parent, el).unwrap();
    el
}

fn bench_scan(c: &mut Criterion) {
    let page = build_page(1000);
    c.bench_function("scan_1000_blocks", |b| {
        b.iter(|| scan_document(black_box(&page)).unwrap())
    });
}

criterion_group!(benches, bench_scan);
criterion_main!(benches);
