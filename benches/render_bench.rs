use criterion::Criterion;

// Benchmark suite for boardview. Run with:
//    cargo bench

use boardview::{BoardEngine, BoardView, FixedEngine, Page, ViewConfig, DEFAULT_PAGE};

/// Bench: building the 8x8 cell grid from a fresh host page
fn bench_initialize_board(c: &mut Criterion) {
    c.bench_function("initialize_board", |b| {
        b.iter(|| {
            let page = Page::from_html(DEFAULT_PAGE);
            let mut view =
                BoardView::attach(page.doc, ViewConfig::default()).expect("attach failed");
            view.initialize_board();
            view.cell_count()
        })
    });
}

/// Bench: full-redraw render of the initial placement onto a ready grid
fn bench_render_pieces(c: &mut Criterion) {
    let page = Page::from_html(DEFAULT_PAGE);
    let mut view = BoardView::attach(page.doc, ViewConfig::default()).expect("attach failed");
    view.initialize_board();

    let engine = FixedEngine::initial();
    let snapshot = engine.snapshot_bytes();
    let squares = engine.square_count();

    c.bench_function("render_pieces_initial", |b| {
        b.iter(|| {
            view.render_pieces(&snapshot, squares).expect("render failed");
        })
    });
}

/// Bench: HTML serialization of a fully rendered board
fn bench_to_html(c: &mut Criterion) {
    let page = Page::from_html(DEFAULT_PAGE);
    let mut view = BoardView::attach(page.doc, ViewConfig::default()).expect("attach failed");
    view.initialize_board();
    view.render_pieces(&boardview::INITIAL_PLACEMENT, 64)
        .expect("render failed");

    c.bench_function("to_html_rendered", |b| b.iter(|| view.to_html().len()));
}

fn main() {
    let mut c = Criterion::default();

    bench_initialize_board(&mut c);
    bench_render_pieces(&mut c);
    bench_to_html(&mut c);

    c.final_summary();
}
