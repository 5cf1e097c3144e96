#![cfg(feature = "remote")]

use boardview::{page, BoardEngine, BoardView, FixedEngine, Page, ViewConfig};

#[test]
fn fetch_page_and_render() {
    // Skip on CI where network may not be available
    if std::env::var("CI").is_ok() {
        return;
    }

    let server = tiny_http::Server::http("0.0.0.0:0").unwrap();
    let addr = server.server_addr();

    std::thread::spawn(move || {
        if let Ok(request) = server.recv() {
            let response = tiny_http::Response::from_string(
                "<html><head><title>Play</title></head>\
                 <body><div class=\"chessboard\"></div></body></html>",
            );
            let _ = request.respond(response);
        }
    });

    let url = format!("http://{}/play/index.html", addr);
    let mut config = ViewConfig::default();
    let page = Page::fetch(&url, &config).expect("fetch page");
    assert_eq!(page.url.as_deref(), Some(url.as_str()));

    config.asset_base = page::resolve_asset_base(&url, &config.asset_base);
    let mut view = BoardView::attach(page.doc, config).expect("attach");
    view.initialize_board();

    let engine = FixedEngine::initial();
    view.render_pieces(&engine.snapshot_bytes(), engine.square_count())
        .expect("render");

    // image sources resolved against the page origin
    let html = view.to_html();
    assert!(html.contains(&format!("http://{}/play/img/wR.svg", addr)));
}

#[test]
fn fetch_honors_the_configured_timeout() {
    // Skip on CI where network may not be available
    if std::env::var("CI").is_ok() {
        return;
    }

    let server = tiny_http::Server::http("0.0.0.0:0").unwrap();
    let addr = server.server_addr();

    std::thread::spawn(move || {
        if let Ok(request) = server.recv() {
            std::thread::sleep(std::time::Duration::from_millis(1000));
            let _ = request.respond(tiny_http::Response::from_string("<html></html>"));
        }
    });

    let config = ViewConfig {
        timeout_ms: 50,
        ..Default::default()
    };
    let url = format!("http://{}/", addr);
    assert!(Page::fetch(&url, &config).is_err());
}
