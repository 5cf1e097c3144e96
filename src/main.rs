use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use boardview::{
    BoardEngine, BoardView, FixedEngine, Page, SnapshotFile, ViewConfig, DEFAULT_PAGE,
};

/// Render a board snapshot into a host page.
#[derive(Parser)]
#[command(name = "boardview", version, about)]
struct Args {
    /// Host HTML file with the board container; a built-in page is used
    /// when omitted
    #[arg(long)]
    page: Option<PathBuf>,

    /// Snapshot file (JSON with a base64 payload); the standard initial
    /// placement is rendered when omitted
    #[arg(long)]
    snapshot: Option<PathBuf>,

    /// Render an empty board instead of the initial placement
    #[arg(long, conflicts_with = "snapshot")]
    empty: bool,

    /// Print an ASCII diagram instead of HTML
    #[arg(long)]
    text: bool,

    /// Write the output to a file instead of stdout
    #[arg(long)]
    out: Option<PathBuf>,

    /// Class name of the container element
    #[arg(long, default_value = "chessboard")]
    container: String,

    /// Base path for piece image assets
    #[arg(long, default_value = "./img")]
    asset_base: String,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let page = match &args.page {
        Some(path) => Page::from_file(path)
            .with_context(|| format!("loading host page {}", path.display()))?,
        None => Page::from_html(DEFAULT_PAGE),
    };

    let engine = match &args.snapshot {
        Some(path) => {
            let file = SnapshotFile::load(path)
                .with_context(|| format!("loading snapshot {}", path.display()))?;
            FixedEngine::from_bytes(file.to_bytes()?)
        }
        None if args.empty => FixedEngine::empty(64),
        None => FixedEngine::initial(),
    };

    let config = ViewConfig {
        container_class: args.container.clone(),
        asset_base: args.asset_base.clone(),
        ..Default::default()
    };

    let mut view = BoardView::attach(page.doc, config).context("attaching board view")?;
    view.initialize_board();
    view.render_pieces(&engine.snapshot_bytes(), engine.square_count())
        .context("rendering pieces")?;

    let output = if args.text {
        view.text_snapshot().text
    } else {
        view.to_html()
    };

    match &args.out {
        Some(path) => std::fs::write(path, output)
            .with_context(|| format!("writing {}", path.display()))?,
        None => print!("{}", output),
    }

    Ok(())
}
