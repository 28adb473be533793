use std::ffi::OsString;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use taggraph_engine::graph::GraphSession;
use taggraph_engine::source::spawn_loader;
use taggraph_engine::util::config;
use taggraph_engine::view::ScreenGeometry;
use taggraph_store::{cache, CachedSource, JsonFileSource, SampleSource};

fn init_tracing() {
    let _ = tracing_subscriber::fmt::try_init();
}

#[derive(Debug, Default)]
struct Args {
    contacts: Option<PathBuf>,
    search: Option<String>,
}

fn parse_args() -> Result<Args> {
    parse_args_from(std::env::args_os().skip(1))
}

fn parse_args_from<I>(args: I) -> Result<Args>
where
    I: IntoIterator<Item = OsString>,
{
    let mut parsed = Args::default();
    let mut args = args.into_iter();

    while let Some(arg) = args.next() {
        if arg == "--contacts" {
            let Some(path) = args.next() else {
                anyhow::bail!("--contacts expects a path to a JSON file");
            };
            parsed.contacts = Some(PathBuf::from(path));
        } else if arg == "--search" {
            let Some(query) = args.next() else {
                anyhow::bail!("--search expects a query string");
            };
            parsed.search = Some(query.to_string_lossy().into_owned());
        } else {
            anyhow::bail!("unknown argument: {:?}", arg);
        }
    }

    Ok(parsed)
}

fn main() -> Result<()> {
    init_tracing();
    cache::init();

    let args = parse_args()?;
    let cfg = config::load_or_default();
    let screen = ScreenGeometry {
        width: cfg.default_screen_width,
        height: cfg.default_screen_height,
        chrome_height: cfg.default_chrome_height,
    };

    let (tx, rx) = crossbeam_channel::unbounded();
    match &args.contacts {
        Some(path) => spawn_loader(CachedSource::new(JsonFileSource::new(path)), tx),
        None => spawn_loader(CachedSource::new(SampleSource), tx),
    }

    let mut session = GraphSession::new(cfg, screen);
    let incoming = rx
        .recv_timeout(Duration::from_secs(30))
        .context("contact loader produced nothing")?;
    session.apply(incoming);

    let bounds = session.bounds();
    tracing::info!(
        contacts = session.model().contact_count(),
        tags = session.model().tag_count(),
        edges = session.model().edge_count(),
        bounds_width = bounds.width(),
        bounds_height = bounds.height(),
        "graph ready"
    );

    if let Some(query) = &args.search {
        session.on_search_text_change(query);
        session.snap_glide();
        tracing::info!(
            query = query.as_str(),
            highlighted_contacts = session.highlighted_contacts().len(),
            highlighted_tags = session.highlighted_tags().len(),
            scale = session.transform().scale,
            "search applied"
        );
    }

    Ok(())
}
