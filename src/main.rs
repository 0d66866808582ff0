mod app;
mod artwork;
mod config;
mod error;
mod ingest;
mod logging;
mod picker;
mod player;
mod pointer;
mod queue;
mod runtime;
mod session;
mod shortcuts;
mod ui;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    runtime::run()
}
