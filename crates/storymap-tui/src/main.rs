//! Story map TUI entry point.

use clap::Parser;
use storymap_app::{App, Runtime, Session};
use storymap_client::{StoryApi, transport::HttpStoryApi};
use storymap_tui::{Args, ClientConfig, TerminalDriver, demo, logging};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let config = ClientConfig::try_from(args)?;

    logging::init(&config.log)?;

    let app = App::new(Session::new(config.author_id.clone()), config.start_route.clone());

    match config.api {
        Some(api) => {
            tracing::info!(base_url = %api.base_url, "connecting to story service");
            run(app, HttpStoryApi::new(api)?).await
        },
        None => {
            tracing::info!(room = demo::DEMO_ROOM, "running against the demo store");
            run(app, demo::seeded_store()).await
        },
    }
}

async fn run<A: StoryApi>(app: App, api: A) -> Result<(), Box<dyn std::error::Error>> {
    let driver = TerminalDriver::new()?;
    Ok(Runtime::new(driver, api, app).run().await?)
}
