use clap::Parser;

use twilight_helper::infrastructure::Settings;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::parse();
    twilight_helper::run(settings).await
}
