use combine_net::config::Settings;
use log::LevelFilter;
use log4rs::append::console::ConsoleAppender;
use log4rs::config::{Appender, Config, Root};
use log4rs::encode::pattern::PatternEncoder;
use std::error::Error;
use std::path::Path;

const LOG_CONFIG: &str = "log4rs.yml";

fn init_logging() -> Result<(), Box<dyn Error>> {
    if Path::new(LOG_CONFIG).exists() {
        log4rs::init_file(LOG_CONFIG, Default::default())?;
    } else {
        let stdout = ConsoleAppender::builder()
            .encoder(Box::new(PatternEncoder::new("{l}: {m}{n}")))
            .build();
        let config = Config::builder()
            .appender(Appender::builder().build("stdout", Box::new(stdout)))
            .build(Root::builder().appender("stdout").build(LevelFilter::Info))?;
        log4rs::init_config(config)?;
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Do as little as possible in main.rs as it can't contain any tests
    dotenv::dotenv().ok();
    init_logging()?;
    log::info!("#Start main()");

    let settings = Settings::load()?;
    log::debug!("settings={settings:?}");

    combine_net::run(&settings).await?;

    Ok(())
}
