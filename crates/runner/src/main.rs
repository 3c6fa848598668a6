use gbce_clock::SystemClock;
use gbce_runner::{BootstrapConfig, MarketBootstrap, report, run_demo};
use log::error;

#[tokio::main]
async fn main() {
    env_logger::init();

    let config = BootstrapConfig::from_args(std::env::args());
    let clock = SystemClock::shared();

    let market = match MarketBootstrap::start(&config, clock.clone()) {
        Ok(market) => market,
        Err(e) => {
            error!("Failed to start market: {}", e);
            std::process::exit(1);
        }
    };

    match run_demo(&market.handle, &*clock, &market.market.name).await {
        Ok(demo) => print!("{}", report::render(&demo)),
        Err(e) => {
            error!("Demo session failed: {}", e);
            std::process::exit(1);
        }
    }
}
