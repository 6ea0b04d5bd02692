use clap::Parser;
use error_stack::{Report, ResultExt};
use json_to_sheets::{
    app::{self, AppError},
    cli::Cli,
    config::app_config::AppConfig,
    logging,
};

fn setup_panic_hook() {
    tracing::trace!("Setting panic hook");
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        tracing::error!("panic: {info}");
        default_hook(info);
    }));
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Report<AppError>> {
    let cli = Cli::parse();

    let config = AppConfig::load(cli.into()).change_context(AppError::Config)?;
    logging::init(&config.log)?;
    setup_panic_hook();

    app::run(config).await.map(|_| ())
}
