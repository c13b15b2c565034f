use assets::FileModelLoader;
use clap::Parser;
use demos::cli::{DemoArgs, asset_root, init_logging};
use demos::config::{CarConfig, load_config};
use demos::{DemoError, car};
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(author, version, about = "Car looping a smoothed track over the map")]
struct Args {
    #[command(flatten)]
    demo: DemoArgs,
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    init_logging();
    let args = Args::parse();

    if let Err(err) = run(args).await {
        error!("{err}");
        std::process::exit(1);
    }
}

async fn run(args: Args) -> Result<(), DemoError> {
    let config: CarConfig = load_config(args.demo.config.as_deref())?;
    let root = asset_root();
    info!(root = %root.display(), model = %config.model.url, "starting car demo");

    let mut loader = FileModelLoader::new(root);
    let outcome = car::run(&config, &mut loader, args.demo.loop_options()).await?;
    if outcome.scene.car().is_none() {
        info!("model never arrived within the frame budget");
    }

    if let Some(path) = &args.demo.trace_out {
        outcome.scene.trace().write_to(path)?;
        info!(
            path = %path.display(),
            records = outcome.scene.trace().records().len(),
            "trace written"
        );
    }
    Ok(())
}
