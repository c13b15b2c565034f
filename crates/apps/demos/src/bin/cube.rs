use clap::Parser;
use demos::cli::{DemoArgs, init_logging};
use demos::config::{CubeConfig, load_config};
use demos::{DemoError, cube};
use tracing::{error, info, warn};

#[derive(Parser, Debug)]
#[command(author, version, about = "Static cube on the map center")]
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
    let config: CubeConfig = load_config(args.demo.config.as_deref())?;
    if args.demo.trace_out.is_some() {
        warn!("--trace-out has no effect: the cube does not move");
    }
    let (view, summary) = cube::run(&config, args.demo.loop_options()).await?;
    info!(
        entities = view.scene().entity_count(),
        repaints = summary.repaints,
        "cube demo finished"
    );
    Ok(())
}
