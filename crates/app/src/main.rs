mod args;
mod op;
mod ops;
mod state;

use args::Args;
use clap::{Parser, Subcommand};
use op::Op;
use ops::{Acl, Friends, Graph, Init, Link, Node, Seed, Unlink, Upload, Version};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

command_enum! {
    (Init, Init),
    (Graph, Graph),
    (Friends, Friends),
    (Node, Node),
    (Link, Link),
    (Unlink, Unlink),
    (Acl, Acl),
    (Upload, Upload),
    (Seed, Seed),
    (Version, Version),
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    let settings = op::resolve_settings(
        args.proxy,
        args.web_id,
        args.log_level,
        args.config_path.clone(),
    );

    // Logs go to stderr so command output stays pipeable
    let (non_blocking_writer, _guard) = tracing_appender::non_blocking(std::io::stderr());
    let log_level: tracing::Level = settings.log_level.parse().unwrap_or(tracing::Level::INFO);
    let env_filter = EnvFilter::builder()
        .with_default_directive(log_level.into())
        .from_env_lossy();

    let stderr_layer = tracing_subscriber::fmt::layer()
        .compact()
        .with_writer(non_blocking_writer)
        .with_filter(env_filter);

    tracing_subscriber::registry().with(stderr_layer).init();

    let ctx = match op::OpContext::new(&settings, args.config_path) {
        Ok(ctx) => ctx,
        Err(e) => {
            eprintln!("Error: Failed to create LDP client: {}", e);
            std::process::exit(1);
        }
    };

    match args.command.execute(&ctx).await {
        Ok(output) => {
            println!("{}", output);
            std::process::exit(0);
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
