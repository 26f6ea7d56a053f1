use std::path::PathBuf;

#[derive(Debug, clap::Parser)]
#[command(version, about)]
pub struct Args {
    /// The log filter.
    #[clap(long, env, default_value = "warn,seller=debug")]
    pub log: String,

    /// At which log level logs should be printed to stderr instead of stdout.
    #[clap(long, env)]
    pub stderr_threshold: Option<tracing::Level>,

    /// Whether to use JSON format for the logs.
    #[clap(long, env, default_value = "false")]
    pub use_json_logs: bool,

    /// Path to the seller configuration file. This file should be in TOML
    /// format. For an example see `crates/seller/example.toml`.
    #[clap(long, env)]
    pub config: PathBuf,

    /// Print the collected metrics in the prometheus text format before
    /// exiting.
    #[clap(long, env, default_value = "false")]
    pub print_metrics: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, clap::Subcommand)]
pub enum Command {
    /// Run a single-seller contextual auction and print the resulting auction
    /// configuration.
    Auction {
        /// The ad request signals as a JSON object, e.g.
        /// `{"adType":"display","isFencedFrame":"true"}`.
        #[clap(long)]
        context: String,
    },
    /// Run a contextual auction and print the contextual bid this seller
    /// answers to a top-level seller with.
    ContextualBid {
        #[clap(long)]
        context: String,
    },
    /// Run sequential auctions as the top-level seller and print every
    /// outbound message.
    Sequential {
        /// The origin the messages claim to come from.
        #[clap(long)]
        origin: String,
        /// A `RUN_AD_AUCTION` message. Can be repeated to run several
        /// auctions at once.
        #[clap(long, required = true)]
        message: Vec<String>,
    },
}
