use {
    crate::{
        domain::{
            Context,
            Seller,
            seller::{self, SellerAuction, SellerSignals},
            sequential::Coordinator,
        },
        infra::{
            self,
            BidTransport,
            SignalStore,
            buyer,
            cli,
            config,
            dto,
            mailbox::{self, Envelope, Mailbox},
            observe,
            signal_store,
        },
    },
    anyhow::Context as _,
    clap::Parser,
    std::{io::Write, sync::Arc},
};

pub async fn start(args: impl Iterator<Item = String>) {
    if let Err(err) = run(args).await {
        tracing::error!(?err, "seller failed");
        std::process::exit(1);
    }
}

/// Parses the arguments, runs the requested command and prints its output
/// to stdout.
pub async fn run(args: impl Iterator<Item = String>) -> anyhow::Result<()> {
    let args = cli::Args::parse_from(args);
    observe::init(&args.log, args.stderr_threshold, args.use_json_logs);
    tracing::info!("running seller with {args:#?}");
    let config = config::file::load(&args.config).await;

    execute(args.command, &config, &mut std::io::stdout()).await?;
    if args.print_metrics {
        print!("{}", observe::encode_metrics());
    }
    Ok(())
}

pub(crate) async fn execute(
    command: cli::Command,
    config: &infra::Config,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let transport: Arc<dyn BidTransport> = Arc::new(
        buyer::Http::new(config.response_size_limit).context("failed to build HTTP client")?,
    );
    match command {
        cli::Command::Auction { context } => {
            let context = parse_context(&context)?;
            let auction = seller(config, transport).auction(&context).await;
            let document = dto::AuctionConfig::from_domain(&auction);
            writeln!(out, "{}", serde_json::to_string_pretty(&document)?)?;
        }
        cli::Command::ContextualBid { context } => {
            let context = parse_context(&context)?;
            let auction = seller(config, transport).auction(&context).await;
            let document = dto::ContextualBid::new(&context, &auction);
            writeln!(out, "{}", serde_json::to_string_pretty(&document)?)?;
        }
        cli::Command::Sequential { origin, message } => {
            let sequential = config
                .sequential
                .as_ref()
                .context("sequential auctions need a [sequential] configuration")?;
            let Mailbox { inbox, mut outbox } = mailbox::spawn(
                Arc::new(coordinator(config, sequential, transport)),
                sequential.allowed_origin_prefix.clone(),
            );
            for data in message {
                inbox
                    .send(Envelope {
                        origin: origin.clone(),
                        data,
                    })
                    .await
                    .context("coordinator stopped")?;
            }
            drop(inbox);
            while let Some(envelope) = outbox.recv().await {
                writeln!(out, "{}", envelope.data)?;
            }
        }
    }
    Ok(())
}

fn parse_context(context: &str) -> anyhow::Result<Context> {
    let signals: serde_json::Map<String, serde_json::Value> =
        serde_json::from_str(context).context("the context must be a JSON object")?;
    Ok(Context::from_signals(
        dto::flatten_signals(signals),
        seller::AUCTION_ID_PREFIX,
    ))
}

fn seller(config: &infra::Config, transport: Arc<dyn BidTransport>) -> Seller {
    let signals = config.signal_store.as_ref().map(|store| SellerSignals {
        store: match store {
            signal_store::Config::Static { signals, .. } => {
                Arc::new(signal_store::Static::new(signals.clone())) as Arc<dyn SignalStore>
            }
            signal_store::Config::Http { url, .. } => Arc::new(signal_store::Http::new(
                reqwest::Client::new(),
                url.clone(),
                config.response_size_limit,
            )) as Arc<dyn SignalStore>,
        },
        keys: store.keys().to_vec(),
    });
    Seller::new(
        config.seller.clone(),
        config.buyers.clone(),
        transport,
        signals,
        config.contextual_auction_timeout,
    )
}

fn coordinator(
    config: &infra::Config,
    sequential: &config::Sequential,
    transport: Arc<dyn BidTransport>,
) -> Coordinator {
    let remotes = sequential
        .sellers
        .iter()
        .map(|remote| {
            Arc::new(infra::seller::Remote::new(
                remote.origin.clone(),
                remote.contextual_bid_endpoint.clone(),
                transport.clone(),
                config.contextual_auction_timeout,
            )) as Arc<dyn SellerAuction>
        })
        .collect::<Vec<_>>();
    Coordinator::new(
        sequential.top_level.clone(),
        Arc::new(seller(config, transport)),
        remotes,
    )
}
