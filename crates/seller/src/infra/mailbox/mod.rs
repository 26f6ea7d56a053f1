//! Cross-context messaging between the publisher page and the coordinator of
//! sequential auctions. Inbound messages are validated before they start an
//! auction and every auction reports back through the outbox.

use {
    super::observe,
    crate::domain::{
        AuctionId,
        Origin,
        sequential::{Coordinator, Outcome},
    },
    serde::Serialize,
    std::sync::Arc,
    thiserror::Error,
    tokio::sync::mpsc,
    tracing::Instrument,
};

pub mod dto;

const CAPACITY: usize = 64;

/// A message together with the origin of its sender.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Envelope {
    pub origin: String,
    pub data: String,
}

/// The caller's end of a running coordinator.
pub struct Mailbox {
    pub inbox: mpsc::Sender<Envelope>,
    pub outbox: mpsc::Receiver<Envelope>,
}

/// Starts a coordinator that accepts messages from origins starting with
/// `allowed_origin_prefix`. The coordinator stops once the inbox is closed,
/// the outbox is closed after the last running auction reported back.
pub fn spawn(coordinator: Arc<Coordinator>, allowed_origin_prefix: String) -> Mailbox {
    let (inbox, inbound) = mpsc::channel(CAPACITY);
    let (outbound, outbox) = mpsc::channel(CAPACITY);
    tokio::spawn(serve(coordinator, allowed_origin_prefix, inbound, outbound));
    Mailbox { inbox, outbox }
}

async fn serve(
    coordinator: Arc<Coordinator>,
    allowed_origin_prefix: String,
    mut inbound: mpsc::Receiver<Envelope>,
    outbound: mpsc::Sender<Envelope>,
) {
    loop {
        observe::awaiting_context();
        let Some(envelope) = inbound.recv().await else {
            break;
        };
        let request = match validate(&envelope, &allowed_origin_prefix) {
            Ok(request) => request,
            Err(err) => {
                observe::message_rejected(&envelope, &err);
                continue;
            }
        };

        let coordinator = coordinator.clone();
        let outbound = outbound.clone();
        let auction_id = request.context.auction_id.clone();
        let span = tracing::info_span!("sequential_auction", auction_id = %auction_id);
        tokio::spawn(
            async move {
                let outcome = coordinator.run(request).await;
                let messages = match messages(&auction_id, coordinator.origin(), &outcome) {
                    Ok(messages) => messages,
                    Err(err) => {
                        observe::encoding_failed(&auction_id, &err);
                        return;
                    }
                };
                for message in messages {
                    if outbound.send(message).await.is_err() {
                        observe::outbox_closed(&auction_id);
                        return;
                    }
                }
            }
            .instrument(span),
        );
    }
}

fn validate(
    envelope: &Envelope,
    allowed_origin_prefix: &str,
) -> Result<crate::domain::sequential::Request, Error> {
    if !envelope.origin.starts_with(allowed_origin_prefix) {
        return Err(Error::UnknownOrigin(envelope.origin.clone()));
    }
    dto::request(&envelope.data)
}

/// The messages reporting the outcome of an auction, in the order they are
/// sent.
fn messages(
    auction_id: &AuctionId,
    seller: &Origin,
    outcome: &Outcome,
) -> Result<Vec<Envelope>, serde_json::Error> {
    Ok(match outcome {
        Outcome::Config(config) => vec![
            envelope(seller, &dto::Config::new(auction_id, config))?,
            envelope(seller, &dto::Ack::new(auction_id, seller))?,
        ],
        Outcome::NoEligibleAds => vec![envelope(seller, &dto::NoEligibleAds::new(auction_id))?],
    })
}

fn envelope(seller: &Origin, data: &impl Serialize) -> Result<Envelope, serde_json::Error> {
    Ok(Envelope {
        origin: seller.to_string(),
        data: serde_json::to_string(data)?,
    })
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("message from unexpected origin {0}")]
    UnknownOrigin(String),
    #[error("unexpected message {0:?}")]
    UnexpectedMessage(String),
    #[error("adType not found in adUnit")]
    MissingAdType,
    #[error("malformed message: {0:?}")]
    Malformed(#[from] serde_json::Error),
}

impl Error {
    /// Label of the error in metrics.
    pub fn reason(&self) -> &'static str {
        match self {
            Self::UnknownOrigin(_) => "unknown_origin",
            Self::UnexpectedMessage(_) => "unexpected_message",
            Self::MissingAdType => "missing_ad_type",
            Self::Malformed(_) => "malformed",
        }
    }
}
