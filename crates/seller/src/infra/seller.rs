use {
    super::{buyer::BidTransport, dto, observe},
    crate::domain::{
        BidCandidate,
        Context,
        Origin,
        fanout,
        seller::{Outcome, SellerAuction},
    },
    serde::Deserialize,
    std::{sync::Arc, time::Duration},
    url::Url,
};

/// Another seller taking part in a sequential auction. It is asked for its
/// contextual bid the same way a buyer is and answers with a
/// [`dto::ContextualBid`].
pub struct Remote {
    origin: Origin,
    endpoint: Url,
    transport: Arc<dyn BidTransport>,
    timeout: Duration,
}

impl Remote {
    pub fn new(
        origin: Origin,
        endpoint: Url,
        transport: Arc<dyn BidTransport>,
        timeout: Duration,
    ) -> Self {
        Self {
            origin,
            endpoint,
            transport,
            timeout,
        }
    }
}

#[async_trait::async_trait]
impl SellerAuction for Remote {
    fn origin(&self) -> &Origin {
        &self.origin
    }

    async fn contextual_auction(&self, context: &Context) -> Outcome {
        let candidate = BidCandidate {
            buyer: self.origin.clone(),
            endpoint: self.endpoint.clone(),
            auction_id: context.auction_id.clone(),
        };
        let responses = fanout::collect(
            self.transport.as_ref(),
            std::slice::from_ref(&candidate),
            &context.signals,
            self.timeout,
        )
        .await;
        let Some(mut response) = responses.into_iter().next() else {
            return Outcome::default();
        };

        let component = response.component_auction.take().and_then(|value| {
            match dto::ComponentAuctionConfig::deserialize(value) {
                Ok(component) => Some(component.into_domain()),
                Err(err) => {
                    observe::invalid_component(&self.origin, &err);
                    None
                }
            }
        });
        Outcome {
            winner: response.is_bid().then_some(response),
            component,
        }
    }
}
