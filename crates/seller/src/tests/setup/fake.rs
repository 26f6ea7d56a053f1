use {
    crate::{
        domain::{BidCandidate, BidResponse, Cpm, Origin, Signals},
        infra::BidTransport,
    },
    std::{collections::{BTreeMap, HashMap}, time::Duration},
};

/// How a fake buyer answers.
#[derive(Debug, Clone)]
pub struct Answer {
    amount: &'static str,
    delay: Duration,
    signals: Option<Signals>,
}

impl Answer {
    pub fn bid(amount: &'static str) -> Self {
        Self {
            amount,
            delay: Duration::ZERO,
            signals: None,
        }
    }

    pub fn after(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn signals(mut self, signals: Signals) -> Self {
        self.signals = Some(signals);
        self
    }
}

/// In-process transport. Buyers without an answer never respond.
#[derive(Debug, Default)]
pub struct Transport(HashMap<Origin, Answer>);

impl Transport {
    pub fn answer(mut self, buyer: &str, answer: Answer) -> Self {
        self.0.insert(buyer.into(), answer);
        self
    }
}

#[async_trait::async_trait]
impl BidTransport for Transport {
    async fn request_bid(
        &self,
        candidate: &BidCandidate,
        _: &BTreeMap<String, String>,
    ) -> BidResponse {
        let Some(answer) = self.0.get(&candidate.buyer) else {
            return futures::future::pending().await;
        };
        tokio::time::sleep(answer.delay).await;
        let amount = answer.amount.parse::<Cpm>().unwrap();
        BidResponse {
            amount,
            render_url: Some(format!("{}/ads/{amount}", candidate.buyer)),
            buyer_signals: answer.signals.clone(),
            ..BidResponse::no_bid(candidate)
        }
    }
}
