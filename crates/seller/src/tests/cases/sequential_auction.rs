use {
    super::run,
    crate::{
        infra::cli::Command,
        tests::setup::{
            self,
            PUBLISHER,
            SELLER,
            bidder::{self, Behaviour},
        },
    },
    axum::http::StatusCode,
    serde_json::json,
};

const SSP_B: &str = "https://ssp-b.example";

fn sequential(messages: &[serde_json::Value]) -> Command {
    Command::Sequential {
        origin: PUBLISHER.to_owned(),
        message: messages.iter().map(ToString::to_string).collect(),
    }
}

fn run_ad_auction(auction_id: &str, other_sellers: &[&str]) -> serde_json::Value {
    json!({
        "message": "RUN_AD_AUCTION",
        "auctionId": auction_id,
        "adUnit": { "adType": "display", "isFencedFrame": "false" },
        "otherSellers": other_sellers,
    })
}

/// Starts seller B as a mock answering with the contextual bid a seller
/// configured with a single buyer bidding `bid` would produce.
async fn ssp_b(auction_id: &str, bid: &str) -> bidder::Bidder {
    let dsp_b = bidder::setup(
        "https://dsp-b.example",
        Behaviour::Respond(json!({ "bid": bid, "renderURL": "https://dsp-b.example/ads/9" })),
    )
    .await;
    let mut config = setup::config(&[&dsp_b]);
    config.seller = setup::metadata(SSP_B);
    let documents = run(
        Command::ContextualBid {
            context: json!({ "auctionId": auction_id, "adType": "display" }).to_string(),
        },
        &config,
    )
    .await;
    bidder::setup(SSP_B, Behaviour::Respond(documents[0].clone())).await
}

/// Test that the contextual auctions of all sellers are combined into one
/// multi-seller auction configuration.
#[tokio::test]
async fn combines_sellers() {
    let ssp_b = ssp_b("HB-1", "2.50").await;
    let dsp_a = bidder::setup(
        "https://dsp-a.example",
        Behaviour::Respond(json!({ "bid": "1.00" })),
    )
    .await;
    let config = setup::sequential(setup::config(&[&dsp_a]), &[&ssp_b]);

    let messages = run(sequential(&[run_ad_auction("HB-1", &[SSP_B])]), &config).await;

    let [config_message, ack] = messages.as_slice() else {
        panic!("expected an auction config and an ack, got {messages:?}");
    };
    assert_eq!(config_message["auctionId"], "HB-1");
    assert_eq!(*ack, json!({ "auctionId": "HB-1", "seller": SELLER }));

    let auction_config = &config_message["auctionConfig"];
    assert_eq!(auction_config["seller"], SELLER);
    assert_eq!(
        auction_config["decisionLogicURL"],
        format!("{SELLER}/js/ssp/top-level-decision-logic.js")
    );
    assert_eq!(auction_config["sellerSignals"]["bidFloor"], "2.50");
    assert_eq!(auction_config["auctionSignals"]["isFencedFrame"], false);
    assert_eq!(
        auction_config["sellerSignals"]["winningContextualBid"]["bidder"],
        SSP_B
    );
    assert_eq!(
        auction_config["sellerSignals"]["winningContextualBid"]["renderURL"],
        "https://dsp-b.example/ads/9"
    );

    let components = auction_config["componentAuctions"].as_array().unwrap();
    assert_eq!(components.len(), 2);
    assert_eq!(components[0]["seller"], SELLER);
    assert_eq!(components[0]["sellerSignals"]["bidFloor"], "1.00");
    assert_eq!(components[1]["seller"], SSP_B);
    assert_eq!(components[1]["sellerSignals"]["bidFloor"], "2.50");
    for component in components {
        assert_eq!(component["auctionSignals"]["auctionId"], "HB-1");
        assert_eq!(component["auctionSignals"]["adType"], "display");
        assert_eq!(component["sellerSignals"]["topLevelSeller"], SELLER);
        for buyer in ["https://dsp-a.example", "https://dsp-b.example"] {
            assert_eq!(component["perBuyerSignals"][buyer]["auctionId"], "HB-1");
        }
    }

    // Seller B was asked with the auction context.
    let requests = ssp_b.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0]["auctionId"], "HB-1");
    assert_eq!(requests[0]["adType"], "display");
}

/// Test that a failing seller is left out while the others still run.
#[tokio::test]
async fn failing_seller_is_left_out() {
    let ssp_b = bidder::setup(SSP_B, Behaviour::Status(StatusCode::SERVICE_UNAVAILABLE)).await;
    let dsp_a = bidder::setup(
        "https://dsp-a.example",
        Behaviour::Respond(json!({ "bid": "0.80" })),
    )
    .await;
    let config = setup::sequential(setup::config(&[&dsp_a]), &[&ssp_b]);

    let messages = run(sequential(&[run_ad_auction("HB-2", &[SSP_B])]), &config).await;

    let auction_config = &messages[0]["auctionConfig"];
    let components = auction_config["componentAuctions"].as_array().unwrap();
    assert_eq!(components.len(), 1);
    assert_eq!(components[0]["seller"], SELLER);
    assert_eq!(auction_config["sellerSignals"]["bidFloor"], "0.80");
}

/// Test that invalid messages are dropped without affecting valid ones.
#[tokio::test]
async fn invalid_messages_are_dropped() {
    let dsp_a = bidder::setup(
        "https://dsp-a.example",
        Behaviour::Respond(json!({ "bid": "1.00" })),
    )
    .await;
    let config = setup::sequential(setup::config(&[&dsp_a]), &[]);

    let mut foreign = run_ad_auction("HB-foreign", &[]);
    foreign["message"] = json!("PING");
    let messages = run(
        sequential(&[
            foreign,
            json!({ "auctionId": "HB-no-ad-type", "adUnit": {} }),
            json!("garbage"),
            run_ad_auction("HB-valid", &[]),
        ]),
        &config,
    )
    .await;

    assert_eq!(messages.len(), 2);
    assert!(messages.iter().all(|message| message["auctionId"] == "HB-valid"));
}

/// Test that an auction without buyers and without other sellers reports
/// that there are no eligible ads instead of an auction config.
#[tokio::test]
async fn no_eligible_ads() {
    let config = setup::sequential(setup::config(&[]), &[]);

    let messages = run(
        sequential(&[run_ad_auction("HB-empty", &["https://ssp-unknown.example"])]),
        &config,
    )
    .await;

    assert_eq!(
        messages,
        [json!({ "auctionId": "HB-empty", "noEligibleAds": true })]
    );
}

/// Test that an auction whose buyers all fail still hands the seller's
/// component to the on-device auction.
#[tokio::test]
async fn failing_buyers_keep_the_component() {
    let dsp_a = bidder::setup(
        "https://dsp-a.example",
        Behaviour::Status(StatusCode::INTERNAL_SERVER_ERROR),
    )
    .await;
    let config = setup::sequential(setup::config(&[&dsp_a]), &[]);

    let messages = run(sequential(&[run_ad_auction("HB-3", &[])]), &config).await;

    assert_eq!(messages.len(), 2);
    let auction_config = &messages[0]["auctionConfig"];
    assert!(auction_config["sellerSignals"].get("bidFloor").is_none());
    let components = auction_config["componentAuctions"].as_array().unwrap();
    assert_eq!(components.len(), 1);
    assert_eq!(
        components[0]["interestGroupBuyers"],
        json!(["https://dsp-a.example"])
    );
}

/// Test that messages from origins outside the allowed prefix are dropped.
#[tokio::test]
async fn unknown_origin_is_dropped() {
    let config = setup::sequential(setup::config(&[]), &[]);

    let messages = run(
        Command::Sequential {
            origin: "https://evil.example".to_owned(),
            message: vec![run_ad_auction("HB-9", &[]).to_string()],
        },
        &config,
    )
    .await;

    assert!(messages.is_empty());
}

/// Test that concurrent auctions each report back under their own auction ID
/// with the config preceding the ack.
#[tokio::test]
async fn concurrent_auctions() {
    let dsp_a = bidder::setup(
        "https://dsp-a.example",
        Behaviour::Respond(json!({ "bid": "1.00" })),
    )
    .await;
    let config = setup::sequential(setup::config(&[&dsp_a]), &[]);

    let messages = run(
        sequential(&[
            run_ad_auction("HB-10", &["https://ssp-unknown.example"]),
            run_ad_auction("HB-11", &[]),
        ]),
        &config,
    )
    .await;

    assert_eq!(messages.len(), 4);
    for auction_id in ["HB-10", "HB-11"] {
        let position = |key: &str| {
            messages
                .iter()
                .position(|message| {
                    message["auctionId"] == auction_id && message.get(key).is_some()
                })
                .unwrap()
        };
        assert!(position("auctionConfig") < position("seller"));
    }
    assert_eq!(dsp_a.requests().len(), 2);
}
