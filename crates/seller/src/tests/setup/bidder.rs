use {
    crate::domain::Origin,
    axum::{
        Json,
        extract::{Query, State},
        http::StatusCode,
        response::{IntoResponse, Response},
    },
    std::{
        collections::HashMap,
        net::SocketAddr,
        sync::{Arc, Mutex},
        time::Duration,
    },
};

/// How a mocked bidder answers bid requests.
#[derive(Debug, Clone)]
pub enum Behaviour {
    Respond(serde_json::Value),
    RespondAfter(Duration, serde_json::Value),
    Status(StatusCode),
    Garbage,
    Hang,
}

/// A buyer or seller started as part of the setup.
#[derive(Debug)]
pub struct Bidder {
    pub origin: Origin,
    pub addr: SocketAddr,
    requests: Arc<Mutex<Vec<HashMap<String, String>>>>,
}

#[derive(Clone)]
struct Mock {
    behaviour: Behaviour,
    requests: Arc<Mutex<Vec<HashMap<String, String>>>>,
}

impl Bidder {
    pub fn endpoint(&self) -> url::Url {
        format!("http://{}/contextual-bid", self.addr).parse().unwrap()
    }

    /// The query parameters of every request received so far.
    pub fn requests(&self) -> Vec<HashMap<String, String>> {
        self.requests.lock().unwrap().clone()
    }
}

/// Set up an HTTP server acting as a bidder with the given origin.
pub async fn setup(origin: &str, behaviour: Behaviour) -> Bidder {
    let requests = Arc::new(Mutex::new(Vec::new()));
    let app = axum::Router::new()
        .route("/contextual-bid", axum::routing::get(bid))
        .with_state(Mock {
            behaviour,
            requests: requests.clone(),
        });
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move { axum::serve(listener, app).await.unwrap() });
    Bidder {
        origin: origin.into(),
        addr,
        requests,
    }
}

async fn bid(State(mock): State<Mock>, Query(query): Query<HashMap<String, String>>) -> Response {
    mock.requests.lock().unwrap().push(query);
    match mock.behaviour {
        Behaviour::Respond(res) => Json(res).into_response(),
        Behaviour::RespondAfter(delay, res) => {
            tokio::time::sleep(delay).await;
            Json(res).into_response()
        }
        Behaviour::Status(status) => status.into_response(),
        Behaviour::Garbage => "<html>not a bid</html>".into_response(),
        Behaviour::Hang => futures::future::pending().await,
    }
}
