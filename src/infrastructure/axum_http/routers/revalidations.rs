use std::{convert::Infallible, sync::Arc};

use axum::{
    Router,
    extract::State,
    response::sse::{Event, KeepAlive, Sse},
    routing::get,
};
use tokio_stream::{Stream, StreamExt, wrappers::BroadcastStream};
use tracing::warn;

use crate::infrastructure::revalidation::BroadcastRevalidator;

pub fn routes(revalidator: Arc<BroadcastRevalidator>) -> Router {
    Router::new()
        .route("/", get(stream))
        .with_state(revalidator)
}

pub async fn stream(
    State(revalidator): State<Arc<BroadcastRevalidator>>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let events = BroadcastStream::new(revalidator.subscribe()).filter_map(|message| match message {
        Ok(path) => Some(Ok(Event::default().event("revalidate").data(path))),
        Err(err) => {
            warn!(error = %err, "revalidations: subscriber lagged");
            None
        }
    });

    Sse::new(events).keep_alive(KeepAlive::default())
}
