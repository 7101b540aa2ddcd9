//! Simulates a host transport delivering request bodies in small chunks.
//!
//! Run with `cargo run --example parse_body`.

use std::convert::Infallible;
use std::time::Duration;

use futures::SinkExt;
use futures::channel::mpsc;
use micro_body::{Chunk, ParseBodyError, ParserOptions, make_handler_with_abort, parse_body, parse_stream};
use tracing::{Level, error, info};
use tracing_subscriber::FmtSubscriber;

const FORM_BODY: &str = "name=micro+body&lang=rust&greeting=caf%C3%A9&lang=zig";

#[tokio::main]
async fn main() {
    let subscriber = FmtSubscriber::builder().with_max_level(Level::TRACE).finish();
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    drive_callbacks();

    match stream_body("application/x-www-form-urlencoded", FORM_BODY, ParserOptions::new().with_as_json(false)).await {
        Ok(body) => info!(?body, "received form pairs"),
        Err(e) => error!(cause = %e, "failed to parse body"),
    }

    match stream_body("application/json", "{\"broken\": ", ParserOptions::default()).await {
        Ok(body) => info!(?body, "received json"),
        Err(e) => error!(cause = %e, "failed to parse body, closing connection"),
    }
}

/// Feeds a parser directly, the way an event loop would.
fn drive_callbacks() {
    let mut parser = parse_body(
        Some("application/x-www-form-urlencoded"),
        make_handler_with_abort(
            |body, was_parsed| info!(?body, was_parsed, "received form body"),
            || info!("connection aborted"),
        ),
        ParserOptions::default(),
    );

    let bytes = FORM_BODY.as_bytes();
    for (i, piece) in bytes.chunks(8).enumerate() {
        let is_last = (i + 1) * 8 >= bytes.len();
        if let Err(e) = parser.on_chunk(Chunk::new(piece.to_vec(), is_last)) {
            error!(cause = %e, "failed to parse body, closing connection");
            return;
        }
    }

    // the connection closes after the body was delivered, nothing happens
    parser.on_abort();
}

/// Sends `body` through a channel from another task and awaits the decoded result.
async fn stream_body(content_type: &str, body: &'static str, options: ParserOptions) -> Result<micro_body::ParsedBody, ParseBodyError> {
    let (mut sender, receiver) = mpsc::channel::<Result<Chunk, Infallible>>(4);

    tokio::spawn(async move {
        let bytes = body.as_bytes();
        for (i, piece) in bytes.chunks(5).enumerate() {
            let is_last = (i + 1) * 5 >= bytes.len();
            if sender.send(Ok(Chunk::new(piece, is_last))).await.is_err() {
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    });

    parse_stream(Some(content_type), receiver, options).await
}
