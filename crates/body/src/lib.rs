//! Streaming request body decoding for the micro http server
//!
//! This crate turns the chunks of an HTTP request body, as they arrive from the transport, into
//! either a structured value or the raw bytes. The decoder is chosen from the request's content
//! type, the body is accumulated until its last chunk and then decoded in one pass.
//!
//! # Features
//!
//! - `application/json` bodies parsed into a [`serde_json::Value`]
//! - `application/x-www-form-urlencoded` bodies decoded into ordered pairs, or folded into an object
//! - any other content type delivered verbatim
//! - mid-stream cancellation when the connection terminates early
//! - an optional body size limit
//! - async drivers for [`futures::Stream`], [`http_body::Body`] and [`http::Request`]
//!
//! # Example
//!
//! The host owns one [`BodyParser`] per request and feeds it from its event loop:
//!
//! ```
//! use micro_body::{parse_body, make_handler_with_abort, Chunk, ParsedBody, ParserOptions};
//! use serde_json::json;
//! use tracing::{error, info};
//!
//! let mut received = None;
//! let mut parser = parse_body(
//!     Some("application/json"),
//!     make_handler_with_abort(
//!         |body, was_parsed| received = Some((body, was_parsed)),
//!         || info!("client went away"),
//!     ),
//!     ParserOptions::default(),
//! );
//!
//! for chunk in [Chunk::data(r#"{"name":"#), Chunk::last(r#""micro"}"#)] {
//!     if let Err(e) = parser.on_chunk(chunk) {
//!         // a decode failure is fatal, the host closes the connection
//!         error!(cause = %e, "close connection");
//!         break;
//!     }
//! }
//! drop(parser);
//!
//! assert_eq!(received, Some((ParsedBody::Json(json!({"name": "micro"})), true)));
//! ```
//!
//! Hosts built on `http_body` can await the whole decode instead:
//!
//! ```
//! # use bytes::Bytes;
//! # use http_body_util::Full;
//! # use micro_body::{parse_request, ParsedBody, ParserOptions};
//! # use serde_json::json;
//! # futures::executor::block_on(async {
//! let request = http::Request::builder()
//!     .header(http::header::CONTENT_TYPE, "application/x-www-form-urlencoded")
//!     .body(Full::new(Bytes::from_static(b"a=1&a=2&b=caf%C3%A9")))
//!     .unwrap();
//!
//! let body = parse_request(request, ParserOptions::default()).await.unwrap();
//! assert_eq!(body, ParsedBody::Form(json!({"a": "2", "b": "café"})));
//! # });
//! ```
//!
//! # Architecture
//!
//! - [`percent`]: `%XX` decoding with a request-scoped UTF-8 decoder
//! - [`ChunkAccumulator`]: collects chunks until the last one
//! - [`DecoderKind`]: the closed set of decoders (raw, JSON, form)
//! - [`dispatch`]: the static content type to decoder mapping
//! - [`BodyParser`]: the per-request state machine driven by `on_chunk` / `on_abort`
//! - [`parse_stream`], [`parse_http_body`], [`parse_request`]: async drivers
//!
//! # Error Handling
//!
//! - [`DecodeError`]: a body that can not be decoded; fatal for the request, no partial result
//! - [`ParseBodyError`]: what the async drivers return, separating aborts from decode failures
//! - [`ExtractError`]: a decoded body that does not fit the requested type
//!
//! # Limitations
//!
//! - content types are matched exactly, parameters like `charset` are not stripped
//! - no multipart, transfer-encoding or compression handling
//! - duplicate form keys keep only the last value when folded

mod accumulator;
mod chunk;
mod decoder;
mod dispatcher;
mod driver;
mod error;
mod handler;
mod options;
mod parser;
pub mod percent;

mod utils;
pub(crate) use utils::ensure;

pub use accumulator::ChunkAccumulator;
pub use chunk::Chunk;
pub use decoder::{DecoderKind, ParsedBody, decode_form, fold_pairs};
pub use dispatcher::dispatch;
pub use driver::{parse_http_body, parse_request, parse_stream};
pub use error::{DecodeError, ExtractError, ParseBodyError};
pub use handler::{BodyHandler, HandlerFn, make_handler, make_handler_with_abort};
pub use options::ParserOptions;
pub use parser::{BodyParser, ParseState, parse_body};
