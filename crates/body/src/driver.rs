//! Async drivers feeding a [`BodyParser`] from a stream of chunks.
//!
//! These adapt the callback-style parser to hosts that expose the request body as a
//! [`futures::Stream`], an [`http_body::Body`] or a whole [`http::Request`]. The parser stays
//! single-threaded: the driver awaits one chunk at a time and hands it over before polling again.
//!
//! A stream error, or a stream that ends before its last chunk, is treated as an abort.

use std::fmt::Display;

use bytes::Bytes;
use futures::{Stream, StreamExt, future, pin_mut, stream};
use http::Request;
use http::header::CONTENT_TYPE;
use http_body::Body;
use http_body_util::BodyStream;
use tracing::{trace, warn};

use crate::chunk::Chunk;
use crate::decoder::ParsedBody;
use crate::error::ParseBodyError;
use crate::handler::BodyHandler;
use crate::options::ParserOptions;
use crate::parser::parse_body;

/// Handler keeping the terminal event so the driver can return it.
#[derive(Debug, Default)]
struct Outcome {
    body: Option<ParsedBody>,
}

impl BodyHandler for Outcome {
    fn on_result(&mut self, body: ParsedBody, _was_parsed: bool) {
        self.body = Some(body);
    }
}

impl Outcome {
    fn into_result(self) -> Result<ParsedBody, ParseBodyError> {
        self.body.ok_or(ParseBodyError::Aborted)
    }
}

/// Parses a body delivered as a stream of [`Chunk`]s.
///
/// The stream is polled until the parser finishes; anything after the last chunk is not read.
///
/// # Errors
/// * [`ParseBodyError::Aborted`] if the stream fails or ends before the last chunk
/// * [`ParseBodyError::Decode`] if the body can not be decoded
pub async fn parse_stream<S, E>(content_type: Option<&str>, stream: S, options: ParserOptions) -> Result<ParsedBody, ParseBodyError>
where
    S: Stream<Item = Result<Chunk, E>>,
    E: Display,
{
    pin_mut!(stream);
    let mut parser = parse_body(content_type, Outcome::default(), options);

    while !parser.is_finished() {
        match stream.next().await {
            Some(Ok(chunk)) => parser.on_chunk(chunk)?,
            Some(Err(e)) => {
                warn!(cause = %e, "failed to read request body");
                parser.on_abort();
            }
            None => {
                warn!("request body stream closed before the last chunk");
                parser.on_abort();
            }
        }
    }

    parser.into_handler().into_result()
}

/// Parses an [`http_body::Body`]; the end of the body marks the last chunk.
///
/// Trailer frames are ignored.
///
/// # Errors
/// See [`parse_stream`], a body error is reported as [`ParseBodyError::Aborted`].
pub async fn parse_http_body<B>(content_type: Option<&str>, body: B, options: ParserOptions) -> Result<ParsedBody, ParseBodyError>
where
    B: Body<Data = Bytes>,
    B::Error: Display,
{
    let chunks = BodyStream::new(body)
        .filter_map(|frame| {
            future::ready(match frame {
                Ok(frame) => match frame.into_data() {
                    Ok(data) => Some(Ok(Chunk::data(data))),
                    Err(_) => {
                        trace!("skip non data frame of request body");
                        None
                    }
                },
                Err(e) => Some(Err(e)),
            })
        })
        .chain(stream::once(future::ready(Ok(Chunk::eof()))));

    parse_stream(content_type, chunks, options).await
}

/// Parses the body of `request`, taking the decoder from its `Content-Type` header.
///
/// # Errors
/// See [`parse_stream`].
pub async fn parse_request<B>(request: Request<B>, options: ParserOptions) -> Result<ParsedBody, ParseBodyError>
where
    B: Body<Data = Bytes>,
    B::Error: Display,
{
    let (parts, body) = request.into_parts();
    let content_type = parts.headers.get(CONTENT_TYPE).and_then(|value| value.to_str().ok());
    parse_http_body(content_type, body, options).await
}
