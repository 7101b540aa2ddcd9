//! The per-request body parsing state machine.
//!
//! A [`BodyParser`] is created by [`parse_body`] when the host accepts a request body and is then
//! driven by the host's event loop: every received chunk goes to [`BodyParser::on_chunk`], an early
//! connection close goes to [`BodyParser::on_abort`]. The parser never blocks and never spawns, all
//! work happens inside these two calls.
//!
//! # State transitions
//!
//! ```text
//!              on_chunk(last) ok
//!  Receiving ─────────────────────▶ Completed   (handler.on_result)
//!      │   on_chunk(last) err / size limit
//!      ├──────────────────────────▶ Failed      (host closes the connection)
//!      │   on_abort
//!      └──────────────────────────▶ Aborted     (handler.on_abort)
//! ```
//!
//! All three end states are terminal: an abort arriving after completion is ignored, and chunks
//! arriving after an abort are dropped without touching the buffer.

use tracing::{error, info, trace};

use crate::accumulator::ChunkAccumulator;
use crate::chunk::Chunk;
use crate::decoder::DecoderKind;
use crate::dispatcher::dispatch;
use crate::error::DecodeError;
use crate::handler::BodyHandler;
use crate::options::ParserOptions;

/// Creates the parser for one request body, selecting the decoder from `content_type`.
///
/// The abort path is live as soon as this returns, so an abort is reported even if no chunk ever
/// arrives.
///
/// # Example
/// ```
/// use micro_body::{parse_body, make_handler, Chunk, ParsedBody, ParserOptions};
/// use serde_json::json;
///
/// let mut result = None;
/// let mut parser = parse_body(
///     Some("application/x-www-form-urlencoded"),
///     make_handler(|body, was_parsed| result = Some((body, was_parsed))),
///     ParserOptions::default(),
/// );
///
/// parser.on_chunk(Chunk::data("name=micro&")).unwrap();
/// parser.on_chunk(Chunk::last("lang=rust")).unwrap();
/// drop(parser);
///
/// assert_eq!(result, Some((ParsedBody::Form(json!({"name": "micro", "lang": "rust"})), true)));
/// ```
pub fn parse_body<H: BodyHandler>(content_type: Option<&str>, handler: H, options: ParserOptions) -> BodyParser<H> {
    BodyParser::new(dispatch(content_type), handler, options)
}

/// Lifecycle state of a [`BodyParser`].
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ParseState {
    /// Waiting for more chunks
    Receiving,
    /// The body was decoded and delivered to the handler
    Completed,
    /// The body could not be decoded, nothing was delivered
    Failed,
    /// The connection terminated early, the handler was notified
    Aborted,
}

impl ParseState {
    #[inline]
    pub fn is_finished(self) -> bool {
        !matches!(self, ParseState::Receiving)
    }
}

/// Accumulates the chunks of one request body and decodes it once the last chunk arrives.
#[derive(Debug)]
pub struct BodyParser<H> {
    kind: DecoderKind,
    options: ParserOptions,
    accumulator: ChunkAccumulator,
    handler: H,
    state: ParseState,
}

impl<H: BodyHandler> BodyParser<H> {
    pub fn new(kind: DecoderKind, handler: H, options: ParserOptions) -> Self {
        let accumulator = match options.max_body_size() {
            Some(max_size) => ChunkAccumulator::with_max_size(max_size),
            None => ChunkAccumulator::new(),
        };

        Self { kind, options, accumulator, handler, state: ParseState::Receiving }
    }

    /// Feeds the next chunk of the body.
    ///
    /// When `chunk` is the last one the body is decoded and the handler's `on_result` is invoked.
    ///
    /// # Errors
    /// A returned error is fatal for the request: the handler is never invoked and the host should
    /// close the connection. Feeding a chunk after the parser completed or failed is an error as well;
    /// after an abort chunks are silently dropped.
    pub fn on_chunk(&mut self, chunk: Chunk) -> Result<(), DecodeError> {
        match self.state {
            ParseState::Receiving => {}
            ParseState::Aborted => {
                trace!(len = chunk.len(), "drop chunk of aborted body");
                return Ok(());
            }
            ParseState::Completed | ParseState::Failed => return Err(DecodeError::AlreadyFinished),
        }

        let body = match self.accumulator.accumulate(chunk) {
            Ok(Some(body)) => body,
            Ok(None) => return Ok(()),
            Err(e) => return Err(self.fail(e)),
        };

        match self.kind.decode(body, &self.options) {
            Ok(parsed) => {
                self.state = ParseState::Completed;
                let was_parsed = parsed.was_parsed();
                self.handler.on_result(parsed, was_parsed);
                Ok(())
            }
            Err(e) => Err(self.fail(e)),
        }
    }

    /// Reports that the connection terminated before the body was complete.
    ///
    /// The accumulated data is discarded and the handler's `on_abort` is invoked once. Aborting a
    /// parser that already finished is a no-op.
    pub fn on_abort(&mut self) {
        if self.state.is_finished() {
            trace!(state = ?self.state, "ignore abort of finished body");
            return;
        }

        info!(received = self.accumulator.len(), "request body aborted before completion");
        self.state = ParseState::Aborted;
        self.accumulator.discard();
        self.handler.on_abort();
    }

    fn fail(&mut self, e: DecodeError) -> DecodeError {
        error!(cause = %e, decoder = ?self.kind, "failed to decode request body, connection should be closed");
        self.state = ParseState::Failed;
        self.accumulator.discard();
        e
    }

    #[inline]
    pub fn state(&self) -> ParseState {
        self.state
    }

    #[inline]
    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    #[inline]
    pub fn decoder_kind(&self) -> DecoderKind {
        self.kind
    }

    pub fn handler(&self) -> &H {
        &self.handler
    }

    pub fn into_handler(self) -> H {
        self.handler
    }
}
