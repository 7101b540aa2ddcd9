//! Continuations invoked when a body parse terminates.

use crate::decoder::ParsedBody;

/// Receives the terminal event of one body parse.
///
/// At most one of the two methods is invoked, at most once.
#[cfg_attr(test, mockall::automock)]
pub trait BodyHandler {
    /// Called with the decoded body once the last chunk has been processed successfully
    fn on_result(&mut self, body: ParsedBody, was_parsed: bool);

    /// Called if the connection terminates before the body is complete
    fn on_abort(&mut self) {}
}

/// A [`BodyHandler`] made of two closures, see [`make_handler`] and [`make_handler_with_abort`].
#[derive(Debug)]
pub struct HandlerFn<R, A> {
    on_result: R,
    on_abort: A,
}

impl<R, A> BodyHandler for HandlerFn<R, A>
where
    R: FnMut(ParsedBody, bool),
    A: FnMut(),
{
    fn on_result(&mut self, body: ParsedBody, was_parsed: bool) {
        (self.on_result)(body, was_parsed);
    }

    fn on_abort(&mut self) {
        (self.on_abort)();
    }
}

/// Creates a handler from a result closure, aborts are ignored
pub fn make_handler<R>(on_result: R) -> HandlerFn<R, fn()>
where
    R: FnMut(ParsedBody, bool),
{
    fn noop() {}
    HandlerFn { on_result, on_abort: noop as fn() }
}

pub fn make_handler_with_abort<R, A>(on_result: R, on_abort: A) -> HandlerFn<R, A>
where
    R: FnMut(ParsedBody, bool),
    A: FnMut(),
{
    HandlerFn { on_result, on_abort }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;

    #[test]
    fn test_handler_fn() {
        let mut results = Vec::new();
        let mut aborts = 0;
        {
            let mut handler = make_handler_with_abort(|body, was_parsed| results.push((body, was_parsed)), || aborts += 1);
            handler.on_result(ParsedBody::Raw(Bytes::from_static(b"x")), false);
            handler.on_abort();
        }

        assert_eq!(results, vec![(ParsedBody::Raw(Bytes::from_static(b"x")), false)]);
        assert_eq!(aborts, 1);
    }

    #[test]
    fn test_default_abort_is_noop() {
        let mut called = false;
        {
            let mut handler = make_handler(|_, _| called = true);
            handler.on_abort();
        }
        assert!(!called);
    }
}
