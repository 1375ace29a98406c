use super::RenderError;

/// Receives per-primitive frame failures.
pub trait ErrorSink {
    fn report(&mut self, err: &RenderError);
}

/// Forwards failures to the `log` facade at error level.
#[derive(Debug, Default, Copy, Clone)]
pub struct LogSink;

impl ErrorSink for LogSink {
    fn report(&mut self, err: &RenderError) {
        log::error!("{err}");
    }
}

impl<F> ErrorSink for F
where
    F: FnMut(&RenderError),
{
    fn report(&mut self, err: &RenderError) {
        self(err)
    }
}
