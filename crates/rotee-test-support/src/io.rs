//! Scripted async readers and writers for driving the copy loop in tests.

use std::collections::VecDeque;
use std::io;
use std::pin::Pin;
use std::task::{Context, Poll};

use tokio::io::{AsyncRead, AsyncWrite, ReadBuf};

enum Step {
    Chunk(Vec<u8>),
    Action(Box<dyn FnOnce() + Send>),
    Fail(io::ErrorKind),
}

/// Reader that replays a fixed script of chunks, side effects, and failures.
///
/// Each chunk is delivered by its own read call (split further only when the
/// caller's buffer is smaller). Actions run when the reader is polled for the
/// read that follows them, which lets a test mutate the filesystem between two
/// chunks deterministically. Once the script is exhausted the reader reports
/// end-of-input.
#[derive(Default)]
pub struct ScriptedReader {
    steps: VecDeque<Step>,
}

impl ScriptedReader {
    /// Create an empty script; reading it yields end-of-input immediately.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a script that delivers each chunk in order.
    #[must_use]
    pub fn from_chunks<I, C>(chunks: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: AsRef<[u8]>,
    {
        chunks
            .into_iter()
            .fold(Self::new(), |reader, chunk| reader.chunk(chunk))
    }

    /// Append a chunk. Empty chunks are skipped since a zero-length read means
    /// end-of-input.
    #[must_use]
    pub fn chunk(mut self, bytes: impl AsRef<[u8]>) -> Self {
        self.steps.push_back(Step::Chunk(bytes.as_ref().to_vec()));
        self
    }

    /// Append a side effect that runs before the next chunk is delivered.
    #[must_use]
    pub fn then(mut self, action: impl FnOnce() + Send + 'static) -> Self {
        self.steps.push_back(Step::Action(Box::new(action)));
        self
    }

    /// Append a read failure of the given kind.
    #[must_use]
    pub fn fail(mut self, kind: io::ErrorKind) -> Self {
        self.steps.push_back(Step::Fail(kind));
        self
    }
}

impl AsyncRead for ScriptedReader {
    fn poll_read(
        self: Pin<&mut Self>,
        _cx: &mut Context<'_>,
        buf: &mut ReadBuf<'_>,
    ) -> Poll<io::Result<()>> {
        let this = self.get_mut();
        while let Some(step) = this.steps.pop_front() {
            match step {
                Step::Action(action) => action(),
                Step::Fail(kind) => {
                    return Poll::Ready(Err(io::Error::new(kind, "scripted read failure")));
                }
                Step::Chunk(mut bytes) => {
                    if bytes.is_empty() {
                        continue;
                    }
                    let take = bytes.len().min(buf.remaining());
                    buf.put_slice(&bytes[..take]);
                    if take < bytes.len() {
                        this.steps.push_front(Step::Chunk(bytes.split_off(take)));
                    }
                    return Poll::Ready(Ok(()));
                }
            }
        }
        Poll::Ready(Ok(()))
    }
}

/// Reader whose every read fails with the configured error kind.
#[derive(Debug, Clone, Copy)]
pub struct FailingReader {
    kind: io::ErrorKind,
}

impl FailingReader {
    /// Create a reader that fails with `kind`.
    #[must_use]
    pub const fn new(kind: io::ErrorKind) -> Self {
        Self { kind }
    }
}

impl AsyncRead for FailingReader {
    fn poll_read(
        self: Pin<&mut Self>,
        _cx: &mut Context<'_>,
        _buf: &mut ReadBuf<'_>,
    ) -> Poll<io::Result<()>> {
        Poll::Ready(Err(io::Error::new(self.kind, "scripted read failure")))
    }
}

/// Writer that accepts a fixed byte budget and then fails with `BrokenPipe`.
#[derive(Debug, Default)]
pub struct FailingWriter {
    budget: usize,
    written: Vec<u8>,
}

impl FailingWriter {
    /// Create a writer that fails on the first write.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a writer that accepts `budget` bytes before failing.
    #[must_use]
    pub const fn with_budget(budget: usize) -> Self {
        Self {
            budget,
            written: Vec::new(),
        }
    }

    /// Bytes accepted before the failure.
    #[must_use]
    pub fn written(&self) -> &[u8] {
        &self.written
    }
}

impl AsyncWrite for FailingWriter {
    fn poll_write(
        self: Pin<&mut Self>,
        _cx: &mut Context<'_>,
        buf: &[u8],
    ) -> Poll<io::Result<usize>> {
        let this = self.get_mut();
        if this.budget == 0 {
            return Poll::Ready(Err(io::Error::new(
                io::ErrorKind::BrokenPipe,
                "scripted write failure",
            )));
        }
        let take = buf.len().min(this.budget);
        this.budget -= take;
        this.written.extend_from_slice(&buf[..take]);
        Poll::Ready(Ok(take))
    }

    fn poll_flush(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        Poll::Ready(Ok(()))
    }

    fn poll_shutdown(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        Poll::Ready(Ok(()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    #[tokio::test]
    async fn scripted_reader_delivers_chunks_and_actions_in_order() -> io::Result<()> {
        let fired = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&fired);
        let mut reader = ScriptedReader::new()
            .chunk("AAAA")
            .then(move || flag.store(true, Ordering::SeqCst))
            .chunk("")
            .chunk("BB");

        let mut buf = [0_u8; 8];
        assert_eq!(reader.read(&mut buf).await?, 4);
        assert!(!fired.load(Ordering::SeqCst));
        assert_eq!(reader.read(&mut buf).await?, 2);
        assert!(fired.load(Ordering::SeqCst));
        assert_eq!(&buf[..2], b"BB");
        assert_eq!(reader.read(&mut buf).await?, 0);
        Ok(())
    }

    #[tokio::test]
    async fn scripted_reader_splits_oversized_chunks() -> io::Result<()> {
        let mut reader = ScriptedReader::from_chunks(["abcdef"]);
        let mut buf = [0_u8; 4];
        assert_eq!(reader.read(&mut buf).await?, 4);
        assert_eq!(reader.read(&mut buf).await?, 2);
        assert_eq!(&buf[..2], b"ef");
        Ok(())
    }

    #[tokio::test]
    async fn scripted_reader_surfaces_failures() {
        let mut reader = ScriptedReader::new().fail(io::ErrorKind::InvalidData);
        let mut buf = [0_u8; 4];
        let err = reader.read(&mut buf).await.err();
        assert_eq!(err.map(|err| err.kind()), Some(io::ErrorKind::InvalidData));

        let mut failing = FailingReader::new(io::ErrorKind::Other);
        assert!(failing.read(&mut buf).await.is_err());
    }

    #[tokio::test]
    async fn failing_writer_honours_budget() {
        let mut writer = FailingWriter::with_budget(3);
        assert!(writer.write_all(b"abcdef").await.is_err());
        assert_eq!(writer.written(), b"abc");
        assert!(FailingWriter::new().write_all(b"x").await.is_err());
    }
}
