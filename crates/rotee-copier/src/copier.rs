//! The read-check-write loop.

use rotee_config::defaults::READ_BUFFER_SIZE;
use rotee_config::{ProbePolicy, TeeConfig};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::time::Instant;
use tracing::{debug, info, warn};

use crate::error::{CopyError, CopyResult};
use crate::identity::FileIdentity;
use crate::schedule::CheckSchedule;
use crate::target::LiveTarget;

/// Totals for a completed run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CopyReport {
    /// Bytes delivered to both destinations.
    pub bytes: u64,
    /// Non-empty chunks read from the input.
    pub chunks: u64,
    /// Times the target was reopened after rotation.
    pub reopens: u32,
}

impl CopyReport {
    fn record_chunk(&mut self, len: usize) {
        let len = u64::try_from(len).unwrap_or(u64::MAX);
        self.bytes = self.bytes.saturating_add(len);
        self.chunks = self.chunks.saturating_add(1);
    }

    const fn record_reopen(&mut self) {
        self.reopens = self.reopens.saturating_add(1);
    }
}

/// Copies an input stream into the configured file and a secondary output,
/// reopening the file when its path starts naming a different object.
#[derive(Debug)]
pub struct Copier<R, W> {
    config: TeeConfig,
    input: R,
    secondary: W,
}

impl<R, W> Copier<R, W>
where
    R: AsyncRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    /// Bind a configuration to its input and secondary output.
    pub const fn new(config: TeeConfig, input: R, secondary: W) -> Self {
        Self {
            config,
            input,
            secondary,
        }
    }

    /// Consume the input to completion.
    ///
    /// The target file is opened first; every chunk read is then written to
    /// the file and the secondary output, in input order. At most once per
    /// check interval, the path is probed and the file reopened if it was
    /// replaced. The target handle is closed on every return path.
    ///
    /// # Errors
    ///
    /// Any open, read, or write failure ends the run. A failed identity probe
    /// does not, unless the probe policy asks for an immediate reopen and that
    /// reopen fails.
    pub async fn run(mut self) -> CopyResult<CopyReport> {
        let interval = self.config.check_interval();
        let mut target = LiveTarget::open(self.config.path(), self.config.mode()).await?;
        debug!(
            path = %target.path().display(),
            mode = %target.mode(),
            interval_ms = u64::try_from(interval.as_millis()).unwrap_or(u64::MAX),
            "opened target file"
        );

        let mut schedule = CheckSchedule::starting_at(interval, Instant::now());
        let mut buffer = vec![0_u8; READ_BUFFER_SIZE];
        let mut report = CopyReport::default();

        loop {
            let read = match self.input.read(&mut buffer).await {
                Ok(0) => break,
                Ok(read) => read,
                Err(source) => {
                    release(target).await;
                    return Err(CopyError::Read { source });
                }
            };

            if schedule.poll(Instant::now()) {
                target = refresh(target, self.config.probe_policy(), &mut report).await?;
            }

            let chunk = &buffer[..read];
            if let Err(err) = write_both(&mut target, &mut self.secondary, chunk).await {
                release(target).await;
                return Err(err);
            }
            report.record_chunk(read);
        }

        target.close().await?;
        Ok(report)
    }
}

/// Write one chunk to the target file and then to the secondary output.
///
/// Both writes complete before this returns; the first failure is returned
/// and the second write is not attempted. Empty chunks are a no-op.
///
/// # Errors
///
/// Returns [`CopyError::WriteTarget`] or [`CopyError::WriteSecondary`].
pub async fn write_both<W>(
    target: &mut LiveTarget,
    secondary: &mut W,
    chunk: &[u8],
) -> CopyResult<()>
where
    W: AsyncWrite + Unpin + Send,
{
    if chunk.is_empty() {
        return Ok(());
    }
    target.write_chunk(chunk).await?;
    secondary
        .write_all(chunk)
        .await
        .map_err(|source| CopyError::WriteSecondary { source })?;
    secondary
        .flush()
        .await
        .map_err(|source| CopyError::WriteSecondary { source })
}

async fn refresh(
    target: LiveTarget,
    policy: ProbePolicy,
    report: &mut CopyReport,
) -> CopyResult<LiveTarget> {
    if !was_replaced(&target, policy).await {
        return Ok(target);
    }

    let target = target.reopen().await?;
    report.record_reopen();
    info!(path = %target.path().display(), "re-opened output file");
    Ok(target)
}

async fn was_replaced(target: &LiveTarget, policy: ProbePolicy) -> bool {
    match FileIdentity::probe(target.path()).await {
        Ok(on_disk) => !on_disk.matches(target.identity()),
        Err(err) => {
            debug!(
                path = %target.path().display(),
                error = %err,
                "identity probe failed"
            );
            policy == ProbePolicy::Reopen
        }
    }
}

async fn release(target: LiveTarget) {
    let path = target.path().to_path_buf();
    if let Err(err) = target.close().await {
        warn!(path = %path.display(), error = %err, "failed to close target after error");
    }
}
