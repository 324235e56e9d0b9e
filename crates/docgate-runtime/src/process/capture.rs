//! Bounded concurrent capture of a child's stdout and stderr.

use docgate_core::{OutputStream, ProcessFailure};
use tokio::io::{AsyncRead, AsyncReadExt};

const CHUNK_SIZE: usize = 8 * 1024;

/// Bytes read so far from each stream.
#[derive(Debug, Default)]
pub(crate) struct Captured {
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
}

impl Captured {
    pub fn stdout_text(&self) -> String {
        String::from_utf8_lossy(&self.stdout).into_owned()
    }

    pub fn stderr_text(&self) -> String {
        String::from_utf8_lossy(&self.stderr).into_owned()
    }
}

/// Read both streams to EOF, stopping at the first one that exceeds `limit`.
///
/// Both pipes are drained concurrently so a child blocked on a full stderr
/// pipe cannot stall stdout. Data read before an overflow stays in
/// `captured`, truncated to `limit`.
pub(crate) async fn drain<O, E>(
    mut stdout: Option<O>,
    mut stderr: Option<E>,
    limit: usize,
    captured: &mut Captured,
) -> Result<(), ProcessFailure>
where
    O: AsyncRead + Unpin,
    E: AsyncRead + Unpin,
{
    let mut out_chunk = vec![0u8; CHUNK_SIZE];
    let mut err_chunk = vec![0u8; CHUNK_SIZE];

    while stdout.is_some() || stderr.is_some() {
        tokio::select! {
            read = read_chunk(&mut stdout, &mut out_chunk), if stdout.is_some() => {
                match read {
                    Ok(0) => stdout = None,
                    Ok(n) => append(&mut captured.stdout, &out_chunk[..n], limit, OutputStream::Stdout)?,
                    Err(e) => return Err(ProcessFailure::Io(e.to_string())),
                }
            }
            read = read_chunk(&mut stderr, &mut err_chunk), if stderr.is_some() => {
                match read {
                    Ok(0) => stderr = None,
                    Ok(n) => append(&mut captured.stderr, &err_chunk[..n], limit, OutputStream::Stderr)?,
                    Err(e) => return Err(ProcessFailure::Io(e.to_string())),
                }
            }
        }
    }

    Ok(())
}

async fn read_chunk<R>(reader: &mut Option<R>, buf: &mut [u8]) -> std::io::Result<usize>
where
    R: AsyncRead + Unpin,
{
    match reader {
        Some(r) => r.read(buf).await,
        None => std::future::pending().await,
    }
}

fn append(
    sink: &mut Vec<u8>,
    bytes: &[u8],
    limit: usize,
    stream: OutputStream,
) -> Result<(), ProcessFailure> {
    sink.extend_from_slice(bytes);
    if sink.len() > limit {
        sink.truncate(limit);
        return Err(ProcessFailure::OutputLimitExceeded { stream, limit });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn drains_both_streams() {
        let mut captured = Captured::default();
        drain(Some(&b"hello"[..]), Some(&b"warn"[..]), 1024, &mut captured)
            .await
            .unwrap();

        assert_eq!(captured.stdout_text(), "hello");
        assert_eq!(captured.stderr_text(), "warn");
    }

    #[tokio::test]
    async fn overflow_keeps_prefix() {
        let mut captured = Captured::default();
        let big = vec![b'x'; 100];
        let err = drain(None::<&[u8]>, Some(&big[..]), 10, &mut captured)
            .await
            .unwrap_err();

        assert_eq!(
            err,
            ProcessFailure::OutputLimitExceeded {
                stream: OutputStream::Stderr,
                limit: 10
            }
        );
        assert_eq!(captured.stderr.len(), 10);
        assert!(captured.stdout.is_empty());
    }

    #[tokio::test]
    async fn output_at_limit_is_accepted() {
        let mut captured = Captured::default();
        drain(Some(&b"12345"[..]), None::<&[u8]>, 5, &mut captured)
            .await
            .unwrap();
        assert_eq!(captured.stdout_text(), "12345");
    }
}
