//! Shared subprocess management utilities.

use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::Child;

/// Upper bound on bytes collected from a single stdout or stderr stream.
pub const MAX_CAPTURE_BYTES: usize = 8 * 1024 * 1024;

/// RAII guard that kills a child process (and its process group on Unix) on drop.
///
/// Wrap a spawned child immediately after `spawn()` so a timeout or a
/// cancelled future never leaves it running. Call `disarm()` once the
/// process has exited normally.
pub struct ChildGuard {
    child: Child,
    armed: bool,
}

impl ChildGuard {
    #[must_use]
    pub fn new(child: Child) -> Self {
        Self { child, armed: true }
    }

    pub fn child_mut(&mut self) -> &mut Child {
        &mut self.child
    }

    pub fn disarm(&mut self) {
        self.armed = false;
    }
}

impl Drop for ChildGuard {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        #[cfg(unix)]
        {
            if let Some(pid) = self.child.id() {
                let pgid = libc::pid_t::try_from(pid).unwrap_or(0);
                // SAFETY: killpg has no memory-safety preconditions.
                if pgid <= 0 || unsafe { libc::killpg(pgid, libc::SIGKILL) } == -1 {
                    let _ = self.child.start_kill();
                }
            }
        }
        #[cfg(not(unix))]
        {
            let _ = self.child.start_kill();
        }
        let _ = self.child.try_wait();
        tracing::debug!("Killed child process on drop");
    }
}

/// Put the child process in its own session (Unix only) so the entire process
/// group can be killed via `killpg` in `ChildGuard::drop`.
#[cfg(unix)]
pub fn set_new_session(cmd: &mut tokio::process::Command) {
    use std::os::unix::process::CommandExt;
    // SAFETY: setsid is async-signal-safe and the closure touches no shared state.
    unsafe {
        cmd.as_std_mut().pre_exec(|| {
            if libc::setsid() == -1 {
                return Err(std::io::Error::last_os_error());
            }
            Ok(())
        });
    }
}

/// Read a stream to EOF, keeping at most `limit` bytes.
///
/// Bytes past the limit are drained and dropped so the writer never blocks
/// on a full pipe. A missing stream reads as empty.
pub async fn read_to_end_limited<R>(reader: Option<R>, limit: usize) -> std::io::Result<String>
where
    R: AsyncRead + Unpin,
{
    let Some(mut reader) = reader else {
        return Ok(String::new());
    };

    let mut buf = [0u8; 4096];
    let mut collected = Vec::new();
    let mut dropped = 0usize;
    loop {
        let n = reader.read(&mut buf).await?;
        if n == 0 {
            break;
        }
        let room = limit.saturating_sub(collected.len());
        let take = room.min(n);
        collected.extend_from_slice(&buf[..take]);
        dropped += n - take;
    }

    if dropped > 0 {
        tracing::warn!(limit, dropped, "Subprocess output exceeded capture limit");
    }
    Ok(String::from_utf8_lossy(&collected).into_owned())
}

#[cfg(test)]
mod tests {
    use super::read_to_end_limited;

    #[tokio::test]
    async fn reads_whole_stream_under_limit() {
        let data: &[u8] = b"main\ndev\n";
        let out = read_to_end_limited(Some(data), 1024).await.unwrap();
        assert_eq!(out, "main\ndev\n");
    }

    #[tokio::test]
    async fn truncates_at_limit() {
        let data = vec![b'x'; 10_000];
        let out = read_to_end_limited(Some(data.as_slice()), 5000).await.unwrap();
        assert_eq!(out.len(), 5000);
    }

    #[tokio::test]
    async fn missing_stream_is_empty() {
        let out = read_to_end_limited::<&[u8]>(None, 10).await.unwrap();
        assert!(out.is_empty());
    }

    #[tokio::test]
    async fn invalid_utf8_is_replaced() {
        let data: &[u8] = &[b'a', 0xff, b'b'];
        let out = read_to_end_limited(Some(data), 16).await.unwrap();
        assert_eq!(out, "a\u{fffd}b");
    }
}
