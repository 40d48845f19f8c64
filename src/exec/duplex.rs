// src/exec/duplex.rs

//! Pairing helper: one object that writes to `W` and reads from `R`.

use std::io;
use std::pin::Pin;
use std::task::{Context, Poll};

use tokio::io::{AsyncRead, AsyncWrite, ReadBuf};

/// A writable half and a readable half presented as one duplex stream.
///
/// Reads go to `R`, writes (including flush and shutdown) go to `W`.
#[derive(Debug)]
pub struct Duplex<W, R> {
    writer: W,
    reader: R,
}

impl<W, R> Duplex<W, R> {
    pub fn new(writer: W, reader: R) -> Self {
        Self { writer, reader }
    }

    pub fn writer(&self) -> &W {
        &self.writer
    }

    pub fn reader(&self) -> &R {
        &self.reader
    }

    pub fn writer_mut(&mut self) -> &mut W {
        &mut self.writer
    }

    pub fn reader_mut(&mut self) -> &mut R {
        &mut self.reader
    }

    /// Split back into `(writer, reader)`, e.g. to drive both from separate
    /// tasks.
    pub fn into_parts(self) -> (W, R) {
        (self.writer, self.reader)
    }
}

impl<W: Unpin, R: AsyncRead + Unpin> AsyncRead for Duplex<W, R> {
    fn poll_read(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &mut ReadBuf<'_>,
    ) -> Poll<io::Result<()>> {
        Pin::new(&mut self.get_mut().reader).poll_read(cx, buf)
    }
}

impl<W: AsyncWrite + Unpin, R: Unpin> AsyncWrite for Duplex<W, R> {
    fn poll_write(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &[u8],
    ) -> Poll<io::Result<usize>> {
        Pin::new(&mut self.get_mut().writer).poll_write(cx, buf)
    }

    fn poll_flush(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        Pin::new(&mut self.get_mut().writer).poll_flush(cx)
    }

    fn poll_shutdown(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        Pin::new(&mut self.get_mut().writer).poll_shutdown(cx)
    }
}
