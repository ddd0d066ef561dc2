//! Line-delimited JSON transport over stdin/stdout.
//!
//! Each JSON-RPC message is a single line terminated by `\n`.

use crate::error::TransportError;
use bytes::BytesMut;
use futures_util::StreamExt;
use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt};
use tokio_util::codec::{Decoder, FramedRead, LinesCodec, LinesCodecError};
use tracing::trace;

/// Longest accepted inbound message.
pub const MAX_LINE_BYTES: usize = 16 * 1024 * 1024;

/// One line read from the peer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InboundLine {
    /// A complete line, trimmed of surrounding whitespace.
    Message(String),
    /// A line that could not be framed: invalid UTF-8 or longer than the limit.
    Malformed(String),
}

/// `LinesCodec` that reports framing failures per line instead of ending the stream.
///
/// `FramedRead` stops after the first decoder error, so bad lines are surfaced as
/// items. Errors coming from the underlying reader still terminate the stream.
struct MessageCodec {
    lines: LinesCodec,
}

impl MessageCodec {
    fn frame(
        result: Result<Option<String>, LinesCodecError>,
    ) -> Result<Option<InboundLine>, LinesCodecError> {
        match result {
            Ok(line) => Ok(line.map(|line| InboundLine::Message(line.trim().to_string()))),
            Err(e) => Ok(Some(InboundLine::Malformed(e.to_string()))),
        }
    }
}

impl Decoder for MessageCodec {
    type Item = InboundLine;
    type Error = LinesCodecError;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<InboundLine>, LinesCodecError> {
        Self::frame(self.lines.decode(src))
    }

    fn decode_eof(&mut self, src: &mut BytesMut) -> Result<Option<InboundLine>, LinesCodecError> {
        Self::frame(self.lines.decode_eof(src))
    }
}

/// Reads JSON-RPC messages line by line and writes responses back.
///
/// Generic over reader/writer so tests can drive it with in-memory buffers.
pub struct StdioTransport<R, W> {
    reader: FramedRead<R, MessageCodec>,
    writer: W,
}

impl StdioTransport<tokio::io::Stdin, tokio::io::Stdout> {
    /// Transport bound to the process's stdin and stdout.
    pub fn stdio() -> Self {
        Self::new(tokio::io::stdin(), tokio::io::stdout())
    }
}

impl<R, W> StdioTransport<R, W>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    pub fn new(reader: R, writer: W) -> Self {
        Self::with_max_line_length(reader, writer, MAX_LINE_BYTES)
    }

    pub fn with_max_line_length(reader: R, writer: W, max_length: usize) -> Self {
        let codec = MessageCodec {
            lines: LinesCodec::new_with_max_length(max_length),
        };
        Self {
            reader: FramedRead::new(reader, codec),
            writer,
        }
    }

    /// Reads the next line. Returns `None` on EOF.
    ///
    /// Only failures of the underlying reader are errors; a line that cannot be
    /// decoded comes back as [`InboundLine::Malformed`].
    pub async fn read_line(&mut self) -> Result<Option<InboundLine>, TransportError> {
        match self.reader.next().await {
            Some(Ok(line)) => {
                trace!(?line, "read line");
                Ok(Some(line))
            }
            Some(Err(e)) => Err(TransportError::Read(e.to_string())),
            None => Ok(None),
        }
    }

    /// Writes one message followed by a newline and flushes.
    pub async fn write_line(&mut self, message: &str) -> Result<(), TransportError> {
        trace!(len = message.len(), "writing message");

        self.writer
            .write_all(message.as_bytes())
            .await
            .map_err(|e| TransportError::Write(e.to_string()))?;
        self.writer
            .write_all(b"\n")
            .await
            .map_err(|e| TransportError::Write(e.to_string()))?;
        self.writer
            .flush()
            .await
            .map_err(|e| TransportError::Write(e.to_string()))
    }

    /// Consume the transport and return the writer.
    pub fn into_writer(self) -> W {
        self.writer
    }
}
