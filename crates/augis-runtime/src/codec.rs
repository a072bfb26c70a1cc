//! Line codec for the serial command protocol.
//!
//! One command per line, `\n` terminated, with an optional `\r` before the
//! newline. Outbound commands are written as `prefix: data\n` (or
//! `prefix data\n` when the delimiter is a space).

use augis_command::{CommandParser, ParsedCommand};
use tokio_util::bytes::{BufMut, BytesMut};
use tokio_util::codec::{AnyDelimiterCodec, AnyDelimiterCodecError, Decoder, Encoder};
use tracing::trace;

use crate::config::LinkConfig;
use crate::error::{LineRejected, LinkError};

/// Frames newline-terminated command lines.
///
/// Decoding yields one `Result` per line, so a malformed or over-long line
/// never ends the stream. Blank lines are skipped. Bytes that are not valid
/// UTF-8 are replaced rather than rejected. The length limit applies to the
/// line without its `\n` or `\r\n` terminator.
#[derive(Debug, Clone)]
pub struct CommandCodec {
    /// Newline framing.
    lines: AnyDelimiterCodec,
    /// Parses inbound lines and supplies the outbound delimiter.
    parser: CommandParser,
    /// Longest accepted line, terminator excluded.
    max_line_length: usize,
}

impl CommandCodec {
    pub fn new(parser: CommandParser, max_line_length: usize) -> Self {
        Self {
            // one extra byte for a `\r` before the newline
            lines: AnyDelimiterCodec::new_with_max_length(
                b"\n".to_vec(),
                Vec::new(),
                max_line_length.saturating_add(1),
            ),
            parser,
            max_line_length,
        }
    }

    pub fn from_config(config: &LinkConfig) -> Self {
        Self::new(config.parser(), config.max_line_length)
    }

    pub fn parser(&self) -> CommandParser {
        self.parser
    }

    pub fn max_line_length(&self) -> usize {
        self.max_line_length
    }

    /// Turns one raw line into a frame, or `None` for a blank line.
    fn frame(&self, raw: &[u8]) -> Option<Result<ParsedCommand, LineRejected>> {
        let raw = raw.strip_suffix(b"\r").unwrap_or(raw);
        if raw.len() > self.max_line_length {
            return Some(self.too_long());
        }

        let line = String::from_utf8_lossy(raw);
        if line.is_empty() {
            trace!("Skipping blank line");
            return None;
        }

        Some(
            self.parser
                .parse(&line)
                .map_err(|source| LineRejected::Malformed {
                    line: line.to_string(),
                    source,
                }),
        )
    }

    fn too_long(&self) -> Result<ParsedCommand, LineRejected> {
        Err(LineRejected::TooLong {
            max: self.max_line_length,
        })
    }
}

impl Decoder for CommandCodec {
    type Item = Result<ParsedCommand, LineRejected>;
    type Error = LinkError;

    fn decode(&mut self, buf: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        loop {
            match self.lines.decode(buf) {
                Ok(Some(raw)) => {
                    if let Some(frame) = self.frame(&raw) {
                        return Ok(Some(frame));
                    }
                }
                Ok(None) => return Ok(None),
                Err(AnyDelimiterCodecError::MaxChunkLengthExceeded) => {
                    return Ok(Some(self.too_long()));
                }
                Err(AnyDelimiterCodecError::Io(e)) => return Err(e.into()),
            }
        }
    }

    fn decode_eof(&mut self, buf: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        loop {
            match self.lines.decode_eof(buf) {
                Ok(Some(raw)) => {
                    if let Some(frame) = self.frame(&raw) {
                        return Ok(Some(frame));
                    }
                }
                Ok(None) => return Ok(None),
                Err(AnyDelimiterCodecError::MaxChunkLengthExceeded) => {
                    return Ok(Some(self.too_long()));
                }
                Err(AnyDelimiterCodecError::Io(e)) => return Err(e.into()),
            }
        }
    }
}

impl Encoder<&ParsedCommand> for CommandCodec {
    type Error = LinkError;

    fn encode(&mut self, command: &ParsedCommand, dst: &mut BytesMut) -> Result<(), Self::Error> {
        let delimiter = self.parser.delimiter();
        let prefix = command.prefix();

        if prefix.is_empty() {
            return Err(LinkError::unencodable("prefix is empty"));
        }
        if prefix.contains(delimiter) {
            return Err(LinkError::unencodable(format!(
                "prefix '{prefix}' contains the delimiter '{delimiter}'"
            )));
        }
        let data = command.data();
        let has_break = |s: &str| s.contains(['\n', '\r']);
        if has_break(prefix) || has_break(data) {
            return Err(LinkError::unencodable("command contains a line break"));
        }
        // the receiving parser would strip these
        if data.starts_with(' ') {
            return Err(LinkError::unencodable("data starts with a space"));
        }
        if data.is_empty() && !self.parser.allows_empty_data() {
            return Err(LinkError::unencodable(format!(
                "command '{prefix}' has no data"
            )));
        }

        let line = command.to_line(delimiter);
        dst.reserve(line.len() + 1);
        dst.put_slice(line.as_bytes());
        dst.put_u8(b'\n');
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use augis_command::CommandError;

    use super::*;

    fn codec() -> CommandCodec {
        CommandCodec::new(CommandParser::new(':'), 16)
    }

    fn decode_all(codec: &mut CommandCodec, input: &[u8]) -> Vec<Result<ParsedCommand, LineRejected>> {
        let mut buf = BytesMut::from(input);
        let mut frames = Vec::new();
        while let Some(frame) = codec.decode(&mut buf).unwrap() {
            frames.push(frame);
        }
        while let Some(frame) = codec.decode_eof(&mut buf).unwrap() {
            frames.push(frame);
        }
        frames
    }

    #[test]
    fn test_decode_lines() {
        let frames = decode_all(&mut codec(), b"engine: 10,20\r\nheading: 90\n");
        assert_eq!(
            frames,
            vec![
                Ok(ParsedCommand::from_parts("engine", "10,20")),
                Ok(ParsedCommand::from_parts("heading", "90")),
            ]
        );
    }

    #[test]
    fn test_decode_partial_line_waits() {
        let mut codec = codec();
        let mut buf = BytesMut::from(&b"gps: 47"[..]);
        assert!(codec.decode(&mut buf).unwrap().is_none());

        buf.extend_from_slice(b".1,7.3\n");
        let frame = codec.decode(&mut buf).unwrap();
        assert_eq!(frame, Some(Ok(ParsedCommand::from_parts("gps", "47.1,7.3"))));
    }

    #[test]
    fn test_decode_unterminated_line_at_eof() {
        let frames = decode_all(&mut codec(), b"stop: now");
        assert_eq!(frames, vec![Ok(ParsedCommand::from_parts("stop", "now"))]);
    }

    #[test]
    fn test_decode_skips_blank_lines() {
        let frames = decode_all(&mut codec(), b"\n\r\n\nping: 1\n");
        assert_eq!(frames, vec![Ok(ParsedCommand::from_parts("ping", "1"))]);
    }

    #[test]
    fn test_decode_malformed_line_does_not_end_stream() {
        let frames = decode_all(&mut codec(), b"garbage\nok: 1\n");
        assert_eq!(
            frames,
            vec![
                Err(LineRejected::Malformed {
                    line: "garbage".to_string(),
                    source: CommandError::MissingDelimiter { delimiter: ':' },
                }),
                Ok(ParsedCommand::from_parts("ok", "1")),
            ]
        );
    }

    #[test]
    fn test_decode_too_long_line_is_skipped() {
        let frames = decode_all(&mut codec(), b"0123456789abcdefXYZ\nok: 1\n");
        assert_eq!(frames[0], Err(LineRejected::TooLong { max: 16 }));
        assert_eq!(frames.last(), Some(&Ok(ParsedCommand::from_parts("ok", "1"))));
    }

    #[test]
    fn test_decode_length_limit_excludes_terminator() {
        let mut codec = CommandCodec::new(CommandParser::new(':'), 8);
        let frames = decode_all(&mut codec, b"abc: 123\nabc: 123\r\nabc: 1234\nabc: 1234\r\nabc: 4");
        assert_eq!(
            frames,
            vec![
                Ok(ParsedCommand::from_parts("abc", "123")),
                Ok(ParsedCommand::from_parts("abc", "123")),
                Err(LineRejected::TooLong { max: 8 }),
                Err(LineRejected::TooLong { max: 8 }),
                Ok(ParsedCommand::from_parts("abc", "4")),
            ]
        );
    }

    #[test]
    fn test_decode_invalid_utf8_is_lossy() {
        let frames = decode_all(&mut codec(), b"\xffcmd: 1\n");
        assert_eq!(
            frames,
            vec![Ok(ParsedCommand::from_parts("\u{fffd}cmd", "1"))]
        );
    }

    #[test]
    fn test_strict_codec_rejects_empty_data() {
        let mut codec = CommandCodec::new(CommandParser::new(':').allow_empty_data(false), 64);
        let frames = decode_all(&mut codec, b"stop:\n");
        assert!(matches!(
            &frames[0],
            Err(LineRejected::Malformed {
                source: CommandError::EmptyData { .. },
                ..
            })
        ));
    }

    #[test]
    fn test_encode() {
        let mut buf = BytesMut::new();
        codec()
            .encode(&ParsedCommand::from_parts("engine", "10,-20"), &mut buf)
            .unwrap();
        assert_eq!(&buf[..], b"engine: 10,-20\n");

        let mut buf = BytesMut::new();
        CommandCodec::new(CommandParser::new(' '), 64)
            .encode(&ParsedCommand::from_parts("SET", "speed 42"), &mut buf)
            .unwrap();
        assert_eq!(&buf[..], b"SET speed 42\n");
    }

    #[test]
    fn test_encode_rejects_unframeable_commands() {
        let mut buf = BytesMut::new();
        let mut codec = codec();
        for command in [
            ParsedCommand::new(),
            ParsedCommand::from_parts("a:b", "1"),
            ParsedCommand::from_parts("cmd", "1\n2"),
            ParsedCommand::from_parts("msg", "  indented"),
        ] {
            assert!(matches!(
                codec.encode(&command, &mut buf),
                Err(LinkError::Unencodable { .. })
            ));
        }
        assert!(buf.is_empty());
    }

    #[test]
    fn test_encoded_lines_parse_back() {
        let mut codec = codec();
        let mut buf = BytesMut::new();
        let sent = [
            ParsedCommand::from_parts("msg", "a: b"),
            ParsedCommand::from_parts("stop", ""),
            ParsedCommand::from_parts("tab", "\tx"),
        ];
        for command in &sent {
            codec.encode(command, &mut buf).unwrap();
        }

        let received: Vec<_> = decode_all(&mut codec, &buf).into_iter().map(Result::unwrap).collect();
        assert_eq!(received, sent);
    }

    #[test]
    fn test_strict_codec_refuses_empty_data() {
        let mut buf = BytesMut::new();
        let mut codec = CommandCodec::new(CommandParser::new(':').allow_empty_data(false), 64);

        let result = codec.encode(&ParsedCommand::from_parts("stop", ""), &mut buf);
        assert!(matches!(result, Err(LinkError::Unencodable { .. })));
        assert!(buf.is_empty());

        codec
            .encode(&ParsedCommand::from_parts("stop", "now"), &mut buf)
            .unwrap();
        assert_eq!(&buf[..], b"stop: now\n");
    }
}
