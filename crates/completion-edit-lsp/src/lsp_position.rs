//! LSP positions and position-encoding negotiation.

use completion_edit::{EditError, Encoding, Position};
use serde_json::Value;

/// LSP position: a line plus a character offset in the negotiated encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LspPosition {
    /// Line number (0-based).
    pub line: u32,
    /// Character offset (0-based, in the negotiated encoding's code units).
    pub character: u32,
}

impl LspPosition {
    /// Create a new LSP position.
    pub fn new(line: u32, character: u32) -> Self {
        Self { line, character }
    }

    /// Parse a `Position`-shaped JSON value.
    pub fn from_value(value: &Value) -> Option<Self> {
        Some(Self {
            line: u32::try_from(value.get("line")?.as_u64()?).ok()?,
            character: u32::try_from(value.get("character")?.as_u64()?).ok()?,
        })
    }
}

impl From<LspPosition> for Position {
    fn from(pos: LspPosition) -> Self {
        Position::new(pos.line as usize, pos.character as usize)
    }
}

/// LSP range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LspRange {
    /// Range start position (inclusive).
    pub start: LspPosition,
    /// Range end position (exclusive).
    pub end: LspPosition,
}

impl LspRange {
    /// Create a new LSP range.
    pub fn new(start: LspPosition, end: LspPosition) -> Self {
        Self { start, end }
    }

    /// Parse a `Range`-shaped JSON value.
    pub fn from_value(value: &Value) -> Option<Self> {
        let start = LspPosition::from_value(value.get("start")?)?;
        let end = LspPosition::from_value(value.get("end")?)?;
        Some(Self::new(start, end))
    }
}

/// The position encoding a server announced in its capabilities.
///
/// Reads `capabilities.positionEncoding` (or `positionEncoding` when handed the capabilities
/// object itself). Servers that do not announce one speak UTF-16. Encodings the engine cannot map
/// onto buffer bytes (`utf-32`, anything unknown) are configuration errors.
pub fn negotiated_encoding(server_capabilities: &Value) -> Result<Encoding, EditError> {
    let announced = server_capabilities
        .get("capabilities")
        .unwrap_or(server_capabilities)
        .get("positionEncoding")
        .and_then(Value::as_str);

    match announced {
        None => Ok(Encoding::Utf16),
        Some(kind) => {
            let encoding = kind.parse::<Encoding>();
            if let Err(err) = &encoding {
                tracing::warn!(%err, "server announced an unsupported position encoding");
            }
            encoding
        }
    }
}
