use std::fmt;
use std::str::FromStr;

/// Text encoding used to decode template files.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum TextEncoding {
    #[default]
    Utf8,
    /// ISO-8859-1; every byte maps to the code point of the same value.
    Latin1,
    /// 7-bit ASCII; bytes above 0x7F are rejected.
    Ascii,
    Utf16Le,
}

impl TextEncoding {
    /// Canonical lowercase name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Utf8 => "utf8",
            Self::Latin1 => "latin1",
            Self::Ascii => "ascii",
            Self::Utf16Le => "utf16le",
        }
    }

    /// Decode raw bytes into a string.
    pub fn decode(&self, bytes: &[u8]) -> Result<String, String> {
        match self {
            Self::Utf8 => String::from_utf8(bytes.to_vec()).map_err(|e| format!("invalid UTF-8: {e}")),
            Self::Latin1 => Ok(bytes.iter().map(|&b| char::from(b)).collect()),
            Self::Ascii => match bytes.iter().position(|b| !b.is_ascii()) {
                Some(pos) => Err(format!("non-ASCII byte 0x{:02X} at offset {pos}", bytes[pos])),
                None => Ok(bytes.iter().map(|&b| char::from(b)).collect()),
            },
            Self::Utf16Le => {
                if bytes.len() % 2 != 0 {
                    return Err("odd number of bytes for UTF-16LE".to_string());
                }
                let units: Vec<u16> = bytes
                    .chunks_exact(2)
                    .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
                    .collect();
                String::from_utf16(&units).map_err(|e| format!("invalid UTF-16LE: {e}"))
            }
        }
    }
}

impl fmt::Display for TextEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TextEncoding {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "utf8" | "utf-8" => Ok(Self::Utf8),
            "latin1" | "iso-8859-1" | "binary" => Ok(Self::Latin1),
            "ascii" | "us-ascii" => Ok(Self::Ascii),
            "utf16le" | "utf-16le" | "ucs2" | "ucs-2" => Ok(Self::Utf16Le),
            other => Err(format!("unsupported text encoding: {other}")),
        }
    }
}
