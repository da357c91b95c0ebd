use base64::Engine;
use base64::engine::general_purpose::STANDARD;

/// A file sent inline as a data URL (`data:<mime>;base64,<payload>`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlinePayload {
    pub mime: Option<String>,
    pub bytes: Vec<u8>,
}

impl InlinePayload {
    /// Decode the part after the first comma. Returns `None` when there is no
    /// payload or it is not valid base64.
    pub fn decode(value: &str) -> Option<Self> {
        let (header, payload) = value.split_once(',')?;
        let payload = payload.trim();
        if payload.is_empty() {
            return None;
        }
        let bytes = STANDARD.decode(payload).ok()?;

        let mime = header
            .strip_prefix("data:")
            .and_then(|rest| rest.split(';').next())
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .map(str::to_string);

        Some(Self { mime, bytes })
    }
}
