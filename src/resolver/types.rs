#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct MxRecord {
    pub preference: u16,
    /// `"."` for a null MX (RFC 7505).
    pub exchange: String,
}

impl MxRecord {
    pub fn new(preference: u16, exchange: impl Into<String>) -> Self {
        Self {
            preference,
            exchange: exchange.into(),
        }
    }

    pub fn is_null(&self) -> bool {
        self.exchange == "."
    }
}

/// Lower-case and drop the root dot, except for the root name itself.
pub(crate) fn normalize_exchange(exchange: &str) -> String {
    let trimmed = exchange.trim();
    if trimmed == "." || trimmed.is_empty() {
        return ".".to_string();
    }
    crate::hostname::strip_root_dot(trimmed).to_ascii_lowercase()
}
