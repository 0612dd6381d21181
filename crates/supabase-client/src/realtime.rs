/// Placeholder for the realtime sub-client.
///
/// Realtime channels are not implemented; the endpoint is still derived so
/// callers can connect with a dedicated realtime library.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RealtimeHandle {
    Unsupported { url: String },
}

impl RealtimeHandle {
    /// The `ws(s)://…/realtime/v1` endpoint.
    pub fn url(&self) -> &str {
        match self {
            Self::Unsupported { url } => url,
        }
    }
}
