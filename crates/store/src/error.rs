/// Errors surfaced by a record store client.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The request never produced an HTTP response (DNS, connect, timeout).
    #[error("record store unreachable: {0}")]
    Transport(String),

    /// The store answered with a non-success status.
    #[error("record store returned HTTP {status}: {message}")]
    Api { status: u16, message: String },

    /// The addressed record does not exist.
    #[error("no record {id} in collection '{collection}'")]
    NotFound { collection: String, id: String },

    /// The response body was not the JSON shape we expect.
    #[error("malformed record store response: {0}")]
    Decode(String),
}
