use thiserror::Error;

/// Internal failures that indicate a fault on the server rather than a bad request.
///
/// Every variant results in a 500 Internal Server Error with a generic message returned to
/// the client; the detail is only logged.
#[derive(Error, Debug)]
pub enum InternalError {
    /// Argon2 failed to hash a password or to parse a stored hash.
    #[error("Password hashing failed: {reason}")]
    PasswordHash {
        /// Message reported by the hashing library
        reason: String,
    },

    /// An export could not be encoded into its output format.
    #[error("Failed to encode {collection} export as {format}: {reason}")]
    ExportEncoding {
        collection: String,
        format: String,
        reason: String,
    },
}
