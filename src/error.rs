use thiserror::Error;

macro_rules! malformed_error {
    // Single string version
    ($msg:expr) => {
        crate::Error::Malformed {
            message: $msg.to_string(),
            file: file!(),
            line: line!(),
        }
    };

    // Format string with arguments version
    ($fmt:expr, $($arg:tt)*) => {
        crate::Error::Malformed {
            message: format!($fmt, $($arg)*),
            file: file!(),
            line: line!(),
        }
    };
}

/// The generic Error type, which provides coverage for all errors this library can potentially
/// return.
///
/// The variants fall into two groups with different blast radii. Resolution errors
/// ([`Error::NoMatchingBuild`], [`Error::Download`], [`Error::Decompression`],
/// [`Error::Malformed`], [`Error::FileError`]) occur while a resolver is being constructed and
/// are terminal for that resolver. Query errors ([`Error::UnknownNamespace`],
/// [`Error::UnknownClass`], [`Error::UnknownMember`]) occur on individual translation calls
/// against a fully constructed table and are terminal only for that one call; the caller
/// should treat them as "this operation cannot proceed against the running binary version".
///
/// # Examples
///
/// ```rust,no_run
/// use mapscope::{Error, MappingResolver};
///
/// match MappingResolver::resolve("1.20.4") {
///     Ok(resolver) => println!("Mappings resolved"),
///     Err(Error::NoMatchingBuild(version)) => println!("No mappings for {}", version),
///     Err(Error::Malformed { message, .. }) => println!("Malformed artifact: {}", message),
///     Err(e) => println!("Error: {}", e),
/// }
/// ```
#[derive(Error, Debug)]
pub enum Error {
    /// No published mapping build embeds the target binary version.
    ///
    /// The remote version index was fetched and parsed successfully, but none of its
    /// entries carries a version component equal to the requested one. The associated
    /// value is the version that was searched for.
    #[error("No mapping build published for version '{0}'")]
    NoMatchingBuild(String),

    /// A remote read failed.
    ///
    /// Covers transport failures, non-success HTTP statuses, an unparseable version
    /// index, and checksum mismatches of the downloaded artifact. No retry is
    /// attempted; the failure is surfaced to the resolver's constructor caller.
    #[error("Download failed - {0}")]
    Download(String),

    /// The downloaded artifact is not a valid compressed stream.
    #[error("Decompression failed - {0}")]
    Decompression(String),

    /// The mapping data violates the format's structure.
    ///
    /// Raised for wrong column counts, duplicate namespace declarations, member rows
    /// preceding any class row, duplicate entries, and invalid descriptors. The error
    /// includes the source location where the malformation was detected.
    ///
    /// # Fields
    ///
    /// * `message` - Detailed description of what was malformed
    /// * `file` - Source file in which the error was detected
    /// * `line` - Source line in which the error was detected
    #[error("Malformed - {file}:{line}: {message}")]
    Malformed {
        /// The message to be printed for the Malformed error
        message: String,
        /// The source file in which this error occured
        file: &'static str,
        /// The source line in which this error occured
        line: u32,
    },

    /// A query referenced a namespace label the mapping table does not declare.
    #[error("Namespace '{0}' is not declared by the mapping table")]
    UnknownNamespace(String),

    /// No class carries the queried name in the queried namespace.
    ///
    /// Never answered with a default or empty name; the absence is the result.
    #[error("No class named '{0}' in the queried namespace")]
    UnknownClass(String),

    /// No member of the resolved class matches the queried (name, descriptor) pair.
    #[error("No member '{name}' matching the requested descriptor in class '{class}'")]
    UnknownMember {
        /// The owning class, as named in the query's source namespace
        class: String,
        /// The member name that failed to resolve
        name: String,
    },

    /// File I/O error.
    ///
    /// Wraps standard I/O errors raised while handling the scoped staging files that
    /// hold artifact bytes during fetch and decode.
    #[error("{0}")]
    FileError(#[from] std::io::Error),
}

impl From<reqwest::Error> for Error {
    fn from(error: reqwest::Error) -> Self {
        Error::Download(error.to_string())
    }
}
