use thiserror::Error;

/// Errors produced by caller-supplied callbacks (buttons, visibility
/// predicates, URL builders and routers).
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum Error {
    /// A button, visibility predicate or URL builder failed while rendering
    /// the button called `name`.
    #[error("callback for `{name}` failed: {source}")]
    Callback {
        name: String,
        #[source]
        source: BoxError,
    },
    #[error("routing failed: {0}")]
    Routing(#[source] BoxError),
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    /// A collaborator which the configured buttons depend on was not
    /// supplied to the builder.
    #[error("missing collaborator: {0}")]
    MissingCollaborator(&'static str),
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl Error {
    pub(crate) fn callback(name: &str, source: BoxError) -> Self {
        Error::Callback {
            name: name.to_string(),
            source,
        }
    }
}
