use snafu::prelude::*;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum Error {
    #[snafu(display("route name already registered: {name:?}"))]
    DuplicateName { name: String },

    #[snafu(display("pattern {pattern:?} has a parameter segment without a name"))]
    UnnamedParam { pattern: String },

    #[snafu(display("pattern {pattern:?} must start with '/'"))]
    BadPatternStart { pattern: String },

    #[snafu(display("pattern {pattern:?} has segments after the catch-all"))]
    CatchAllNotLast { pattern: String },

    #[snafu(display("route table needs exactly one catch-all route"))]
    MissingCatchAll,

    #[snafu(display("route {name:?} is a second catch-all"))]
    ExtraCatchAll { name: String },

    #[snafu(display("catch-all route {name:?} must be declared last"))]
    CatchAllNotFinal { name: String },

    #[snafu(display("Failed to lock shared state: poisoned"))]
    LockPoisoned,

    #[snafu(display("Terminal error: {source}"))]
    Terminal { source: std::io::Error },

    #[snafu(display("slug request failed: {source}"))]
    SlugRequest { source: reqwest::Error },

    #[snafu(display("slug response could not be decoded: {source}"))]
    SlugDecode { source: reqwest::Error },

    #[snafu(display("slug source unavailable: {message}"))]
    SourceUnavailable { message: String },
}

pub type Result<T> = std::result::Result<T, Error>;
