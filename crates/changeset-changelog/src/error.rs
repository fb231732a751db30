use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChangelogError {
    #[error("failed to read changelog at '{path}'")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write changelog at '{path}'")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to resolve rendering root '{path}'")]
    ResolveRoot {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read changelog template at '{path}'")]
    TemplateRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse changelog template '{origin}'")]
    TemplateParse {
        origin: String,
        #[source]
        source: minijinja::Error,
    },

    #[error("failed to render changelog template '{origin}'")]
    TemplateRender {
        origin: String,
        #[source]
        source: minijinja::Error,
    },

    #[error("no changelog section for version '{version}'")]
    SectionNotFound { version: String },
}
