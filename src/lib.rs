pub mod classify;
pub mod cli;
pub mod config;
pub mod corpus;
pub mod error;
pub mod evaluate;
pub mod llms;
pub mod logging;
pub mod prelude;
pub mod requests;
pub mod text_utils;

#[macro_use]
extern crate lazy_static;

pub(crate) use anyhow::Result;
pub use prelude::*;
#[allow(unused_imports)]
pub(crate) use tracing::{debug, error, info, span, trace, warn, Level};

pub struct IntentClient {}

impl IntentClient {
    /// Creates a new instance of the [`OpenAiBackendBuilder`]. Converted to a shared backend with the `init` method.
    pub fn openai() -> llms::api::openai::builder::OpenAiBackendBuilder {
        llms::api::openai::builder::OpenAiBackendBuilder::default()
    }

    /// Creates a new instance of the [`GenericApiBackendBuilder`] for any OpenAI compatible host.
    pub fn generic_api() -> llms::api::generic_openai::GenericApiBackendBuilder {
        llms::api::generic_openai::GenericApiBackendBuilder::default()
    }
}
