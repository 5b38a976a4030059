// Library root
// -----------
// This crate exposes the pieces behind the interactive API explorer. The
// binary (`main.rs`) wires them together.
//
// Module responsibilities:
// - `api`: blocking HTTP client for the public services and the typed
//   views of their responses.
// - `config`: base URLs, API keys and timeouts, overridable from the
//   environment.
// - `error`: the `ApiError` type every fallible call returns.
// - `lookup`: static city and coin tables.
// - `validate`: checks for values typed at the prompts.
// - `retry`: the success/error wrapper and the fixed-count retry helper.
// - `report`: text formatting of results.
// - `storage`: the one-shot JSON dump.
// - `logger`: tracing subscriber setup.
// - `ui`: the menus and handlers.
pub mod api;
pub mod config;
pub mod error;
pub mod logger;
pub mod lookup;
pub mod report;
pub mod retry;
pub mod storage;
pub mod ui;
pub mod validate;

pub use api::ApiClient;
pub use error::{ApiError, Result};
