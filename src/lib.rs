// Library root
// -----------
// This crate exposes the admin client as a library so the binary stays a
// thin shell and the dispatcher can be driven with a fabricated environment
// and transport in tests.
//
// Module responsibilities:
// - `cli`: one-pass argument parsing into an `Invocation`, then per-command
//   validation into a typed `Command`.
// - `config`: base URI and token, resolved from flags or the environment.
// - `dispatch`: runs a `Command` and reports the outcome.
// - `api`: the HTTP transport and the `ApiClient` the resource modules
//   (`users`, `files`, `datasets`) extend.
// - `helpers`: token expiry and filepath checks done before any request.
// - `usage`: help text table and rendering.
pub mod api;
pub mod cli;
pub mod config;
pub mod datasets;
pub mod dispatch;
pub mod error;
pub mod files;
pub mod helpers;
pub mod usage;
pub mod users;

pub use dispatch::run;
pub use error::{ApiError, Error, Result, TokenError};
