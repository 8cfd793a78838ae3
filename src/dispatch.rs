// Command dispatcher: turns the raw argument list into exactly one outcome,
// either a completed API call with its report on `out`, or an `Error`.
//
// Checks run in a fixed order: parse, resolve configuration (skipped for
// `help` and `version`), validate the subcommand, check token expiry, then
// issue the request. Nothing reaches the transport unless every earlier
// step passed.

use std::io::Write;

use crate::api::{ApiClient, Transport};
use crate::cli::{Command, Invocation};
use crate::config::Config;
use crate::datasets::DatasetRequest;
use crate::error::{Error, Result};
use crate::files::{write_file_table, AccessionRequest, IngestRequest};
use crate::helpers::check_token_expiration;
use crate::usage;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Run one invocation. `env` looks up environment variables so callers can
/// supply a fabricated environment.
pub fn run(
    args: &[String],
    env: &dyn Fn(&str) -> Option<String>,
    transport: &dyn Transport,
    out: &mut dyn Write,
) -> Result<()> {
    let invocation = Invocation::parse(args)?;

    if !invocation.needs_config() {
        match Command::from_invocation(&invocation)? {
            Command::Help { topic } => write!(out, "{}", usage::render_help(&topic)?)?,
            _ => writeln!(out, "sda-admin version {VERSION}")?,
        }
        return Ok(());
    }

    let config = Config::resolve(&invocation.globals, env)?;
    let command = Command::from_invocation(&invocation)?;
    tracing::debug!(?command, "dispatching");
    execute(command, &config, transport, out)
}

fn execute(
    command: Command,
    config: &Config,
    transport: &dyn Transport,
    out: &mut dyn Write,
) -> Result<()> {
    check_token_expiration(&config.token)?;
    let client = ApiClient::new(transport, config);

    match command {
        Command::UserList => {
            let users = client
                .list_users()
                .map_err(|e| Error::api("get users", e))?;
            for user in users {
                writeln!(out, "{user}")?;
            }
        }
        Command::FileList { user } => {
            let files = client
                .list_files(&user)
                .map_err(|e| Error::api("get files", e))?;
            write_file_table(out, &user, &files)?;
        }
        Command::FileIngest { user, filepath } => {
            client
                .ingest_file(&IngestRequest { filepath, user })
                .map_err(|e| Error::api("ingest file", e))?;
            writeln!(out, "File ingestion triggered successfully.")?;
        }
        Command::FileSetAccession {
            user,
            filepath,
            accession_id,
        } => {
            client
                .set_accession(&AccessionRequest {
                    accession_id,
                    filepath,
                    user,
                })
                .map_err(|e| Error::api("assign accession ID to file", e))?;
            writeln!(out, "Accession ID assigned to file successfully.")?;
        }
        Command::DatasetCreate {
            dataset_id,
            user,
            accession_ids,
        } => {
            client
                .create_dataset(&DatasetRequest {
                    accession_ids,
                    dataset_id,
                    user,
                })
                .map_err(|e| Error::api("create dataset", e))?;
            writeln!(out, "Dataset created successfully.")?;
        }
        Command::DatasetRelease { dataset_id } => {
            client
                .release_dataset(&dataset_id)
                .map_err(|e| Error::api("release dataset", e))?;
            writeln!(out, "Dataset released successfully.")?;
        }
        Command::Help { .. } | Command::Version => {}
    }
    Ok(())
}
