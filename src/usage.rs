// Usage text, keyed by command group and subcommand. An empty subcommand
// key is the group overview, so `("file", "")` describes the `file` group.

use crate::error::{Error, Result};

pub const USAGE: &str = "
Usage:
  sda-admin [-uri URI] [-token TOKEN] <command> [options]

Commands:
  user list                     List all users.
  file list -user USERNAME      List all files for a specified user.
  file ingest -filepath FILEPATH -user USERNAME
                                Trigger ingestion of a given file.
  file set-accession -filepath FILEPATH -user USERNAME -accession-id accessionID
                                Assign accession ID to a file.
  dataset create -dataset-id DATASET_ID [-user USERNAME] accessionID [accessionID ...]
                                Create a dataset from a list of accession IDs and a dataset ID.
  dataset release -dataset-id DATASET_ID
                                Release a dataset for downloading.

Global Options:
  -uri URI         Set the URI for the API server (optional if API_HOST is set).
  -token TOKEN     Set the authentication token (optional if ACCESS_TOKEN is set).

Additional Commands:
  help             Show this help message.
  -h, -help        Show this help message.
  version          Show the version of sda-admin.
";

const USER_USAGE: &str = "
List Users:
  Usage: sda-admin user list
    List all users in the system.
";

const USER_LIST_USAGE: &str = "
Usage: sda-admin user list
  List all users in the system.
";

const FILE_USAGE: &str = "
List all files for a user:
  Usage: sda-admin file list -user USERNAME
    List all files for a specified user.

Ingest a file:
  Usage: sda-admin file ingest -filepath FILEPATH -user USERNAME
    Trigger the ingestion of a given file for a specific user.

Set accession ID to a file:
  Usage: sda-admin file set-accession -filepath FILEPATH -user USERNAME -accession-id ACCESSION_ID
    Assign an accession ID to a file for a given user.

Options:
  -user USERNAME       Specify the username associated with the file.
  -filepath FILEPATH   Specify the path of the file to ingest.
  -accession-id ID     Specify the accession ID to assign to the file.

Use 'sda-admin help file <command>' for information on a specific command.
";

const FILE_LIST_USAGE: &str = "
Usage: sda-admin file list -user USERNAME
  List all files for a specified user.

Options:
  -user USERNAME       Specify the username associated with the files.
";

const FILE_INGEST_USAGE: &str = "
Usage: sda-admin file ingest -filepath FILEPATH -user USERNAME
  Trigger the ingestion of a given file for a specific user.

Options:
  -filepath FILEPATH   Specify the path of the file to ingest.
  -user USERNAME       Specify the username associated with the file.
";

const FILE_ACCESSION_USAGE: &str = "
Usage: sda-admin file set-accession -filepath FILEPATH -user USERNAME -accession-id ACCESSION_ID
  Assign accession ID to a file and associate it with a user.

Options:
  -filepath FILEPATH   Specify the path of the file to assign the accession ID.
  -user USERNAME       Specify the username associated with the file.
  -accession-id ID     Specify the accession ID to assign to the file.
";

const DATASET_USAGE: &str = "
Create a dataset:
  Usage: sda-admin dataset create -dataset-id DATASET_ID [-user USERNAME] ACCESSION_ID [ACCESSION_ID ...]
    Create a dataset from a list of accession IDs and a dataset ID.

Release a dataset:
  Usage: sda-admin dataset release -dataset-id DATASET_ID
    Release a dataset for downloading based on its dataset ID.

Options:
  -dataset-id DATASET_ID   Specify the unique identifier for the dataset.
  -user USERNAME           (For dataset create) Specify the user the dataset is created for.
  [ACCESSION_ID ...]       (For dataset create) Specify one or more accession IDs to include in the dataset.

Use 'sda-admin help dataset <command>' for information on a specific command.
";

const DATASET_CREATE_USAGE: &str = "
Usage: sda-admin dataset create -dataset-id DATASET_ID [-user USERNAME] ACCESSION_ID [ACCESSION_ID ...]
  Create a dataset from a list of accession IDs and a dataset ID.

Options:
  -dataset-id DATASET_ID   Specify the unique identifier for the dataset.
  -user USERNAME           Specify the user the dataset is created for.
  [ACCESSION_ID ...]       Specify one or more accession IDs to include in the dataset.
";

const DATASET_RELEASE_USAGE: &str = "
Usage: sda-admin dataset release -dataset-id DATASET_ID
  Release a dataset for downloading based on its dataset ID.

Options:
  -dataset-id DATASET_ID   Specify the unique identifier for the dataset.
";

const VERSION_USAGE: &str = "
Usage: sda-admin version
  Show the version information for sda-admin.
";

/// (group, subcommand, text)
const TOPICS: &[(&str, &str, &str)] = &[
    ("", "", USAGE),
    ("user", "", USER_USAGE),
    ("user", "list", USER_LIST_USAGE),
    ("file", "", FILE_USAGE),
    ("file", "list", FILE_LIST_USAGE),
    ("file", "ingest", FILE_INGEST_USAGE),
    ("file", "set-accession", FILE_ACCESSION_USAGE),
    ("dataset", "", DATASET_USAGE),
    ("dataset", "create", DATASET_CREATE_USAGE),
    ("dataset", "release", DATASET_RELEASE_USAGE),
    ("version", "", VERSION_USAGE),
];

pub fn lookup(group: &str, subcommand: &str) -> Option<&'static str> {
    TOPICS
        .iter()
        .find(|(g, s, _)| *g == group && *s == subcommand)
        .map(|(_, _, text)| *text)
}

/// The closest usage block: the subcommand's, else the group's, else the
/// top-level usage. Pass `""` as `subcommand` for the group overview.
pub fn usage_for(group: &str, subcommand: &str) -> &'static str {
    lookup(group, subcommand)
        .or_else(|| lookup(group, ""))
        .unwrap_or(USAGE)
}

/// Resolve `help [group [subcommand]]` to the text to print.
pub fn render_help(topic: &[String]) -> Result<&'static str> {
    match topic {
        [] => Ok(USAGE),
        [group, ..] if lookup(group, "").is_none() => Err(Error::usage(
            format!("Unknown command '{group}'."),
            USAGE,
        )),
        // `version` has no subcommands; anything after it is ignored.
        [group, ..] if group == "version" => Ok(VERSION_USAGE),
        [group] => Ok(usage_for(group, "")),
        [group, subcommand, ..] => lookup(group, subcommand).ok_or_else(|| {
            Error::usage(
                format!("Unknown subcommand '{subcommand}' for '{group}'."),
                usage_for(group, ""),
            )
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn topic(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn every_group_has_an_overview() {
        for group in ["user", "file", "dataset", "version"] {
            assert!(lookup(group, "").is_some(), "{group}");
        }
    }

    #[test]
    fn help_without_topic_is_top_level_usage() {
        assert_eq!(render_help(&[]).unwrap(), USAGE);
    }

    #[test]
    fn help_for_subcommand_is_exact_block() {
        assert_eq!(
            render_help(&topic(&["dataset", "create"])).unwrap(),
            DATASET_CREATE_USAGE
        );
        assert_eq!(
            render_help(&topic(&["file", "set-accession"])).unwrap(),
            FILE_ACCESSION_USAGE
        );
    }

    #[test]
    fn top_level_usage_lists_optional_dataset_user() {
        assert!(USAGE.contains("dataset create -dataset-id DATASET_ID [-user USERNAME]"));
    }

    #[test]
    fn help_version_ignores_extra_words() {
        assert_eq!(render_help(&topic(&["version", "x"])).unwrap(), VERSION_USAGE);
    }

    #[test]
    fn unknown_group_reports_top_level_usage() {
        let err = render_help(&topic(&["bogus"])).unwrap_err();
        assert_eq!(err.to_string(), format!("Unknown command 'bogus'.\n{USAGE}"));
    }

    #[test]
    fn unknown_subcommand_reports_group_usage() {
        let err = render_help(&topic(&["user", "delete"])).unwrap_err();
        assert_eq!(
            err.to_string(),
            format!("Unknown subcommand 'delete' for 'user'.\n{USER_USAGE}")
        );
    }

    #[test]
    fn usage_falls_back_to_group_then_top_level() {
        assert_eq!(usage_for("file", "ingest"), FILE_INGEST_USAGE);
        assert_eq!(usage_for("file", "nope"), FILE_USAGE);
        assert_eq!(usage_for("nope", "nope"), USAGE);
    }
}
