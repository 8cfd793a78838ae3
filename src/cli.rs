// Command-line parsing.
//
// One pass over the raw arguments yields an `Invocation`: global flags, the
// command word, the subcommand word, subcommand flags and trailing
// positional arguments. `Command::from_invocation` then checks that
// invocation against what the subcommand accepts.
//
// Every flag is string-valued. `-name value`, `-name=value` and the
// double-dash forms are accepted, and flag parsing stops at the first
// non-flag argument or at `--`.

use std::collections::BTreeMap;

use crate::error::{Error, Result};
use crate::helpers::check_valid_chars;
use crate::usage::{self, USAGE};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GlobalFlags {
    pub uri: Option<String>,
    pub token: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Group {
    User,
    File,
    Dataset,
    Help,
    Version,
}

impl Group {
    fn parse(word: &str) -> Option<Self> {
        match word {
            "user" => Some(Group::User),
            "file" => Some(Group::File),
            "dataset" => Some(Group::Dataset),
            "help" | "-h" | "-help" | "--help" => Some(Group::Help),
            "version" => Some(Group::Version),
            _ => None,
        }
    }
}

/// The raw, untyped result of parsing the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub globals: GlobalFlags,
    /// The command word as typed; `group` is `None` when it is not a known one.
    pub command: String,
    pub group: Option<Group>,
    pub subcommand: Option<String>,
    pub flags: BTreeMap<String, String>,
    pub args: Vec<String>,
}

/// Splits `-name`, `--name`, `-name=value` into name and inline value.
/// Returns `None` for anything that is not a flag.
fn split_flag(arg: &str) -> Option<(&str, Option<&str>)> {
    let body = arg.strip_prefix("--").or_else(|| arg.strip_prefix('-'))?;
    if body.is_empty() || body.starts_with('-') {
        return None;
    }
    Some(match body.split_once('=') {
        Some((name, value)) => (name, Some(value)),
        None => (body, None),
    })
}

/// Parse flags from the front of `args`, stopping at the first positional
/// argument or `--`. `args` is left at the first unconsumed argument.
fn parse_flags<'a, I>(
    args: &mut std::iter::Peekable<I>,
    usage: &'static str,
    stop_at: impl Fn(&str) -> bool,
) -> Result<BTreeMap<String, String>>
where
    I: Iterator<Item = &'a String>,
{
    let mut flags = BTreeMap::new();
    while let Some(&arg) = args.peek() {
        if arg == "--" {
            args.next();
            break;
        }
        if stop_at(arg.as_str()) {
            break;
        }
        let Some((name, inline)) = split_flag(arg) else {
            break;
        };
        let name = name.to_string();
        args.next();
        let value = match inline {
            Some(v) => v.to_string(),
            None => args
                .next()
                .cloned()
                .ok_or_else(|| Error::usage(format!("flag needs an argument: -{name}"), usage))?,
        };
        flags.insert(name, value);
    }
    Ok(flags)
}

impl Invocation {
    pub fn parse(raw: &[String]) -> Result<Self> {
        let mut args = raw.iter().peekable();

        let mut globals = GlobalFlags::default();
        let flags = parse_flags(&mut args, USAGE, |a| Group::parse(a) == Some(Group::Help))?;
        for (name, value) in flags {
            match name.as_str() {
                "uri" => globals.uri = Some(value),
                "token" => globals.token = Some(value),
                _ => {
                    return Err(Error::usage(
                        format!("flag provided but not defined: -{name}"),
                        USAGE,
                    ))
                }
            }
        }

        let Some(command) = args.next().cloned() else {
            return Err(Error::usage("Error: a command is required.", USAGE));
        };
        let group = Group::parse(&command);

        let mut subcommand = None;
        let mut flags = BTreeMap::new();
        if matches!(group, Some(Group::User | Group::File | Group::Dataset)) {
            if let Some(sub) = args.next() {
                flags = parse_flags(&mut args, usage::usage_for(&command, sub), |_| false)?;
                subcommand = Some(sub.clone());
            }
        }

        Ok(Invocation {
            globals,
            command,
            group,
            subcommand,
            flags,
            args: args.cloned().collect(),
        })
    }

    /// Only `help` and `version` run without credentials. An unknown command
    /// still resolves them first, so configuration errors take precedence.
    pub fn needs_config(&self) -> bool {
        !matches!(self.group, Some(Group::Help | Group::Version))
    }
}

/// A validated command, ready to dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help {
        topic: Vec<String>,
    },
    Version,
    UserList,
    FileList {
        user: String,
    },
    FileIngest {
        user: String,
        filepath: String,
    },
    FileSetAccession {
        user: String,
        filepath: String,
        accession_id: String,
    },
    DatasetCreate {
        dataset_id: String,
        user: String,
        accession_ids: Vec<String>,
    },
    DatasetRelease {
        dataset_id: String,
    },
}

/// Rejects flags the subcommand does not define, then returns a getter that
/// yields `""` for absent flags.
fn flag_getter<'a>(
    inv: &'a Invocation,
    allowed: &[&str],
    usage: &'static str,
) -> Result<impl Fn(&str) -> String + 'a> {
    if let Some(unknown) = inv.flags.keys().find(|k| !allowed.contains(&k.as_str())) {
        return Err(Error::usage(
            format!("flag provided but not defined: -{unknown}"),
            usage,
        ));
    }
    Ok(move |flag: &str| inv.flags.get(flag).cloned().unwrap_or_default())
}

impl Command {
    pub fn from_invocation(inv: &Invocation) -> Result<Self> {
        let name = inv.command.as_str();
        let Some(group) = inv.group else {
            return Err(Error::usage(format!("Unknown command '{name}'."), USAGE));
        };
        let sub = inv.subcommand.as_deref();
        let usage = usage::usage_for(name, sub.unwrap_or(""));
        let fail = |message: String| Error::usage(message, usage);
        let flags = |allowed: &'static [&'static str]| flag_getter(inv, allowed, usage);
        let check_filepath = |filepath: &str| check_valid_chars(filepath).map_err(fail);

        match (group, sub) {
            (Group::Help, _) => Ok(Command::Help {
                topic: inv.args.clone(),
            }),
            (Group::Version, _) => Ok(Command::Version),

            (_, None) => {
                let choices = match group {
                    Group::User => "list",
                    Group::File => "list, ingest, set-accession",
                    _ => "create, release",
                };
                Err(fail(format!("Error: '{name}' requires a subcommand ({choices}).")))
            }

            (Group::User, Some("list")) => {
                flags(&[])?;
                Ok(Command::UserList)
            }

            (Group::File, Some("list")) => {
                let user = flags(&["user"])?("user");
                if user.is_empty() {
                    return Err(fail("Error: the -user flag is required.".into()));
                }
                Ok(Command::FileList { user })
            }
            (Group::File, Some("ingest")) => {
                let get = flags(&["filepath", "user"])?;
                let (filepath, user) = (get("filepath"), get("user"));
                if filepath.is_empty() || user.is_empty() {
                    return Err(fail("Error: both -filepath and -user are required.".into()));
                }
                check_filepath(&filepath)?;
                Ok(Command::FileIngest { user, filepath })
            }
            (Group::File, Some("set-accession")) => {
                let get = flags(&["filepath", "user", "accession-id"])?;
                let (filepath, user, accession_id) =
                    (get("filepath"), get("user"), get("accession-id"));
                if filepath.is_empty() || user.is_empty() || accession_id.is_empty() {
                    return Err(fail(
                        "Error: -filepath, -user, and -accession-id are required.".into(),
                    ));
                }
                check_filepath(&filepath)?;
                Ok(Command::FileSetAccession {
                    user,
                    filepath,
                    accession_id,
                })
            }

            (Group::Dataset, Some("create")) => {
                let get = flags(&["dataset-id", "user"])?;
                let dataset_id = get("dataset-id");
                if dataset_id.is_empty() || inv.args.is_empty() {
                    return Err(fail(
                        "Error: -dataset-id and at least one accession ID are required.".into(),
                    ));
                }
                Ok(Command::DatasetCreate {
                    dataset_id,
                    user: get("user"),
                    accession_ids: inv.args.clone(),
                })
            }
            (Group::Dataset, Some("release")) => {
                let dataset_id = flags(&["dataset-id"])?("dataset-id");
                if dataset_id.is_empty() {
                    return Err(fail("Error: -dataset-id is required.".into()));
                }
                Ok(Command::DatasetRelease { dataset_id })
            }

            (_, Some(other)) => Err(fail(format!("Unknown subcommand '{other}' for '{name}'."))),
        }
    }
}
