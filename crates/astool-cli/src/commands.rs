use std::path::{Path, PathBuf};

use astool_batch::{delete_keys, delete_one, fetch_keys, scan_records, Console, KeySource};
use astool_store::{ClientConfig, RecordStore, StoreResult};
use astool_types::NamespaceSet;
use tracing::debug;

use crate::cli::*;

const GET_USAGE: &str = "Usage: astool get --set NAMESPACE.SET [--file FILE | KEY...]";
const DEL_USAGE: &str = "Usage: astool del --set NAMESPACE.SET [--file FILE | KEY]";
const SCAN_USAGE: &str = "Usage: astool scan --set NAMESPACE.SET";

/// Process exit status of a subcommand.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExitStatus {
    Success,
    Failure,
    UsageError,
}

impl ExitStatus {
    pub fn code(self) -> u8 {
        match self {
            ExitStatus::Success => 0,
            ExitStatus::Failure => 1,
            ExitStatus::UsageError => 2,
        }
    }
}

/// Opens a store handle for one invocation.
pub type Connector<'a> = dyn Fn(&ClientConfig) -> StoreResult<Box<dyn RecordStore>> + 'a;

enum Mode<'a> {
    File(&'a Path),
    Args,
}

pub fn run_command(command: Command, connect: &Connector<'_>, console: &mut Console<'_>) -> ExitStatus {
    match command {
        Command::Get(args) => cmd_get(args, connect, console),
        Command::Del(args) => cmd_del(args, connect, console),
        Command::Scan(args) => cmd_scan(args, connect, console),
    }
}

/// Checks shared by every subcommand before any network activity.
fn prepare(
    set: Option<&str>,
    conn: &ConnectionArgs,
    usage: &str,
    console: &mut Console<'_>,
) -> Result<(NamespaceSet, ClientConfig), ExitStatus> {
    let set = set.unwrap_or_default();
    let config = conn.to_config();
    if set.is_empty() || config.validate().is_err() {
        console.log(usage);
        return Err(ExitStatus::UsageError);
    }
    match NamespaceSet::parse(set) {
        Ok(ns) => Ok((ns, config)),
        Err(e) => {
            console.log(e);
            console.log(usage);
            Err(ExitStatus::UsageError)
        }
    }
}

fn select_mode(file: Option<&PathBuf>, has_args: bool) -> Option<Mode<'_>> {
    match file {
        Some(path) if !path.as_os_str().is_empty() => Some(Mode::File(path)),
        _ if has_args => Some(Mode::Args),
        _ => None,
    }
}

fn open_store(
    config: &ClientConfig,
    connect: &Connector<'_>,
    console: &mut Console<'_>,
) -> Result<Box<dyn RecordStore>, ExitStatus> {
    debug!(address = %config.address(), "connecting");
    connect(config).map_err(|e| {
        console.log(format_args!("could not get aerospike client: {e}"));
        ExitStatus::Failure
    })
}

fn cmd_get(args: GetArgs, connect: &Connector<'_>, console: &mut Console<'_>) -> ExitStatus {
    let (ns, config) = match prepare(args.set.as_deref(), &args.conn, GET_USAGE, console) {
        Ok(prepared) => prepared,
        Err(status) => return status,
    };
    let Some(mode) = select_mode(args.file.as_ref(), !args.keys.is_empty()) else {
        console.log(GET_USAGE);
        return ExitStatus::UsageError;
    };
    let store = match open_store(&config, connect, console) {
        Ok(store) => store,
        Err(status) => return status,
    };

    let result = match mode {
        Mode::File(path) => KeySource::open(path)
            .and_then(|source| fetch_keys(store.as_ref(), &ns, source, console)),
        Mode::Args => fetch_keys(store.as_ref(), &ns, KeySource::from_args(args.keys), console),
    };
    match result {
        Ok(_) => ExitStatus::Success,
        Err(e) => {
            console.log(format_args!("could not get aerospike records: {e}"));
            ExitStatus::Failure
        }
    }
}

fn cmd_del(args: DelArgs, connect: &Connector<'_>, console: &mut Console<'_>) -> ExitStatus {
    let (ns, config) = match prepare(Some(args.set.as_str()), &args.conn, DEL_USAGE, console) {
        Ok(prepared) => prepared,
        Err(status) => return status,
    };
    let Some(mode) = select_mode(args.file.as_ref(), args.key.is_some()) else {
        console.log(DEL_USAGE);
        return ExitStatus::UsageError;
    };
    let store = match open_store(&config, connect, console) {
        Ok(store) => store,
        Err(status) => return status,
    };

    let result = match (mode, args.key) {
        (Mode::File(path), _) => KeySource::open(path)
            .and_then(|source| delete_keys(store.as_ref(), &ns, source, console))
            .map(|_| ())
            .map_err(|e| e.to_string()),
        (Mode::Args, Some(key)) => delete_one(store.as_ref(), &ns, &key).map_err(|e| e.to_string()),
        (Mode::Args, None) => Ok(()),
    };
    match result {
        Ok(()) => ExitStatus::Success,
        Err(message) => {
            console.log(message);
            ExitStatus::Failure
        }
    }
}

fn cmd_scan(args: ScanArgs, connect: &Connector<'_>, console: &mut Console<'_>) -> ExitStatus {
    let (ns, config) = match prepare(args.set.as_deref(), &args.conn, SCAN_USAGE, console) {
        Ok(prepared) => prepared,
        Err(status) => return status,
    };
    let store = match open_store(&config, connect, console) {
        Ok(store) => store,
        Err(status) => return status,
    };

    match scan_records(store.as_ref(), &ns, console) {
        Ok(_) => ExitStatus::Success,
        Err(e) => {
            console.log(format_args!("could not get aerospike records: {e}"));
            ExitStatus::Failure
        }
    }
}
