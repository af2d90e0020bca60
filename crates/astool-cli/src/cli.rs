use std::path::PathBuf;

use astool_store::ClientConfig;
use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "astool",
    about = "Bulk get, delete and scan of Aerospike records",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Get records and print them as JSON lines
    Get(GetArgs),
    /// Delete records keyed by normalized URL
    Del(DelArgs),
    /// Print every record of a set as JSON lines
    Scan(ScanArgs),
}

#[derive(Args)]
pub struct ConnectionArgs {
    /// Aerospike hostname
    #[arg(long, default_value = "localhost")]
    pub host: String,
    /// Aerospike port number
    #[arg(long, default_value_t = 3000)]
    pub port: u16,
}

impl ConnectionArgs {
    pub fn to_config(&self) -> ClientConfig {
        ClientConfig::new(self.host.clone(), self.port)
    }
}

#[derive(Args)]
pub struct GetArgs {
    /// Aerospike NAMESPACE.SET
    #[arg(long)]
    pub set: Option<String>,
    /// Read keys of records from file
    #[arg(long)]
    pub file: Option<PathBuf>,
    #[command(flatten)]
    pub conn: ConnectionArgs,
    pub keys: Vec<String>,
}

#[derive(Args)]
pub struct DelArgs {
    /// Aerospike NAMESPACE.SET
    #[arg(long, default_value = "swan.page")]
    pub set: String,
    /// Read keys for deleting from file
    #[arg(long)]
    pub file: Option<PathBuf>,
    #[command(flatten)]
    pub conn: ConnectionArgs,
    pub key: Option<String>,
}

#[derive(Args)]
pub struct ScanArgs {
    /// Aerospike NAMESPACE.SET
    #[arg(long)]
    pub set: Option<String>,
    #[command(flatten)]
    pub conn: ConnectionArgs,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_get_keys() {
        let cli = Cli::try_parse_from(["astool", "get", "--set", "test.page", "k1", "k2"]).unwrap();
        if let Command::Get(args) = cli.command {
            assert_eq!(args.set, Some("test.page".into()));
            assert_eq!(args.keys, vec!["k1", "k2"]);
            assert!(args.file.is_none());
            assert_eq!(args.conn.host, "localhost");
            assert_eq!(args.conn.port, 3000);
        } else { panic!("wrong command"); }
    }

    #[test]
    fn parse_get_file() {
        let cli = Cli::try_parse_from(["astool", "get", "--set", "a.b", "--file", "keys.txt"]).unwrap();
        if let Command::Get(args) = cli.command {
            assert_eq!(args.file, Some(PathBuf::from("keys.txt")));
            assert!(args.keys.is_empty());
        } else { panic!("wrong command"); }
    }

    #[test]
    fn parse_del_defaults() {
        let cli = Cli::try_parse_from(["astool", "del", "http://example.com/"]).unwrap();
        if let Command::Del(args) = cli.command {
            assert_eq!(args.set, "swan.page");
            assert_eq!(args.key, Some("http://example.com/".into()));
        } else { panic!("wrong command"); }
    }

    #[test]
    fn parse_del_takes_one_key() {
        assert!(Cli::try_parse_from(["astool", "del", "a", "b"]).is_err());
    }

    #[test]
    fn parse_scan_connection() {
        let cli = Cli::try_parse_from(["astool", "scan", "--set", "a.b", "--host", "db1", "--port", "3100"]).unwrap();
        if let Command::Scan(args) = cli.command {
            let config = args.conn.to_config();
            assert_eq!(config.host, "db1");
            assert_eq!(config.port, 3100);
        } else { panic!("wrong command"); }
    }

    #[test]
    fn parse_rejects_out_of_range_port() {
        assert!(Cli::try_parse_from(["astool", "scan", "--set", "a.b", "--port", "70000"]).is_err());
    }

    #[test]
    fn parse_scan_rejects_keys() {
        assert!(Cli::try_parse_from(["astool", "scan", "--set", "a.b", "k1"]).is_err());
    }

    #[test]
    fn parse_verbose() {
        let cli = Cli::try_parse_from(["astool", "--verbose", "scan"]).unwrap();
        assert!(cli.verbose);
    }
}
