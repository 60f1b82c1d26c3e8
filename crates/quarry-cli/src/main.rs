use std::path::PathBuf;

use clap::{Parser, Subcommand};
use quarry_client::{Client, ClientConfig, ClientError, Connection};
use quarry_query::{GroupingParameters, MoreLikeThisOptions, QueryOptions};
use quarry_response::{BsonDocumentParser, GroupingParser, ResponseDecoder, ResponseKind};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "quarry")]
#[command(about = "Query a search server and print typed, grouped results as JSON")]
#[command(version)]
struct Cli {
    /// JSON client config; QUARRY_* environment variables are used otherwise
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Value reported for groups whose field is empty
    #[arg(long, global = true)]
    null_value: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode a saved XML response
    Decode {
        file: PathBuf,

        /// Decode as a more-like-this response
        #[arg(long)]
        mlt: bool,
    },

    /// Run a query against the configured core
    Query {
        query: String,

        /// Group by field (can be specified multiple times)
        #[arg(long = "group-field")]
        group_fields: Vec<String>,

        /// Group by query (can be specified multiple times)
        #[arg(long = "group-query")]
        group_queries: Vec<String>,

        /// Documents per group
        #[arg(long)]
        group_limit: Option<usize>,

        /// Ask for distinct group counts
        #[arg(long)]
        ngroups: bool,

        #[arg(long)]
        rows: Option<usize>,
    },

    /// Find documents similar to the ones matching a query
    Mlt {
        query: String,

        /// Similarity field (can be specified multiple times)
        #[arg(short, long = "field")]
        fields: Vec<String>,

        #[arg(long)]
        rows: Option<usize>,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("quarry: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), ClientError> {
    let config = match &cli.config {
        Some(path) => ClientConfig::from_path(path)?,
        None => ClientConfig::from_env(),
    };
    let grouping = match cli.null_value {
        Some(value) => GroupingParser::with_null_value(value),
        None => GroupingParser::default(),
    };
    let client = Client::with_decoder(
        Connection::new(&config),
        ResponseDecoder::with_grouping(BsonDocumentParser, grouping),
    );

    match cli.command {
        Commands::Decode { file, mlt } => {
            let xml = std::fs::read_to_string(&file)?;
            let kind = if mlt {
                ResponseKind::MoreLikeThis
            } else {
                ResponseKind::Query
            };
            print_json(&client.decode(&xml, kind)?)
        }
        Commands::Query {
            query,
            group_fields,
            group_queries,
            group_limit,
            ngroups,
            rows,
        } => {
            let options = QueryOptions {
                rows,
                grouping: GroupingParameters {
                    fields: group_fields,
                    queries: group_queries,
                    limit: group_limit,
                    ngroups: ngroups.then_some(true),
                    ..GroupingParameters::default()
                },
                ..QueryOptions::new(query)
            };
            tracing::info!(url = client.connection().base_url(), "running query");
            print_json(&client.query(&options)?)
        }
        Commands::Mlt {
            query,
            fields,
            rows,
        } => {
            let options = MoreLikeThisOptions {
                query: Some(query),
                fields,
                rows,
                match_include: Some(true),
                ..MoreLikeThisOptions::default()
            };
            print_json(&client.more_like_this(&options)?)
        }
    }
}

fn print_json(value: &impl Serialize) -> Result<(), ClientError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_grouped_query() {
        let cli = Cli::try_parse_from([
            "quarry",
            "query",
            "name:widget",
            "--group-field",
            "category",
            "--group-field",
            "brand",
            "--group-query",
            "price:[0 TO 10]",
            "--ngroups",
        ])
        .unwrap();

        match cli.command {
            Commands::Query {
                query,
                group_fields,
                group_queries,
                ngroups,
                ..
            } => {
                assert_eq!(query, "name:widget");
                assert_eq!(group_fields, vec!["category", "brand"]);
                assert_eq!(group_queries, vec!["price:[0 TO 10]"]);
                assert!(ngroups);
            }
            _ => panic!("expected query command"),
        }
    }

    #[test]
    fn parses_decode_with_global_flags() {
        let cli = Cli::try_parse_from([
            "quarry",
            "decode",
            "response.xml",
            "--mlt",
            "--null-value",
            "none",
        ])
        .unwrap();

        assert_eq!(cli.null_value.as_deref(), Some("none"));
        assert!(matches!(cli.command, Commands::Decode { mlt: true, .. }));
    }
}
