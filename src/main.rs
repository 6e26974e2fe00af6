// src/main.rs
use clap::{Parser, Subcommand};
use env_logger::Env;
use log::{debug, error};
use serde_json::Value;
use std::path::PathBuf;
use std::process::ExitCode;

use mcstat::display::{render_achievements, render_list, render_stats, render_status};
use mcstat::models::profile::Session;
use mcstat::stats::StatGroup;
use mcstat::storage::tokens::TokenStore;
use mcstat::{Config, MojangClient, PlayerStats, QueryClient};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Parser)]
#[command(name = "mcstat", version, about = "Minecraft server query, player stats and Mojang API tool")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Query a server's full status over the UDP query protocol
    Query {
        host: String,
        /// Query port (defaults to MCSTAT_QUERY_PORT or 25565)
        #[arg(short, long)]
        port: Option<u16>,
        #[arg(long)]
        json: bool,
    },
    /// Show a group of statistics from a player stats file
    Stats {
        file: PathBuf,
        #[arg(short, long, value_enum, default_value_t = StatGroup::General)]
        group: StatGroup,
        #[arg(long)]
        json: bool,
    },
    /// Call the Mojang web APIs
    Mojang {
        #[command(subcommand)]
        command: MojangCommand,
    },
}

#[derive(Subcommand)]
enum MojangCommand {
    /// Service status
    Status,
    /// Profile id for a username
    Uuid { username: String },
    /// Profile ids for several usernames
    Uuids {
        #[arg(required = true)]
        usernames: Vec<String>,
    },
    /// Profile details for a profile id
    Profile { uuid: String },
    /// Account details of the stored session
    UserInfo,
    /// Realms available to the stored session
    Realms,
    /// Details of one realm
    Realm { id: u64 },
    /// Log in and store the tokens
    Authenticate {
        #[arg(long, env = "MOJANG_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Refresh the stored access token
    Refresh,
    /// Check the stored access token
    Validate,
    /// Invalidate the stored access token
    Invalidate,
    /// Invalidate every token of the account
    Signout {
        #[arg(long, env = "MOJANG_PASSWORD", hide_env_values = true)]
        password: String,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize logger only once at the start
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    dotenv::dotenv().ok();
    let config = Config::from_env();
    let cli = Cli::parse();

    match run(cli.command, &config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(command: Command, config: &Config) -> Result<(), BoxError> {
    match command {
        Command::Query { host, port, json } => {
            let port = port.unwrap_or(config.default_query_port);
            let client = QueryClient::from_config(config);
            let status = client.info(&host, port).await?;

            if json {
                println!("{}", serde_json::to_string_pretty(&status)?);
            } else {
                print!("{}", render_status(&host, port, &status));
            }
        }
        Command::Stats { file, group, json } => {
            let stats = PlayerStats::from_path(&file)?;
            print_stats(&stats, group, json)?;
        }
        Command::Mojang { command } => run_mojang(command, config).await?,
    }
    Ok(())
}

fn print_stats(stats: &PlayerStats, group: StatGroup, json: bool) -> Result<(), BoxError> {
    let (value, text) = match group {
        StatGroup::Achievements => {
            let achievements = stats.achievements();
            (serde_json::to_value(&achievements)?, render_achievements(&achievements))
        }
        StatGroup::Explored => {
            let explored = stats.explored();
            (serde_json::to_value(&explored)?, render_list(&explored))
        }
        StatGroup::Unexplored => {
            let unexplored = stats.unexplored();
            (serde_json::to_value(&unexplored)?, render_list(&unexplored))
        }
        other => {
            let table = other.table().unwrap_or_default();
            let rows = stats.table(table);
            (serde_json::to_value(&rows)?, render_stats(&rows))
        }
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&value)?);
    } else {
        print!("{}", text);
    }
    Ok(())
}

async fn run_mojang(command: MojangCommand, config: &Config) -> Result<(), BoxError> {
    let store = TokenStore::new(&config.token_store);
    let mut session = Session::new(config.username.clone(), config.account_id.clone());
    if let Some(stored) = store.load()? {
        debug!("Loaded session from {:?}", store.path());
        session.merge_missing(stored);
    }

    let client = MojangClient::new(config, session)?;
    let (result, persist) = match command {
        MojangCommand::Status => (client.status().await?, false),
        MojangCommand::Uuid { username } => (client.uuid(&username).await?, false),
        MojangCommand::Uuids { usernames } => (client.uuids(&usernames).await?, false),
        MojangCommand::Profile { uuid } => (client.profile(&uuid).await?, false),
        MojangCommand::UserInfo => (client.user_info().await?, false),
        MojangCommand::Realms => (client.realms().await?, true),
        MojangCommand::Realm { id } => (client.realm(id).await?, true),
        MojangCommand::Authenticate { password } => (client.authenticate(&password).await?, true),
        MojangCommand::Refresh => (client.refresh().await?, true),
        MojangCommand::Validate => (client.validate().await?, false),
        MojangCommand::Invalidate => (client.invalidate().await?, false),
        MojangCommand::Signout { password } => (client.signout(&password).await?, false),
    };

    if persist {
        store.save(&client.session())?;
    }

    match result {
        Some(Value::Null) | None => println!("OK"),
        Some(value) => println!("{}", serde_json::to_string_pretty(&value)?),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_query_with_port() {
        let cli = Cli::try_parse_from(["mcstat", "query", "mc.example.org", "-p", "25566"]).unwrap();
        match cli.command {
            Command::Query { host, port, json } => {
                assert_eq!(host, "mc.example.org");
                assert_eq!(port, Some(25566));
                assert!(!json);
            }
            _ => panic!("expected query command"),
        }
    }

    #[test]
    fn parses_stats_group() {
        let cli = Cli::try_parse_from(["mcstat", "stats", "player.json", "--group", "picked-up"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Stats { group: StatGroup::PickedUp, .. }
        ));
    }

    #[test]
    fn uuids_requires_names() {
        assert!(Cli::try_parse_from(["mcstat", "mojang", "uuids"]).is_err());
    }
}
