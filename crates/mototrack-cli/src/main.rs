use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use mototrack_client::{ClientConfig, MotoClient};
use mototrack_types::{CreateMotoRequest, UpdateMotoRequest};

mod logging;

#[derive(Parser, Debug)]
#[command(name = "mototrack")]
#[command(about = "Yard-tracking client - resolve the backend and manage moto records", long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "config.yaml")]
    config: String,

    /// Use JSON structured logging
    #[arg(long)]
    json_logs: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List every moto record
    List,

    /// Fetch a single moto by its server-assigned id
    Get { id: i64 },

    /// Find the moto carrying a device tag (exact match)
    FindTag { tag: String },

    /// Register a moto entering the yard
    Create {
        #[arg(long)]
        modelo: String,
        #[arg(long)]
        iot_identificador: String,
        #[arg(long)]
        setor_id: i64,
    },

    /// Replace a moto record
    Update {
        id: i64,
        #[arg(long)]
        modelo: String,
        #[arg(long)]
        iot_identificador: String,
        #[arg(long)]
        setor_id: i64,
    },

    /// Delete a moto record
    Delete { id: i64 },

    /// Probe candidate endpoints and show resolver state
    Probe,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config = ClientConfig::load_or_default(&args.config);
    logging::init(&config.log_level, args.json_logs);

    let client = MotoClient::new(config).context("failed to build client")?;

    match args.command {
        Command::List => {
            let motos = client.list().await?;
            print_json(&motos)?;
        },
        Command::Get { id } => match client.get(id).await? {
            Some(moto) => print_json(&moto)?,
            None => anyhow::bail!("moto {} not found", id),
        },
        Command::FindTag { tag } => match client.find_by_tag(&tag).await? {
            Some(moto) => print_json(&moto)?,
            None => anyhow::bail!("no moto carries tag {}", tag),
        },
        Command::Create { modelo, iot_identificador, setor_id } => {
            let request = CreateMotoRequest { modelo, iot_identificador, setor_id };
            // Required fields are the caller's responsibility, not the client's
            request.validate()?;
            let created = client.create(&request).await?;
            print_json(&created)?;
        },
        Command::Update { id, modelo, iot_identificador, setor_id } => {
            let request = UpdateMotoRequest { id, modelo, iot_identificador, setor_id };
            request.validate()?;
            let updated = client.update(id, &request).await?;
            print_json(&updated)?;
        },
        Command::Delete { id } => {
            client.delete(id).await?;
            println!("deleted moto {}", id);
        },
        Command::Probe => {
            let connection = client.test_connection().await;
            let resolver = client.debug_info();
            print_json(&serde_json::json!({
                "connection": connection,
                "resolver": resolver,
            }))?;
        },
    }

    Ok(())
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_args_are_well_formed() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_parse_create() {
        let args = Args::try_parse_from([
            "mototrack",
            "create",
            "--modelo",
            "Honda CG 160",
            "--iot-identificador",
            "IOT009",
            "--setor-id",
            "1",
        ])
        .unwrap();

        match args.command {
            Command::Create { modelo, iot_identificador, setor_id } => {
                assert_eq!(modelo, "Honda CG 160");
                assert_eq!(iot_identificador, "IOT009");
                assert_eq!(setor_id, 1);
            },
            other => panic!("expected create, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_probe_with_json_logs() {
        let args = Args::try_parse_from(["mototrack", "--json-logs", "probe"]).unwrap();
        assert!(args.json_logs);
        assert!(matches!(args.command, Command::Probe));
    }
}
