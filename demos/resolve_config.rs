use std::process;

use clap::{Arg, ArgAction, Command};
use log::{error, info};
use serde_json::Value;

use healer_config::{ClientConfig, Role, UnknownKeyPolicy};

use crate::example_utils::setup_logger;

mod example_utils;

/// Parses `key=value`, reading the value as JSON when possible and as a plain
/// string otherwise.
fn parse_override(raw: &str) -> Option<(&str, Value)> {
    let (key, value) = raw.split_once('=')?;
    let value = serde_json::from_str(value).unwrap_or_else(|_| Value::String(value.to_owned()));
    Some((key, value))
}

fn main() {
    let matches = Command::new("config resolution example")
        .version(option_env!("CARGO_PKG_VERSION").unwrap_or(""))
        .about("Resolves and validates a client configuration, then prints it")
        .arg(
            Arg::new("role")
                .long("role")
                .help("Client role: producer, consumer or broker")
                .num_args(1)
                .default_value("consumer"),
        )
        .arg(
            Arg::new("brokers")
                .short('b')
                .long("brokers")
                .help("Broker list in kafka format")
                .num_args(1)
                .default_value("127.0.0.1:9092"),
        )
        .arg(
            Arg::new("client-id")
                .long("client-id")
                .help("The ID of this client")
                .num_args(1)
                .default_value("healer"),
        )
        .arg(
            Arg::new("group-id")
                .short('g')
                .long("group-id")
                .help("Consumer group id, ignored for other roles")
                .num_args(1),
        )
        .arg(
            Arg::new("set")
                .long("set")
                .help("Extra setting as key=value, may be repeated")
                .num_args(1)
                .action(ArgAction::Append),
        )
        .arg(
            Arg::new("strict")
                .long("strict")
                .help("Reject keys that match no setting of the role")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("log-conf")
                .long("log-conf")
                .help("Configure the logging format (example: 'healer_config=trace')")
                .num_args(1),
        )
        .get_matches();

    setup_logger(true, matches.get_one::<String>("log-conf"));

    let role = match matches.get_one::<String>("role").unwrap().parse::<Role>() {
        Ok(role) => role,
        Err(e) => {
            error!("{}", e);
            process::exit(2);
        }
    };

    let mut config = ClientConfig::new();
    if role != Role::Broker {
        config
            .set("bootstrap.servers", matches.get_one::<String>("brokers").unwrap().as_str())
            .set("client.id", matches.get_one::<String>("client-id").unwrap().as_str());
    }
    if role == Role::Consumer {
        if let Some(group_id) = matches.get_one::<String>("group-id") {
            config.set("group.id", group_id.as_str());
        }
    }
    for raw in matches.get_many::<String>("set").into_iter().flatten() {
        match parse_override(raw) {
            Some((key, value)) => {
                config.set(key, value);
            }
            None => {
                error!("Expected key=value, got {:?}", raw);
                process::exit(2);
            }
        }
    }
    if matches.get_flag("strict") {
        config.set_unknown_key_policy(UnknownKeyPolicy::Strict);
    }

    match config.create_for(role) {
        Ok(resolved) => {
            info!("Resolved {} configuration", role);
            match serde_json::to_string_pretty(&resolved) {
                Ok(json) => println!("{}", json),
                Err(e) => {
                    error!("Could not print configuration: {}", e);
                    process::exit(1);
                }
            }
        }
        Err(e) => {
            error!("Invalid {} configuration: {}", role, e);
            process::exit(1);
        }
    }
}
