use env_var::{env, format_env_errors, EnvVarError};
use std::{fmt::Debug, process::ExitCode};
use tracing_subscriber::EnvFilter;

const KINDS: &[&str] = &[
    "int",
    "float",
    "port",
    "bool",
    "string",
    "email",
    "uri",
    "url",
    "uuid",
    "hostname",
    "fqdn",
    "iso-date",
    "date",
    "iso-duration",
    "iso-date-string",
    "ip-address",
    "ip-network",
    "ip-interface",
    "url-parse",
    "int-list",
    "float-list",
    "string-list",
];

fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let mut args = std::env::args().skip(1).peekable();
    if args.peek().map(String::as_str) == Some("--env-file") {
        args.next();
        let Some(path) = args.next() else {
            print_usage();
            return ExitCode::from(2);
        };
        if let Err(e) = dotenvy::from_filename(&path) {
            eprintln!("Failed to load {}: {}", path, e);
            return ExitCode::from(2);
        }
    } else {
        dotenvy::dotenv().ok();
    }

    let checks: Vec<String> = args.collect();
    if checks.is_empty() {
        print_usage();
        return ExitCode::from(2);
    }

    let mut errors = Vec::new();
    for check in &checks {
        let Some((name, kind)) = check.split_once(':') else {
            eprintln!("expected NAME:KIND, got '{}'", check);
            return ExitCode::from(2);
        };
        match resolve(name, kind) {
            Some(Ok(value)) => println!("{}={}", name, value),
            Some(Err(e)) => errors.push(e),
            None => {
                eprintln!("unknown kind '{}'. Available: {}", kind, KINDS.join(", "));
                return ExitCode::from(2);
            }
        }
    }

    if errors.is_empty() {
        ExitCode::SUCCESS
    } else {
        eprintln!("{}", format_env_errors(&errors));
        ExitCode::FAILURE
    }
}

fn print_usage() {
    println!("Usage: env-var-check [--env-file PATH] NAME:KIND [NAME:KIND ...]");
    println!("Kinds:");
    for kind in KINDS {
        println!("  {}", kind);
    }
}

fn show<T: Debug>(result: Result<T, EnvVarError>) -> Result<String, EnvVarError> {
    result.map(|value| format!("{:?}", value))
}

/// Resolves `name` with the transformer called `kind`, `None` for unknown kinds
fn resolve(name: &str, kind: &str) -> Option<Result<String, EnvVarError>> {
    let var = env(name);
    let result = match kind {
        "int" => show(var.as_int().required()),
        "float" => show(var.as_float().required()),
        "port" => show(var.as_port_number().required()),
        "bool" => show(var.as_bool().required()),
        "string" => show(var.as_string().required()),
        "email" => show(var.as_email().required()),
        "uri" => show(var.as_uri().required()),
        "url" => show(var.as_url().required()),
        "uuid" => show(var.as_uuid().required()),
        "hostname" => show(var.as_hostname().required()),
        "fqdn" => var.as_fqdn().required().map(|v| v.to_string()),
        "iso-date" => var.as_iso_date().required().map(|v| v.to_rfc3339()),
        "date" => var.as_date().required().map(|v| v.to_rfc3339()),
        "iso-duration" => var.as_iso_duration().required().map(|v| v.to_string()),
        "iso-date-string" => show(var.as_iso_date_string().required()),
        "ip-address" => var.as_ip_address().required().map(|v| v.to_string()),
        "ip-network" => var.as_ip_network().required().map(|v| v.to_string()),
        "ip-interface" => var.as_ip_interface().required().map(|v| v.to_string()),
        "url-parse" => var.as_url_parse().required().map(|v| v.to_string()),
        "int-list" => show(var.as_int_list().required()),
        "float-list" => show(var.as_float_list().required()),
        "string-list" => show(var.as_string_list().required()),
        _ => return None,
    };
    Some(result)
}
