//! Command-line shell over the school health backend.
//!
//! Each subcommand runs one page service and prints its data as JSON.

use std::env;
use std::path::PathBuf;
use std::process::ExitCode;

use chrono::Local;
use clap::{Parser, Subcommand};
use dotenvy::dotenv;
use serde::Serialize;

use school_health::api::ApiClient;
use school_health::api::errors::ApiError;
use school_health::dto::medical_order::OrdersPageQuery;
use school_health::dto::vaccination_campaign::CampaignsPageQuery;
use school_health::models::config::ClientConfig;
use school_health::services::{
    ServiceError, ServiceResult, child, dashboard, health_profile, medical_order,
    vaccination_campaign,
};

#[derive(Parser, Debug)]
#[command(name = "school-health", about = "School health portal client")]
struct Cli {
    /// Directory holding `default.yaml` and the per-environment profiles.
    #[arg(long = "config-dir", global = true, default_value = "config")]
    config_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Parent dashboard: children, latest orders and their status counts.
    Dashboard,

    /// List the children of the signed-in parent.
    Children {
        #[arg(long)]
        search: Option<String>,
        #[arg(long)]
        page: Option<u64>,
    },

    /// Child detail page with its health profile.
    Child { id: String },

    /// Medical orders, optionally filtered.
    Orders {
        #[arg(long)]
        status: Option<String>,
        /// Only orders of this child.
        #[arg(long = "child")]
        child_id: Option<String>,
        #[arg(long)]
        page: Option<u64>,
        /// Only the orders submitted by the signed-in parent.
        #[arg(long)]
        mine: bool,
    },

    /// Show one medical order.
    Order { id: String },

    /// Cancel a pending medical order.
    CancelOrder { id: String },

    /// Vaccination campaigns of the admin console.
    Campaigns {
        #[arg(long)]
        search: Option<String>,
        #[arg(long)]
        status: Option<String>,
        #[arg(long)]
        page: Option<u64>,
    },

    /// Health profile of a child.
    Profile { child_id: String },
}

fn print_json<T: Serialize>(value: &T) -> ServiceResult<()> {
    let rendered =
        serde_json::to_string_pretty(value).map_err(|err| ServiceError::from(ApiError::from(err)))?;
    println!("{rendered}");
    Ok(())
}

fn run(api: &ApiClient, command: Commands) -> ServiceResult<()> {
    let today = Local::now().date_naive();

    match command {
        Commands::Dashboard => print_json(&dashboard::load_parent_dashboard(api, today)?),
        Commands::Children { search, page } => {
            print_json(&child::list_children(api, search, page)?)
        }
        Commands::Child { id } => match child::load_child_page(api, &id, today)? {
            Some(page) => print_json(&page),
            None => Err(ServiceError::NotFound),
        },
        Commands::Orders {
            status,
            child_id,
            page,
            mine,
        } => print_json(&medical_order::load_orders_page(
            api,
            OrdersPageQuery {
                page,
                status,
                child_id,
                mine,
            },
        )?),
        Commands::Order { id } => match medical_order::load_order_detail(api, &id)? {
            Some(order) => print_json(&order),
            None => Err(ServiceError::NotFound),
        },
        Commands::CancelOrder { id } => print_json(&medical_order::cancel_order(api, &id)?),
        Commands::Campaigns {
            search,
            status,
            page,
        } => print_json(&vaccination_campaign::load_campaigns_page(
            api,
            CampaignsPageQuery {
                search,
                status,
                page,
            },
        )?),
        Commands::Profile { child_id } => {
            match health_profile::load_health_profile(api, &child_id)? {
                Some(profile) => print_json(&profile),
                None => Err(ServiceError::NotFound),
            }
        }
    }
}

fn main() -> ExitCode {
    dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let cli = Cli::parse();

    // Select config profile (defaults to `local`).
    let app_env = env::var("APP_ENV").unwrap_or_else(|_| "local".into());

    let client_config = match ClientConfig::load(&cli.config_dir, &app_env) {
        Ok(client_config) => client_config,
        Err(err) => {
            log::error!("Error loading client config: {err}");
            return ExitCode::FAILURE;
        }
    };

    let api = match school_health::connect(&client_config) {
        Ok(api) => api,
        Err(err) => {
            log::error!("Error creating API client: {err}");
            return ExitCode::FAILURE;
        }
    };

    match run(&api, cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err}");
            eprintln!("{}", err.user_message());
            ExitCode::FAILURE
        }
    }
}
