// ABOUTME: Admin CLI - drives the datatable and forms engines against a live REST backend
// ABOUTME: Lists, renders forms for, creates, updates, and deletes users, orders, and promoters
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Admin Panel Contributors
//!
//! Usage:
//! ```bash
//! # Second page of paid orders, newest first
//! admin-cli list orders --page 2 --filter status=paid --sort createdAt --desc
//!
//! # Search users
//! admin-cli list users --search ada
//!
//! # Show the promoter form's program tab
//! admin-cli form promoters --tab program
//!
//! # Create an order from the details tab
//! admin-cli create orders --field customerId=7 --field total=19.99 --field status=pending
//!
//! # Update a user
//! admin-cli update users 5 --field name="Ada Lovelace" --field email=ada@example.com
//!
//! # Delete without the confirmation prompt
//! admin-cli delete promoters 12 --yes
//! ```

mod commands;
mod helpers;

use admin_panel::client::HttpTransport;
use admin_panel::config::PanelConfig;
use admin_panel::entities::EntityKind;
use admin_panel::logging::LoggingConfig;
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::sync::Arc;
use tracing::debug;
use url::Url;

#[derive(Parser)]
#[command(
    name = "admin-cli",
    about = "Admin panel command-line client",
    long_about = "Configuration-driven CRUD client for the admin REST backend. Settings come from ADMIN_* environment variables; flags override them."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Backend base URL override
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Tenant id override
    #[arg(long, global = true)]
    tenant: Option<String>,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[non_exhaustive]
#[derive(Subcommand)]
enum Command {
    /// Show one page of an entity's table
    List {
        /// users, orders, or promoters
        entity: EntityKind,

        /// Page number, starting at 1
        #[arg(long, default_value = "1")]
        page: u32,

        /// Free-text search
        #[arg(long)]
        search: Option<String>,

        /// Filter as key=value (repeatable)
        #[arg(long = "filter", value_name = "KEY=VALUE")]
        filters: Vec<String>,

        /// Column to sort by
        #[arg(long)]
        sort: Option<String>,

        /// Sort descending
        #[arg(long, requires = "sort")]
        desc: bool,

        /// Rows per page
        #[arg(long)]
        limit: Option<u32>,

        /// Print the visible rows as JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Render an entity's form
    Form {
        /// users, orders, or promoters
        entity: EntityKind,

        /// Tab to show (defaults to the first)
        #[arg(long)]
        tab: Option<String>,

        /// Prefill row as JSON; implies edit mode
        #[arg(long)]
        data: Option<String>,
    },

    /// Create a row through the entity's form
    Create {
        /// users, orders, or promoters
        entity: EntityKind,

        /// Field value as id=value (repeatable)
        #[arg(long = "field", value_name = "ID=VALUE")]
        fields: Vec<String>,

        /// Tab whose fields are validated and submitted
        #[arg(long)]
        tab: Option<String>,
    },

    /// Update a row through the entity's form
    Update {
        /// users, orders, or promoters
        entity: EntityKind,

        /// Row id
        id: i64,

        /// Field value as id=value (repeatable)
        #[arg(long = "field", value_name = "ID=VALUE")]
        fields: Vec<String>,

        /// Tab whose fields are validated and submitted
        #[arg(long)]
        tab: Option<String>,
    },

    /// Delete a row after confirmation
    Delete {
        /// users, orders, or promoters
        entity: EntityKind,

        /// Row id
        id: i64,

        /// Skip the confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,
    },
}

fn load_config(cli: &Cli) -> Result<PanelConfig> {
    let mut config = PanelConfig::from_env().context("Failed to load ADMIN_* configuration")?;
    if let Some(base_url) = &cli.base_url {
        config.api_base_url =
            Url::parse(base_url).with_context(|| format!("Invalid --base-url {base_url}"))?;
    }
    if let Some(tenant) = &cli.tenant {
        config.tenant_id = Some(tenant.clone());
    }
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut logging = LoggingConfig::from_env();
    if cli.verbose {
        logging = logging.with_level("debug");
    }
    logging.init()?;

    let config = load_config(&cli)?;
    let transport = Arc::new(
        HttpTransport::new((&config).into()).context("Failed to build HTTP client")?,
    );
    debug!(base_url = %config.api_base_url, "Admin CLI ready");

    match cli.command {
        Command::List {
            entity,
            page,
            search,
            filters,
            sort,
            desc,
            limit,
            json,
        } => {
            let options = commands::records::ListOptions {
                page,
                search,
                filters: helpers::parse::pairs(&filters)?,
                sort,
                desc,
                limit,
                json,
            };
            commands::records::list(transport, &config, entity, options).await?;
        }
        Command::Form { entity, tab, data } => {
            commands::records::form(transport, entity, tab.as_deref(), data.as_deref())?;
        }
        Command::Create {
            entity,
            fields,
            tab,
        } => {
            let fields = helpers::parse::pairs(&fields)?;
            commands::mutate::create(transport, entity, &fields, tab.as_deref()).await?;
        }
        Command::Update {
            entity,
            id,
            fields,
            tab,
        } => {
            let fields = helpers::parse::pairs(&fields)?;
            commands::mutate::update(transport, entity, id, &fields, tab.as_deref()).await?;
        }
        Command::Delete { entity, id, yes } => {
            commands::mutate::delete(transport, entity, id, yes).await?;
        }
    }

    Ok(())
}
