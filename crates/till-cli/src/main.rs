mod cli;
mod commands;
mod error;
mod logger;


use crate::cli::{BranchCommand, Cli, Command, EmployeeCommand};
use crate::commands::App;
use crate::error::Result as CliResult;

use clap::Parser;
use log::info;
use till_config::Config;
use till_platform::NewEmployee;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run() -> CliResult<()> {
    let cli = Cli::parse();

    let config = Config::load()?;
    config.validate()?;

    let log_file = match &config.logging.file {
        Some(filename) => {
            let log_dir = Config::config_dir()?.join("logs");
            std::fs::create_dir_all(&log_dir)
                .map_err(|e| error::CliError::logger(e.to_string()))?;
            Some(log_dir.join(filename))
        }
        None => None,
    };
    logger::initialize(config.logging.level, log_file, config.logging.colored)?;

    info!("till v{}", env!("CARGO_PKG_VERSION"));
    config.log_summary();

    let app = App::new(&config)?;

    // Resolved before the match; the arms move fields out of cli.command
    let credentials = cli.credentials();

    match cli.command {
        Command::Login => {
            let (email, password) = credentials?;
            app.login(&email, &password).await
        }
        Command::Signup { name } => {
            let (email, password) = credentials?;
            app.signup(&email, &password, &name).await
        }
        Command::Logout => app.logout().await,
        Command::Status { pretty } => {
            let (email, password) = credentials?;
            app.status(&email, &password, pretty).await
        }
        Command::Branch(BranchCommand::Select { branch_id }) => {
            let (email, password) = credentials?;
            app.select_branch(&email, &password, branch_id).await
        }
        Command::Branch(BranchCommand::Clear) => {
            let (email, password) = credentials?;
            app.clear_branch(&email, &password).await
        }
        Command::Employee(EmployeeCommand::Create {
            new_email,
            new_password,
            name,
            role,
            branch,
        }) => {
            let (email, password) = credentials?;
            let employee = NewEmployee {
                email: new_email,
                password: new_password,
                display_name: name,
                role,
                branch_id: branch,
            };
            app.create_employee(&email, &password, employee).await
        }
        Command::Employee(EmployeeCommand::Update {
            user_id,
            name,
            role,
            branch,
        }) => {
            let (email, password) = credentials?;
            app.update_employee(&email, &password, user_id, name, role, branch)
                .await
        }
        Command::Employee(EmployeeCommand::Delete {
            user_id,
            reason,
            hard,
        }) => {
            let (email, password) = credentials?;
            app.delete_employee(&email, &password, user_id, reason, hard)
                .await
        }
        Command::RepairCompany => {
            let (email, password) = credentials?;
            app.repair_company(&email, &password).await
        }
    }
}
