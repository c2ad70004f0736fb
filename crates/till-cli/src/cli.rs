use crate::error::{CliError, Result as CliResult};

use clap::{Parser, Subcommand};
use till_core::Role;
use uuid::Uuid;

#[derive(Debug, Parser)]
#[command(name = "till", version, about = "Point-of-sale session and identity tool")]
pub struct Cli {
    /// Account email; falls back to the TILL_EMAIL environment variable
    #[arg(long, global = true)]
    pub email: Option<String>,

    /// Account password; falls back to the TILL_PASSWORD environment variable
    #[arg(long, global = true)]
    pub password: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Verify credentials and hydrate the session
    Login,
    /// Register a new account
    Signup {
        /// Display name recorded on the new account
        #[arg(long)]
        name: String,
    },
    /// Revoke the session upstream and purge all local state
    Logout,
    /// Print the hydrated session snapshot as JSON
    Status {
        #[arg(long)]
        pretty: bool,
    },
    /// Active-branch selection (admin only)
    #[command(subcommand)]
    Branch(BranchCommand),
    /// Employee management through privileged server functions (admin only)
    #[command(subcommand)]
    Employee(EmployeeCommand),
    /// Backfill a missing company linkage for the signed-in company creator
    RepairCompany,
}

#[derive(Debug, Subcommand)]
pub enum BranchCommand {
    /// Make a branch the active one; persists across restarts
    Select { branch_id: Uuid },
    /// Drop the persisted branch selection
    Clear,
}

#[derive(Debug, Subcommand)]
pub enum EmployeeCommand {
    /// Create an employee account in the signed-in admin's company
    Create {
        /// Email for the new account; --email stays the acting admin's
        #[arg(long = "new-email")]
        new_email: String,
        /// Initial password for the new account
        #[arg(long = "new-password")]
        new_password: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        role: Role,
        #[arg(long)]
        branch: Option<Uuid>,
    },
    /// Update an employee's profile fields
    Update {
        user_id: Uuid,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        role: Option<Role>,
        #[arg(long)]
        branch: Option<Uuid>,
    },
    /// Soft-delete an employee (or hard-delete with --hard)
    Delete {
        user_id: Uuid,
        #[arg(long)]
        reason: Option<String>,
        #[arg(long)]
        hard: bool,
    },
}

impl Cli {
    /// Credentials from flags, falling back to the environment.
    pub fn credentials(&self) -> CliResult<(String, String)> {
        let email = self
            .email
            .clone()
            .or_else(|| std::env::var("TILL_EMAIL").ok())
            .ok_or_else(|| CliError::usage("email required (--email or TILL_EMAIL)"))?;
        let password = self
            .password
            .clone()
            .or_else(|| std::env::var("TILL_PASSWORD").ok())
            .ok_or_else(|| CliError::usage("password required (--password or TILL_PASSWORD)"))?;
        Ok((email, password))
    }
}
