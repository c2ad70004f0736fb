use crate::error::Result as CliResult;

use std::sync::Arc;

use log::info;
use till_cache::CacheStore;
use till_config::Config;
use till_core::Role;
use till_platform::{AuthClient, EdgeCaller, EmployeeUpdate, NewEmployee, RestClient, StorageClient};
use till_session::SessionEngine;
use uuid::Uuid;

/// Wired-up clients and the hydration engine, shared by every command.
pub struct App {
    engine: Arc<SessionEngine>,
    edge: EdgeCaller,
}

impl App {
    pub fn new(config: &Config) -> CliResult<Self> {
        let auth = Arc::new(AuthClient::new(&config.platform));
        let rest = Arc::new(RestClient::new(&config.platform, &config.timeouts));
        let storage = Arc::new(StorageClient::new(&config.platform, &config.timeouts));
        let cache = Arc::new(CacheStore::new(config.cache_dir()?));

        let engine = Arc::new(SessionEngine::new(
            config,
            Arc::clone(&auth),
            rest,
            storage,
            cache,
        ));
        let edge = EdgeCaller::new(&config.platform, auth);

        Ok(Self { engine, edge })
    }

    /// Sign in and run a full hydration pass.
    async fn hydrate(&self, email: &str, password: &str) -> CliResult<()> {
        self.engine.sign_in(email, password).await?;
        self.engine.hydrate_current().await?;
        Ok(())
    }

    pub async fn login(&self, email: &str, password: &str) -> CliResult<()> {
        self.hydrate(email, password).await?;

        let snapshot = self.engine.snapshot().await;
        match &snapshot.profile {
            Some(profile) => {
                let name = profile.display_name.as_deref().unwrap_or("(unnamed)");
                let role = profile
                    .role
                    .map(|r| r.as_str())
                    .unwrap_or("none");
                println!("Signed in as {name} (role: {role})");
            }
            None => println!("Signed in"),
        }
        if let Some(company) = &snapshot.company {
            println!("Company: {}", company.name);
        }
        if snapshot.needs_company_setup {
            println!("No company linked yet; company setup is still pending.");
        }
        Ok(())
    }

    pub async fn signup(&self, email: &str, password: &str, name: &str) -> CliResult<()> {
        match self.engine.sign_up(email, password, name).await? {
            Some(session) => {
                println!("Account created; signed in as {}", session.user.id);
            }
            None => {
                println!("Account created; confirm the address sent to {email} to sign in.");
            }
        }
        Ok(())
    }

    pub async fn logout(&self) -> CliResult<()> {
        self.engine.sign_out().await?;
        println!("Signed out; local state purged.");
        Ok(())
    }

    pub async fn status(&self, email: &str, password: &str, pretty: bool) -> CliResult<()> {
        self.hydrate(email, password).await?;

        let snapshot = self.engine.snapshot().await;
        let rendered = if pretty {
            serde_json::to_string_pretty(&snapshot)?
        } else {
            serde_json::to_string(&snapshot)?
        };
        println!("{rendered}");
        Ok(())
    }

    pub async fn select_branch(
        &self,
        email: &str,
        password: &str,
        branch_id: Uuid,
    ) -> CliResult<()> {
        self.hydrate(email, password).await?;
        self.engine.select_branch(branch_id).await?;

        let snapshot = self.engine.snapshot().await;
        match snapshot.active_branch_name {
            Some(name) => println!("Active branch: {name}"),
            None => println!("Active branch: {branch_id}"),
        }
        Ok(())
    }

    pub async fn clear_branch(&self, email: &str, password: &str) -> CliResult<()> {
        self.hydrate(email, password).await?;
        self.engine.clear_branch().await?;
        println!("Branch selection cleared.");
        Ok(())
    }

    pub async fn create_employee(
        &self,
        email: &str,
        password: &str,
        employee: NewEmployee,
    ) -> CliResult<()> {
        self.engine.sign_in(email, password).await?;
        let result = self.edge.create_employee(&employee).await?;
        info!("Employee created: {result}");
        match result.get("user_id") {
            Some(user_id) => println!("Employee created: {user_id}"),
            None => println!("Employee created."),
        }
        Ok(())
    }

    pub async fn update_employee(
        &self,
        email: &str,
        password: &str,
        user_id: Uuid,
        name: Option<String>,
        role: Option<Role>,
        branch: Option<Uuid>,
    ) -> CliResult<()> {
        self.engine.sign_in(email, password).await?;
        let update = EmployeeUpdate {
            display_name: name,
            role,
            branch_id: branch,
        };
        self.edge.update_employee(user_id, &update).await?;
        println!("Employee {user_id} updated.");
        Ok(())
    }

    pub async fn delete_employee(
        &self,
        email: &str,
        password: &str,
        user_id: Uuid,
        reason: Option<String>,
        hard: bool,
    ) -> CliResult<()> {
        self.engine.sign_in(email, password).await?;
        self.edge
            .delete_employee(user_id, reason.as_deref(), hard)
            .await?;
        if hard {
            println!("Employee {user_id} permanently deleted.");
        } else {
            println!("Employee {user_id} deactivated.");
        }
        Ok(())
    }

    pub async fn repair_company(&self, email: &str, password: &str) -> CliResult<()> {
        self.engine.sign_in(email, password).await?;
        let result = self.edge.repair_missing_company_id().await?;
        info!("Repair result: {result}");
        println!("Company linkage repair requested.");
        Ok(())
    }
}
