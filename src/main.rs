// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::sync::Arc;

use anyhow::{Result, bail};

use moneydash::api::{ApiClient, HttpTransport, Transport};
use moneydash::config::Config;
use moneydash::db::SqliteStore;
use moneydash::routes::{GuardDecision, Route, guard};
use moneydash::session::{HttpAuthenticator, SessionManager, SessionStore, SystemClock};
use moneydash::{cli, commands, services};

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let matches = cli::build_cli().get_matches();
    let Some((name, sub)) = matches.subcommand() else {
        cli::build_cli().print_help()?;
        println!();
        return Ok(());
    };

    let cfg = Config::from_env()?;
    let store: Arc<dyn SessionStore> = Arc::new(SqliteStore::open_or_init()?);
    let transport: Arc<dyn Transport> = Arc::new(HttpTransport::new(&cfg)?);
    let session = Arc::new(SessionManager::new(
        Arc::new(HttpAuthenticator::new(Arc::clone(&transport))),
        store,
        Arc::new(SystemClock),
        cfg.refresh_margin,
    ));
    session.on_redirect(|route| {
        eprintln!(
            "Signed out ({}). Run `moneydash login` to sign in again.",
            route.path()
        );
    });
    let api = ApiClient::new(transport, Arc::clone(&session));

    session.bootstrap();
    let route = Route::for_command(name).unwrap_or(Route::Home);
    match guard(route, session.status()) {
        GuardDecision::Render => {}
        GuardDecision::Loading => bail!("Session is still loading, try again"),
        GuardDecision::Redirect(Route::Login) => {
            bail!("Not signed in. Run `moneydash login --email <EMAIL>` first.")
        }
        GuardDecision::Redirect(_) => {
            let who = session.user().map(|u| u.email).unwrap_or_default();
            println!(
                "Already signed in as {}. Run `moneydash logout` to switch accounts.",
                who
            );
            return Ok(());
        }
    }
    if !route.is_public() {
        services::workspaces::restore(&api)?;
    }

    match name {
        "login" => commands::auth::login(&session, sub)?,
        "register" => commands::auth::register(&session, sub)?,
        "forgot-password" => commands::auth::forgot_password(&session, sub)?,
        "logout" => commands::auth::logout(&session)?,
        "whoami" => commands::auth::whoami(&session)?,
        "session" => commands::session::handle(&session, sub)?,
        "dashboard" => commands::dashboard::handle(&api, sub)?,
        "tx" => commands::transactions::handle(&api, sub)?,
        "budget" => commands::budgets::handle(&api, sub)?,
        "sub" => commands::subscriptions::handle(&api, sub)?,
        "card" => commands::cards::handle(&api, sub)?,
        "notify" => commands::notifications::handle(&api, sub)?,
        "workspace" => commands::workspaces::handle(&api, sub)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
