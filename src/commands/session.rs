// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::sync::Arc;
use std::time::Duration;

use crate::session::{RefreshTimer, SessionManager};
use crate::utils::pretty_table;
use anyhow::Result;
use chrono::{DateTime, Local, Utc};

pub fn handle(session: &Arc<SessionManager>, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("status", _)) => status(session),
        Some(("keepalive", sub)) => {
            let minutes = *sub.get_one::<u64>("minutes").unwrap_or(&60);
            let secs = minutes
                .checked_mul(60)
                .ok_or_else(|| anyhow::anyhow!("--minutes {} is too large", minutes))?;
            keepalive(session, Duration::from_secs(secs))
        }
        _ => Ok(()),
    }
}

fn local_time(epoch: i64) -> String {
    DateTime::<Utc>::from_timestamp(epoch, 0)
        .map(|dt| dt.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| epoch.to_string())
}

fn status(session: &SessionManager) -> Result<()> {
    let Some(s) = session.session() else {
        println!("Not signed in");
        return Ok(());
    };
    let now = session.now();
    let mut rows = vec![
        vec!["User".to_string(), format!("{} <{}>", s.user.name, s.user.email)],
        vec!["Token expires".to_string(), local_time(s.expires_at)],
        vec!["Expires in".to_string(), format!("{}s", s.expires_at - now)],
    ];
    if let Some(at) = session.next_refresh_at() {
        rows.push(vec!["Next refresh".to_string(), local_time(at)]);
    }
    println!("{}", pretty_table(&["Session", ""], rows));
    Ok(())
}

fn keepalive(session: &Arc<SessionManager>, duration: Duration) -> Result<()> {
    let timer = RefreshTimer::spawn(Arc::clone(session))?;
    println!(
        "Keeping the session alive for {} minutes (Ctrl-C to stop)",
        duration.as_secs() / 60
    );
    let step = Duration::from_secs(1);
    let mut waited = Duration::ZERO;
    while waited < duration && session.is_authenticated() {
        std::thread::sleep(step);
        waited += step;
    }
    timer.stop();
    if !session.is_authenticated() {
        anyhow::bail!("Session ended while keeping it alive");
    }
    Ok(())
}
