// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::forms::{forgot_password_form, login_form, register_form};
use crate::session::SessionManager;
use anyhow::Result;

pub fn login(session: &SessionManager, sub: &clap::ArgMatches) -> Result<()> {
    let creds = login_form(
        sub.get_one::<String>("email").unwrap(),
        sub.get_one::<String>("password").unwrap(),
    )?;
    let user = session.login(&creds)?;
    println!("Signed in as {} <{}>", user.name, user.email);
    Ok(())
}

pub fn register(session: &SessionManager, sub: &clap::ArgMatches) -> Result<()> {
    let registration = register_form(
        sub.get_one::<String>("name").unwrap(),
        sub.get_one::<String>("email").unwrap(),
        sub.get_one::<String>("password").unwrap(),
    )?;
    let user = session.register(&registration)?;
    println!("Welcome, {}! You are signed in as {}", user.name, user.email);
    Ok(())
}

pub fn forgot_password(session: &SessionManager, sub: &clap::ArgMatches) -> Result<()> {
    let email = forgot_password_form(sub.get_one::<String>("email").unwrap())?;
    session.forgot_password(&email)?;
    println!("If {} has an account, a reset link is on its way", email);
    Ok(())
}

pub fn logout(session: &SessionManager) -> Result<()> {
    session.logout();
    Ok(())
}

pub fn whoami(session: &SessionManager) -> Result<()> {
    match session.user() {
        Some(u) => println!("{} <{}> (id {})", u.name, u.email, u.id),
        None => println!("Not signed in"),
    }
    Ok(())
}
