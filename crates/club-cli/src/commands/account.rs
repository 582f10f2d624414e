use anyhow::{anyhow, Result};
use clap::{Args, Subcommand};
use inquire::Password;

use club_data::{Authenticate, Retrieve, Update, User};
use club_session::SessionStore;
use club_store::{NewAccount, Store};

use crate::formatting::PrintFormatted;

#[derive(Subcommand, Debug)]
pub enum Account {
    /// Log in and cache the session
    #[clap(name = "login")]
    Login(Login),
    /// Log out
    #[clap(name = "logout")]
    Logout(Logout),
    /// Create your own member account
    #[clap(name = "register")]
    Register(Register),
    /// Show the logged-in user
    #[clap(name = "whoami")]
    Whoami(Whoami),
    /// Request a password reset token
    #[clap(name = "request-reset")]
    RequestReset(RequestReset),
    /// Redeem a reset token for a new password
    #[clap(name = "reset")]
    Reset(Reset),
    /// Change the password of the logged-in user
    #[clap(name = "change-password")]
    ChangePassword(ChangePassword),
    /// Update the profile of the logged-in user
    #[clap(name = "update-profile")]
    UpdateProfile(UpdateProfile),
}

impl Account {
    pub async fn run(self, db: &Store, sessions: &SessionStore) -> Result<()> {
        match self {
            Account::Login(cmd) => cmd.run(db, sessions).await,
            Account::Logout(cmd) => cmd.run(sessions).await,
            Account::Register(cmd) => cmd.run(db).await,
            Account::Whoami(cmd) => cmd.run(sessions).await,
            Account::RequestReset(cmd) => cmd.run(db).await,
            Account::Reset(cmd) => cmd.run(db).await,
            Account::ChangePassword(cmd) => cmd.run(db, sessions).await,
            Account::UpdateProfile(cmd) => cmd.run(db, sessions).await,
        }
    }
}

#[derive(Args, Debug)]
pub struct Login {
    #[clap(short, long)]
    pub email: String,
    /// Keep the login across sessions
    #[clap(short, long)]
    pub remember: bool,
}

impl Login {
    pub async fn run(self, db: &Store, sessions: &SessionStore) -> Result<()> {
        let password = Password::new("Password:")
            .without_confirmation()
            .prompt()?;
        let user = sessions
            .login(db, &self.email, &password, self.remember)
            .await?;
        println!("Logged in as {} ({}).", user.name, user.role);
        Ok(())
    }
}

#[derive(Args, Debug)]
pub struct Logout {}

impl Logout {
    pub async fn run(self, sessions: &SessionStore) -> Result<()> {
        sessions.clear()?;
        println!("Logged out.");
        Ok(())
    }
}

#[derive(Args, Debug)]
pub struct Register {
    #[clap(short, long)]
    pub name: String,
    #[clap(short, long)]
    pub email: String,
    #[clap(short, long, default_value = "")]
    pub phone: String,
}

impl Register {
    /// Run the command and create a member account
    pub async fn run(self, db: &Store) -> Result<()> {
        let password = Password::new("Choose a password:").prompt()?;
        let user = db
            .register(NewAccount {
                name: self.name,
                email: self.email,
                phone: self.phone,
                password,
            })
            .await?;
        println!("Account created with id {}.", user.id);
        Ok(())
    }
}

#[derive(Args, Debug)]
pub struct Whoami {}

impl Whoami {
    pub async fn run(self, sessions: &SessionStore) -> Result<()> {
        match sessions.current() {
            Some(user) => {
                println!();
                user.print_formatted();
                println!();
            }
            None => println!("Not logged in."),
        }
        Ok(())
    }
}

#[derive(Args, Debug)]
pub struct RequestReset {
    #[clap(short, long)]
    pub email: String,
}

impl RequestReset {
    /// Run the command and print the reset token when one was issued
    pub async fn run(self, db: &Store) -> Result<()> {
        match db.request_password_reset(&self.email).await? {
            Some(token) => println!("Reset token: {}", token),
            None => println!("If that account exists, a reset token was issued."),
        }
        Ok(())
    }
}

#[derive(Args, Debug)]
pub struct Reset {
    #[clap(short, long)]
    pub token: String,
}

impl Reset {
    pub async fn run(self, db: &Store) -> Result<()> {
        let password = Password::new("New password:").prompt()?;
        db.reset_password(&self.token, &password).await?;
        println!("Password updated.");
        Ok(())
    }
}

#[derive(Args, Debug)]
pub struct ChangePassword {}

impl ChangePassword {
    pub async fn run(self, db: &Store, sessions: &SessionStore) -> Result<()> {
        let user = sessions
            .current()
            .ok_or_else(|| anyhow!("Not logged in. Run \"club account login\" first."))?;

        let current = Password::new("Current password:")
            .without_confirmation()
            .prompt()?;
        // Re-check against the store, the cached session is not proof
        db.login(&user.email, &current).await?;

        let password = Password::new("New password:").prompt()?;
        db.set_password(&user.id, &password).await?;
        println!("Password updated.");
        Ok(())
    }
}

#[derive(Args, Debug)]
pub struct UpdateProfile {
    #[clap(short, long)]
    pub name: Option<String>,
    #[clap(short, long)]
    pub phone: Option<String>,
    #[clap(short, long)]
    pub avatar: Option<String>,
}

impl UpdateProfile {
    /// Run the command and update the logged-in user's profile
    pub async fn run(self, db: &Store, sessions: &SessionStore) -> Result<()> {
        let user = sessions
            .current()
            .ok_or_else(|| anyhow!("Not logged in. Run \"club account login\" first."))?;
        let user: User = db.retrieve(user.id).await?;
        let mut update = user.clone();

        if let Some(name) = self.name {
            update.name = name;
        }
        if let Some(phone) = self.phone {
            update.phone = phone;
        }
        if let Some(avatar) = self.avatar {
            update.avatar = avatar;
        }

        println!();
        (user, update.clone()).print_formatted();
        println!();

        let updated = db.update(update).await?;
        sessions.profile_updated(&updated)?;
        Ok(())
    }
}
