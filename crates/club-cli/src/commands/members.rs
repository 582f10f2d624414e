use anyhow::{anyhow, Result};
use clap::{Args, Subcommand};
use inquire::Confirm;

use club_data::{
    Delete, Insert, Query, Retrieve, Update, User, UserFilter, UserRole, UserStatus,
};
use club_store::{Store, DEFAULT_PASSWORD};

use crate::formatting::PrintFormatted;

pub(crate) fn parse_role(value: &str) -> Result<UserRole> {
    match value {
        "admin" => Ok(UserRole::Admin),
        "member" => Ok(UserRole::Member),
        _ => Err(anyhow!("unknown role: {}", value)),
    }
}

pub(crate) fn parse_status(value: &str) -> Result<UserStatus> {
    match value {
        "active" => Ok(UserStatus::Active),
        "inactive" => Ok(UserStatus::Inactive),
        _ => Err(anyhow!("unknown status: {}", value)),
    }
}

#[derive(Subcommand, Debug)]
pub enum Members {
    /// Show a member
    #[clap(name = "show")]
    Show(ShowMember),
    /// List members
    #[clap(name = "list")]
    List(ListMembers),
    /// Add a member
    #[clap(name = "add")]
    Add(AddMember),
    /// Update a member
    #[clap(name = "set")]
    Update(UpdateMember),
    /// Delete a member
    #[clap(name = "delete")]
    Delete(DeleteMember),
}

impl Members {
    pub async fn run(self, db: &Store) -> Result<()> {
        match self {
            Members::Show(cmd) => cmd.run(db).await,
            Members::List(cmd) => cmd.run(db).await,
            Members::Add(cmd) => cmd.run(db).await,
            Members::Update(cmd) => cmd.run(db).await,
            Members::Delete(cmd) => cmd.run(db).await,
        }
    }
}

#[derive(Args, Debug)]
pub struct ShowMember {
    #[clap(short, long)]
    pub id: String,
}

impl ShowMember {
    /// Run the command and show a member with their payments
    pub async fn run(self, db: &Store) -> Result<()> {
        let member: User = db.retrieve(self.id).await?;
        println!();
        member.print_formatted();
        println!();
        let payments = member.get_payments(db).await?;
        if !payments.is_empty() {
            payments.print_formatted();
            println!();
        }
        Ok(())
    }
}

#[derive(Args, Debug)]
pub struct ListMembers {
    #[clap(short, long)]
    pub id: Option<String>,
    #[clap(short, long)]
    pub name: Option<String>,
    #[clap(short, long)]
    pub email: Option<String>,
    #[clap(short, long)]
    pub role: Option<String>,
    #[clap(short, long)]
    pub status: Option<String>,
}

impl ListMembers {
    /// Run the command and list members
    pub async fn run(self, db: &Store) -> Result<()> {
        let filter = UserFilter {
            id: self.id,
            name: self.name,
            email: self.email,
            role: self.role.as_deref().map(parse_role).transpose()?,
            status: self.status.as_deref().map(parse_status).transpose()?,
        };

        let members: Vec<User> = db.query(&filter).await?;
        println!("{} members.", members.len());
        members.print_formatted();

        Ok(())
    }
}

#[derive(Args, Debug)]
pub struct AddMember {
    #[clap(short, long)]
    pub name: String,
    #[clap(short, long)]
    pub email: String,
    #[clap(short, long, default_value = "")]
    pub phone: String,
    #[clap(short, long, default_value = "member")]
    pub role: String,
}

impl AddMember {
    /// Run the command and add a member to the roster
    pub async fn run(self, db: &Store) -> Result<()> {
        // Check if a member with this email already exists
        let members: Vec<User> = db
            .query(&UserFilter {
                email: Some(self.email.clone()),
                ..Default::default()
            })
            .await?;
        if !members.is_empty() {
            return Err(anyhow!("Member with email {} already exists.", self.email));
        }

        let member = User {
            name: self.name,
            email: self.email,
            phone: self.phone,
            role: parse_role(&self.role)?,
            ..Default::default()
        };

        println!();
        member.print_formatted();
        println!();

        let confirm = Confirm::new("Add member?").with_default(true);
        if !confirm.prompt()? {
            return Ok(());
        }

        let member = db.insert(member).await?;
        println!("Member added with id {}.", member.id);
        println!("Initial password is \"{}\".", DEFAULT_PASSWORD);

        Ok(())
    }
}

#[derive(Args, Debug)]
pub struct UpdateMember {
    #[clap(short, long)]
    pub id: String,
    #[clap(short, long)]
    pub name: Option<String>,
    #[clap(short, long)]
    pub email: Option<String>,
    #[clap(short, long)]
    pub phone: Option<String>,
    #[clap(short, long)]
    pub avatar: Option<String>,
    #[clap(short, long)]
    pub role: Option<String>,
    #[clap(short, long)]
    pub status: Option<String>,
}

impl UpdateMember {
    /// Run command and update a member
    pub async fn run(self, db: &Store) -> Result<()> {
        let member: User = db.retrieve(self.id).await?;
        let mut update = member.clone();

        if let Some(name) = self.name {
            update.name = name;
        }
        if let Some(email) = self.email {
            update.email = email;
        }
        if let Some(phone) = self.phone {
            update.phone = phone;
        }
        if let Some(avatar) = self.avatar {
            update.avatar = avatar;
        }
        if let Some(role) = self.role {
            update.role = parse_role(&role)?;
        }
        if let Some(status) = self.status {
            update.status = parse_status(&status)?;
        }

        println!();
        (member.clone(), update.clone()).print_formatted();
        println!();
        let confirm = Confirm::new("Update member?").with_default(true);
        if !confirm.prompt()? {
            return Ok(());
        }

        if update.email != member.email {
            let members: Vec<User> = db
                .query(&UserFilter {
                    email: Some(update.email.clone()),
                    ..Default::default()
                })
                .await?;
            if !members.is_empty() {
                return Err(anyhow!(
                    "Member with email {} already exists.",
                    update.email
                ));
            }
        }

        db.update(update).await?;
        Ok(())
    }
}

#[derive(Args, Debug)]
pub struct DeleteMember {
    #[clap(short, long)]
    pub id: String,
}

impl DeleteMember {
    pub async fn run(&self, db: &Store) -> Result<()> {
        let member: User = db.retrieve(self.id.clone()).await?;
        println!();
        member.print_formatted();
        println!();
        let confirm =
            Confirm::new("Delete member, their payments and credentials?").with_default(true);
        if !confirm.prompt()? {
            return Ok(());
        }
        db.delete(member).await?;
        Ok(())
    }
}
