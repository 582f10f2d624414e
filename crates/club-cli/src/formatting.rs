use club_data::{Event, Expense, Payment, User, UserStatus};
use club_reports::{DashboardStats, EventPaymentStatus, FinancialSummary};

macro_rules! next_attr {
    ($old:ident, $new:ident, $attr:ident) => {
        if $old.$attr != $new.$attr {
            format!(" -> {}", $new.$attr)
        } else {
            "".to_string()
        }
    };
}

pub trait PrintFormatted {
    fn print_formatted(&self);
}

impl PrintFormatted for User {
    fn print_formatted(&self) {
        println!("Id:\t\t{}", self.id);
        println!("Name:\t\t{}", self.name);
        println!("Email:\t\t{}", self.email);
        println!("Phone:\t\t{}", self.phone);
        println!("Role:\t\t{}", self.role);
        println!("Status:\t\t{}", self.status);
        println!("Joined:\t\t{}", self.join_date.format("%Y-%m-%d"));
        println!("Avatar:\t\t{}", self.avatar);
    }
}

impl PrintFormatted for (User, User) {
    fn print_formatted(&self) {
        let (old, new) = self;
        let next_name = next_attr!(old, new, name);
        println!("Name:\t\t{}{}", old.name, next_name);
        let next_email = next_attr!(old, new, email);
        println!("Email:\t\t{}{}", old.email, next_email);
        let next_phone = next_attr!(old, new, phone);
        println!("Phone:\t\t{}{}", old.phone, next_phone);
        let next_role = next_attr!(old, new, role);
        println!("Role:\t\t{}{}", old.role, next_role);
        let next_status = next_attr!(old, new, status);
        println!("Status:\t\t{}{}", old.status, next_status);
        let next_avatar = next_attr!(old, new, avatar);
        println!("Avatar:\t\t{}{}", old.avatar, next_avatar);
    }
}

impl PrintFormatted for Vec<User> {
    fn print_formatted(&self) {
        println!(
            "{:<18}\t{:<24}\t{:<30}\t{:<8}\t{:<12}\t{}",
            "ID", "Name", "Email", "Role", "Joined", "Inactive"
        );
        println!("{:-<110}", "-");
        for user in self {
            let inactive = if user.status == UserStatus::Inactive {
                "*"
            } else {
                ""
            };
            println!(
                "{:<18}\t{:<24}\t{:<30}\t{:<8}\t{:<12}\t{}",
                user.id,
                user.name,
                user.email,
                user.role.to_string(),
                user.join_date.format("%Y-%m-%d"),
                inactive
            );
        }
    }
}

impl PrintFormatted for Payment {
    fn print_formatted(&self) {
        println!("Id:\t\t{}", self.id);
        println!("Member:\t\t{} ({})", self.user_name, self.user_id);
        println!("Type:\t\t{}", self.kind);
        println!("Amount:\t\t{:.2}", self.amount);
        println!("Status:\t\t{}", self.status);
        println!("Date:\t\t{}", self.date.format("%Y-%m-%d"));
        println!("Due:\t\t{}", self.due_date.format("%Y-%m-%d"));
        if !self.payment_method.is_empty() {
            println!("Method:\t\t{}", self.payment_method);
        }
        if let Some(proof) = &self.proof_document {
            println!("Proof:\t\t{}", proof);
        }
        if let Some(notes) = &self.admin_notes {
            println!("Notes:\t\t{}", notes);
        }
        if let Some(verified_by) = &self.verified_by {
            println!("Verified by:\t{}", verified_by);
        }
        if let Some(event_id) = &self.event_id {
            println!("Event:\t\t{}", event_id);
        }
    }
}

impl PrintFormatted for Vec<Payment> {
    fn print_formatted(&self) {
        println!(
            "{:<18}\t{:<24}\t{:<12}\t{:>10}\t{:<10}\t{:<12}\t{:<12}\t{}",
            "ID", "Member", "Type", "Amount", "Status", "Date", "Due", "Proof"
        );
        println!("{:-<130}", "-");
        for payment in self {
            let proof = if payment.proof_document.is_some() {
                "*"
            } else {
                ""
            };
            println!(
                "{:<18}\t{:<24}\t{:<12}\t{:>10.2}\t{:<10}\t{:<12}\t{:<12}\t{}",
                payment.id,
                payment.user_name,
                payment.kind,
                payment.amount,
                payment.status.to_string(),
                payment.date.format("%Y-%m-%d"),
                payment.due_date.format("%Y-%m-%d"),
                proof
            );
        }
    }
}

impl PrintFormatted for Event {
    fn print_formatted(&self) {
        println!("Id:\t\t{}", self.id);
        println!("Title:\t\t{}", self.title);
        println!("Date:\t\t{} {}", self.date, self.time);
        println!("Venue:\t\t{}", self.venue);
        println!("Type:\t\t{}", self.kind);
        println!("Description:\t{}", self.description);
        println!("Attendees:\t{}", self.attendees.len());
    }
}

impl PrintFormatted for Vec<Event> {
    fn print_formatted(&self) {
        println!(
            "{:<18}\t{:<28}\t{:<12}\t{:<8}\t{:<12}\t{}",
            "ID", "Title", "Date", "Time", "Type", "Venue"
        );
        println!("{:-<100}", "-");
        for event in self {
            println!(
                "{:<18}\t{:<28}\t{:<12}\t{:<8}\t{:<12}\t{}",
                event.id,
                event.title,
                event.date.to_string(),
                event.time,
                event.kind.to_string(),
                event.venue
            );
        }
    }
}

impl PrintFormatted for Vec<Expense> {
    fn print_formatted(&self) {
        println!(
            "{:<18}\t{:<36}\t{:>10}\t{:<12}\t{:<12}\t{}",
            "ID", "Description", "Amount", "Category", "Date", "Added by"
        );
        println!("{:-<110}", "-");
        for expense in self {
            println!(
                "{:<18}\t{:<36}\t{:>10.2}\t{:<12}\t{:<12}\t{}",
                expense.id,
                expense.description,
                expense.amount,
                expense.category.to_string(),
                expense.date.to_string(),
                expense.added_by
            );
        }
    }
}

impl PrintFormatted for FinancialSummary {
    fn print_formatted(&self) {
        println!("Total revenue:\t{:.2}", self.total_revenue);
        println!("Total expenses:\t{:.2}", self.total_expenses);
        println!("Net:\t\t{:.2}", self.net);
    }
}

impl PrintFormatted for DashboardStats {
    fn print_formatted(&self) {
        match self {
            DashboardStats::Admin {
                total_members,
                total_revenue,
                pending_verifications,
                upcoming_events,
            } => {
                println!("Members:\t\t{}", total_members);
                println!("Revenue:\t\t{:.2}", total_revenue);
                println!("Pending proofs:\t\t{}", pending_verifications);
                println!("Events:\t\t\t{}", upcoming_events);
            }
            DashboardStats::Member {
                pending_payments,
                total_paid,
                upcoming_events,
            } => {
                println!("Pending payments:\t{}", pending_payments);
                println!("Total paid:\t\t{:.2}", total_paid);
                println!("Events:\t\t\t{}", upcoming_events);
            }
        }
    }
}

impl PrintFormatted for Vec<EventPaymentStatus> {
    fn print_formatted(&self) {
        println!("{:<18}\t{:<24}\t{}", "ID", "Member", "Status");
        println!("{:-<60}", "-");
        for status in self {
            println!(
                "{:<18}\t{:<24}\t{}",
                status.member_id,
                status.member_name,
                status.describe()
            );
        }
    }
}
