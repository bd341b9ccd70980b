use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// safar - travel agency back-office
#[derive(Parser, Debug)]
#[command(name = "safar")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Tenant/company id override (beats the configured fallback, not the
    /// cached session)
    #[arg(long)]
    pub company: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Log in and cache the session
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        /// Use the agent login endpoint instead of the admin one
        #[arg(long)]
        agent: bool,
    },

    /// Clear the cached session
    Logout,

    /// Show the cached user and tenant
    Whoami,

    /// Aggregate booking and inquiry counts
    Dashboard,

    #[command(subcommand)]
    Bookings(BookingsCmd),

    #[command(subcommand)]
    Inquiries(InquiriesCmd),
}

#[derive(Subcommand, Debug)]
pub enum BookingsCmd {
    /// List bookings
    List {
        /// Only bookings attributed to the current agent
        #[arg(long)]
        mine: bool,
    },

    /// Show one booking record
    Show {
        id: String,
        /// Fetch with the expansion flag
        #[arg(long)]
        expand: bool,
    },

    /// Update the booking status (pending|confirmed|cancelled)
    SetStatus { id: String, status: String },

    /// Approve agent-proposed changes
    Approve { id: String },

    /// Reject agent-proposed changes
    Reject { id: String },

    /// Re-attribute a booking to another agent
    Assign { id: String, agent: String },

    /// Delete a booking
    Delete { id: String },

    /// Generate the booking voucher PDF
    Pdf {
        id: String,
        /// Output file
        #[arg(long, short)]
        out: PathBuf,
        /// Fetch the server-rendered PDF instead of rendering locally
        #[arg(long)]
        remote: bool,
        /// Server-rendered via the v2 endpoint (posts the full record)
        #[arg(long, conflicts_with = "remote")]
        remote_v2: bool,
    },

    /// Validate and submit a batch of booking slots from a JSON file
    Submit {
        #[arg(long)]
        file: PathBuf,
    },
}

#[derive(Subcommand, Debug)]
pub enum InquiriesCmd {
    /// List inquiries
    List,

    /// Append a response to an inquiry
    Respond {
        id: String,
        #[arg(long, short)]
        message: String,
    },

    /// Update the inquiry status (pending|responded|closed)
    SetStatus { id: String, status: String },

    /// Assign an agent to an inquiry
    Assign {
        id: String,
        agent: String,
        /// Also create a booking from the inquiry
        #[arg(long)]
        create_booking: bool,
    },
}
