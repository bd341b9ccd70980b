pub mod cli;
pub mod submit;
pub mod views;

use anyhow::{anyhow, bail, Context};
use cli::{BookingsCmd, Commands, InquiriesCmd};
use safar_client::ApiClient;
use safar_core::booking::{ApprovalStatus, BookingStatus};
use safar_core::inquiry::InquiryStatus;
use safar_core::mapper::{extract_list, map_booking};
use safar_pdf::VoucherDoc;
use safar_wizard::{BookingFormData, BookingWizard};

/// Dispatch one subcommand against the API client. Every failure surfaces
/// as a message; nothing here is fatal beyond the current command.
pub async fn run(command: Commands, api: &mut ApiClient) -> anyhow::Result<()> {
    match command {
        Commands::Login {
            email,
            password,
            agent,
        } => {
            let user = api.login(&email, &password, agent).await?;
            if let Err(err) = api.ensure_company_id().await {
                tracing::warn!("Could not resolve a company id after login: {}", err);
            }
            println!("Logged in as {} ({})", user.email, user.role);
        }
        Commands::Logout => {
            api.logout()?;
            println!("Session cleared");
        }
        Commands::Whoami => match api.current_user() {
            Some(user) => {
                println!("{} <{}> role={}", user.name, user.email, user.role);
                match api.company_id() {
                    Some(company) => println!("company: {}", company),
                    None => println!("company: (none)"),
                }
            }
            None => println!("Not logged in"),
        },
        Commands::Dashboard => {
            let stats = views::dashboard::show(api).await?;
            print!("{}", views::dashboard::render(&stats));
        }
        Commands::Bookings(cmd) => run_bookings(cmd, api).await?,
        Commands::Inquiries(cmd) => run_inquiries(cmd, api).await?,
    }
    Ok(())
}

async fn run_bookings(cmd: BookingsCmd, api: &mut ApiClient) -> anyhow::Result<()> {
    match cmd {
        BookingsCmd::List { mine } => {
            let mut view = views::bookings::BookingsView::new();
            view.refresh(api, mine).await?;
            print!("{}", view.render());
        }
        BookingsCmd::Show { id, expand } => {
            let record = api.get_booking(&id, expand).await?;
            println!("{}", serde_json::to_string_pretty(&record)?);
        }
        BookingsCmd::SetStatus { id, status } => {
            let status: BookingStatus = status.parse()?;
            api.set_booking_status(&id, status).await?;
            println!("Booking {} is now {}", id, status);
        }
        BookingsCmd::Approve { id } => {
            api.set_approval_status(&id, ApprovalStatus::Approved).await?;
            println!("Booking {} approved", id);
        }
        BookingsCmd::Reject { id } => {
            api.set_approval_status(&id, ApprovalStatus::Rejected).await?;
            println!("Booking {} rejected", id);
        }
        BookingsCmd::Assign { id, agent } => {
            api.assign_booking(&id, &agent).await?;
            println!("Booking {} assigned to {}", id, agent);
        }
        BookingsCmd::Delete { id } => {
            let mut view = views::bookings::BookingsView::new();
            view.refresh(api, false).await?;
            view.delete(api, &id).await?;
            println!("Booking {} deleted ({} remaining)", id, view.rows().len());
        }
        BookingsCmd::Pdf {
            id,
            out,
            remote,
            remote_v2,
        } => {
            let bytes = if remote {
                api.booking_pdf(&id).await?
            } else if remote_v2 {
                let record = api.get_booking(&id, true).await?;
                api.booking_pdf_v2(&record).await?
            } else {
                let record = api.get_booking(&id, true).await?;
                let doc = VoucherDoc::normalize(&record);
                safar_pdf::render(&doc)?
            };
            std::fs::write(&out, &bytes)
                .with_context(|| format!("writing {}", out.display()))?;
            println!("Wrote {} bytes to {}", bytes.len(), out.display());
        }
        BookingsCmd::Submit { file } => {
            let raw = std::fs::read_to_string(&file)
                .with_context(|| format!("reading {}", file.display()))?;
            let value: serde_json::Value = serde_json::from_str(&raw)?;
            let nodes = extract_list(&value, &["slots", "bookings"]);
            let slots = nodes
                .iter()
                .map(|node| serde_json::from_value::<BookingFormData>(node.clone()))
                .collect::<Result<Vec<_>, _>>()
                .context("malformed booking slot")?;
            if slots.is_empty() {
                bail!("No booking slots found in {}", file.display());
            }
            let user = api
                .current_user()
                .cloned()
                .ok_or_else(|| anyhow!("Log in before submitting bookings"))?;

            let mut wizard = BookingWizard::from_slots(slots);
            match submit::submit_wizard(&mut wizard, &user, api, |record| {
                let mapped = map_booking(record);
                println!("Created booking {} for {}", mapped.id, mapped.customer);
            })
            .await
            {
                Ok(created) => println!("Submitted {} booking(s)", created.len()),
                Err(submit::SubmitError::Wizard(err)) => {
                    eprintln!(
                        "Validation failed on booking {} at step '{}':",
                        wizard.active_index() + 1,
                        wizard.current_step()
                    );
                    for (field, message) in wizard.errors() {
                        eprintln!("  {}: {}", field, message);
                    }
                    bail!(err);
                }
                Err(submit::SubmitError::Aborted {
                    total,
                    created,
                    source,
                }) => {
                    eprintln!(
                        "{} of {} booking(s) were created before the failure; they were not rolled back",
                        created.len(),
                        total
                    );
                    bail!(source);
                }
            }
        }
    }
    Ok(())
}

async fn run_inquiries(cmd: InquiriesCmd, api: &mut ApiClient) -> anyhow::Result<()> {
    match cmd {
        InquiriesCmd::List => {
            let mut view = views::inquiries::InquiriesView::new();
            view.refresh(api).await?;
            print!("{}", view.render());
        }
        InquiriesCmd::Respond { id, message } => {
            api.respond_inquiry(&id, &message).await?;
            println!("Response recorded on inquiry {}", id);
        }
        InquiriesCmd::SetStatus { id, status } => {
            let status = InquiryStatus::parse_lossy(&status);
            api.set_inquiry_status(&id, status).await?;
            println!("Inquiry {} is now {}", id, status);
        }
        InquiriesCmd::Assign {
            id,
            agent,
            create_booking,
        } => {
            api.assign_inquiry(&id, &agent, create_booking).await?;
            if create_booking {
                println!("Inquiry {} assigned to {} and converted to a booking", id, agent);
            } else {
                println!("Inquiry {} assigned to {}", id, agent);
            }
        }
    }
    Ok(())
}
