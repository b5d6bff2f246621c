use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use circdesk::api::LibraryClient;
use circdesk::config::Config;
use circdesk::domain::ClientError;
use circdesk::policy::search;
use circdesk::policy::{DueBucket, PenaltyLevel, local_today, penalty_level};
use circdesk::prefs::CardPrefs;
use circdesk::services::circulation::{self, PlanOutcome};
use circdesk::services::stats::{self, StatKind};
use circdesk::services::{Overview, Snapshot, commit_borrow, plan_borrow};

#[derive(Parser)]
#[command(
    name = "circdesk",
    about = "Circulation-desk console for the school library backend",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Due-soon dashboard with the configured cards
    Overview,
    /// Every active loan grouped by days remaining
    DueSoon,
    /// Catalog listing
    Catalog {
        /// Filter titles/authors/categories (diacritic-insensitive)
        #[arg(long)]
        search: Option<String>,
    },
    /// Student roster with counters and penalty state
    Students {
        #[arg(long)]
        search: Option<String>,
    },
    /// Lend one or more books to a student
    Borrow {
        /// Student name or number
        student: String,
        /// Book ids or catalog numbers
        #[arg(required = true)]
        book_ids: Vec<String>,
        /// Loan length in days
        #[arg(long)]
        days: Option<i64>,
        /// Confirm lending past the borrow limit
        #[arg(long)]
        yes: bool,
    },
    /// Take a book back from a student
    Return {
        book_id: String,
        student: String,
    },
    /// Set a student's penalty points (admin override)
    Penalty {
        student: String,
        points: i64,
    },
    /// Headline statistics
    Stats,
    /// Show or hide an overview card
    ToggleCard {
        card: String,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "circdesk=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = Config::from_env();

    if let Err(e) = run(cli.command, &config).await {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

async fn run(command: Command, config: &Config) -> Result<(), ClientError> {
    // Toggling a card is local-only; don't require the backend for it.
    if let Command::ToggleCard { card } = &command {
        let mut prefs = CardPrefs::load(&config.profile);
        let visible = prefs.toggle(card);
        prefs.save(&config.profile)?;
        println!(
            "card '{}' is now {}",
            card,
            if visible { "visible" } else { "hidden" }
        );
        return Ok(());
    }

    let client = LibraryClient::from_config(config)?;
    let snapshot = Snapshot::fetch(&client).await?;

    match command {
        Command::Overview => print_overview(&snapshot, &CardPrefs::load(&config.profile)),
        Command::DueSoon => print_due_soon(&snapshot),
        Command::Catalog { search } => print_catalog(&snapshot, search.as_deref()),
        Command::Students { search } => print_students(&snapshot, search.as_deref()),
        Command::Borrow {
            student,
            book_ids,
            days,
            yes,
        } => {
            let days = days.unwrap_or(config.default_loan_days);
            borrow_flow(&client, &snapshot, &student, &book_ids, days, yes, config).await?;
        }
        Command::Return { book_id, student } => {
            circulation::return_book(&client, &snapshot, &book_id, &student, &config.personel_name)
                .await?;
            println!("returned.");
        }
        Command::Penalty { student, points } => {
            circulation::set_penalty(&client, &snapshot, &student, points, &config.personel_name)
                .await?;
            println!("penalty points for '{}' set to {}.", student, points);
        }
        Command::Stats => print_stats(&snapshot),
        Command::ToggleCard { .. } => unreachable!("handled above"),
    }

    Ok(())
}

fn print_overview(snapshot: &Snapshot, prefs: &CardPrefs) {
    let today = local_today();
    let overview = Overview::compute(snapshot, today);

    println!(
        "{} titles | {} copies on shelf | {} active loans (snapshot {})",
        overview.total_books,
        overview.available_copies,
        overview.active_loans,
        snapshot.fetched_at.format("%Y-%m-%d %H:%M")
    );
    if overview.buckets.invalid_due_dates > 0 {
        println!(
            "  ({} loan(s) skipped: unreadable due date)",
            overview.buckets.invalid_due_dates
        );
    }

    let cards = [
        ("overdue", DueBucket::Overdue),
        ("due-soon-0-3", DueBucket::DueSoon),
        ("due-soon-4-7", DueBucket::ThisWeek),
        ("due-soon-8-14", DueBucket::NextTwoWeeks),
        ("due-soon-15plus", DueBucket::Later),
    ];
    for (card, bucket) in cards {
        if !prefs.is_visible(card) {
            continue;
        }
        let entries = overview.buckets.bucket(bucket);
        println!("\n[{}] {} loan(s)", bucket.label(), entries.len());
        for entry in entries.iter().take(10) {
            println!(
                "  {:>4}d  {} — {} ({})",
                entry.days_remaining, entry.loan.title, entry.loan.borrower, entry.loan.due_date
            );
        }
        if entries.len() > 10 {
            println!("  ... and {} more", entries.len() - 10);
        }
    }

    if prefs.is_visible("banned-students") && !overview.banned_students.is_empty() {
        println!("\n[Banned students] {}", overview.banned_students.len());
        for student in &overview.banned_students {
            println!(
                "  {} ({} points)",
                student.full_name(),
                student.penalty_points()
            );
        }
    }

    if prefs.is_visible("top-borrowed") {
        let ranked = stats::top_borrowed(&snapshot.loans, 10);
        if !ranked.is_empty() {
            println!("\n[Most borrowed]");
            for (title, author, count) in ranked {
                println!("  {:>3}x  {} — {}", count, title, author);
            }
        }
    }

    if prefs.is_visible("categories") {
        let ranked = stats::category_counts(&snapshot.loans);
        if !ranked.is_empty() {
            println!("\n[Loans by category]");
            for (category, count) in ranked {
                println!("  {:>3}  {}", count, category);
            }
        }
    }
}

fn print_due_soon(snapshot: &Snapshot) {
    let today = local_today();
    let overview = Overview::compute(snapshot, today);
    for bucket in DueBucket::ALL {
        let entries = overview.buckets.bucket(bucket);
        if entries.is_empty() {
            continue;
        }
        println!("[{}]", bucket.label());
        for entry in entries {
            println!(
                "  {:>4}d  {} — {} ({})",
                entry.days_remaining, entry.loan.title, entry.loan.borrower, entry.loan.due_date
            );
        }
    }
}

fn print_catalog(snapshot: &Snapshot, term: Option<&str>) {
    let term = term.unwrap_or("");
    let mut shown = 0usize;
    for book in &snapshot.books {
        if !search::book_matches(book, term) {
            continue;
        }
        shown += 1;
        println!(
            "{}  {} — {} [{}] {}/{} available{}",
            book.id,
            book.title,
            book.author,
            book.category,
            book.quantity,
            book.total_quantity,
            if book.is_borrowable() { "" } else { "  (not lendable)" }
        );
    }
    println!("{} of {} titles", shown, snapshot.books.len());
}

fn print_students(snapshot: &Snapshot, term: Option<&str>) {
    let term = term.unwrap_or("");
    let max = snapshot.settings.max_penalty_points;
    for student in &snapshot.students {
        if !search::student_matches(student, term) {
            continue;
        }
        let marker = match penalty_level(student.penalty_points(), max) {
            PenaltyLevel::Banned => " [BANNED]",
            PenaltyLevel::Warning => " [warning]",
            PenaltyLevel::Clear => "",
        };
        println!(
            "{}  class {}{}  borrowed {} / returned {} / late {}  penalty {}{}",
            student.full_name(),
            student.class.map_or("?".to_string(), |c| c.to_string()),
            student.branch.as_deref().unwrap_or(""),
            student.borrowed,
            student.returned,
            student.late,
            student.penalty_points(),
            marker
        );
    }
}

async fn borrow_flow(
    client: &LibraryClient,
    snapshot: &Snapshot,
    student: &str,
    book_ids: &[String],
    days: i64,
    yes: bool,
    config: &Config,
) -> Result<(), ClientError> {
    let plan = plan_borrow(snapshot, student, book_ids, days)?;

    for book in &plan.evaluation.already_borrowed_books {
        println!("'{}' is already on loan to {} — skipped", book.title, plan.borrower);
    }
    for book in &plan.evaluation.unavailable_books {
        println!("'{}' has no lendable copy — skipped", book.title);
    }

    match plan.outcome {
        PlanOutcome::Blocked {
            penalty_points,
            max_penalty_points,
        } => {
            println!(
                "{} is banned from borrowing ({} / {} penalty points); nothing sent.",
                plan.borrower, penalty_points, max_penalty_points
            );
            return Ok(());
        }
        PlanOutcome::NothingToBorrow => {
            println!("nothing to borrow.");
            return Ok(());
        }
        PlanOutcome::NeedsConfirmation { excess_count } if !yes => {
            println!(
                "{} holds {} active loan(s); lending {} more makes {} — {} over the limit of {}.",
                plan.borrower,
                plan.evaluation.active_loan_count,
                plan.evaluation.eligible_books.len(),
                plan.evaluation.total_after_borrow,
                excess_count,
                snapshot.settings.max_borrow_limit
            );
            println!("re-run with --yes to lend anyway.");
            return Ok(());
        }
        _ => {}
    }

    let report = commit_borrow(client, &plan, &config.personel_name, yes).await?;
    for title in &report.borrowed {
        println!("lent '{}' to {} for {} days", title, plan.borrower, days);
    }
    for (title, message) in &report.rejected {
        println!("server rejected '{}': {}", title, message);
    }

    // Refetch so the closing summary reflects what the server actually did.
    let refreshed = Snapshot::fetch(client).await?;
    let candidates =
        circdesk::policy::names::candidate_names(&plan.borrower, refreshed.find_student(student));
    let active = circdesk::policy::names::loans_for_student(&refreshed.loans, &candidates);
    println!(
        "{} now holds {} active loan(s).",
        plan.borrower,
        active.len()
    );
    Ok(())
}

fn print_stats(snapshot: &Snapshot) {
    let today = local_today();
    for kind in StatKind::ALL {
        println!(
            "{:<22} {}",
            kind.label(),
            stats::compute(kind, snapshot, today)
        );
    }
}
