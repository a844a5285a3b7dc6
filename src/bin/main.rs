use env_logger::Env;
use expense_tracker::args::{Args, Command};
use expense_tracker::{render, ExpenseInput, Ledger, LedgerStore, StoreError, YearMonth};
use std::error::Error;
use std::process;

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

    let args = Args::parse();
    let store = LedgerStore::new(args.ledger_file);

    if let Err(err) = run(&store, args.command) {
        eprintln!("{}", err);
        process::exit(1);
    }
}

fn run(store: &LedgerStore, command: Command) -> Result<(), Box<dyn Error>> {
    match command {
        Command::Add {
            date,
            amount,
            category,
            description,
        } => {
            let input = ExpenseInput::new(date, amount, category, description);
            let expense = store.submit(&input)?;
            println!(
                "Added {} expense of {} on {}.",
                expense.category(),
                expense.amount(),
                expense.date()
            );
        }
        Command::List => {
            let ledger = load(store)?;
            if ledger.is_empty() {
                println!("No expenses found.");
            } else {
                print!("{}", render::expense_table(ledger.expenses()));
            }
        }
        Command::Totals { month: Some(month) } => {
            let month: YearMonth = month.parse()?;
            let totals = load(store)?.monthly_totals(month.year(), month.month());
            if totals.is_empty() {
                println!("No expenses found for {}.", month);
            } else {
                print!("{}", render::month_totals(&month, &totals));
            }
        }
        Command::Totals { month: None } => {
            let ledger = load(store)?;
            if ledger.is_empty() {
                println!("No expenses found.");
            } else {
                print!("{}", render::monthly_report(&ledger.totals_by_month()));
            }
        }
        Command::Categories => {
            for category in load(store)?.categories() {
                println!("{}", category);
            }
        }
    }

    Ok(())
}

/// Loads the ledger, telling the user about any rows that had to be skipped.
fn load(store: &LedgerStore) -> Result<Ledger, StoreError> {
    let ledger = store.load_all()?;
    for err in ledger.skipped() {
        eprintln!("skipped malformed row in {:?}, {}", store.path(), err);
    }

    Ok(ledger)
}
