use clap::{App, AppSettings, Arg, ArgMatches, SubCommand};
use std::ffi::OsString;
use std::path::PathBuf;

const DEFAULT_LEDGER_FILE: &str = "expenses.csv";

#[derive(Debug, PartialEq)]
pub enum Command {
    /// Record a new expense from the four raw values given on the command
    /// line. Validation happens in the ledger, not here.
    Add {
        date: String,
        amount: String,
        category: String,
        description: String,
    },
    List,
    /// Category totals for one `YYYY-MM` month, or for every month.
    Totals { month: Option<String> },
    Categories,
}

#[derive(Debug, PartialEq)]
pub struct Args {
    pub ledger_file: PathBuf,
    pub command: Command,
}

impl Args {
    pub fn parse() -> Self {
        Self::from_matches(&app().get_matches())
    }

    pub fn parse_from<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        Ok(Self::from_matches(&app().get_matches_from_safe(args)?))
    }

    fn from_matches(matches: &ArgMatches) -> Self {
        let command = match matches.subcommand() {
            ("add", Some(add)) => Command::Add {
                date: value_of(add, "date"),
                amount: value_of(add, "amount"),
                category: value_of(add, "category"),
                description: value_of(add, "description"),
            },
            ("totals", Some(totals)) => Command::Totals {
                month: totals.value_of("month").map(str::to_string),
            },
            ("categories", _) => Command::Categories,
            _ => Command::List,
        };

        Self {
            ledger_file: PathBuf::from(
                matches.value_of("file").unwrap_or(DEFAULT_LEDGER_FILE),
            ),
            command,
        }
    }
}

fn value_of(matches: &ArgMatches, name: &str) -> String {
    matches.value_of(name).unwrap_or_default().to_string()
}

fn app() -> App<'static, 'static> {
    App::new("expenses")
        .version("0.1.0")
        .about("Record expenses and report monthly totals per category")
        .setting(AppSettings::SubcommandRequiredElseHelp)
        .arg(
            Arg::with_name("file")
                .short("f")
                .long("file")
                .takes_value(true)
                .env("EXPENSES_FILE")
                .default_value(DEFAULT_LEDGER_FILE)
                .help("path of the CSV ledger file"),
        )
        .subcommand(
            SubCommand::with_name("add")
                .about("record a new expense")
                .setting(AppSettings::AllowNegativeNumbers)
                .arg(Arg::with_name("date").required(true).help("date as YYYY-MM-DD"))
                .arg(
                    Arg::with_name("amount")
                        .required(true)
                        .allow_hyphen_values(true)
                        .help("amount spent"),
                )
                .arg(Arg::with_name("category").required(true).help("expense category"))
                .arg(Arg::with_name("description").help("optional free-text description")),
        )
        .subcommand(SubCommand::with_name("list").about("display all expenses"))
        .subcommand(
            SubCommand::with_name("totals")
                .about("show totals per category for each month")
                .arg(
                    Arg::with_name("month")
                        .short("m")
                        .long("month")
                        .takes_value(true)
                        .help("only show this month, as YYYY-MM"),
                ),
        )
        .subcommand(SubCommand::with_name("categories").about("list every category in use"))
}
