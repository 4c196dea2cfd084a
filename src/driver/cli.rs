//! CLI Argument Parsing
//!
//! CLIの引数解析

use chrono::{Local, NaiveDate};
use clap::{Parser, ValueEnum};

use crate::application::dto::availability_query::{parse_query_date, QueryError};
use crate::domain::entities::slot_record::SlotColumn;
use crate::domain::services::slot_filter::DateFilter;

/// CoWIN公開APIから接種可能な枠を検索するCLI
#[derive(Parser, Debug, Clone)]
#[command(name = "vaxslots")]
#[command(about = "Find open vaccination slots from the CoWIN public API", long_about = None)]
pub struct Args {
    /// State id (see --list-states)
    #[arg(short, long, default_value_t = 1)]
    pub state: u32,

    /// District id; omit to search every district of the state
    #[arg(short, long)]
    pub district: Option<u32>,

    /// Age band to search for (exact match, e.g. 18 or 45)
    #[arg(short = 'a', long, default_value_t = 45)]
    pub min_age: u32,

    /// Start date as YYYY-MM-DD (defaults to tomorrow)
    #[arg(long)]
    pub date: Option<String>,

    /// Only keep sessions on the start date instead of the whole week
    #[arg(long, conflicts_with = "date_filter")]
    pub exact_date: bool,

    /// Which sessions of the returned week to keep (overrides the config)
    #[arg(long, value_enum)]
    pub date_filter: Option<DateFilterArg>,

    /// Sort by column; repeat for a multi-column sort
    #[arg(long = "sort-by", value_enum)]
    pub sort_by: Vec<SortColumn>,

    /// Reverse the sort order
    #[arg(long)]
    pub descending: bool,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,

    /// List known states and exit
    #[arg(long)]
    pub list_states: bool,

    /// List the districts of --state and exit
    #[arg(long)]
    pub list_districts: bool,

    /// Re-run the query every SECS seconds until interrupted
    #[arg(long, value_name = "SECS")]
    pub watch: Option<u64>,

    /// Config file path
    #[arg(short, long, default_value = "./vaxslots.json")]
    pub config: String,
}

impl Args {
    /// `--date` を解釈する。未指定なら翌日
    pub fn start_date(&self) -> Result<NaiveDate, QueryError> {
        match &self.date {
            Some(date) => parse_query_date(date),
            None => Ok(tomorrow()),
        }
    }

    /// Date filter chosen on the command line, if any
    pub fn date_filter_override(&self) -> Option<DateFilter> {
        if self.exact_date {
            Some(DateFilter::ExactDate)
        } else {
            self.date_filter.map(DateFilter::from)
        }
    }

    pub fn sort_columns(&self) -> Vec<SlotColumn> {
        self.sort_by.iter().copied().map(SlotColumn::from).collect()
    }
}

fn tomorrow() -> NaiveDate {
    let today = Local::now().date_naive();
    today.succ_opt().unwrap_or(today)
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateFilterArg {
    /// Every session of the week starting at --date
    Window,
    /// Only sessions on --date
    ExactDate,
}

impl From<DateFilterArg> for DateFilter {
    fn from(arg: DateFilterArg) -> Self {
        match arg {
            DateFilterArg::Window => DateFilter::Window,
            DateFilterArg::ExactDate => DateFilter::ExactDate,
        }
    }
}

/// Sortable columns of the slot table
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortColumn {
    Date,
    District,
    Center,
    Pincode,
    Address,
    Availability,
    Vaccine,
    Fee,
}

impl From<SortColumn> for SlotColumn {
    fn from(column: SortColumn) -> Self {
        match column {
            SortColumn::Date => SlotColumn::Date,
            SortColumn::District => SlotColumn::District,
            SortColumn::Center => SlotColumn::Center,
            SortColumn::Pincode => SlotColumn::Pincode,
            SortColumn::Address => SlotColumn::Address,
            SortColumn::Availability => SlotColumn::Availability,
            SortColumn::Vaccine => SlotColumn::Vaccine,
            SortColumn::Fee => SlotColumn::Fee,
        }
    }
}
