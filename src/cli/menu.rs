//! Interactive menu
//!
//! The five-choice loop run when the binary is started without a
//! subcommand. Input and output are generic so the loop can be driven from
//! tests; `main` passes locked stdin and stdout.
//!
//! Errors the user can recover from (bad input, a failed write) are printed
//! and the loop goes on. End of input behaves like choosing Exit.

use std::io::{BufRead, Write};

use crate::config::Settings;
use crate::display::{format_expense_list, format_summary};
use crate::error::{TrackerError, TrackerResult};
use crate::models::NewExpense;
use crate::services::{Ledger, Listing};
use crate::storage::LedgerStore;

const MAIN_MENU: &str = "\n--- Expense Tracker ---\n\
                         1. Add expense\n\
                         2. View expenses\n\
                         3. Filter expenses\n\
                         4. Summary\n\
                         5. Exit\n";

const FILTER_MENU: &str = "Filter by:\n1. Category\n2. Date range\n";

/// Whether the loop should keep reading choices
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Exit,
}

/// Interactive menu over a ledger
pub struct Menu<'a, S: LedgerStore, R, W> {
    ledger: &'a mut Ledger<S>,
    settings: &'a Settings,
    input: R,
    output: W,
}

impl<'a, S, R, W> Menu<'a, S, R, W>
where
    S: LedgerStore,
    R: BufRead,
    W: Write,
{
    pub fn new(ledger: &'a mut Ledger<S>, settings: &'a Settings, input: R, output: W) -> Self {
        Self {
            ledger,
            settings,
            input,
            output,
        }
    }

    /// Run until the user exits or input ends
    pub fn run(&mut self) -> TrackerResult<()> {
        loop {
            write!(self.output, "{}", MAIN_MENU)?;
            let Some(choice) = self.prompt("Choose an option: ")? else {
                break;
            };

            let flow = match choice.trim() {
                "1" => self.add_expense()?,
                "2" => self.view_expenses()?,
                "3" => self.filter_expenses()?,
                "4" => self.summary()?,
                "5" => break,
                _ => {
                    writeln!(self.output, "Invalid choice.")?;
                    Flow::Continue
                }
            };

            if flow == Flow::Exit {
                break;
            }
        }

        writeln!(self.output, "Goodbye!")?;
        self.output.flush()?;
        Ok(())
    }

    fn add_expense(&mut self) -> TrackerResult<Flow> {
        let Some(date) = self.prompt("Enter date (YYYY-MM-DD): ")? else {
            return Ok(Flow::Exit);
        };
        let Some(amount) = self.prompt("Enter amount: ")? else {
            return Ok(Flow::Exit);
        };
        let Some(category) = self.prompt("Enter category: ")? else {
            return Ok(Flow::Exit);
        };
        let Some(description) = self.prompt("Enter description: ")? else {
            return Ok(Flow::Exit);
        };

        let input = NewExpense::new(date, amount, category, description);
        match self.ledger.add(&input) {
            Ok(_) => writeln!(self.output, "Expense added successfully.")?,
            Err(e) => self.report(e)?,
        }

        Ok(Flow::Continue)
    }

    fn view_expenses(&mut self) -> TrackerResult<Flow> {
        let text = self.render(&self.ledger.list());
        write!(self.output, "{}", text)?;
        Ok(Flow::Continue)
    }

    fn filter_expenses(&mut self) -> TrackerResult<Flow> {
        write!(self.output, "{}", FILTER_MENU)?;
        let Some(choice) = self.prompt("Enter choice: ")? else {
            return Ok(Flow::Exit);
        };

        let text = match choice.trim() {
            "1" => {
                let Some(category) = self.prompt("Enter category: ")? else {
                    return Ok(Flow::Exit);
                };
                self.render(&self.ledger.filter_by_category(&category))
            }
            "2" => {
                let Some(start) = self.prompt("Start date (YYYY-MM-DD): ")? else {
                    return Ok(Flow::Exit);
                };
                let Some(end) = self.prompt("End date (YYYY-MM-DD): ")? else {
                    return Ok(Flow::Exit);
                };
                match self.ledger.filter_by_date_range(&start, &end) {
                    Ok(listing) => self.render(&listing),
                    Err(e) => {
                        self.report(e)?;
                        return Ok(Flow::Continue);
                    }
                }
            }
            _ => "Invalid choice.\n".to_string(),
        };

        write!(self.output, "{}", text)?;
        Ok(Flow::Continue)
    }

    fn summary(&mut self) -> TrackerResult<Flow> {
        let summary = self.ledger.summary(self.settings.category_case);
        let text = format_summary(&summary, &self.settings.currency_symbol);
        write!(self.output, "{}", text)?;
        Ok(Flow::Continue)
    }

    fn render(&self, listing: &Listing<'_>) -> String {
        format_expense_list(listing, &self.settings.currency_symbol)
    }

    /// Print a recoverable error, or hand a fatal one back to the caller
    fn report(&mut self, error: TrackerError) -> TrackerResult<()> {
        if !error.is_recoverable() {
            return Err(error);
        }
        writeln!(self.output, "Error: {}", error)?;
        Ok(())
    }

    /// Show `prompt` and read one line, without its line ending
    ///
    /// Returns `None` at end of input.
    fn prompt(&mut self, prompt: &str) -> TrackerResult<Option<String>> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            writeln!(self.output)?;
            return Ok(None);
        }

        let trimmed = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed);
        Ok(Some(line))
    }
}
