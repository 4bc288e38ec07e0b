//! # Counter Commands Module
//!
//! Operator commands, one per input line.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs      ◄─── You are here (parsing & dispatch)
//! ├── menu.rs     ◄─── Category browsing
//! ├── invoice.rs  ◄─── Invoice manipulation
//! └── receipt.rs  ◄─── Printing
//! ```
//!
//! ## How Commands Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Command Flow                                         │
//! │                                                                         │
//! │  "qty 7 3"                                                              │
//! │      │                                                                  │
//! │      ▼                                                                  │
//! │  Command::parse ───► Command::Quantity { id: "7", quantity: 3 }         │
//! │      │                                                                  │
//! │      ▼                                                                  │
//! │  execute(&mut session, command)                                         │
//! │      │                                                                  │
//! │      ├──► invoice::set_quantity ──► InvoiceEngine::set_quantity         │
//! │      │                                                                  │
//! │      ▼                                                                  │
//! │  Outcome::Render(invoice view) ──► stdout                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every command that changes the invoice answers with the re-rendered
//! invoice.

pub mod invoice;
pub mod menu;
pub mod receipt;

use havir_core::locale::delocalize_digits;
use havir_core::EntryId;
use tracing::debug;

use crate::error::AppError;
use crate::state::Session;
use crate::view;

/// A parsed operator command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    Menu,
    Category(String),
    Add(EntryId),
    Quantity { id: EntryId, quantity: i64 },
    Increment(EntryId),
    Decrement(EntryId),
    Remove(EntryId),
    Discount(String),
    Show,
    Json,
    Reset,
    Print,
    Quit,
}

/// What the loop should do after a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Print this text and wait for the next command.
    Render(String),
    Quit,
}

impl Command {
    /// Parses one input line; blank lines yield `None`.
    ///
    /// The command word is case-insensitive. Ids are taken verbatim;
    /// numbers may use Persian digits.
    pub fn parse(line: &str) -> Result<Option<Command>, AppError> {
        let mut words = line.split_whitespace();
        let Some(word) = words.next() else {
            return Ok(None);
        };
        let args: Vec<&str> = words.collect();

        let id_arg = |usage: &str| match args.as_slice() {
            [id] => Ok(EntryId::new(id)),
            _ => Err(AppError::usage(usage)),
        };

        let command = match word.to_lowercase().as_str() {
            "help" | "?" => Command::Help,
            "menu" | "categories" => Command::Menu,
            "category" | "cat" => {
                if args.is_empty() {
                    return Err(AppError::usage("category <name|number>"));
                }
                Command::Category(args.join(" "))
            }
            "add" => Command::Add(id_arg("add <id>")?),
            "qty" | "quantity" => match args.as_slice() {
                [id, n] => {
                    let quantity = delocalize_digits(n)
                        .parse::<i64>()
                        .map_err(|_| AppError::usage("qty <id> <n>"))?;
                    Command::Quantity {
                        id: EntryId::new(id),
                        quantity,
                    }
                }
                _ => return Err(AppError::usage("qty <id> <n>")),
            },
            "inc" | "+" => Command::Increment(id_arg("inc <id>")?),
            "dec" | "-" => Command::Decrement(id_arg("dec <id>")?),
            "remove" | "rm" => Command::Remove(id_arg("remove <id>")?),
            "discount" => {
                if args.is_empty() {
                    return Err(AppError::usage("discount <percent>"));
                }
                Command::Discount(args.join(" "))
            }
            "show" | "invoice" => Command::Show,
            "json" => Command::Json,
            "reset" | "new" => Command::Reset,
            "print" => Command::Print,
            "quit" | "exit" => Command::Quit,
            other => return Err(AppError::unknown_command(other)),
        };

        Ok(Some(command))
    }

    /// Whether the command can change the invoice.
    pub fn is_mutating(&self) -> bool {
        matches!(
            self,
            Command::Add(_)
                | Command::Quantity { .. }
                | Command::Increment(_)
                | Command::Decrement(_)
                | Command::Remove(_)
                | Command::Discount(_)
                | Command::Reset
        )
    }
}

/// Runs one command against the session.
pub fn execute(session: &mut Session<'_>, command: Command) -> Result<Outcome, AppError> {
    debug!(?command, "execute");

    let mutating = command.is_mutating();
    let rendered = match command {
        Command::Help => view::render_help(),
        Command::Menu => menu::show_menu(session),
        Command::Category(selector) => menu::select_category(session, &selector)?,
        Command::Add(id) => invoice::add_item(session, &id)?,
        Command::Quantity { id, quantity } => invoice::set_quantity(session, &id, quantity)?,
        Command::Increment(id) => invoice::increment(session, &id)?,
        Command::Decrement(id) => invoice::decrement(session, &id)?,
        Command::Remove(id) => invoice::remove_item(session, &id),
        Command::Discount(value) => invoice::set_discount(session, &value),
        Command::Show => invoice::show(session),
        Command::Json => invoice::show_json(session)?,
        Command::Reset => invoice::reset(session),
        Command::Print => receipt::print(session)?,
        Command::Quit => return Ok(Outcome::Quit),
    };

    if mutating {
        debug!(
            lines = session.invoice.lines().count(),
            mode = ?session.invoice.mode(),
            "Invoice updated"
        );
    }

    Ok(Outcome::Render(rendered))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    fn parse(line: &str) -> Command {
        Command::parse(line).unwrap().unwrap()
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(parse("help"), Command::Help);
        assert_eq!(parse("  MENU "), Command::Menu);
        assert_eq!(parse("categories"), Command::Menu);
        assert_eq!(parse("add 7"), Command::Add(EntryId::from(7u64)));
        assert_eq!(
            parse("qty 7 -2"),
            Command::Quantity {
                id: EntryId::from(7u64),
                quantity: -2
            }
        );
        assert_eq!(parse("inc k2"), Command::Increment(EntryId::from("k2")));
        assert_eq!(parse("dec k2"), Command::Decrement(EntryId::from("k2")));
        assert_eq!(parse("remove 7"), Command::Remove(EntryId::from(7u64)));
        assert_eq!(parse("discount 12.5"), Command::Discount("12.5".to_string()));
        assert_eq!(parse("show"), Command::Show);
        assert_eq!(parse("json"), Command::Json);
        assert_eq!(parse("reset"), Command::Reset);
        assert_eq!(parse("print"), Command::Print);
        assert_eq!(parse("exit"), Command::Quit);
    }

    #[test]
    fn test_parse_multi_word_category() {
        assert_eq!(
            parse("category Hot Drinks"),
            Command::Category("Hot Drinks".to_string())
        );
    }

    #[test]
    fn test_parse_persian_quantity() {
        assert_eq!(
            parse("qty 7 ۱۲"),
            Command::Quantity {
                id: EntryId::from(7u64),
                quantity: 12
            }
        );
    }

    #[test]
    fn test_blank_line() {
        assert_eq!(Command::parse("   ").unwrap(), None);
    }

    #[test]
    fn test_parse_errors() {
        let err = Command::parse("pay 10").unwrap_err();
        assert_eq!(err.code, ErrorCode::UnknownCommand);

        let err = Command::parse("qty 7").unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);

        let err = Command::parse("qty 7 many").unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);

        assert!(Command::parse("add").is_err());
        assert!(Command::parse("add 1 2").is_err());
        assert!(Command::parse("discount").is_err());
    }

    #[test]
    fn test_mutating_commands() {
        assert!(parse("add 1").is_mutating());
        assert!(parse("discount 5").is_mutating());
        assert!(parse("reset").is_mutating());
        assert!(!parse("show").is_mutating());
        assert!(!parse("print").is_mutating());
    }
}
