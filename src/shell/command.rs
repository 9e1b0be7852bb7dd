//! Shell command parsing
//!
//! A line is split at the first `;` (the rest is an expense comment), then
//! tokenized with shell quoting rules. Multi-word category names may be
//! quoted or written bare at the end of a command. A word starting with `#`
//! is a key reference, never a comment.

use shell_words::split;

use crate::error::{BookkeeperError, BookkeeperResult};
use crate::models::{BudgetPeriod, BudgetPk, CategoryPk, ExpensePk};

/// What a listing command prints
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Listing {
    Expenses,
    Categories,
    Budgets,
    Analysis,
}

/// Entity kinds that can be deleted by key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteTarget {
    Expense(ExpensePk),
    Budget(BudgetPk),
    Category(CategoryPk),
}

/// One parsed shell command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    List(Listing),
    AddExpense {
        amount: i64,
        category: String,
        comment: String,
    },
    AddBudget {
        period: BudgetPeriod,
        amount: i64,
        category: String,
    },
    AddCategory {
        name: String,
        parent: Option<String>,
    },
    EditExpense {
        pk: ExpensePk,
        amount: i64,
    },
    EditBudget {
        pk: BudgetPk,
        amount: i64,
    },
    RenameCategory {
        pk: CategoryPk,
        name: String,
    },
    MoveCategory {
        pk: CategoryPk,
        parent: Option<String>,
    },
    Delete(DeleteTarget),
    Help,
    Quit,
}

pub const HELP: &str = "\
Listings:
  expenses | categories | budgets | analysis
Adding:
  <amount> <category> [; comment]        record an expense
  budget <day|week|month> <amount> <category>
  category <name> [under <parent>]
Changing:
  edit expense <key> <amount>
  edit budget <key> <amount>
  rename category <key> <name>
  move category <key> [under <parent>]
  delete expense|budget|category <key>
Other:
  help | quit | exit

Categories can be named or given by key, e.g. #3. Quote names that
contain the word 'under'.";

fn usage(text: &str) -> BookkeeperError {
    BookkeeperError::Validation(format!("Usage: {}", text))
}

fn parse_amount(raw: &str) -> BookkeeperResult<i64> {
    raw.parse()
        .map_err(|_| BookkeeperError::Validation(format!("Invalid amount '{}'", raw)))
}

fn parse_key<K: std::str::FromStr>(raw: &str) -> BookkeeperResult<K> {
    raw.parse()
        .map_err(|_| BookkeeperError::Validation(format!("Invalid key '{}'", raw)))
}

fn join_name(words: &[String], usage_text: &str) -> BookkeeperResult<String> {
    if words.is_empty() {
        return Err(usage(usage_text));
    }
    Ok(words.join(" "))
}

/// Split `name... [under parent...]`
fn split_under(words: &[String]) -> (&[String], Option<&[String]>) {
    match words.iter().position(|w| w.eq_ignore_ascii_case("under")) {
        Some(idx) => (&words[..idx], Some(&words[idx + 1..])),
        None => (words, None),
    }
}

/// Backslash-escape a `#` that opens an unquoted word
///
/// The tokenizer would otherwise drop it and the rest of the line as a
/// comment, which breaks `#3` key references.
fn escape_key_marks(input: &str) -> String {
    let mut out = String::with_capacity(input.len() + 4);
    let mut quote: Option<char> = None;
    let mut escaped = false;
    let mut word_start = true;

    for ch in input.chars() {
        if escaped {
            escaped = false;
            word_start = false;
            out.push(ch);
            continue;
        }

        match quote {
            Some(open) if ch == open => quote = None,
            Some('"') if ch == '\\' => escaped = true,
            Some(_) => {}
            None => match ch {
                '\'' | '"' => quote = Some(ch),
                '\\' => escaped = true,
                '#' if word_start => out.push('\\'),
                _ => {}
            },
        }

        word_start = quote.is_none() && !escaped && ch.is_whitespace();
        out.push(ch);
    }

    out
}

/// Parse one input line; `Ok(None)` for blank lines
pub fn parse_command(line: &str) -> BookkeeperResult<Option<Command>> {
    let (head, comment) = match line.split_once(';') {
        Some((head, comment)) => (head, Some(comment.trim().to_string())),
        None => (line, None),
    };

    let tokens = split(&escape_key_marks(head))
        .map_err(|e| BookkeeperError::Validation(format!("Could not parse input: {}", e)))?;
    let Some(first) = tokens.first() else {
        return Ok(None);
    };
    let keyword = first.to_lowercase();
    let args = &tokens[1..];

    if let Ok(amount) = keyword.parse::<i64>() {
        let category = join_name(args, "<amount> <category> [; comment]")?;
        return Ok(Some(Command::AddExpense {
            amount,
            category,
            comment: comment.unwrap_or_default(),
        }));
    }

    if comment.is_some() {
        return Err(BookkeeperError::Validation(
            "Only expenses take a '; comment'".into(),
        ));
    }

    let command = match keyword.as_str() {
        "expenses" | "categories" | "budgets" | "analysis" if !args.is_empty() => {
            return Err(usage(&keyword));
        }
        "expenses" => Command::List(Listing::Expenses),
        "categories" => Command::List(Listing::Categories),
        "budgets" => Command::List(Listing::Budgets),
        "analysis" => Command::List(Listing::Analysis),
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        "budget" => {
            const USAGE: &str = "budget <day|week|month> <amount> <category>";
            let [period, amount, rest @ ..] = args else {
                return Err(usage(USAGE));
            };
            Command::AddBudget {
                period: period.parse()?,
                amount: parse_amount(amount)?,
                category: join_name(rest, USAGE)?,
            }
        }
        "category" => {
            const USAGE: &str = "category <name> [under <parent>]";
            let (name, parent) = split_under(args);
            Command::AddCategory {
                name: join_name(name, USAGE)?,
                parent: parent.map(|p| join_name(p, USAGE)).transpose()?,
            }
        }
        "edit" => {
            const USAGE: &str = "edit expense|budget <key> <amount>";
            let [kind, pk, amount] = args else {
                return Err(usage(USAGE));
            };
            match kind.to_lowercase().as_str() {
                "expense" => Command::EditExpense {
                    pk: parse_key(pk)?,
                    amount: parse_amount(amount)?,
                },
                "budget" => Command::EditBudget {
                    pk: parse_key(pk)?,
                    amount: parse_amount(amount)?,
                },
                _ => return Err(usage(USAGE)),
            }
        }
        "rename" => {
            const USAGE: &str = "rename category <key> <name>";
            let [kind, pk, rest @ ..] = args else {
                return Err(usage(USAGE));
            };
            if !kind.eq_ignore_ascii_case("category") {
                return Err(usage(USAGE));
            }
            Command::RenameCategory {
                pk: parse_key(pk)?,
                name: join_name(rest, USAGE)?,
            }
        }
        "move" => {
            const USAGE: &str = "move category <key> [under <parent>]";
            let [kind, pk, rest @ ..] = args else {
                return Err(usage(USAGE));
            };
            if !kind.eq_ignore_ascii_case("category") {
                return Err(usage(USAGE));
            }
            let parent = match split_under(rest) {
                ([], None) => None,
                ([], Some(parent)) => Some(join_name(parent, USAGE)?),
                _ => return Err(usage(USAGE)),
            };
            Command::MoveCategory {
                pk: parse_key(pk)?,
                parent,
            }
        }
        "delete" => {
            const USAGE: &str = "delete expense|budget|category <key>";
            let [kind, pk] = args else {
                return Err(usage(USAGE));
            };
            let target = match kind.to_lowercase().as_str() {
                "expense" => DeleteTarget::Expense(parse_key(pk)?),
                "budget" => DeleteTarget::Budget(parse_key(pk)?),
                "category" => DeleteTarget::Category(parse_key(pk)?),
                _ => return Err(usage(USAGE)),
            };
            Command::Delete(target)
        }
        _ => {
            return Err(BookkeeperError::Validation(format!(
                "Unknown command '{}'. Type 'help' for a list.",
                first
            )))
        }
    };

    Ok(Some(command))
}
