//! A line-oriented command language for driving a [`Tree`] of words.
//!
//! A program is a stream of whitespace-separated tokens. Line breaks carry no meaning beyond
//! separating tokens. The commands are:
//!
//! - `insert <item>`: insert the item, or overwrite the stored item equal to it.
//! - `delete <item>`: remove the item if it is in the tree.
//! - `trim`: remove every current leaf.
//! - `traverse`: print the items in preorder, inorder, and postorder.
//! - `stats`: print the height, size, leaf and half-node counts, extremes, and whether the tree is
//!   perfect and balanced.
//!
//! Anything else aborts the program. Output for the commands before it has already been written.
//!
//! # Examples
//!
//! ```
//! use bstree::interpreter::Interpreter;
//!
//! let mut interpreter = Interpreter::new("words", Vec::new());
//! interpreter.run("insert pear insert apple\ndelete pear".as_bytes()).unwrap();
//!
//! assert_eq!(interpreter.tree().size(), 1);
//! assert_eq!(
//!     String::from_utf8(interpreter.into_inner()).unwrap(),
//!     "inserted pear\ninserted apple\ndeleted pear\n"
//! );
//! ```

use std::collections::VecDeque;
use std::fmt;
use std::io::{self, BufRead, Write};

use tracing::{debug, info};

use crate::ordered::Tree;

const DOUBLE_RULE: &str = "======================================";
const SINGLE_RULE: &str = "--------------------------------------";

/// Width every `stats` cell is padded to.
const CELL_WIDTH: usize = 20;

/// Failures that stop a program.
#[derive(Debug, thiserror::Error)]
pub enum InterpreterError {
    /// A token where a command was expected isn't one.
    #[error("{program} parsing error")]
    UnknownCommand {
        /// Name of the program being run.
        program: String,
        /// The offending token.
        command: String,
    },
    /// `insert` or `delete` was the last token of the program.
    #[error("{program} parsing error: `{command}` needs an item")]
    MissingOperand {
        /// Name of the program being run.
        program: String,
        /// The command missing its item.
        command: &'static str,
    },
    /// Reading the program or writing output failed.
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// A parsed command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `trim`
    Trim,
    /// `delete <item>`
    Delete(String),
    /// `insert <item>`
    Insert(String),
    /// `traverse`
    Traverse,
    /// `stats`
    Stats,
}

/// A snapshot of a tree's structural queries, printed by the `stats` command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stats<'a, T> {
    /// See [`Tree::height`].
    pub height: isize,
    /// See [`Tree::size`].
    pub size: usize,
    /// See [`Tree::count_leaves`].
    pub leaves: usize,
    /// See [`Tree::count_halves`].
    pub halves: usize,
    /// The smallest item, if there is one.
    pub min: Option<&'a T>,
    /// The largest item, if there is one.
    pub max: Option<&'a T>,
    /// See [`Tree::is_perfect`].
    pub perfect: bool,
    /// See [`Tree::is_balanced`].
    pub balanced: bool,
}

impl<'a, T> Stats<'a, T> {
    /// Runs every query on `tree`.
    pub fn of(tree: &'a Tree<T>) -> Self {
        Self {
            height: tree.height(),
            size: tree.size(),
            leaves: tree.count_leaves(),
            halves: tree.count_halves(),
            min: tree.min().ok(),
            max: tree.max().ok(),
            perfect: tree.is_perfect(),
            balanced: tree.is_balanced(),
        }
    }
}

/// Two left-aligned cells per line. Extremes of an empty tree show as `UNDEFINED`.
impl<T> fmt::Display for Stats<'_, T>
where
    T: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn row(f: &mut fmt::Formatter<'_>, left: String, right: String) -> fmt::Result {
            writeln!(f, "{left:<CELL_WIDTH$}{right:<CELL_WIDTH$}")
        }
        fn extreme<T: fmt::Display>(item: Option<&T>) -> String {
            item.map_or_else(|| "UNDEFINED".to_owned(), ToString::to_string)
        }

        row(
            f,
            format!("height = {}", self.height),
            format!("size = {}", self.size),
        )?;
        row(
            f,
            format!("#leaves = {}", self.leaves),
            format!("#halves-nodes = {}", self.halves),
        )?;
        row(
            f,
            format!("minimum = {}", extreme(self.min)),
            format!("maximum = {}", extreme(self.max)),
        )?;
        row(
            f,
            format!("?perfect = {}", self.perfect),
            format!("?balanced = {}", self.balanced),
        )
    }
}

/// Splits a reader into whitespace-separated tokens, one line at a time.
struct Tokens<R> {
    reader: R,
    pending: VecDeque<String>,
}

impl<R> Tokens<R>
where
    R: BufRead,
{
    fn new(reader: R) -> Self {
        Self {
            reader,
            pending: VecDeque::new(),
        }
    }

    fn next_token(&mut self) -> io::Result<Option<String>> {
        loop {
            if let Some(token) = self.pending.pop_front() {
                return Ok(Some(token));
            }
            let mut line = String::new();
            if self.reader.read_line(&mut line)? == 0 {
                return Ok(None);
            }
            self.pending
                .extend(line.split_whitespace().map(str::to_owned));
        }
    }
}

type Walk = fn(&Tree<String>, &mut dyn Write) -> io::Result<()>;

/// Runs programs against a tree of words, writing what each command does to `W`. The tree
/// persists across calls to [`Interpreter::run`].
pub struct Interpreter<W> {
    tree: Tree<String>,
    out: W,
    program: String,
}

impl<W> Interpreter<W>
where
    W: Write,
{
    /// Creates an interpreter with an empty tree. `program` names the input in error messages.
    pub fn new(program: impl Into<String>, out: W) -> Self {
        Self {
            tree: Tree::new(),
            out,
            program: program.into(),
        }
    }

    /// The tree the commands have built so far.
    pub fn tree(&self) -> &Tree<String> {
        &self.tree
    }

    /// Gives back the output writer.
    pub fn into_inner(self) -> W {
        self.out
    }

    /// Reads and executes commands until `input` runs out or a command fails. Output is flushed
    /// either way.
    pub fn run<R>(&mut self, input: R) -> Result<(), InterpreterError>
    where
        R: BufRead,
    {
        let mut tokens = Tokens::new(input);
        let result = self.run_tokens(&mut tokens);
        self.out.flush()?;
        result
    }

    fn run_tokens<R>(&mut self, tokens: &mut Tokens<R>) -> Result<(), InterpreterError>
    where
        R: BufRead,
    {
        let mut executed = 0usize;
        while let Some(command) = self.next_command(tokens)? {
            self.execute(command)?;
            executed += 1;
        }
        info!(executed, size = self.tree.size(), "program finished");
        Ok(())
    }

    fn next_command<R>(&self, tokens: &mut Tokens<R>) -> Result<Option<Command>, InterpreterError>
    where
        R: BufRead,
    {
        let Some(word) = tokens.next_token()? else {
            return Ok(None);
        };
        let command = match word.as_str() {
            "trim" => Command::Trim,
            "traverse" => Command::Traverse,
            "stats" => Command::Stats,
            "insert" => Command::Insert(self.operand(tokens, "insert")?),
            "delete" => Command::Delete(self.operand(tokens, "delete")?),
            other => {
                return Err(InterpreterError::UnknownCommand {
                    program: self.program.clone(),
                    command: other.to_owned(),
                })
            }
        };
        Ok(Some(command))
    }

    fn operand<R>(
        &self,
        tokens: &mut Tokens<R>,
        command: &'static str,
    ) -> Result<String, InterpreterError>
    where
        R: BufRead,
    {
        tokens
            .next_token()?
            .ok_or_else(|| InterpreterError::MissingOperand {
                program: self.program.clone(),
                command,
            })
    }

    /// Applies a single command to the tree and writes its output.
    pub fn execute(&mut self, command: Command) -> io::Result<()> {
        debug!(?command, "executing");
        let Self { tree, out, .. } = self;
        match command {
            Command::Trim => {
                tree.trim();
                writeln!(out, "leaf nodes deleted")?;
                writeln!(out)
            }
            Command::Delete(item) => {
                tree.remove(&item);
                writeln!(out, "deleted {item}")
            }
            Command::Insert(item) => {
                writeln!(out, "inserted {item}")?;
                tree.insert(item);
                Ok(())
            }
            Command::Traverse => {
                let walks: [(&str, Walk); 3] = [
                    ("Preorder", |tree, out| {
                        tree.try_preorder_traverse(|item| writeln!(out, "{item}"))
                    }),
                    ("Inorder", |tree, out| {
                        tree.try_inorder_traverse(|item| writeln!(out, "{item}"))
                    }),
                    ("Postorder", |tree, out| {
                        tree.try_postorder_traverse(|item| writeln!(out, "{item}"))
                    }),
                ];

                writeln!(out)?;
                writeln!(out, "***Traversals***")?;
                writeln!(out, "{DOUBLE_RULE}")?;
                for (name, walk) in walks {
                    writeln!(out, "{name} Traversal")?;
                    writeln!(out, "{SINGLE_RULE}")?;
                    walk(tree, out)?;
                    writeln!(out, "{SINGLE_RULE}")?;
                }
                writeln!(out)
            }
            Command::Stats => {
                writeln!(out)?;
                writeln!(out, "***Statistics/Information***")?;
                write!(out, "{}", Stats::of(tree))?;
                writeln!(out)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(program: &str) -> (Result<(), InterpreterError>, Vec<String>, String) {
        let mut interpreter = Interpreter::new("test.txt", Vec::new());
        let result = interpreter.run(program.as_bytes());
        let items = interpreter.tree().iter().cloned().collect();
        let output = String::from_utf8(interpreter.into_inner()).unwrap();
        (result, items, output)
    }

    #[test]
    fn tokens_span_lines() {
        let mut tokens = Tokens::new("  insert\ta\n\n delete   b  \nstats".as_bytes());
        let mut seen = Vec::new();
        while let Some(token) = tokens.next_token().unwrap() {
            seen.push(token);
        }

        assert_eq!(seen, ["insert", "a", "delete", "b", "stats"]);
    }

    #[test]
    fn operand_on_next_line() {
        let (result, items, output) = run("insert\nkiwi");

        assert!(result.is_ok());
        assert_eq!(items, ["kiwi"]);
        assert_eq!(output, "inserted kiwi\n");
    }

    #[test]
    fn delete_missing_item_still_reports() {
        let (result, items, output) = run("insert a delete b");

        assert!(result.is_ok());
        assert_eq!(items, ["a"]);
        assert_eq!(output, "inserted a\ndeleted b\n");
    }

    #[test]
    fn trim_output() {
        let (result, items, output) = run("insert b insert a insert c trim");

        assert!(result.is_ok());
        assert_eq!(items, ["b"]);
        assert_eq!(
            output,
            "inserted b\ninserted a\ninserted c\nleaf nodes deleted\n\n"
        );
    }

    #[test]
    fn unknown_command_keeps_earlier_output() {
        let (result, items, output) = run("insert a\nfrobnicate b\ninsert c");

        match result {
            Err(InterpreterError::UnknownCommand { program, command }) => {
                assert_eq!(program, "test.txt");
                assert_eq!(command, "frobnicate");
            }
            other => panic!("expected an unknown command, got {other:?}"),
        }
        assert_eq!(items, ["a"]);
        assert_eq!(output, "inserted a\n");
    }

    #[test]
    fn unknown_command_message() {
        let (result, _, _) = run("list");

        assert_eq!(result.unwrap_err().to_string(), "test.txt parsing error");
    }

    #[test]
    fn missing_operand() {
        let (result, items, _) = run("insert a delete");

        assert!(matches!(
            result,
            Err(InterpreterError::MissingOperand {
                command: "delete",
                ..
            })
        ));
        assert_eq!(items, ["a"]);
    }

    #[test]
    fn stats_of_empty_tree() {
        let tree = Tree::<String>::new();
        let stats = Stats::of(&tree);

        assert_eq!(stats.height, -1);
        assert_eq!(stats.min, None);
        assert!(stats.perfect);
        assert!(stats.balanced);
        assert_eq!(
            stats.to_string(),
            concat!(
                "height = -1         size = 0            \n",
                "#leaves = 0         #halves-nodes = 0   \n",
                "minimum = UNDEFINED maximum = UNDEFINED \n",
                "?perfect = true     ?balanced = true    \n",
            )
        );
    }

    #[test]
    fn stats_cells_wider_than_padding() {
        let tree: Tree<_> = ["an-unreasonably-long-word".to_owned()].into_iter().collect();

        let text = Stats::of(&tree).to_string();
        let minimum = text.lines().nth(2).unwrap();

        assert_eq!(
            minimum,
            "minimum = an-unreasonably-long-wordmaximum = an-unreasonably-long-word"
        );
    }
}
