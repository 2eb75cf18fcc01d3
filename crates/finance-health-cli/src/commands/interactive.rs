use clap::Args;
use serde_json::Value;
use std::io::{self, BufRead, Write};

use finance_health_core::health::ReportOptions;

use crate::session::{InputProvider, OutputSink, Session};

/// Arguments for the interactive session
#[derive(Args, Default)]
pub struct InteractiveArgs {
    /// Append "why these issues matter" notes to every report
    #[arg(long)]
    pub explain: bool,
}

/// Prompts on stdout, reads answers from stdin.
struct ConsoleInput<R> {
    reader: R,
}

impl<R: BufRead> InputProvider for ConsoleInput<R> {
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        let mut stdout = io::stdout().lock();
        write!(stdout, "{prompt}")?;
        stdout.flush()?;

        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }
}

struct ConsoleOutput;

impl OutputSink for ConsoleOutput {
    fn emit(&mut self, text: &str) -> io::Result<()> {
        writeln!(io::stdout().lock(), "{text}")
    }
}

pub fn run_interactive(args: InteractiveArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let options = ReportOptions {
        explain: args.explain,
    };
    let input = ConsoleInput {
        reader: io::stdin().lock(),
    };
    Session::new(input, ConsoleOutput, options).run()?;
    Ok(Value::Null)
}
