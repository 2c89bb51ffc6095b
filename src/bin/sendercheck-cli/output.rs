use anyhow::{Result, bail};

use crate::args::Cli;
use sendercheck_lib::{CheckResult, FailAction, SuiteReport, Verdict};

pub fn write_report(report: &SuiteReport, cli: &Cli) -> Result<()> {
    match cli.format.as_str() {
        "human" => write_human(report),
        "json" => write_json(report),
        other => bail!("unknown --format '{other}', use: human|json"),
    }
}

fn write_human(report: &SuiteReport) -> Result<()> {
    for outcome in &report.outcomes {
        match &outcome.result {
            CheckResult::Pass => println!("[PASS]  {}", outcome.check),
            CheckResult::Fail(failure) => {
                let tag = match outcome.action {
                    FailAction::Ignore => "[WARN]",
                    FailAction::Quarantine | FailAction::Reject if failure.is_temporary() => {
                        "[TEMP]"
                    }
                    FailAction::Quarantine | FailAction::Reject => "[FAIL]",
                };
                println!("{tag}  {failure}");
            }
        }
    }

    match &report.verdict {
        Verdict::Accept => println!("verdict: accept"),
        Verdict::Quarantine { checks } => {
            let names = checks
                .iter()
                .map(|check| check.name())
                .collect::<Vec<_>>()
                .join(", ");
            println!("verdict: quarantine ({names})");
        }
        Verdict::Reject { reply } => println!("verdict: reject -> {reply}"),
    }
    Ok(())
}

#[cfg(feature = "with-serde")]
fn write_json(report: &SuiteReport) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(report)?);
    Ok(())
}

#[cfg(not(feature = "with-serde"))]
fn write_json(_report: &SuiteReport) -> Result<()> {
    bail!("format=json nécessite la feature 'with-serde'")
}
