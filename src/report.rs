// Turns per-session counts into the printed correct-usage-rate report.

use std::fmt;
use std::io::{self, Write};

use crate::error::{CurError, Result};
use crate::transcript::{ChildCounters, SessionCounts};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ReportMode {
    // Only sessions with at least one correct usage. Sessions that only ever
    // over-regularized are left out, matching how the report was always built.
    #[default]
    CorrectUsageDriven,
    // Every session with any CU or OR token; OR-only sessions report 0.00%.
    AllSessions,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ReportLine {
    pub session: String,
    pub counters: ChildCounters,
    pub rate: f64,
}

impl fmt::Display for ReportLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} CUs, {} ORs; CUR: {:.2}%",
            self.session,
            group_thousands(self.counters.cu_count),
            group_thousands(self.counters.or_count),
            self.rate
        )
    }
}

// 1234567 -> "1,234,567"
pub fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, digit) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    grouped
}

pub fn build_report(counts: &SessionCounts, mode: ReportMode) -> Result<Vec<ReportLine>> {
    counts
        .iter()
        .filter(|(_, counters)| match mode {
            ReportMode::CorrectUsageDriven => counters.cu_count > 0,
            ReportMode::AllSessions => true,
        })
        .map(|(session, counters)| {
            let rate = counters
                .correct_usage_rate()
                .ok_or_else(|| CurError::ArithmeticFault {
                    session: session.clone(),
                })?;
            Ok(ReportLine {
                session: session.clone(),
                counters: *counters,
                rate,
            })
        })
        .collect()
}

pub fn write_report<W: Write>(lines: &[ReportLine], out: &mut W) -> io::Result<()> {
    for line in lines {
        writeln!(out, "{}", line)?;
    }
    out.flush()
}
