// Log records

use crate::output::Source;
use std::time::Duration;

/// One logged callback
///
/// Start records carry an `ok` flag that the collector clears when a later
/// failure is attributed to them.
#[derive(Debug, Clone, PartialEq)]
pub enum Record {
    Finished {
        tests: usize,
        time: Duration,
    },
    SuiteStart {
        tests: usize,
        name: String,
        ok: bool,
    },
    SuiteEnd {
        tests: usize,
        name: String,
        ok: bool,
        time: Duration,
    },
    TestStart {
        name: String,
        ok: bool,
    },
    TestEnd {
        name: String,
        ok: bool,
        time: Duration,
    },
    Assertment {
        source: Source,
    },
}

impl Record {
    /// Pass/fail state, for the records that have one
    pub fn ok(&self) -> Option<bool> {
        match self {
            Record::SuiteStart { ok, .. }
            | Record::SuiteEnd { ok, .. }
            | Record::TestStart { ok, .. }
            | Record::TestEnd { ok, .. } => Some(*ok),
            Record::Finished { .. } | Record::Assertment { .. } => None,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Record::Finished { .. } => "finished",
            Record::SuiteStart { .. } => "suite_start",
            Record::SuiteEnd { .. } => "suite_end",
            Record::TestStart { .. } => "test_start",
            Record::TestEnd { .. } => "test_end",
            Record::Assertment { .. } => "assertment",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ok_only_on_start_and_end_records() {
        let finished = Record::Finished {
            tests: 1,
            time: Duration::ZERO,
        };
        let assertment = Record::Assertment {
            source: Source::default(),
        };
        let test_end = Record::TestEnd {
            name: "t".to_string(),
            ok: false,
            time: Duration::ZERO,
        };

        assert_eq!(finished.ok(), None);
        assert_eq!(assertment.ok(), None);
        assert_eq!(test_end.ok(), Some(false));
        assert_eq!(test_end.kind(), "test_end");
    }
}
