//! Confusion-matrix accumulator.

use std::fmt;

use opgraph_core::Status;
use serde::{Deserialize, Serialize};

/// True/false positive/negative tallies, malicious being the positive class.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfusionMatrix {
    pub tp: u64,
    pub tn: u64,
    pub fp: u64,
    #[serde(rename = "fn")]
    pub fn_: u64,
}

impl ConfusionMatrix {
    /// Scores one classified node.
    pub fn record(&mut self, actual: Status, guessed: Status) {
        match (actual, guessed) {
            (Status::Honest, Status::Honest) => self.tn += 1,
            (Status::Honest, Status::Malicious) => self.fp += 1,
            (Status::Malicious, Status::Honest) => self.fn_ += 1,
            (Status::Malicious, Status::Malicious) => self.tp += 1,
        }
    }

    /// Number of nodes scored so far.
    pub fn total(&self) -> u64 {
        self.tp + self.tn + self.fp + self.fn_
    }

    pub fn accuracy(&self) -> f64 {
        ratio(self.tp + self.tn, self.total())
    }

    pub fn precision(&self) -> f64 {
        ratio(self.tp, self.tp + self.fp)
    }

    pub fn recall(&self) -> f64 {
        ratio(self.tp, self.tp + self.fn_)
    }
}

fn ratio(num: u64, den: u64) -> f64 {
    if den == 0 {
        0.0
    } else {
        num as f64 / den as f64
    }
}

impl fmt::Display for ConfusionMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "TP {} : TN {} : FP {} : FN {} = {}",
            self.tp,
            self.tn,
            self.fp,
            self.fn_,
            self.total()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn each_cell_of_the_table() {
        let mut m = ConfusionMatrix::default();
        m.record(Status::Honest, Status::Honest);
        m.record(Status::Honest, Status::Malicious);
        m.record(Status::Malicious, Status::Honest);
        m.record(Status::Malicious, Status::Malicious);
        m.record(Status::Malicious, Status::Malicious);
        assert_eq!(
            m,
            ConfusionMatrix {
                tp: 2,
                tn: 1,
                fp: 1,
                fn_: 1
            }
        );
        assert_eq!(m.total(), 5);
    }

    #[test]
    fn derived_metrics() {
        let m = ConfusionMatrix {
            tp: 3,
            tn: 5,
            fp: 1,
            fn_: 1,
        };
        assert!((m.accuracy() - 0.8).abs() < 1e-12);
        assert!((m.precision() - 0.75).abs() < 1e-12);
        assert!((m.recall() - 0.75).abs() < 1e-12);
    }

    #[test]
    fn empty_denominators_are_zero() {
        let m = ConfusionMatrix::default();
        assert_eq!(m.accuracy(), 0.0);
        assert_eq!(m.precision(), 0.0);
        assert_eq!(m.recall(), 0.0);
    }

    #[test]
    fn summary_line() {
        let m = ConfusionMatrix {
            tp: 0,
            tn: 3,
            fp: 0,
            fn_: 0,
        };
        assert_eq!(m.to_string(), "TP 0 : TN 3 : FP 0 : FN 0 = 3");
    }

    #[test]
    fn json_uses_fn_key() {
        let json = serde_json::to_value(ConfusionMatrix {
            tp: 1,
            tn: 2,
            fp: 3,
            fn_: 4,
        })
        .unwrap();
        assert_eq!(json["fn"], 4);
        assert_eq!(json["tp"], 1);
    }
}
