//! Single numeral runs: a unit, a teen, a decade, or decade-hyphen-unit

use std::mem;
use std::sync::Arc;

use super::{classify, Advance, BasicRun, Consumption, Pass, WordForm};
use crate::model::NumberModel;
use crate::types::BasicNumberType;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
enum BasicState {
    #[default]
    Idle,
    Decade {
        value: u32,
        begin: usize,
        end: usize,
    },
    DecadeHyphen {
        value: u32,
        begin: usize,
        end: usize,
    },
}

/// Recognizes one English numeral run such as "seven", "twelve", "forty"
/// or "forty-five".
///
/// A decade word is held until the next token shows whether a unit follows.
#[derive(Debug)]
pub struct BasicNumberAcceptor {
    model: Arc<NumberModel>,
    state: BasicState,
}

impl BasicNumberAcceptor {
    pub fn new(model: Arc<NumberModel>) -> Self {
        Self {
            model,
            state: BasicState::Idle,
        }
    }

    pub fn in_progress(&self) -> bool {
        self.state != BasicState::Idle
    }

    pub fn reset(&mut self) {
        self.state = BasicState::Idle;
    }

    pub fn try_token(&mut self, text: &str, begin: usize, end: usize, pass: Pass) -> Advance<BasicRun> {
        let word = classify(&self.model, text, pass);

        match mem::take(&mut self.state) {
            BasicState::Idle => match word {
                Some((definition, form))
                    if matches!(
                        definition.kind,
                        BasicNumberType::Unit | BasicNumberType::Teen
                    ) =>
                {
                    Advance::Complete(
                        BasicRun {
                            begin,
                            end,
                            value: definition.value,
                            form,
                        },
                        Consumption::Consumed,
                    )
                }
                Some((definition, form)) if definition.kind == BasicNumberType::Decade => {
                    if form == WordForm::Cardinal {
                        self.state = BasicState::Decade {
                            value: definition.value,
                            begin,
                            end,
                        };
                        Advance::Continue
                    } else {
                        // "fortieth", "fortieths"
                        Advance::Complete(
                            BasicRun {
                                begin,
                                end,
                                value: definition.value,
                                form,
                            },
                            Consumption::Consumed,
                        )
                    }
                }
                _ => Advance::NoMatch,
            },
            BasicState::Decade {
                value,
                begin: run_begin,
                end: run_end,
            } if text == "-" => {
                self.state = BasicState::DecadeHyphen {
                    value,
                    begin: run_begin,
                    end: run_end,
                };
                Advance::Continue
            }
            BasicState::Decade {
                value,
                begin: run_begin,
                end: run_end,
            }
            | BasicState::DecadeHyphen {
                value,
                begin: run_begin,
                end: run_end,
            } => {
                // "forty" + "five"; a sum past u32 leaves the decade alone
                let combined = word
                    .filter(|(d, _)| d.kind == BasicNumberType::Unit && d.value > 0)
                    .and_then(|(d, form)| value.checked_add(d.value).map(|sum| (sum, form)));

                match combined {
                    Some((sum, form)) => Advance::Complete(
                        BasicRun {
                            begin: run_begin,
                            end,
                            value: sum,
                            form,
                        },
                        Consumption::Consumed,
                    ),
                    None => Advance::Complete(
                        BasicRun {
                            begin: run_begin,
                            end: run_end,
                            value,
                            form: WordForm::Cardinal,
                        },
                        Consumption::Retry,
                    ),
                }
            }
        }
    }

    /// Flush a dangling decade at end of input
    pub fn finish(&mut self) -> Option<BasicRun> {
        match mem::take(&mut self.state) {
            BasicState::Idle => None,
            BasicState::Decade { value, begin, end }
            | BasicState::DecadeHyphen { value, begin, end } => Some(BasicRun {
                begin,
                end,
                value,
                form: WordForm::Cardinal,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn acceptor() -> BasicNumberAcceptor {
        BasicNumberAcceptor::new(NumberModel::embedded().unwrap())
    }

    fn complete(advance: Advance<BasicRun>) -> (BasicRun, Consumption) {
        match advance {
            Advance::Complete(run, consumption) => (run, consumption),
            other => panic!("expected a completed run, got {other:?}"),
        }
    }

    #[test]
    fn test_unit_and_teen_complete_immediately() {
        let mut basic = acceptor();
        let (run, consumption) = complete(basic.try_token("seven", 0, 5, Pass::Numerator));
        assert_eq!(run.value, 7);
        assert_eq!(consumption, Consumption::Consumed);

        let (run, _) = complete(basic.try_token("Thirteen", 6, 14, Pass::Numerator));
        assert_eq!(run.value, 13);
        assert_eq!((run.begin, run.end), (6, 14));
        assert!(!basic.in_progress());
    }

    #[test]
    fn test_decade_waits_for_unit() {
        let mut basic = acceptor();
        assert_eq!(basic.try_token("forty", 0, 5, Pass::Numerator), Advance::Continue);
        let (run, consumption) = complete(basic.try_token("five", 6, 10, Pass::Numerator));
        assert_eq!(run.value, 45);
        assert_eq!((run.begin, run.end), (0, 10));
        assert_eq!(consumption, Consumption::Consumed);
    }

    #[test]
    fn test_decade_hyphen_unit() {
        let mut basic = acceptor();
        basic.try_token("twenty", 0, 6, Pass::Numerator);
        assert_eq!(basic.try_token("-", 6, 7, Pass::Numerator), Advance::Continue);
        let (run, _) = complete(basic.try_token("one", 7, 10, Pass::Numerator));
        assert_eq!(run.value, 21);
        assert_eq!((run.begin, run.end), (0, 10));
    }

    #[test]
    fn test_decade_then_other_word_retries() {
        let mut basic = acceptor();
        basic.try_token("forty", 0, 5, Pass::Numerator);
        let (run, consumption) = complete(basic.try_token("people", 6, 12, Pass::Numerator));
        assert_eq!(run.value, 40);
        assert_eq!(run.end, 5);
        assert_eq!(consumption, Consumption::Retry);
        assert!(!basic.in_progress());
    }

    #[test]
    fn test_decade_unit_sum_past_u32() {
        let model = NumberModel::builder()
            .number("vast", 4_000_000_000, BasicNumberType::Decade)
            .number("huge", 400_000_000, BasicNumberType::Unit)
            .build();
        let mut basic = BasicNumberAcceptor::new(Arc::new(model));

        basic.try_token("vast", 0, 4, Pass::Numerator);
        let (run, consumption) = complete(basic.try_token("huge", 5, 9, Pass::Numerator));
        assert_eq!(run.value, 4_000_000_000);
        assert_eq!(run.end, 4);
        assert_eq!(consumption, Consumption::Retry);
    }

    #[test]
    fn test_decade_ordinal_and_denominator_forms() {
        let mut basic = acceptor();
        let (run, _) = complete(basic.try_token("fortieth", 0, 8, Pass::Numerator));
        assert_eq!(run.form, WordForm::Ordinal);
        assert_eq!(run.value, 40);

        basic.try_token("forty", 0, 5, Pass::Denominator);
        let (run, _) = complete(basic.try_token("sixths", 6, 12, Pass::Denominator));
        assert_eq!(run.form, WordForm::Denominator);
        assert_eq!(run.value, 46);
    }

    #[test]
    fn test_denominator_only_word_outside_denominator_pass() {
        let mut basic = acceptor();
        assert_eq!(basic.try_token("sixths", 0, 6, Pass::Numerator), Advance::NoMatch);
    }

    #[test]
    fn test_non_numeral_rejected() {
        let mut basic = acceptor();
        assert_eq!(basic.try_token("apple", 0, 5, Pass::Numerator), Advance::NoMatch);
        assert_eq!(basic.try_token("thousand", 0, 8, Pass::Numerator), Advance::NoMatch);
        assert_eq!(basic.try_token("-", 0, 1, Pass::Numerator), Advance::NoMatch);
    }

    #[test]
    fn test_finish_flushes_decade() {
        let mut basic = acceptor();
        assert!(basic.finish().is_none());
        basic.try_token("ninety", 0, 6, Pass::Numerator);
        basic.try_token("-", 6, 7, Pass::Numerator);
        let run = basic.finish().unwrap();
        assert_eq!(run.value, 90);
        assert!(!basic.in_progress());
    }
}
