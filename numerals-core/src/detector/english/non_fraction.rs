//! Multi-word cardinal chains: "three hundred and six", "five billion five million"

use std::mem;
use std::sync::Arc;

use rust_decimal::Decimal;

use super::basic::BasicNumberAcceptor;
use super::{Advance, BasicRun, Consumption, NumberRun, Pass, WordForm};
use crate::model::NumberModel;
use crate::types::BasicNumberType;

/// Where a chain is between words
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    /// Just added a magnitude ("five million"); a new group may follow
    AfterMagnitude,
    /// Holding a run that "hundred" or a magnitude may scale
    HasBasic,
    /// Saw "hundred"; the tens and units of the group may follow
    Rank01,
    /// The group is complete; only a magnitude can extend it
    PastFirstPart,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Chain {
    begin: usize,
    end: usize,
    /// Sum of the groups already scaled by a magnitude
    total: Decimal,
    /// The hundreds group being built
    group: Decimal,
    stage: Stage,
    /// An "and" was absorbed after the last word
    conjunction: bool,
}

impl Chain {
    fn value(&self) -> Option<Decimal> {
        self.total.checked_add(self.group)
    }

    /// The group times one hundred
    fn hundreds(&self) -> Option<Decimal> {
        self.group.checked_mul(Decimal::ONE_HUNDRED)
    }

    /// Add a run to the group; `None` when the sum does not fit
    fn plus(&self, run: u32) -> Option<Decimal> {
        self.group.checked_add(Decimal::from(run))
    }

    /// Total with the pending group scaled by `1000^exponent`
    fn scaled(&self, exponent: u32) -> Option<Decimal> {
        let mut magnitude = Decimal::ONE;
        for _ in 0..exponent {
            magnitude = magnitude.checked_mul(Decimal::ONE_THOUSAND)?;
        }
        self.group
            .checked_mul(magnitude)?
            .checked_add(self.total)
    }

    fn run(&self, value: Decimal, form: WordForm) -> NumberRun {
        NumberRun {
            begin: self.begin,
            end: self.end,
            value,
            form,
            conjunction: self.conjunction,
        }
    }
}

#[derive(Debug, Default)]
enum ChainState {
    #[default]
    Idle,
    Partial(Chain),
}

/// Accumulates numeral runs joined by "hundred" and magnitude words into a
/// single value.
///
/// In the [`Pass::Denominator`] pass it also recognizes denominator forms
/// ("hundredths", "thousandths", "fifths") as the end of a chain.
#[derive(Debug)]
pub struct NonFractionAcceptor {
    model: Arc<NumberModel>,
    basic: BasicNumberAcceptor,
    state: ChainState,
}

impl NonFractionAcceptor {
    pub fn new(model: Arc<NumberModel>) -> Self {
        Self {
            basic: BasicNumberAcceptor::new(Arc::clone(&model)),
            model,
            state: ChainState::Idle,
        }
    }

    pub fn in_progress(&self) -> bool {
        matches!(self.state, ChainState::Partial(_)) || self.basic.in_progress()
    }

    pub fn reset(&mut self) {
        self.state = ChainState::Idle;
        self.basic.reset();
    }

    pub fn try_token(&mut self, text: &str, begin: usize, end: usize, pass: Pass) -> Advance<NumberRun> {
        match mem::take(&mut self.state) {
            ChainState::Idle => self.start(text, begin, end, pass),
            ChainState::Partial(chain) => self.extend(chain, text, begin, end, pass),
        }
    }

    /// Flush whatever has been accumulated
    pub fn finish(&mut self) -> Option<NumberRun> {
        let pending = self.basic.finish();

        match mem::take(&mut self.state) {
            ChainState::Idle => pending.map(NumberRun::from),
            ChainState::Partial(mut chain) => {
                if let Some(run) = pending {
                    match chain.plus(run.value) {
                        Some(group) => {
                            chain.group = group;
                            chain.end = run.end;
                            chain.conjunction = false;
                        }
                        None => tracing::debug!(begin = run.begin, "group overflow, run dropped"),
                    }
                }
                chain.value().map(|value| chain.run(value, WordForm::Cardinal))
            }
        }
    }

    fn start(&mut self, text: &str, begin: usize, end: usize, pass: Pass) -> Advance<NumberRun> {
        match self.basic.try_token(text, begin, end, pass) {
            Advance::NoMatch => match standalone_denominator(&self.model, text, pass) {
                Some(value) => Advance::Complete(
                    NumberRun {
                        begin,
                        end,
                        value,
                        form: WordForm::Denominator,
                        conjunction: false,
                    },
                    Consumption::Consumed,
                ),
                None => Advance::NoMatch,
            },
            Advance::Continue => Advance::Continue,
            Advance::Complete(run, consumption) if run.form != WordForm::Cardinal => {
                Advance::Complete(NumberRun::from(run), consumption)
            }
            Advance::Complete(run, consumption) => {
                let chain = Chain {
                    begin: run.begin,
                    end: run.end,
                    total: Decimal::ZERO,
                    group: Decimal::from(run.value),
                    stage: Stage::HasBasic,
                    conjunction: false,
                };
                self.continue_with(chain, consumption, text, begin, end, pass)
            }
        }
    }

    fn extend(
        &mut self,
        mut chain: Chain,
        text: &str,
        begin: usize,
        end: usize,
        pass: Pass,
    ) -> Advance<NumberRun> {
        match chain.stage {
            Stage::AfterMagnitude | Stage::Rank01
                if !self.basic.in_progress() && text.eq_ignore_ascii_case("and") =>
            {
                chain.conjunction = true;
                self.state = ChainState::Partial(chain);
                Advance::Continue
            }
            Stage::AfterMagnitude => match self.basic.try_token(text, begin, end, pass) {
                Advance::NoMatch => Self::complete(chain, Consumption::Retry),
                Advance::Continue => {
                    self.state = ChainState::Partial(chain);
                    Advance::Continue
                }
                Advance::Complete(run, consumption) => {
                    if run.form != WordForm::Cardinal {
                        // "one thousand and first"
                        return Self::complete_with(chain, run, consumption);
                    }
                    chain.group = Decimal::from(run.value);
                    chain.end = run.end;
                    chain.stage = Stage::HasBasic;
                    chain.conjunction = false;
                    self.continue_with(chain, consumption, text, begin, end, pass)
                }
            },
            Stage::HasBasic => {
                if text.eq_ignore_ascii_case("hundred") {
                    chain.group = match chain.hundreds() {
                        Some(group) => group,
                        None => return Self::overflow(chain, text),
                    };
                    chain.end = end;
                    chain.stage = Stage::Rank01;
                    self.state = ChainState::Partial(chain);
                    Advance::Continue
                } else if text.eq_ignore_ascii_case("hundredth") {
                    chain.group = match chain.hundreds() {
                        Some(group) => group,
                        None => return Self::overflow(chain, text),
                    };
                    chain.end = end;
                    let form = match pass {
                        Pass::Numerator => WordForm::Ordinal,
                        Pass::Denominator => WordForm::Denominator,
                    };
                    Self::complete_as(chain, form)
                } else if text.eq_ignore_ascii_case("hundredths") {
                    match pass {
                        // leave it to the denominator pass: "three hundredths"
                        Pass::Numerator => Self::complete(chain, Consumption::Retry),
                        Pass::Denominator => {
                            chain.group = match chain.hundreds() {
                                Some(group) => group,
                                None => return Self::overflow(chain, text),
                            };
                            chain.end = end;
                            Self::complete_as(chain, WordForm::Denominator)
                        }
                    }
                } else {
                    self.magnitude(chain, text, end, pass)
                }
            }
            Stage::Rank01 => match self.basic.try_token(text, begin, end, pass) {
                Advance::NoMatch => self.magnitude(chain, text, end, pass),
                Advance::Continue => {
                    self.state = ChainState::Partial(chain);
                    Advance::Continue
                }
                Advance::Complete(run, consumption) => {
                    if run.form != WordForm::Cardinal {
                        // "one hundred fifth"
                        return Self::complete_with(chain, run, consumption);
                    }
                    chain.group = match chain.plus(run.value) {
                        Some(group) => group,
                        None => return Self::overflow(chain, text),
                    };
                    chain.end = run.end;
                    chain.stage = Stage::PastFirstPart;
                    chain.conjunction = false;
                    self.continue_with(chain, consumption, text, begin, end, pass)
                }
            },
            Stage::PastFirstPart => self.magnitude(chain, text, end, pass),
        }
    }

    /// Park the chain, or re-read the token that completed its last run
    fn continue_with(
        &mut self,
        chain: Chain,
        consumption: Consumption,
        text: &str,
        begin: usize,
        end: usize,
        pass: Pass,
    ) -> Advance<NumberRun> {
        match consumption {
            Consumption::Consumed => {
                self.state = ChainState::Partial(chain);
                Advance::Continue
            }
            Consumption::Retry => self.extend(chain, text, begin, end, pass),
        }
    }

    /// Try `text` as a magnitude word, otherwise close the chain
    fn magnitude(&mut self, mut chain: Chain, text: &str, end: usize, pass: Pass) -> Advance<NumberRun> {
        if let Some(definition) = self
            .model
            .number_definition(text)
            .filter(|d| d.kind == BasicNumberType::Magnitude)
        {
            return match chain.scaled(definition.value) {
                Some(total) => {
                    chain.total = total;
                    chain.group = Decimal::ZERO;
                    chain.end = end;
                    chain.stage = Stage::AfterMagnitude;
                    chain.conjunction = false;
                    self.state = ChainState::Partial(chain);
                    Advance::Continue
                }
                None => Self::overflow(chain, text),
            };
        }

        let variant = match pass {
            Pass::Denominator => self
                .model
                .denominator(text)
                .map(|d| (d, WordForm::Denominator))
                .or_else(|| self.model.ordinal(text).map(|d| (d, WordForm::Ordinal))),
            Pass::Numerator => self.model.ordinal(text).map(|d| (d, WordForm::Ordinal)),
        };

        match variant {
            Some((definition, form)) if definition.kind == BasicNumberType::Magnitude => {
                match chain.scaled(definition.value) {
                    Some(value) => {
                        chain.end = end;
                        chain.conjunction = false;
                        Advance::Complete(chain.run(value, form), Consumption::Consumed)
                    }
                    None => Self::overflow(chain, text),
                }
            }
            _ => Self::complete(chain, Consumption::Retry),
        }
    }

    /// `text` would push the chain past what a `Decimal` holds; end the
    /// number before it
    fn overflow(chain: Chain, text: &str) -> Advance<NumberRun> {
        tracing::debug!(word = text, "numeral overflow, closing number");
        Self::complete(chain, Consumption::Retry)
    }

    fn complete(chain: Chain, consumption: Consumption) -> Advance<NumberRun> {
        match chain.value() {
            Some(value) => Advance::Complete(chain.run(value, WordForm::Cardinal), consumption),
            None => Advance::NoMatch,
        }
    }

    fn complete_as(chain: Chain, form: WordForm) -> Advance<NumberRun> {
        match chain.value() {
            Some(value) => Advance::Complete(chain.run(value, form), Consumption::Consumed),
            None => Advance::NoMatch,
        }
    }

    /// Close the chain with a final ordinal or denominator run
    fn complete_with(mut chain: Chain, run: BasicRun, consumption: Consumption) -> Advance<NumberRun> {
        let Some(group) = chain.plus(run.value) else {
            tracing::debug!(begin = run.begin, "numeral overflow, closing number");
            return Self::complete(chain, Consumption::Retry);
        };
        chain.group = group;
        chain.end = run.end;
        chain.conjunction = false;
        match chain.value() {
            Some(value) => Advance::Complete(chain.run(value, run.form), consumption),
            None => Advance::NoMatch,
        }
    }
}

/// Words that are a whole denominator by themselves: "hundredths", "thousandths"
fn standalone_denominator(model: &NumberModel, text: &str, pass: Pass) -> Option<Decimal> {
    if pass != Pass::Denominator {
        return None;
    }
    if text.eq_ignore_ascii_case("hundredth") || text.eq_ignore_ascii_case("hundredths") {
        return Some(Decimal::ONE_HUNDRED);
    }
    let definition = model
        .denominator(text)
        .filter(|d| d.kind == BasicNumberType::Magnitude)?;
    let mut value = Decimal::ONE;
    for _ in 0..definition.value {
        value = value.checked_mul(Decimal::ONE_THOUSAND)?;
    }
    Some(value)
}
