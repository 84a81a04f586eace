//! The state of one tutoring dialogue, and how each phase reacts to the student's reply.

use crate::{config::TutorConfig, matcher, messages, Diagnostic};
use domain_solve::{
    component::Component,
    condition::Condition,
    notation::{parse_answer, render, render_chain},
    set::SolutionSet,
    solve::solve,
};
use tracing::{debug, info};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// What the tutor is waiting for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Phase {
    /// The condition imposed by the current component.
    AwaitingCondition,

    /// The solution set of the current component's condition.
    AwaitingSolution,

    /// The domain of definition of the whole function.
    AwaitingDomain,
}

/// A restricting sub-expression, with its condition and the exact solutions of that condition,
/// all computed when the session starts.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Step {
    pub component: Component,
    pub condition: Condition,

    /// [`None`] if the condition could not be solved exactly.
    pub solution: Option<SolutionSet>,
}

/// How many of the student's answers were right.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Score {
    pub correct: usize,
    pub total: usize,
}

impl Score {
    fn record(&mut self, correct: bool) {
        self.total += 1;
        if correct {
            self.correct += 1;
        }
    }
}

/// A tutoring session for one function.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Session {
    function: String,
    steps: Vec<Step>,
    cursor: usize,
    accumulated: Vec<Option<SolutionSet>>,
    phase: Phase,
    retry: bool,
    score: Score,
}

impl Session {
    /// Creates a session for the given normalized function expression and its components, which
    /// must not be empty. Every condition is solved right away; the conditions that cannot be
    /// solved exactly are returned as diagnostics.
    pub fn new(function: String, components: Vec<Component>) -> (Self, Vec<Diagnostic>) {
        let mut diagnostics = Vec::new();
        let steps = components.into_iter()
            .map(|component| {
                let condition = Condition::from(&component);
                let solution = match solve(&condition) {
                    Ok(set) => Some(set),
                    Err(error) => {
                        diagnostics.push(Diagnostic { source: function.clone(), error });
                        None
                    },
                };
                debug!(%condition, solved = solution.is_some(), "precomputed step");
                Step { component, condition, solution }
            })
            .collect();

        let session = Self {
            function,
            steps,
            cursor: 0,
            accumulated: Vec::new(),
            phase: Phase::AwaitingCondition,
            retry: false,
            score: Score::default(),
        };
        (session, diagnostics)
    }

    /// The normalized function expression.
    pub fn function(&self) -> &str {
        &self.function
    }

    /// The components of the function, in the order they are asked about.
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// The index of the component being asked about.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// The solution sets of the components already dealt with.
    pub fn accumulated(&self) -> &[Option<SolutionSet>] {
        &self.accumulated
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Whether the student missed the condition of the current component.
    pub fn retry(&self) -> bool {
        self.retry
    }

    pub fn score(&self) -> Score {
        self.score
    }

    /// The intersection of the solution sets accumulated so far, which is the domain of definition
    /// once every component is dealt with. [`None`] if one of them could not be solved.
    pub fn domain(&self) -> Option<SolutionSet> {
        let sets = self.accumulated.iter()
            .map(Option::as_ref)
            .collect::<Option<Vec<_>>>()?;
        Some(SolutionSet::intersect_all(sets))
    }

    /// The question about the current component's condition.
    pub fn ask_condition(&self) -> String {
        messages::ask_condition(self.cursor + 1, self.steps.len(), &self.steps[self.cursor].component)
    }

    /// Judges the condition given by the student, then asks for its solutions. The dialogue moves
    /// on even if the condition is wrong, after explaining the rule.
    pub fn answer_condition(&mut self, reply: &str) -> String {
        let step = &self.steps[self.cursor];
        let correct = matcher::matches_condition(reply, &step.condition, step.solution.as_ref());
        let feedback = if correct {
            messages::condition_correct(&step.condition)
        } else {
            messages::condition_missed(&step.condition)
        };
        let question = messages::ask_solution(&step.condition);

        self.score.record(correct);
        self.retry = !correct;
        self.phase = Phase::AwaitingSolution;
        info!(cursor = self.cursor, correct, "condition answered");
        format!("{}\n{}", feedback, question)
    }

    /// Judges the solution set given by the student, then moves on to the next component or to
    /// the final question.
    pub fn answer_solution(&mut self, reply: &str, config: &TutorConfig, diagnostics: &mut Vec<Diagnostic>) -> String {
        let step = &self.steps[self.cursor];
        let feedback = match &step.solution {
            None => messages::solution_unverifiable(&step.condition),
            Some(expected) => {
                let described = describe(expected, config);
                if matcher::is_giving_up(reply) {
                    self.score.record(false);
                    messages::solution_revealed(&described)
                } else {
                    match parse_answer(reply) {
                        Ok(answer) => {
                            let correct = answer == *expected;
                            self.score.record(correct);
                            if correct {
                                messages::solution_correct(&described)
                            } else {
                                messages::solution_wrong(&described)
                            }
                        },
                        Err(error) => {
                            diagnostics.push(Diagnostic { source: reply.to_string(), error });
                            self.score.record(false);
                            messages::solution_unreadable(&described)
                        },
                    }
                }
            },
        };

        // the computed solution is kept, whatever the student answered
        self.accumulated.push(step.solution.clone());
        self.cursor += 1;
        self.retry = false;
        info!(cursor = self.cursor, total = self.steps.len(), "session advanced");

        if self.cursor < self.steps.len() {
            self.phase = Phase::AwaitingCondition;
            format!("{}\n\n{}", feedback, self.ask_condition())
        } else {
            self.phase = Phase::AwaitingDomain;
            format!("{}\n\n{}", feedback, self.recap(config))
        }
    }

    /// Lists every component with its condition and solutions, and asks for the domain.
    pub fn recap(&self, config: &TutorConfig) -> String {
        let lines = self.steps.iter()
            .map(|step| {
                let set = step.solution.as_ref().map(|set| describe(set, config));
                messages::recap_line(&step.component, &step.condition, set.as_deref())
            })
            .collect::<Vec<_>>();
        messages::recap(&lines)
    }

    /// Judges the domain given by the student and gives the right one. The session is over after
    /// this reply, whatever it was.
    pub fn answer_domain(&mut self, reply: &str, config: &TutorConfig, diagnostics: &mut Vec<Diagnostic>) -> String {
        let Some(domain) = self.domain() else {
            let conditions = self.steps.iter().map(|step| &step.condition).collect::<Vec<_>>();
            return messages::domain_as_conditions(&conditions, &self.score);
        };

        let described = describe(&domain, config);
        if matcher::is_giving_up(reply) {
            self.score.record(false);
            return messages::domain_wrong(&described, &self.score);
        }

        match parse_answer(reply) {
            Ok(answer) if answer == domain => {
                self.score.record(true);
                messages::domain_correct(&described, &self.score)
            },
            Ok(_) => {
                self.score.record(false);
                messages::domain_wrong(&described, &self.score)
            },
            Err(error) => {
                diagnostics.push(Diagnostic { source: reply.to_string(), error });
                self.score.record(false);
                messages::domain_unreadable(&described, &self.score)
            },
        }
    }
}

/// Writes the set in the configured notation, followed by its inequalities if asked to.
fn describe(set: &SolutionSet, config: &TutorConfig) -> String {
    let rendered = render(set, config.notation);
    if config.show_chain {
        format!("{} (c'est-à-dire {})", rendered, render_chain(set))
    } else {
        rendered
    }
}

#[cfg(test)]
mod tests {
    use domain_solve::component::extract;
    use pretty_assertions::assert_eq;
    use super::*;

    fn session(expr: &str) -> Session {
        Session::new(expr.to_string(), extract(expr).unwrap()).0
    }

    #[test]
    fn steps_are_precomputed() {
        let session = session("1/sqrt(x-2)");
        let solutions = session.steps()
            .iter()
            .map(|step| step.solution.as_ref().map(|set| render(set, Default::default())))
            .collect::<Vec<_>>();
        assert_eq!(solutions, vec![Some("[2,+∞[".to_string()), Some("]2,+∞[".to_string())]);
        assert!(session.accumulated().is_empty());
    }

    #[test]
    fn domain_intersects_accumulated_solutions() {
        let config = TutorConfig::default();
        let mut session = session("1/sqrt(x-2)");
        session.answer_condition("≥ 0");
        session.answer_solution("x ≥ 2", &config, &mut Vec::new());
        assert_eq!(session.domain().map(|set| render(&set, Default::default())), Some("[2,+∞[".to_string()));

        session.answer_condition("≠ 0");
        session.answer_solution("je ne sais pas", &config, &mut Vec::new());
        assert_eq!(session.phase(), Phase::AwaitingDomain);
        assert_eq!(session.domain().map(|set| render(&set, Default::default())), Some("]2,+∞[".to_string()));
    }

    #[test]
    fn missed_condition_still_advances() {
        let mut session = session("log(x)");
        let reply = session.answer_condition("aucune idée");
        assert!(reply.starts_with("Pas tout à fait."));
        assert_eq!(session.phase(), Phase::AwaitingSolution);
        assert!(session.retry());
        assert_eq!(session.score(), Score { correct: 0, total: 1 });
    }

    #[test]
    fn solution_is_accumulated_not_the_reply() {
        let config = TutorConfig::default();
        let mut session = session("sqrt(x)");
        session.answer_condition("≥ 0");
        let reply = session.answer_solution("x > 5", &config, &mut Vec::new());
        assert!(reply.contains("L'ensemble des solutions est [0,+∞["));
        assert_eq!(session.accumulated().len(), 1);
        assert_eq!(session.accumulated()[0], session.steps()[0].solution);
        assert_eq!(session.phase(), Phase::AwaitingDomain);
        assert!(!session.retry());
    }

    #[test]
    fn chain_in_corrections() {
        let config = TutorConfig::default().into_builder().show_chain(true).build();
        let mut session = session("sqrt(x)");
        session.answer_condition("≥ 0");
        let reply = session.answer_solution("je ne sais pas", &config, &mut Vec::new());
        assert!(reply.contains("[0,+∞[ (c'est-à-dire x ≥ 0)"));
    }

    #[test]
    fn unsolvable_condition() {
        let (mut session, diagnostics) = Session::new("sqrt(x^3-2)".to_string(), extract("sqrt(x^3-2)").unwrap());
        assert_eq!(session.steps()[0].solution, None);
        assert_eq!(diagnostics.len(), 1);

        session.answer_condition("≥ 0");
        session.answer_solution("x ≥ 1", &TutorConfig::default(), &mut Vec::new());
        assert_eq!(session.accumulated().len(), 1);
        assert!(session.accumulated()[0].is_none());
        assert_eq!(session.domain(), None);
    }
}
