use domain_solve::notation::Notation;

/// The reset commands recognized by default.
pub const DEFAULT_RESET_COMMANDS: [&str; 4] = ["reset", "stop", "recommencer", "annuler"];

/// Options controlling how the tutor talks to the student.
#[derive(Debug, Clone, PartialEq)]
pub struct TutorConfig {
    /// How sets of real numbers are written in replies. See [`Notation`] for more information.
    pub notation: Notation,

    /// Short commands that end the current session, whatever its phase. They are compared with
    /// the whole reply, ignoring case and surrounding whitespace.
    pub reset_commands: Vec<String>,

    /// Whether sets are also written as inequalities on `x` in corrections and in the recap, as in
    /// `]2,+∞[ (c'est-à-dire x > 2)`.
    pub show_chain: bool,
}

impl Default for TutorConfig {
    fn default() -> Self {
        Self {
            notation: Notation::default(),
            reset_commands: DEFAULT_RESET_COMMANDS.iter().map(|command| command.to_string()).collect(),
            show_chain: false,
        }
    }
}

impl TutorConfig {
    /// Wraps the given [`TutorConfig`] into a builder for further customization.
    pub fn into_builder(self) -> TutorConfigBuilder {
        TutorConfigBuilder(self)
    }

    /// Returns true if the reply is one of the reset commands.
    pub fn is_reset_command(&self, reply: &str) -> bool {
        let reply = reply.trim()
            .trim_start_matches('/')
            .trim_end_matches(['.', '!'])
            .trim();
        self.reset_commands.iter().any(|command| command.eq_ignore_ascii_case(reply))
    }
}

/// A builder for [`TutorConfig`].
#[derive(Debug, Default, Clone, PartialEq)]
pub struct TutorConfigBuilder(TutorConfig);

impl TutorConfigBuilder {
    /// Creates a new builder with the default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the notation used to write sets. See [`Notation`] for more information.
    pub fn notation(mut self, notation: Notation) -> Self {
        self.0.notation = notation;
        self
    }

    /// Replaces the reset commands. See [`TutorConfig::reset_commands`] for more information.
    pub fn reset_commands<I, S>(mut self, commands: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.0.reset_commands = commands.into_iter().map(Into::into).collect();
        self
    }

    /// Sets whether sets are also written as inequalities. See [`TutorConfig::show_chain`] for
    /// more information.
    pub fn show_chain(mut self, show_chain: bool) -> Self {
        self.0.show_chain = show_chain;
        self
    }

    /// Builds the [`TutorConfig`] struct.
    pub fn build(self) -> TutorConfig {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn builder_overrides_defaults() {
        let config = TutorConfigBuilder::new()
            .notation(Notation::International)
            .reset_commands(["quit"])
            .show_chain(true)
            .build();
        assert_eq!(config.notation, Notation::International);
        assert_eq!(config.reset_commands, vec!["quit".to_string()]);
        assert!(config.show_chain);
    }

    #[test]
    fn reset_commands_are_lenient() {
        let config = TutorConfig::default();
        assert!(config.is_reset_command("  Recommencer. "));
        assert!(config.is_reset_command("/reset"));
        assert!(config.is_reset_command("STOP"));
        assert!(!config.is_reset_command("stop, je veux continuer"));
        assert!(!config.is_reset_command("f(x) = sqrt(x)"));
    }
}
